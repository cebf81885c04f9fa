use num_enum::IntoPrimitive;
use strum::{Display, EnumIter, EnumString};

/// Operand shape of one instruction variant, spelled the way the instruction
/// table spells it. `|X|` is a memory indirection, written `[X]` in source.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Shape {
    #[strum(serialize = "")]
    Implied,
    #[strum(serialize = "OFFSET")]
    Offset,
    #[strum(serialize = "ADDR")]
    Addr,
    #[strum(serialize = "|ADDR|")]
    AddrInd,
    #[strum(serialize = "REG")]
    Reg,
    #[strum(serialize = "|REG|")]
    RegInd,
    #[strum(serialize = "REG,CONST")]
    RegConst,
    #[strum(serialize = "REG,REG")]
    RegReg,
    #[strum(serialize = "REG,|ADDR|")]
    RegAddrInd,
    #[strum(serialize = "REG,|REG|")]
    RegRegInd,
    #[strum(serialize = "|REG|,REG")]
    RegIndReg,
    #[strum(serialize = "|ADDR|,REG")]
    AddrIndReg,
    #[strum(serialize = "ABSOLUTE")]
    Absolute,
    #[strum(serialize = "|REG|,CONST")]
    RegIndConst,
}

impl Shape {
    /// Signature bit contributed by one variant of this shape.
    pub fn bit(self) -> u32 {
        match self {
            Shape::Implied => 0,
            other => 1 << (u8::from(other) - 1),
        }
    }

    pub fn parse(pattern: &str) -> Option<Self> {
        let compact: String = pattern.chars().filter(|c| !c.is_whitespace()).collect();
        compact.parse::<Self>().ok()
    }
}
