use crate::shape::Shape;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Addressing-mode group. Every mnemonic belongs to exactly one group, chosen
/// by the sum of the shape bits of all its variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Group {
    /// `MNEM`
    Implied = 0,
    /// `MNEM ADDR`
    Addr = 1,
    /// `MNEM REG`
    Reg = 2,
    /// `MNEM symbol`, relative target
    Offset = 3,
    /// `MNEM REG,CONST` / `REG,REG` / `REG,[ADDR]`
    Compare = 4,
    /// the compare forms plus `REG,[REG]`, `[ADDR],REG` and `[REG],REG`
    Move = 5,
    /// `MNEM REG,CONST` / `REG,REG`
    Arith = 6,
    /// `MNEM REG` / `[REG]`
    RegOrRegInd = 7,
    /// `MNEM symbol`, absolute target
    Absolute = 8,
    /// `MNEM REG` / `[ADDR]`
    RegOrAddrInd = 9,
    /// `MNEM [ADDR]`
    AddrInd = 10,
    /// `MNEM [REG]`
    RegInd = 11,
    /// `MNEM [REG],CONST`
    RegIndConst = 12,
    /// `MNEM REG,REG`
    RegReg = 13,
}

impl Group {
    pub fn signature(self) -> u32 {
        match self {
            Group::Implied => 0,
            Group::Addr => 2,
            Group::Reg => 8,
            Group::Offset => 1,
            Group::Compare => 224,
            Group::Move => 2016,
            Group::Arith => 96,
            Group::RegOrRegInd => 24,
            Group::Absolute => 2048,
            Group::RegOrAddrInd => 12,
            Group::AddrInd => 4,
            Group::RegInd => 16,
            Group::RegIndConst => 4096,
            Group::RegReg => 64,
        }
    }

    pub fn from_signature(signature: u32) -> Option<Self> {
        Group::iter().find(|g| g.signature() == signature)
    }

    pub fn id(self) -> u8 {
        self.into()
    }

    /// Operand shapes accepted by this group, in bit order.
    pub fn shapes(self) -> Vec<Shape> {
        let signature = self.signature();
        if signature == 0 {
            return vec![Shape::Implied];
        }
        Shape::iter()
            .filter(|shape| shape.bit() & signature != 0)
            .collect()
    }

    /// Whether the opcode depends on the operands found on the line.
    pub fn has_variants(self) -> bool {
        self.shapes().len() > 1
    }
}
