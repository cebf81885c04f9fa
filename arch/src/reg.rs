use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::EnumString;

/// General purpose registers. The register code written into memory is the
/// discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, EnumString)]
#[repr(u8)]
pub enum Reg {
    AL,
    BL,
    CL,
    DL,
    SP,
}

impl Reg {
    /// Register names are matched exactly: `al` is not a register.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}
