use thiserror::Error;

/// The instruction table itself is broken. Nothing can be assembled with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Instruction table line {line}: expected `entry;opcode;pattern`")]
    MissingField { line: usize },

    #[error("Instruction table line {line}: cannot parse opcode `{opcode}`")]
    BadOpcode { line: usize, opcode: String },

    #[error("Instruction table line {line}: unknown operand pattern `{pattern}`")]
    UnknownPattern { line: usize, pattern: String },

    #[error("Malformed instruction table: `{mnemonic}` has unknown signature {signature}")]
    MalformedSignature { mnemonic: String, signature: u32 },
}
