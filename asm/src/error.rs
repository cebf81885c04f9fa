use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected {expected}{}", got_suffix(.got))]
    UnexpectedToken {
        expected: String,
        got: Option<String>,
    },

    #[error("Expected label, mnemonic, directive or comment, got a ':'")]
    StrayColon,

    #[error("Expected mnemonic, directive or comment, got a ':'")]
    StrayColonAfterLabel,

    #[error("Duplicate (case insensitive) label names not allowed: '{0}'")]
    DuplicateLabel(String),

    #[error("Label must not be hexadecimal number, found: {0}")]
    LabelMustNotBeHex(String),

    #[error("Invalid character in label or symbol, found '{0}'")]
    InvalidCharacter(char),

    #[error("Only one label allowed per line")]
    OnlyOneLabelPerLine,

    #[error("Only one mnemonic allowed per line")]
    OnlyOneMnemonicPerLine,

    #[error("END is missing")]
    MissingEnd,

    #[error("RAM space exceeded")]
    RamSpaceExceeded,

    #[error("Duplicate RAM allocation at address {0:02X}")]
    DuplicateRamWrite(u8),

    #[error(transparent)]
    MalformedCharacterLiteral(#[from] CharLiteral),

    #[error(transparent)]
    MalformedStringLiteral(#[from] StringLiteral),

    #[error("Cannot find label for symbol '{0}'")]
    UnresolvedSymbol(String),

    #[error("Label '{label}' not reachable (displacement {displacement})")]
    DisplacementOutOfRange { label: String, displacement: isize },

    #[error("Instruction table has no `{0}` variant for these operands")]
    UnknownVariant(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

fn got_suffix(got: &Option<String>) -> String {
    got.as_ref()
        .map(|tok| format!(", got '{tok}'"))
        .unwrap_or_default()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CharLiteral {
    #[error("Expected character enclosed in ', got {0}")]
    Length(String),

    #[error("Invalid character '{0}'")]
    NotPrintable(String),

    #[error("Expected closing ', got '{0}'")]
    Unterminated(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StringLiteral {
    #[error("Empty strings not allowed")]
    Empty,

    #[error("Expected closing \", got '{0}'")]
    Unterminated(char),

    #[error("Invalid character in string, found '{0}'")]
    NotPrintable(char),
}

/// The single diagnostic a failed run produces.
#[derive(Error, Debug)]
#[error("Line {line}: {error}")]
pub struct Diag {
    pub line: usize,
    #[source]
    pub error: Error,
}

impl Diag {
    pub fn new(line: usize, error: Error) -> Self {
        Diag { line, error }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, source: &str) {
        cprintln!("<red,bold>error</>: {}", self.error);

        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line);
        cprintln!("      <blue>|</>");

        let line_content = source
            .lines()
            .nth(self.line.saturating_sub(1))
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", self.line, line_content);
        cprintln!("      <blue>|</>");
    }
}
