use arch::Reg;
use serde::Serialize;
use std::fmt;

/// 1-based source position of the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, col: usize) -> Self {
        Token {
            kind,
            pos: Pos { line, col },
        }
    }

    /// One or two hex digits, either case.
    pub fn hex(&self) -> Option<u8> {
        match &self.kind {
            TokenKind::Word(w) if is_hex(w) => u8::from_str_radix(w, 16).ok(),
            _ => None,
        }
    }

    pub fn reg(&self) -> Option<Reg> {
        match &self.kind {
            TokenKind::Word(w) => Reg::parse(w),
            _ => None,
        }
    }

    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w == word)
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::Newline
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Word(String),    // mnemonic, directive, register, number or symbol
    Label(String),   // `name:`, name only
    Colon,           // ':' with nothing before it
    Comma,           // ','
    LBracket,        // '['
    RBracket,        // ']'
    Char(String),    // raw `'x'`, possibly unterminated
    Text(String),    // raw `"xyz"`, possibly unterminated
    Comment(String), // text after ';'
    Newline,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            TokenKind::Word(w) => write!(f, "{w}"),
            TokenKind::Label(name) => write!(f, "{name}:"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Char(raw) | TokenKind::Text(raw) => write!(f, "{raw}"),
            TokenKind::Comment(text) => write!(f, ";{text}"),
            TokenKind::Newline => Ok(()),
        }
    }
}

pub fn is_hex(s: &str) -> bool {
    (1..=2).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}
