use crate::error::{CharLiteral, Diag, Error, StringLiteral};
use crate::grammar::{self, Class, Matcher};
use crate::label::{Labels, Role};
use crate::memory::{Memory, RAM_SIZE};
use crate::token::{is_hex, Token, TokenKind};
use arch::{Catalog, Group, Shape, END};

const INVALID_CHARS: &str = "@|§°ç~<>+\"*%&/()=?^'-.{}äöü!ÄÖÜ$Ł";

/// Result of pass 1: the image with placeholders still in symbol operands.
#[derive(Debug, Clone)]
pub struct Pass1 {
    pub memory: Memory,
    pub labels: Labels,
    /// Source line that wrote each byte.
    pub lines: Vec<Option<usize>>,
}

/// Pass 1: syntax check and encode, statement by statement, stopping at the
/// first error.
pub struct Checker<'a> {
    catalog: &'a Catalog,
    tokens: &'a [Token],
    idx: usize,
    line: usize,
    memory: Memory,
    labels: Labels,
    lines: Vec<Option<usize>>,
    labels_on_line: usize,
    mnemonics_on_line: usize,
}

impl<'a> Checker<'a> {
    pub fn new(catalog: &'a Catalog, tokens: &'a [Token]) -> Self {
        Self {
            catalog,
            tokens,
            idx: 0,
            line: 1,
            memory: Memory::new(),
            labels: Labels::new(),
            lines: vec![None; RAM_SIZE],
            labels_on_line: 0,
            mnemonics_on_line: 0,
        }
    }

    pub fn run(mut self) -> Result<Pass1, Diag> {
        while let Some(token) = self.next() {
            match &token.kind {
                TokenKind::Comment(_) => {}
                TokenKind::Newline => {
                    self.labels_on_line = 0;
                    self.mnemonics_on_line = 0;
                }
                TokenKind::Colon => {
                    let error = match self.labels_on_line {
                        0 => Error::StrayColon,
                        _ => Error::StrayColonAfterLabel,
                    };
                    return Err(self.fail(error));
                }
                TokenKind::Label(name) => self.label(name)?,
                TokenKind::Word(w) if w == "ORG" => self.org()?,
                TokenKind::Word(w) if w == "DB" => self.db()?,
                TokenKind::Word(w) if w == END => {
                    self.end()?;
                    return Ok(self.finish());
                }
                TokenKind::Word(w) => self.mnemonic(w)?,
                _ => return Err(self.unexpected("mnemonic", token)),
            }
        }
        Err(self.fail(Error::MissingEnd))
    }

    fn finish(self) -> Pass1 {
        tracing::debug!("pass 1 done, cursor at {:02X}", self.memory.cursor());
        Pass1 {
            memory: self.memory,
            labels: self.labels,
            lines: self.lines,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Checker<'a> {
    /// Consume the next token. The stream always ends with a newline, but a
    /// truncated stream reads as end of line.
    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.idx)?;
        self.idx += 1;
        self.line = token.pos.line;
        Some(token)
    }

    fn next_or_eol(&mut self) -> Token {
        match self.next() {
            Some(token) => token.clone(),
            None => Token::new(TokenKind::Newline, self.line, 0),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.idx)
    }

    fn fail(&self, error: Error) -> Diag {
        Diag::new(self.line, error)
    }

    fn unexpected(&self, expected: &str, token: &Token) -> Diag {
        let got = match token.kind {
            TokenKind::Newline => None,
            _ => Some(token.to_string()),
        };
        Diag::new(
            token.pos.line,
            Error::UnexpectedToken {
                expected: expected.to_string(),
                got,
            },
        )
    }

    fn write(&mut self, byte: u8) -> Result<usize, Diag> {
        let addr = self.memory.write(byte).map_err(|e| self.fail(e))?;
        self.lines[addr] = Some(self.line);
        tracing::trace!("{:02X}: {:02X}", addr, byte);
        Ok(addr)
    }

    /// A statement ends with a newline or a trailing comment. Neither is consumed.
    fn end_of_statement(&self) -> Result<(), Diag> {
        match self.peek() {
            None => Ok(()),
            Some(token) => match token.kind {
                TokenKind::Newline | TokenKind::Comment(_) => Ok(()),
                _ => Err(self.unexpected("a comment", token)),
            },
        }
    }
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

impl<'a> Checker<'a> {
    fn label(&mut self, name: &str) -> Result<(), Diag> {
        if is_hex(name) {
            return Err(self.fail(Error::LabelMustNotBeHex(name.to_string())));
        }
        if let Some(ch) = invalid_char(name, false) {
            return Err(self.fail(Error::InvalidCharacter(ch)));
        }
        if self.labels.is_defined(name) {
            return Err(self.fail(Error::DuplicateLabel(name.to_uppercase())));
        }
        if self.labels_on_line > 0 {
            return Err(self.fail(Error::OnlyOneLabelPerLine));
        }
        self.labels.define(name, self.memory.cursor(), self.line);
        self.labels_on_line += 1;
        Ok(())
    }

    fn org(&mut self) -> Result<(), Diag> {
        let token = self.next_or_eol();
        let Some(addr) = token.hex() else {
            return Err(self.unexpected(&grammar::describe(&[Class::Hex]), &token));
        };
        self.memory.org(addr);
        self.end_of_statement()
    }

    fn db(&mut self) -> Result<(), Diag> {
        let token = self.next_or_eol();
        match &token.kind {
            TokenKind::Char(raw) => self.db_char(raw)?,
            TokenKind::Text(raw) => self.db_text(raw)?,
            _ => match token.hex() {
                Some(byte) => {
                    self.write(byte)?;
                }
                None => {
                    let expected = "hexadecimal number (range 00..FF), a quote (') or double quote (\")";
                    return Err(self.unexpected(expected, &token));
                }
            },
        }
        self.end_of_statement()
    }

    /// `'c'`: the character is written before the closing quote is checked.
    fn db_char(&mut self, raw: &str) -> Result<(), Diag> {
        let chars: Vec<char> = raw.chars().collect();
        if chars.len() != 3 {
            return Err(self.fail(CharLiteral::Length(raw.to_string()).into()));
        }
        let ch = chars[1];
        if !is_printable(ch) {
            return Err(self.fail(CharLiteral::NotPrintable(raw.to_string()).into()));
        }
        self.write(ch as u8)?;
        if chars[2] != '\'' {
            return Err(self.fail(CharLiteral::Unterminated(chars[2]).into()));
        }
        Ok(())
    }

    fn db_text(&mut self, raw: &str) -> Result<(), Diag> {
        let chars: Vec<char> = raw.chars().collect();
        if raw == "\"\"" {
            return Err(self.fail(StringLiteral::Empty.into()));
        }
        let last = chars.last().copied().unwrap_or('"');
        if chars.len() < 2 || last != '"' {
            return Err(self.fail(StringLiteral::Unterminated(last).into()));
        }
        if let Some(&ch) = chars.iter().find(|&&c| !is_printable(c)) {
            return Err(self.fail(StringLiteral::NotPrintable(ch).into()));
        }
        for &ch in &chars[1..chars.len() - 1] {
            self.write(ch as u8)?;
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), Diag> {
        let opcode = self.catalog.placeholder(END).unwrap_or(0x00);
        self.write(opcode)?;
        Ok(())
    }

    fn mnemonic(&mut self, mnemonic: &str) -> Result<(), Diag> {
        let Some(group) = self.catalog.group(mnemonic) else {
            return Err(self.fail(Error::UnexpectedToken {
                expected: "mnemonic".to_string(),
                got: Some(mnemonic.to_string()),
            }));
        };
        if self.mnemonics_on_line > 0 {
            return Err(self.fail(Error::OnlyOneMnemonicPerLine));
        }

        let placeholder = self
            .catalog
            .placeholder(mnemonic)
            .ok_or_else(|| self.fail(Error::UnknownVariant(mnemonic.to_string())))?;
        let opcode_addr = self.write(placeholder)?;
        self.mnemonics_on_line += 1;

        let shape = self.operands(group)?;
        self.end_of_statement()?;

        if group.has_variants() {
            let opcode = self.catalog.opcode(mnemonic, shape).ok_or_else(|| {
                self.fail(Error::UnknownVariant(format!("{mnemonic} {shape}")))
            })?;
            self.memory.patch(opcode_addr, opcode);
        }
        Ok(())
    }

    /// Match the operands of `group`, writing each operand byte as soon as its
    /// token is accepted. Returns the shape found.
    fn operands(&mut self, group: Group) -> Result<Shape, Diag> {
        let mut matcher = Matcher::new(group);
        loop {
            if let Some(shape) = matcher.complete() {
                return Ok(shape);
            }
            let expected = matcher.expected();
            let token = self.next_or_eol();
            let Some(class) = expected.iter().copied().find(|c| c.accepts(&token)) else {
                return Err(self.unexpected(&grammar::describe(&expected), &token));
            };
            match class {
                Class::Hex => {
                    if let Some(byte) = token.hex() {
                        self.write(byte)?;
                    }
                }
                Class::Reg => {
                    if let Some(reg) = token.reg() {
                        self.write(reg.code())?;
                    }
                }
                Class::Offset => self.symbol(&token, Role::Relative)?,
                Class::Absolute => self.symbol(&token, Role::Absolute)?,
                Class::LBracket | Class::RBracket | Class::Comma => {}
            }
            matcher.advance(class);
        }
    }

    /// Jump target. The placeholder byte is the low byte of its own address.
    fn symbol(&mut self, token: &Token, role: Role) -> Result<(), Diag> {
        let name = token.to_string();
        if (1..=2).contains(&name.len()) && name.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F')) {
            return Err(self.fail(Error::LabelMustNotBeHex(name)));
        }
        if let Some(ch) = invalid_char(&name, true) {
            return Err(self.fail(Error::InvalidCharacter(ch)));
        }
        let placeholder = (self.memory.cursor() & 0xFF) as u8;
        let addr = self.write(placeholder)?;
        self.labels.refer(&name, role, addr, self.line);
        Ok(())
    }
}

/// First reserved character found, in list order, then the first control
/// character. Symbols also reject ':'.
fn invalid_char(name: &str, symbol: bool) -> Option<char> {
    let extra = if symbol { Some(':') } else { None };
    INVALID_CHARS
        .chars()
        .chain(extra)
        .find(|&c| name.contains(c))
        .or_else(|| name.chars().find(|c| c.is_control()))
}

fn is_printable(ch: char) -> bool {
    (' '..='\x7F').contains(&ch)
}
