use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// Splits source text into tokens. Lines end at CR; LF is ignored. Never
/// fails: malformed literals come out as ordinary tokens and are rejected by
/// the checker.
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
    pending: String,
    start: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            iter: code.chars().peekable(),
            line: 1,
            col: 1,
            pending: String::new(),
            start: 1,
            tokens: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Vec<Token> {
        while let Some(ch) = self.consume() {
            match ch {
                '\r' => {
                    self.flush();
                    self.newline();
                }
                '\n' => {}
                ' ' => {
                    self.flush();
                    self.col += 1;
                }
                ':' => self.colon(),
                ',' => self.single(TokenKind::Comma),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '\'' | '"' => self.quoted(ch),
                ';' => self.comment(),
                _ => {
                    if self.pending.is_empty() {
                        self.start = self.col;
                    }
                    self.pending.push(ch);
                    self.col += 1;
                }
            }
        }
        self.flush();

        // Every logical line ends with a newline token
        if matches!(self.tokens.last(), Some(last) if !last.is_newline()) {
            self.push(TokenKind::Newline, self.col);
        }
        self.tokens
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn consume(&mut self) -> Option<char> {
        self.iter.next()
    }

    fn push(&mut self, kind: TokenKind, col: usize) {
        self.tokens.push(Token::new(kind, self.line, col));
    }

    /// Emit the pending word, if any.
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let word = std::mem::take(&mut self.pending);
            self.push(TokenKind::Word(word), self.start);
        }
    }

    fn newline(&mut self) {
        self.push(TokenKind::Newline, self.col);
        self.line += 1;
        self.col = 1;
    }

    fn single(&mut self, kind: TokenKind) {
        self.flush();
        self.push(kind, self.col);
        self.col += 1;
    }

    fn colon(&mut self) {
        if self.pending.is_empty() {
            self.push(TokenKind::Colon, self.col);
        } else {
            let name = std::mem::take(&mut self.pending);
            self.push(TokenKind::Label(name), self.start);
        }
        self.col += 1;
    }

    /// Literal up to and including the closing quote, or up to end of line.
    fn quoted(&mut self, quote: char) {
        self.flush();
        let start = self.col;
        let mut raw = String::from(quote);
        self.col += 1;

        let literal = |raw: String| match quote {
            '\'' => TokenKind::Char(raw),
            _ => TokenKind::Text(raw),
        };

        while let Some(ch) = self.consume() {
            match ch {
                '\r' => {
                    self.push(literal(raw), start);
                    self.newline();
                    return;
                }
                '\n' => {}
                _ => {
                    raw.push(ch);
                    self.col += 1;
                    if ch == quote {
                        self.push(literal(raw), start);
                        return;
                    }
                }
            }
        }
        self.push(literal(raw), start);
    }

    /// Comment text runs up to, not including, the CR.
    fn comment(&mut self) {
        self.flush();
        let start = self.col;
        self.col += 1;

        let mut text = String::new();
        while let Some(&ch) = self.iter.peek() {
            if ch == '\r' {
                break;
            }
            self.consume();
            if ch != '\n' {
                text.push(ch);
                self.col += 1;
            }
        }
        self.push(TokenKind::Comment(text), start);
    }
}
