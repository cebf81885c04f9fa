use crate::token::{Token, TokenKind};
use arch::{Group, Shape};

/// Token class expected at one operand position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Class {
    Hex,
    Reg,
    LBracket,
    RBracket,
    Comma,
    Offset,
    Absolute,
}

impl Class {
    pub fn accepts(self, token: &Token) -> bool {
        match self {
            Class::Hex => token.hex().is_some(),
            Class::Reg => token.reg().is_some(),
            Class::LBracket => token.kind == TokenKind::LBracket,
            Class::RBracket => token.kind == TokenKind::RBracket,
            Class::Comma => token.kind == TokenKind::Comma,
            // Symbol names are validated by the checker
            Class::Offset | Class::Absolute => matches!(
                token.kind,
                TokenKind::Word(_)
                    | TokenKind::Label(_)
                    | TokenKind::Colon
                    | TokenKind::Char(_)
                    | TokenKind::Text(_)
            ),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Class::Hex => "hexadecimal number (range 00..FF)",
            Class::Reg => "register",
            Class::LBracket => "'['",
            Class::RBracket => "']'",
            Class::Comma => "comma",
            Class::Offset | Class::Absolute => "symbol",
        }
    }
}

/// Operand tokens of one shape, left to right.
pub fn sequence(shape: Shape) -> &'static [Class] {
    use Class::*;
    match shape {
        Shape::Implied => &[],
        Shape::Offset => &[Offset],
        Shape::Addr => &[Hex],
        Shape::AddrInd => &[LBracket, Hex, RBracket],
        Shape::Reg => &[Reg],
        Shape::RegInd => &[LBracket, Reg, RBracket],
        Shape::RegConst => &[Reg, Comma, Hex],
        Shape::RegReg => &[Reg, Comma, Reg],
        Shape::RegAddrInd => &[Reg, Comma, LBracket, Hex, RBracket],
        Shape::RegRegInd => &[Reg, Comma, LBracket, Reg, RBracket],
        Shape::RegIndReg => &[LBracket, Reg, RBracket, Comma, Reg],
        Shape::AddrIndReg => &[LBracket, Hex, RBracket, Comma, Reg],
        Shape::Absolute => &[Absolute],
        Shape::RegIndConst => &[LBracket, Reg, RBracket, Comma, Hex],
    }
}

/// `a`, `a or b`, `a, b or c`
pub fn describe(classes: &[Class]) -> String {
    let mut names: Vec<&str> = classes.iter().map(|c| c.describe()).collect();
    names.dedup();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, init)) => format!("{} or {}", init.join(", "), last),
    }
}

/// Walks the shapes of one group in parallel, one token at a time, with no
/// backtracking. No shape's sequence is a prefix of another in the same group,
/// so at most one candidate is complete at any step.
pub struct Matcher {
    live: Vec<(Shape, &'static [Class])>,
    pos: usize,
}

impl Matcher {
    pub fn new(group: Group) -> Self {
        Self {
            live: group
                .shapes()
                .into_iter()
                .map(|shape| (shape, sequence(shape)))
                .collect(),
            pos: 0,
        }
    }

    pub fn complete(&self) -> Option<Shape> {
        self.live
            .iter()
            .find(|(_, seq)| seq.len() == self.pos)
            .map(|(shape, _)| *shape)
    }

    /// Classes acceptable at the current position, sorted and deduplicated.
    pub fn expected(&self) -> Vec<Class> {
        let mut classes: Vec<Class> = self
            .live
            .iter()
            .filter_map(|(_, seq)| seq.get(self.pos).copied())
            .collect();
        classes.sort();
        classes.dedup();
        classes
    }

    pub fn advance(&mut self, class: Class) {
        let pos = self.pos;
        self.live.retain(|(_, seq)| seq.get(pos) == Some(&class));
        self.pos += 1;
    }
}
