use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Definition,
    Relative,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub name: String,
    pub role: Role,
    /// Definitions: the labelled address. References: the operand byte.
    pub address: usize,
    pub line: usize,
}

impl LabelEntry {
    /// Names compare case-insensitively.
    pub fn key(&self) -> String {
        self.name.to_uppercase()
    }

    pub fn is_reference(&self) -> bool {
        self.role != Role::Definition
    }
}

/// Every label definition and symbol reference of one translation unit, in
/// source order.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    entries: Vec<LabelEntry>,
    defined: IndexMap<String, usize>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains_key(&name.to_uppercase())
    }

    /// Caller checks `is_defined` first; a redefinition keeps the first entry.
    pub fn define(&mut self, name: &str, address: usize, line: usize) {
        let idx = self.push(name, Role::Definition, address, line);
        self.defined.entry(name.to_uppercase()).or_insert(idx);
    }

    pub fn refer(&mut self, name: &str, role: Role, address: usize, line: usize) {
        debug_assert!(role != Role::Definition);
        self.push(name, role, address, line);
    }

    fn push(&mut self, name: &str, role: Role, address: usize, line: usize) -> usize {
        self.entries.push(LabelEntry {
            name: name.to_string(),
            role,
            address,
            line,
        });
        self.entries.len() - 1
    }

    pub fn address(&self, name: &str) -> Option<usize> {
        self.defined
            .get(&name.to_uppercase())
            .map(|&idx| self.entries[idx].address)
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn definitions(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries.iter().filter(|e| e.role == Role::Definition)
    }

    /// References with their arena index.
    pub fn references(&self) -> impl Iterator<Item = (usize, &LabelEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.is_reference())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
