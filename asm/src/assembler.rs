use crate::checker::{Checker, Pass1};
use crate::error::{Diag, Error};
use crate::label::{LabelEntry, Labels};
use crate::lexer::Lexer;
use crate::memory::{Memory, RAM_SIZE};
use crate::resolve::resolve;
use crate::token::Token;
use arch::Catalog;
use serde::Serialize;

/// Everything one successful run produces.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub tokens: Vec<Token>,
    pub memory: Memory,
    pub labels: Labels,
    /// Source line (1-based) that wrote each byte, `None` where nothing was written.
    pub lines: Vec<Option<usize>>,
}

/// Lex, check and encode, then resolve labels. Stops at the first error.
pub fn assemble(source: &str, catalog: &Catalog) -> Result<Assembly, Diag> {
    let tokens = Lexer::new(source).parse();
    tracing::trace!("{} tokens", tokens.len());

    tracing::trace!("starting pass 1");
    let Pass1 {
        mut memory,
        labels,
        lines,
    } = Checker::new(catalog, &tokens).run()?;

    tracing::trace!("starting pass 2");
    resolve(&mut memory, &labels)?;
    tracing::debug!("labels: {}", labels.len());

    Ok(Assembly {
        tokens,
        memory,
        labels,
        lines,
    })
}

impl Assembly {
    pub fn image(&self) -> &[u8; RAM_SIZE] {
        self.memory.ram()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Artifacts<'a> {
            ram: &'a [u8],
            used: &'a [bool],
            lines: &'a [Option<usize>],
            labels: &'a [LabelEntry],
        }
        serde_json::to_string_pretty(&Artifacts {
            ram: self.memory.ram(),
            used: self.memory.used(),
            lines: &self.lines,
            labels: self.labels.entries(),
        })
    }
}

/// Read a source file with its line endings normalized to CR+LF.
pub fn load_source(path: &str) -> Result<String, Error> {
    let text =
        std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.to_string(), e))?;
    Ok(normalize_line_endings(&text))
}

/// Lines end at CR; LF-only or CR-only input is converted to CR+LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\r\n")
}
