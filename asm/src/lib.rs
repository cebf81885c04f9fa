pub mod assembler;
pub mod checker;
pub mod error;
pub mod grammar;
pub mod label;
pub mod lexer;
pub mod listing;
pub mod memory;
pub mod resolve;
pub mod token;

pub use assembler::{assemble, load_source, normalize_line_endings, Assembly};
pub use error::{Diag, Error};
pub use memory::Memory;
