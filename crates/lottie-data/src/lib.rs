pub mod json;
pub mod model;
pub mod reader;

pub use reader::{JsonTokenReader, ReaderError, TokenKind, TokenReader};
