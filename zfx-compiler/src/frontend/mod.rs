//! Textual symbolic IR reader.

pub mod lexer;
mod parser;

pub use parser::parse_ir;
