//! Lexer, syntax tree and parser for the Ayla language.
//!
//! The single entry point for analysis is [`parse`], which always produces a
//! tree (possibly partial) together with the structured errors found.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::ParseError;
pub use parser::{Parser, parse};
