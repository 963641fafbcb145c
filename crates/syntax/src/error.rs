use crate::token::{Token, utf16_len};
use thiserror::Error;

/// A syntax error anchored at the offending token.
///
/// `line` and `column` are one-based; `column` is the first character of
/// `token`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub token: String,
}

impl ParseError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: token.line,
            column: token.start_column(),
            token: token.literal.clone(),
        }
    }

    /// Width of the offending token in UTF-16 code units; zero at end of file.
    pub fn token_width(&self) -> u32 {
        utf16_len(&self.token)
    }
}

pub type PResult<T> = std::result::Result<T, ParseError>;
