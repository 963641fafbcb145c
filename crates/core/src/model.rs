//! Editor-facing data models: zero-based positions, ranges and diagnostics.
//!
//! These mirror the shapes of the editor protocol without depending on it, so
//! the analysis layer stays usable from the CLI and from tests.

use ayla_syntax::ParseError;
use ayla_syntax::ast::{Ident, Pos};
use serde::{Deserialize, Serialize};

/// Zero-based line and UTF-16 character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Start of a token whose one-based trailing position is `pos`.
    pub fn token_start(pos: Pos, width: u32) -> Self {
        Self::new(
            pos.line.saturating_sub(1),
            pos.column.saturating_sub(1).saturating_sub(width),
        )
    }

    /// End (exclusive) of a token whose one-based trailing position is `pos`.
    pub fn token_end(pos: Pos) -> Self {
        Self::new(pos.line.saturating_sub(1), pos.column.saturating_sub(1))
    }
}

/// Half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The exact source span of an identifier.
    pub fn of_ident(ident: &Ident) -> Self {
        Self::new(
            Position::token_start(ident.pos, ident.width()),
            Position::token_end(ident.pos),
        )
    }

    /// From the start of one token to the end of another.
    pub fn spanning(first: Pos, first_width: u32, last: Pos) -> Self {
        Self::new(
            Position::token_start(first, first_width),
            Position::token_end(last),
        )
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub message: String,
}

impl From<&ParseError> for Diagnostic {
    /// One-based line/column of the offending token, widened to at least one
    /// character so zero-width tokens (end of file) stay visible.
    fn from(err: &ParseError) -> Self {
        let start = Position::new(err.line.saturating_sub(1), err.column.saturating_sub(1));
        let end = Position::new(start.line, start.character + err.token_width().max(1));
        Self {
            range: Range::new(start, end),
            severity: Severity::Error,
            message: err.to_string(),
        }
    }
}

/// Rendered hover for a cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverInfo {
    /// Markdown contents.
    pub contents: String,
    /// Span of the identifier under the cursor.
    pub range: Range,
}
