//! Semantic core of the Ayla language server: scopes, symbols, position
//! lookup, type inference and the hover/definition/diagnostic queries built
//! on them.

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod inference;
pub mod locate;
pub mod logging;
pub mod model;
pub mod query;
pub mod scope;

pub use config::Config;
pub use diagnostics::diagnostics;
pub use document::{Document, DocumentStore};
pub use error::{AnalysisError, Result};
pub use model::{Diagnostic, HoverInfo, Position, Range, Severity};
pub use query::{definition, hover};
