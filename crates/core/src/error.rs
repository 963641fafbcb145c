use crate::model::Range;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{name}` is already declared in this scope")]
    DuplicateName { name: SmolStr, existing: Option<Range> },
    #[error("unknown document: {0}")]
    UnknownDocument(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
