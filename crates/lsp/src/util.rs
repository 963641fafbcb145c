//! Conversions between the analysis models and the protocol types.

use tower_lsp::lsp_types::{self as lsp, DiagnosticSeverity};

pub fn to_lsp_position(position: ayla_core::Position) -> lsp::Position {
    lsp::Position::new(position.line, position.character)
}

pub fn from_lsp_position(position: lsp::Position) -> ayla_core::Position {
    ayla_core::Position::new(position.line, position.character)
}

pub fn to_lsp_range(range: ayla_core::Range) -> lsp::Range {
    lsp::Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

pub fn to_lsp_diagnostic(diagnostic: &ayla_core::Diagnostic) -> lsp::Diagnostic {
    let severity = match diagnostic.severity {
        ayla_core::Severity::Error => DiagnosticSeverity::ERROR,
    };
    lsp::Diagnostic {
        range: to_lsp_range(diagnostic.range),
        severity: Some(severity),
        source: Some("ayla".to_string()),
        message: diagnostic.message.clone(),
        ..lsp::Diagnostic::default()
    }
}
