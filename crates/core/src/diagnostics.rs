//! Diagnostics for a whole document: syntax errors first, then declaration
//! conflicts.

use crate::model::{Diagnostic, Severity};
use crate::scope::{DeclarationConflict, build_symbols};
use ayla_syntax::parse;

pub fn diagnostics(text: &str) -> Vec<Diagnostic> {
    let (program, errors) = parse(text);
    let table = build_symbols(&program);

    let mut out: Vec<Diagnostic> = errors.iter().map(Diagnostic::from).collect();
    out.extend(table.conflicts().iter().map(conflict_diagnostic));
    tracing::debug!(
        syntax = errors.len(),
        conflicts = table.conflicts().len(),
        "computed diagnostics"
    );
    out
}

fn conflict_diagnostic(conflict: &DeclarationConflict) -> Diagnostic {
    let message = match conflict.previous {
        Some(previous) => format!(
            "`{}` is already declared in this scope (line {})",
            conflict.name,
            previous.start.line + 1
        ),
        None => format!("`{}` is a builtin type and cannot be redeclared", conflict.name),
    };
    Diagnostic {
        range: conflict.range,
        severity: Severity::Error,
        message,
    }
}
