use ayla_core::{Diagnostic, Severity};
use std::path::Path;
use tracing::info;

pub fn check_file(path: &Path) -> ayla_core::Result<Vec<Diagnostic>> {
    let text = std::fs::read_to_string(path)?;
    let diagnostics = ayla_core::diagnostics(&text);
    info!(path = %path.display(), count = diagnostics.len(), "checked");
    Ok(diagnostics)
}

/// `file:line:column: severity: message`, one-based, or a JSON array.
pub fn render_diagnostics(
    path: &Path,
    diagnostics: &[Diagnostic],
    json: bool,
) -> ayla_core::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(diagnostics)?);
    }
    if diagnostics.is_empty() {
        return Ok(format!("{}: no problems found", path.display()));
    }
    let lines: Vec<String> = diagnostics
        .iter()
        .map(|d| {
            let severity = match d.severity {
                Severity::Error => "error",
            };
            format!(
                "{}:{}:{}: {severity}: {}",
                path.display(),
                d.range.start.line + 1,
                d.range.start.character + 1,
                d.message
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
