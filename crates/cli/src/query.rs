use ayla_core::{HoverInfo, Position, Range};
use serde::Serialize;
use std::path::Path;

/// Editors and terminals count from one.
fn position(line: u32, column: u32) -> Position {
    Position::new(line.saturating_sub(1), column.saturating_sub(1))
}

pub fn hover_at(path: &Path, line: u32, column: u32) -> ayla_core::Result<Option<HoverInfo>> {
    let text = std::fs::read_to_string(path)?;
    Ok(ayla_core::hover(&text, position(line, column)))
}

pub fn definition_at(path: &Path, line: u32, column: u32) -> ayla_core::Result<Option<Range>> {
    let text = std::fs::read_to_string(path)?;
    Ok(ayla_core::definition(&text, position(line, column)))
}

pub fn render_hover(info: Option<&HoverInfo>, json: bool) -> ayla_core::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&info)?);
    }
    Ok(match info {
        Some(info) => info.contents.clone(),
        None => "no hover information".to_string(),
    })
}

#[derive(Serialize)]
struct DefinitionOutput<'p> {
    path: &'p str,
    range: Range,
}

pub fn render_definition(
    path: &Path,
    range: Option<Range>,
    json: bool,
) -> ayla_core::Result<String> {
    let display = path.to_string_lossy();
    if json {
        let output = range.map(|range| DefinitionOutput {
            path: &display,
            range,
        });
        return Ok(serde_json::to_string_pretty(&output)?);
    }
    Ok(match range {
        Some(range) => format!(
            "{}:{}:{}",
            display,
            range.start.line + 1,
            range.start.character + 1
        ),
        None => "no definition found".to_string(),
    })
}
