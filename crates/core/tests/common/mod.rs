#![allow(dead_code)]

use ayla_core::Position;

/// Zero-based position of the `nth` occurrence of `needle` in `text`, plus
/// `offset` characters. Test sources are ASCII.
pub fn position_of(text: &str, needle: &str, nth: usize, offset: u32) -> Position {
    let byte = text
        .match_indices(needle)
        .nth(nth)
        .map(|(index, _)| index)
        .unwrap_or_else(|| panic!("occurrence {nth} of `{needle}` not found"));
    let before = &text[..byte];
    let line = before.matches('\n').count() as u32;
    let column = before.rsplit('\n').next().map_or(0, str::len) as u32;
    Position::new(line, column + offset)
}

/// Hover contents at the `nth` occurrence of `needle`.
pub fn hover_text(text: &str, needle: &str, nth: usize) -> Option<String> {
    ayla_core::hover(text, position_of(text, needle, nth, 0)).map(|h| h.contents)
}
