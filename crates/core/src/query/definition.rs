use super::with_symbol_at;
use crate::model::{Position, Range};

/// Range of the identifier declaring the symbol at `at`. Builtins and names
/// that resolve to nothing have no definition.
pub fn definition(text: &str, at: Position) -> Option<Range> {
    with_symbol_at(text, at, |_, _, symbol| symbol?.decl_range())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_jumps_to_declaration() {
        let src = "egg total int = 0\ntotal = total + 1";
        let range = definition(src, Position::new(1, 9)).expect("definition");
        assert_eq!(range.start, Position::new(0, 4));
        assert_eq!(range.end, Position::new(0, 9));
    }

    #[test]
    fn builtins_have_no_definition() {
        assert_eq!(definition("egg x int", Position::new(0, 7)), None);
    }

    #[test]
    fn declaration_is_its_own_definition() {
        let range = definition("fun main() {\n}", Position::new(0, 5)).expect("definition");
        assert_eq!(range.start, Position::new(0, 4));
        assert_eq!(range.end, Position::new(0, 8));
    }
}
