use super::with_symbol_at;
use crate::inference::types::display;
use crate::locate::Located;
use crate::model::{HoverInfo, Position};
use crate::scope::{Symbol, SymbolKind, SymbolTable};

/// Hover for the identifier at `at`, or `None` when there is no identifier
/// there or it resolves to nothing.
pub fn hover(text: &str, at: Position) -> Option<HoverInfo> {
    with_symbol_at(text, at, |table, located, symbol| {
        let range = located.range();
        let contents = match (symbol, located) {
            (Some(symbol), _) => render_symbol(table, symbol),
            (None, Located::StructType { display, .. }) => fence(&display),
            (None, _) => return None,
        };
        Some(HoverInfo { contents, range })
    })
}

/// One-line declaration form, e.g. `egg x int` or `fun add(a int) int`.
pub fn signature(table: &SymbolTable<'_>, symbol: &Symbol<'_>) -> String {
    let keyword = symbol.kind.keyword();
    match symbol.kind {
        SymbolKind::Variable
        | SymbolKind::Constant
        | SymbolKind::Parameter
        | SymbolKind::StructField => {
            let ty = table.type_of(symbol);
            format!("{keyword} {} {}", symbol.name, display(ty.as_ref()))
        }
        SymbolKind::Function => symbol
            .detail
            .clone()
            .unwrap_or_else(|| format!("{keyword} {}(...)", symbol.name)),
        SymbolKind::BuiltinType => format!("{keyword} {}", symbol.name),
        SymbolKind::UserType => match &symbol.declared_type {
            Some(ty) => format!("{keyword} {} {ty}", symbol.name),
            None => format!("{keyword} {}", symbol.name),
        },
    }
}

/// Markdown hover body: fenced signature plus the owning declaration.
pub fn render_symbol(table: &SymbolTable<'_>, symbol: &Symbol<'_>) -> String {
    let mut text = fence(&signature(table, symbol));
    if let Some(owner) = &symbol.owner {
        text.push_str(&format!("\n\nDeclared in `{owner}`"));
    }
    text
}

fn fence(code: &str) -> String {
    format!("```ayla\n{code}\n```")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(src: &str, line: u32, character: u32) -> Option<String> {
        hover(src, Position::new(line, character)).map(|h| h.contents)
    }

    #[test]
    fn variable_with_declared_type() {
        assert_eq!(
            contents("egg count int = 3", 0, 5).as_deref(),
            Some("```ayla\negg count int\n```")
        );
    }

    #[test]
    fn constant_with_inferred_type() {
        assert_eq!(
            contents("rock PI = 3.14", 0, 5).as_deref(),
            Some("```ayla\nrock PI float\n```")
        );
    }

    #[test]
    fn uninferable_type_renders_unknown() {
        assert_eq!(
            contents("egg xs = []", 0, 4).as_deref(),
            Some("```ayla\negg xs unknown\n```")
        );
    }

    #[test]
    fn function_renders_its_signature() {
        let src = "fun add(a int, b int) int {\n  return a + b\n}\nadd(1, 2)";
        assert_eq!(
            contents(src, 3, 1).as_deref(),
            Some("```ayla\nfun add(a int, b int) int\n```")
        );
    }

    #[test]
    fn parameter_names_its_function() {
        let src = "fun add(a int, b int) int {\n  return a + b\n}";
        let text = contents(src, 1, 9).expect("hover");
        assert!(text.starts_with("```ayla\nparam a int\n```"));
        assert!(text.contains("Declared in `add`"));
    }

    #[test]
    fn builtin_and_user_types() {
        let src = "type Point struct {\n  x int\n  y int\n}\negg p Point";
        assert_eq!(contents(src, 1, 5).as_deref(), Some("```ayla\ntype int\n```"));
        assert_eq!(
            contents(src, 4, 7).as_deref(),
            Some("```ayla\ntype Point struct { x, y }\n```")
        );
    }

    #[test]
    fn inline_struct_keyword_renders_the_type_itself() {
        let src = "egg p struct { a int, b int }";
        let info = hover(src, Position::new(0, 7)).expect("hover");
        assert_eq!(info.contents, "```ayla\nstruct { a, b }\n```");
        assert_eq!(info.range.start, Position::new(0, 6));
        assert_eq!(info.range.end, Position::new(0, 12));
    }

    #[test]
    fn unresolved_names_have_no_hover() {
        assert_eq!(contents("print(missing)", 0, 8), None);
        assert_eq!(contents("egg x = 1", 0, 8), None);
    }

    #[test]
    fn hover_range_covers_the_identifier() {
        let info = hover("egg count int = 3", Position::new(0, 6)).expect("hover");
        assert_eq!(info.range.start, Position::new(0, 4));
        assert_eq!(info.range.end, Position::new(0, 9));
    }
}
