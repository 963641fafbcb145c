//! Best-effort structural type inference.
//!
//! Inference never fails: an expression whose type cannot be determined
//! yields `None`, rendered as `unknown`.

pub mod context;
pub mod strategy;
pub mod types;

pub use context::InferContext;
pub use strategy::{InferStrategy, build_expression_inferrer};
pub use types::Type;

use crate::scope::{ScopeId, SymbolTable};
use ayla_syntax::ast::Expr;

/// Infer the type of `expr` as seen from `scope`.
pub fn infer(table: &SymbolTable<'_>, scope: ScopeId, expr: &Expr) -> Option<Type> {
    InferContext::new(table, scope).infer(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::build_symbols;
    use ayla_syntax::ast::{Program, Stmt};
    use ayla_syntax::parse;

    /// Type of the initializer of the last declaration in `src`.
    fn infer_last(src: &str) -> Option<String> {
        let (program, errors) = parse(src);
        assert!(errors.is_empty(), "{errors:?}");
        let table = build_symbols(&program);
        let value = last_initializer(&program);
        infer(&table, table.root(), value).map(|t| t.to_string())
    }

    fn last_initializer(program: &Program) -> &Expr {
        match program.statements.last() {
            Some(Stmt::Var(decl)) => decl.value.as_ref().expect("initializer"),
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn literals_have_primitive_types() {
        assert_eq!(infer_last("x := 1").as_deref(), Some("int"));
        assert_eq!(infer_last("x := 1.5").as_deref(), Some("float"));
        assert_eq!(infer_last("x := \"hi\"").as_deref(), Some("string"));
        assert_eq!(infer_last("x := true").as_deref(), Some("bool"));
    }

    #[test]
    fn int_and_float_promote_to_float() {
        assert_eq!(infer_last("x := 1 + 2.5").as_deref(), Some("float"));
        assert_eq!(infer_last("x := 2 * 3").as_deref(), Some("int"));
        assert_eq!(infer_last("x := \"a\" + 1").as_deref(), None);
    }

    #[test]
    fn arrays_must_be_homogeneous() {
        assert_eq!(infer_last("x := [1, 2, 3]").as_deref(), Some("[]int"));
        assert_eq!(infer_last("x := [[1], [2]]").as_deref(), Some("[][]int"));
        assert_eq!(infer_last("x := [1, 2.0]").as_deref(), None);
        assert_eq!(infer_last("x := []").as_deref(), None);
        assert_eq!(
            infer_last("x := [struct{a: 1}, struct{a: 2}]").as_deref(),
            Some("[]struct")
        );
        assert_eq!(infer_last("x := [struct{a: 1}, Point{a: 2}]").as_deref(), None);
    }

    #[test]
    fn struct_literals() {
        assert_eq!(infer_last("x := Point{x: 1}").as_deref(), Some("Point"));
        assert_eq!(infer_last("x := struct{x: 1}").as_deref(), Some("struct"));
        assert_eq!(
            infer_last("x := struct{a: 1} + struct{a: 2}").as_deref(),
            Some("struct")
        );
    }

    #[test]
    fn prefix_keeps_operand_type() {
        assert_eq!(infer_last("x := -2.5").as_deref(), Some("float"));
        assert_eq!(infer_last("x := !true").as_deref(), Some("bool"));
    }

    #[test]
    fn identifiers_use_declared_types() {
        assert_eq!(infer_last("egg n int\nx := n + 1").as_deref(), Some("int"));
        assert_eq!(infer_last("x := missing").as_deref(), None);
    }

    #[test]
    fn identifiers_use_previously_inferred_types_only() {
        let (program, _) = parse("a := 1.5\nb := a");
        let table = build_symbols(&program);
        let root = table.root();
        let b = table.resolve(root, "b").expect("b");
        assert_eq!(table.type_of(b), None);

        let a = table.resolve(root, "a").expect("a");
        assert_eq!(table.type_of(a), Some(Type::named("float")));
        let b_value = last_initializer(&program);
        assert_eq!(infer(&table, root, b_value), Some(Type::named("float")));
    }

    #[test]
    fn self_reference_is_unknown() {
        let (program, _) = parse("x := x + 1");
        let table = build_symbols(&program);
        let x = table.resolve(table.root(), "x").expect("x");
        assert_eq!(table.type_of(x), None);
    }
}
