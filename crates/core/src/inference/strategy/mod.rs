//! Inference strategies using combinator pattern.
//!
//! Each strategy handles a family of expression shapes and returns `None`
//! for anything else, so strategies chain with [`InferStrategy::or_else`].

mod combinator;
mod composite;
mod literal;
mod name;
mod operator;

pub use combinator::OrElse;
pub use composite::{ArrayInfer, StructInfer};
pub use literal::LiteralInfer;
pub use name::NameInfer;
pub use operator::OperatorInfer;

use super::InferContext;
use super::types::Type;
use ayla_syntax::ast::Expr;

pub trait InferStrategy: Sync + Send {
    /// Attempt to infer the type of `expr`.
    ///
    /// Returns `None` if this strategy doesn't apply or can't determine the type.
    fn infer(&self, expr: &Expr, ctx: &InferContext<'_, '_>) -> Option<Type>;

    /// If `self` returns `None`, try `other`.
    fn or_else<S: InferStrategy>(self, other: S) -> OrElse<Self, S>
    where
        Self: Sized,
    {
        OrElse::new(self, other)
    }
}

/// Build the default expression inferrer, strategies in priority order.
pub fn build_expression_inferrer() -> impl InferStrategy {
    LiteralInfer
        .or_else(ArrayInfer)
        .or_else(StructInfer)
        .or_else(OperatorInfer)
        .or_else(NameInfer)
}

pub fn infer_expression(expr: &Expr, ctx: &InferContext<'_, '_>) -> Option<Type> {
    build_expression_inferrer().infer(expr, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::SymbolTable;

    struct AlwaysNone;
    impl InferStrategy for AlwaysNone {
        fn infer(&self, _: &Expr, _: &InferContext<'_, '_>) -> Option<Type> {
            None
        }
    }

    struct AlwaysSome(&'static str);
    impl InferStrategy for AlwaysSome {
        fn infer(&self, _: &Expr, _: &InferContext<'_, '_>) -> Option<Type> {
            Some(Type::named(self.0))
        }
    }

    #[test]
    fn or_else_prefers_the_first_answer() {
        let table = SymbolTable::new();
        let ctx = InferContext::new(&table, table.root());
        let first = AlwaysSome("int").or_else(AlwaysSome("float"));
        assert_eq!(first.infer(&Expr::Int(1), &ctx), Some(Type::named("int")));
    }

    #[test]
    fn or_else_falls_back() {
        let table = SymbolTable::new();
        let ctx = InferContext::new(&table, table.root());
        let fallback = AlwaysNone.or_else(AlwaysSome("string"));
        assert_eq!(fallback.infer(&Expr::Int(1), &ctx), Some(Type::named("string")));
        assert_eq!(AlwaysNone.or_else(AlwaysNone).infer(&Expr::Int(1), &ctx), None);
    }

    #[test]
    fn unhandled_shapes_are_unknown() {
        let table = SymbolTable::new();
        let ctx = InferContext::new(&table, table.root());
        let call = Expr::Call {
            callee: Box::new(Expr::Int(1)),
            args: vec![],
        };
        assert_eq!(infer_expression(&call, &ctx), None);
    }
}
