use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::types::Type;
use ayla_syntax::ast::Expr;

/// Try `first`, then `second` if `first` returns `None`.
pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrElse<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: InferStrategy, B: InferStrategy> InferStrategy for OrElse<A, B> {
    fn infer(&self, expr: &Expr, ctx: &InferContext<'_, '_>) -> Option<Type> {
        self.first
            .infer(expr, ctx)
            .or_else(|| self.second.infer(expr, ctx))
    }
}
