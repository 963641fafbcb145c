use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::types::Type;
use ayla_syntax::ast::Expr;

/// Identifiers take the declared or already inferred type of the symbol they
/// resolve to. Initializers are not inferred from here, so a chain of
/// references can never recurse into itself.
pub struct NameInfer;

impl InferStrategy for NameInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext<'_, '_>) -> Option<Type> {
        let Expr::Ident(ident) = expr else {
            return None;
        };
        let symbol = ctx.resolve(&ident.name)?;
        ctx.table.known_type(symbol)
    }
}
