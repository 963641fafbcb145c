use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::types::Type;
use ayla_syntax::ast::Expr;

/// `[a, b, ...]`: the first element decides, every other element must match
/// it structurally. Empty arrays have no element type to go on.
pub struct ArrayInfer;

impl InferStrategy for ArrayInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext<'_, '_>) -> Option<Type> {
        let Expr::Array(items) = expr else {
            return None;
        };
        let (first, rest) = items.split_first()?;
        let elem = ctx.infer(first)?;
        for item in rest {
            let ty = ctx.infer(item)?;
            if !elem.structurally_equal(&ty) {
                return None;
            }
        }
        Some(Type::array(elem))
    }
}

/// Named struct literals have the named type; anonymous ones are structural.
pub struct StructInfer;

impl InferStrategy for StructInfer {
    fn infer(&self, expr: &Expr, _ctx: &InferContext<'_, '_>) -> Option<Type> {
        match expr {
            Expr::StructLit { name, .. } => Some(Type::Named(name.name.clone())),
            Expr::AnonStruct { .. } => Some(Type::Structural),
            _ => None,
        }
    }
}
