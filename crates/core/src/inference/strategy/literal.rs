use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::types::Type;
use ayla_syntax::ast::Expr;

pub struct LiteralInfer;

impl InferStrategy for LiteralInfer {
    fn infer(&self, expr: &Expr, _ctx: &InferContext<'_, '_>) -> Option<Type> {
        let name = match expr {
            Expr::Int(_) => "int",
            Expr::Float(_) => "float",
            Expr::Str(_) => "string",
            Expr::Bool(_) => "bool",
            _ => return None,
        };
        Some(Type::named(name))
    }
}
