use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::types::Type;
use ayla_syntax::ast::Expr;

/// Prefix operators keep their operand's type. Infix operators need both
/// operands known: equal types are preserved and an int/float mix promotes
/// to float.
pub struct OperatorInfer;

impl InferStrategy for OperatorInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext<'_, '_>) -> Option<Type> {
        match expr {
            Expr::Prefix { operand, .. } => ctx.infer(operand),
            Expr::Infix { left, right, .. } => {
                let left = ctx.infer(left)?;
                let right = ctx.infer(right)?;
                combine(left, right)
            }
            _ => None,
        }
    }
}

fn combine(left: Type, right: Type) -> Option<Type> {
    if left.structurally_equal(&right) {
        return Some(left);
    }
    let mixed = (left.is_named("int") && right.is_named("float"))
        || (left.is_named("float") && right.is_named("int"));
    mixed.then(|| Type::named("float"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_mix_promotes_to_float() {
        let float = Some(Type::named("float"));
        assert_eq!(combine(Type::named("int"), Type::named("float")), float);
        assert_eq!(combine(Type::named("float"), Type::named("int")), float);
    }

    #[test]
    fn mismatched_operands_are_unknown() {
        assert_eq!(combine(Type::named("string"), Type::named("int")), None);
    }

    #[test]
    fn anonymous_struct_operands_keep_the_struct_type() {
        assert_eq!(
            combine(Type::Structural, Type::Structural),
            Some(Type::Structural)
        );
        assert_eq!(combine(Type::Structural, Type::named("int")), None);
    }
}
