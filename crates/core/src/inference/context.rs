use super::strategy::infer_expression;
use super::types::Type;
use crate::scope::{ScopeId, Symbol, SymbolTable};
use ayla_syntax::ast::Expr;

/// Where an expression is being inferred: the table it was built into and
/// the scope names are resolved from.
#[derive(Clone, Copy)]
pub struct InferContext<'t, 'a> {
    pub table: &'t SymbolTable<'a>,
    pub scope: ScopeId,
}

impl<'t, 'a> InferContext<'t, 'a> {
    pub fn new(table: &'t SymbolTable<'a>, scope: ScopeId) -> Self {
        Self { table, scope }
    }

    /// Infer a subexpression in the same context.
    pub fn infer(&self, expr: &Expr) -> Option<Type> {
        infer_expression(expr, self)
    }

    pub fn resolve(&self, name: &str) -> Option<&'t Symbol<'a>> {
        self.table.resolve(self.scope, name)
    }
}
