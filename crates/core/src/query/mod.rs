//! Cursor queries. Every query parses the text, builds a fresh symbol table,
//! answers, and drops everything.

pub mod definition;
pub mod hover;

pub use definition::definition;
pub use hover::{hover, render_symbol, signature};

use crate::inference::{Type, infer};
use crate::locate::{FieldOwner, Located, locate};
use crate::model::Position;
use crate::scope::{ScopeId, ScopeKind, Symbol, SymbolTable, build_symbols};
use ayla_syntax::ast::Expr;
use ayla_syntax::parse;

/// Parse and analyse `text`, then hand the identifier at `at` and the symbol
/// it resolves to (if any) to `f`.
pub(crate) fn with_symbol_at<R>(
    text: &str,
    at: Position,
    f: impl for<'t, 'a> FnOnce(&'t SymbolTable<'a>, Located<'a>, Option<&'t Symbol<'a>>) -> Option<R>,
) -> Option<R> {
    let (program, errors) = parse(text);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "querying a document with syntax errors");
    }
    let table = build_symbols(&program);
    let located = locate(&program, at)?;
    let symbol = resolve_located(&table, &located, at);
    f(&table, located, symbol)
}

/// The symbol a located identifier refers to, resolved from the innermost
/// scope around the cursor.
pub fn resolve_located<'t, 'a>(
    table: &'t SymbolTable<'a>,
    located: &Located<'a>,
    at: Position,
) -> Option<&'t Symbol<'a>> {
    let scope = table.scope_at(at);
    match located {
        Located::Name(ident) => table.resolve(scope, &ident.name),
        Located::TypeName(ident) => table.resolve(outside_members(table, scope), &ident.name),
        Located::Field {
            field,
            owner: FieldOwner::Value(target),
        } => {
            let ty = value_type(table, scope, target)?;
            table.field(scope, &ty, &field.name)
        }
        Located::Field {
            field,
            owner: FieldOwner::Type(name),
        } => table.field(scope, &Type::Named(name.name.clone()), &field.name),
        Located::StructType { .. } => None,
    }
}

/// Nearest enclosing scope that is not the member scope of a struct type.
fn outside_members(table: &SymbolTable<'_>, mut scope: ScopeId) -> ScopeId {
    while let ScopeKind::Members(_) = table.scope(scope).kind {
        match table.scope(scope).parent {
            Some(parent) => scope = parent,
            None => break,
        }
    }
    scope
}

/// Type of a field access receiver. Named receivers are inferred lazily and
/// member chains follow declared field types.
fn value_type(table: &SymbolTable<'_>, scope: ScopeId, expr: &Expr) -> Option<Type> {
    match expr {
        Expr::Ident(ident) => {
            let symbol = table.resolve(scope, &ident.name)?;
            table.type_of(symbol)
        }
        Expr::Member { target, field } => {
            let owner = value_type(table, scope, target)?;
            table.field(scope, &owner, &field.name)?.declared_type.clone()
        }
        _ => infer(table, scope, expr),
    }
}
