//! Position lookup: which identifier sits under a cursor.
//!
//! The walk is a pre-order descent over the syntax tree that stops at the
//! first identifier whose span contains the cursor. Literals, keywords and
//! punctuation are never returned.

use crate::model::{Position, Range};
use ayla_syntax::ast::{
    Block, ElseBranch, Expr, FieldInit, Ident, IfStmt, Program, Stmt, TypeExpr,
};

const STRUCT_KEYWORD_WIDTH: u32 = 6;

/// What was found under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum Located<'a> {
    /// A name resolved lexically: variables, functions, parameters and the
    /// fields of a `type` declaration.
    Name(&'a Ident),
    /// A named type in an annotation. Resolved outside any member scope, so
    /// a field never shadows the type of its own annotation.
    TypeName(&'a Ident),
    /// A field accessed through a value or a struct literal.
    Field {
        field: &'a Ident,
        owner: FieldOwner<'a>,
    },
    /// The `struct` keyword or a field name of an inline structural type,
    /// named by the type's display form (`struct { x, y }`).
    StructType { display: String, range: Range },
}

/// Where the type owning a field reference comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOwner<'a> {
    /// `value.field`, `value.field = ...`
    Value(&'a Expr),
    /// `Type { field: ... }`
    Type(&'a Ident),
}

impl Located<'_> {
    pub fn range(&self) -> Range {
        match self {
            Located::Name(ident)
            | Located::TypeName(ident)
            | Located::Field { field: ident, .. } => Range::of_ident(ident),
            Located::StructType { range, .. } => *range,
        }
    }
}

/// Find the identifier covering `at` in `program`.
pub fn locate(program: &Program, at: Position) -> Option<Located<'_>> {
    program.statements.iter().find_map(|stmt| in_stmt(stmt, at))
}

fn covers(ident: &Ident, at: Position) -> bool {
    Range::of_ident(ident).contains(at)
}

fn name(ident: &Ident, at: Position) -> Option<Located<'_>> {
    covers(ident, at).then_some(Located::Name(ident))
}

fn names(idents: &[Ident], at: Position) -> Option<Located<'_>> {
    idents.iter().find_map(|ident| name(ident, at))
}

fn field<'a>(field: &'a Ident, owner: FieldOwner<'a>, at: Position) -> Option<Located<'a>> {
    covers(field, at).then_some(Located::Field { field, owner })
}

fn in_stmts(stmts: &[Stmt], at: Position) -> Option<Located<'_>> {
    stmts.iter().find_map(|stmt| in_stmt(stmt, at))
}

fn in_block(block: &Block, at: Position) -> Option<Located<'_>> {
    in_stmts(&block.stmts, at)
}

fn in_stmt(stmt: &Stmt, at: Position) -> Option<Located<'_>> {
    match stmt {
        Stmt::Var(decl) => names(&decl.names, at)
            .or_else(|| decl.ty.as_ref().and_then(|ty| in_type(ty, at, false)))
            .or_else(|| decl.value.as_ref().and_then(|value| in_expr(value, at))),
        Stmt::Func(func) => name(&func.name, at)
            .or_else(|| {
                func.params.iter().find_map(|param| {
                    name(&param.name, at).or_else(|| in_type(&param.ty, at, false))
                })
            })
            .or_else(|| func.ret.as_ref().and_then(|ret| in_type(ret, at, false)))
            .or_else(|| in_block(&func.body, at)),
        Stmt::Type(decl) => name(&decl.name, at).or_else(|| in_type(&decl.ty, at, true)),
        Stmt::Assign { targets, value } => names(targets, at).or_else(|| in_expr(value, at)),
        Stmt::IndexAssign {
            target,
            index,
            value,
        } => in_expr(target, at)
            .or_else(|| in_expr(index, at))
            .or_else(|| in_expr(value, at)),
        Stmt::FieldAssign {
            target,
            field: member,
            value,
        } => in_expr(target, at)
            .or_else(|| field(member, FieldOwner::Value(target), at))
            .or_else(|| in_expr(value, at)),
        Stmt::Expr(expr) => in_expr(expr, at),
        Stmt::If(if_stmt) => in_if(if_stmt, at),
        Stmt::For(for_stmt) => for_stmt
            .init
            .as_deref()
            .and_then(|init| in_stmt(init, at))
            .or_else(|| for_stmt.condition.as_ref().and_then(|c| in_expr(c, at)))
            .or_else(|| for_stmt.post.as_deref().and_then(|post| in_stmt(post, at)))
            .or_else(|| in_block(&for_stmt.body, at)),
        Stmt::While(while_stmt) => {
            in_expr(&while_stmt.condition, at).or_else(|| in_block(&while_stmt.body, at))
        }
        Stmt::Spawn(block) => in_block(block, at),
        Stmt::Return(value) => value.as_ref().and_then(|value| in_expr(value, at)),
        Stmt::Break | Stmt::Continue => None,
    }
}

fn in_if(if_stmt: &IfStmt, at: Position) -> Option<Located<'_>> {
    in_expr(&if_stmt.condition, at)
        .or_else(|| in_block(&if_stmt.then_block, at))
        .or_else(|| match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => in_block(block, at),
            Some(ElseBranch::If(nested)) => in_if(nested, at),
            None => None,
        })
}

/// `declared_fields` is set for the struct of a `type` declaration, whose
/// field names are real declarations. Field names of inline struct
/// annotations stand for the structural type itself.
fn in_type(ty: &TypeExpr, at: Position, declared_fields: bool) -> Option<Located<'_>> {
    match ty {
        TypeExpr::Named(ident) => covers(ident, at).then_some(Located::TypeName(ident)),
        TypeExpr::Array { elem, .. } => in_type(elem, at, false),
        TypeExpr::Struct {
            keyword, fields, ..
        } => {
            let structural = |range: Range| {
                range.contains(at).then(|| Located::StructType {
                    display: ty.display_name(),
                    range,
                })
            };
            let keyword_range = Range::new(
                Position::token_start(*keyword, STRUCT_KEYWORD_WIDTH),
                Position::token_end(*keyword),
            );
            structural(keyword_range).or_else(|| {
                fields.iter().find_map(|decl| {
                    let field_name = if declared_fields {
                        name(&decl.name, at)
                    } else {
                        structural(Range::of_ident(&decl.name))
                    };
                    field_name.or_else(|| in_type(&decl.ty, at, false))
                })
            })
        }
    }
}

fn in_expr(expr: &Expr, at: Position) -> Option<Located<'_>> {
    match expr {
        Expr::Ident(ident) => name(ident, at),
        Expr::Int(_) | Expr::Float(_) | Expr::Str(_) | Expr::Bool(_) => None,
        Expr::Array(items) => items.iter().find_map(|item| in_expr(item, at)),
        Expr::Prefix { operand, .. } => in_expr(operand, at),
        Expr::Infix { left, right, .. } => in_expr(left, at).or_else(|| in_expr(right, at)),
        Expr::Index { target, index } => in_expr(target, at).or_else(|| in_expr(index, at)),
        Expr::Member {
            target,
            field: member,
        } => in_expr(target, at).or_else(|| field(member, FieldOwner::Value(target), at)),
        Expr::Call { callee, args } => {
            in_expr(callee, at).or_else(|| args.iter().find_map(|arg| in_expr(arg, at)))
        }
        Expr::StructLit { name: ty, fields } => name(ty, at).or_else(|| {
            fields.iter().find_map(|init| {
                field(&init.name, FieldOwner::Type(ty), at).or_else(|| in_expr(&init.value, at))
            })
        }),
        Expr::AnonStruct { fields } => in_field_values(fields, at),
    }
}

fn in_field_values(fields: &[FieldInit], at: Position) -> Option<Located<'_>> {
    fields.iter().find_map(|init| in_expr(&init.value, at))
}
