//! Scope Builder implementation.
//!
//! Walks a program once, top-down, populating a [`SymbolTable`] with every
//! declaration. A name declared twice in one scope is recorded as a
//! [`DeclarationConflict`] and the walk carries on.

use super::{DeclarationConflict, ScopeId, ScopeKind, Symbol, SymbolId, SymbolKind, SymbolTable};
use crate::error::AnalysisError;
use crate::inference::Type;
use crate::model::Range;
use ayla_syntax::ast::{
    Binding, Block, ElseBranch, FuncDecl, IfStmt, Program, Stmt, TypeDecl, TypeExpr, VarDecl,
};
use tracing::{debug, warn};

const FOR_KEYWORD_WIDTH: u32 = 3;
const STRUCT_KEYWORD_WIDTH: u32 = 6;

/// Builds the scope tree and symbol table for a whole program.
pub struct ScopeBuilder<'a> {
    table: SymbolTable<'a>,
    current: ScopeId,
}

impl Default for ScopeBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScopeBuilder<'a> {
    pub fn new() -> Self {
        let table = SymbolTable::new();
        let current = table.root();
        Self { table, current }
    }

    pub fn build(mut self, program: &'a Program) -> SymbolTable<'a> {
        self.visit_stmts(&program.statements);
        self.table
    }

    fn visit_stmts(&mut self, stmts: &'a [Stmt]) {
        for stmt in stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Var(decl) => self.declare_vars(decl),
            Stmt::Func(func) => self.declare_func(func),
            Stmt::Type(decl) => self.declare_type(decl),
            Stmt::If(if_stmt) => self.visit_if(if_stmt),
            Stmt::For(for_stmt) => {
                let extent = Range::spanning(for_stmt.keyword, FOR_KEYWORD_WIDTH, for_stmt.body.close);
                self.in_scope(ScopeKind::Loop, extent, |builder| {
                    if let Some(init) = &for_stmt.init {
                        builder.visit_stmt(init);
                    }
                    if let Some(post) = &for_stmt.post {
                        builder.visit_stmt(post);
                    }
                    builder.visit_stmts(&for_stmt.body.stmts);
                });
            }
            Stmt::While(while_stmt) => self.visit_block(ScopeKind::Loop, &while_stmt.body),
            Stmt::Spawn(block) => self.visit_block(ScopeKind::Spawn, block),
            Stmt::Assign { .. }
            | Stmt::IndexAssign { .. }
            | Stmt::FieldAssign { .. }
            | Stmt::Expr(_)
            | Stmt::Return(_)
            | Stmt::Break
            | Stmt::Continue => {}
        }
    }

    fn declare_vars(&mut self, decl: &'a VarDecl) {
        let kind = match decl.binding {
            Binding::Rock => SymbolKind::Constant,
            Binding::Egg | Binding::Short => SymbolKind::Variable,
        };
        let declared_type = decl.ty.as_ref().map(Type::from_annotation);
        for name in &decl.names {
            let symbol = Symbol::declared(kind, name)
                .with_type(declared_type.clone())
                .with_initializer(decl.value.as_ref());
            self.declare(symbol);
        }
    }

    fn declare_func(&mut self, func: &'a FuncDecl) {
        let symbol = Symbol::declared(SymbolKind::Function, &func.name).with_detail(signature(func));
        self.declare(symbol);

        let extent = Range::spanning(func.open_paren, 1, func.body.close);
        let kind = ScopeKind::Function(func.name.name.clone());
        self.in_scope(kind, extent, |builder| {
            for param in &func.params {
                let symbol = Symbol::declared(SymbolKind::Parameter, &param.name)
                    .with_type(Some(Type::from_annotation(&param.ty)))
                    .with_owner(func.name.name.clone());
                builder.declare(symbol);
            }
            builder.visit_stmts(&func.body.stmts);
        });
    }

    fn declare_type(&mut self, decl: &'a TypeDecl) {
        let mut symbol = Symbol::declared(SymbolKind::UserType, &decl.name)
            .with_type(Some(Type::from_annotation(&decl.ty)));

        if let TypeExpr::Struct {
            keyword,
            fields,
            close,
        } = &decl.ty
        {
            let extent = Range::spanning(*keyword, STRUCT_KEYWORD_WIDTH, *close);
            let kind = ScopeKind::Members(decl.name.name.clone());
            let members = self.in_scope(kind, extent, |builder| {
                for field in fields {
                    let symbol = Symbol::declared(SymbolKind::StructField, &field.name)
                        .with_type(Some(Type::from_annotation(&field.ty)))
                        .with_owner(decl.name.name.clone());
                    builder.declare(symbol);
                }
            });
            symbol = symbol.with_members(members);
        }

        self.declare(symbol);
    }

    fn visit_if(&mut self, if_stmt: &'a IfStmt) {
        self.visit_block(ScopeKind::Branch, &if_stmt.then_block);
        match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => self.visit_block(ScopeKind::Branch, block),
            Some(ElseBranch::If(nested)) => self.visit_if(nested),
            None => {}
        }
    }

    fn visit_block(&mut self, kind: ScopeKind, block: &'a Block) {
        let extent = Range::spanning(block.open, 1, block.close);
        self.in_scope(kind, extent, |builder| builder.visit_stmts(&block.stmts));
    }

    /// Run `f` inside a fresh child of the current scope and return the
    /// child's id.
    fn in_scope(&mut self, kind: ScopeKind, extent: Range, f: impl FnOnce(&mut Self)) -> ScopeId {
        let scope = self.table.new_scope(self.current, kind, extent);
        debug!(?scope, parent = ?self.current, "open scope");
        let saved = std::mem::replace(&mut self.current, scope);
        f(self);
        self.current = saved;
        scope
    }

    fn declare(&mut self, symbol: Symbol<'a>) -> Option<SymbolId> {
        let range = symbol.decl_range().unwrap_or_default();
        let name = symbol.name.clone();
        match self.table.define(self.current, symbol) {
            Ok(id) => {
                debug!(%name, scope = ?self.current, "define");
                Some(id)
            }
            Err(AnalysisError::DuplicateName { name, existing }) => {
                debug!(%name, scope = ?self.current, "duplicate declaration");
                self.table.record_conflict(DeclarationConflict {
                    name,
                    range,
                    previous: existing,
                });
                None
            }
            Err(err) => {
                warn!(%name, %err, "failed to define symbol");
                None
            }
        }
    }
}

/// Build the symbol table of `program`.
pub fn build_symbols(program: &Program) -> SymbolTable<'_> {
    ScopeBuilder::new().build(program)
}

/// `fun add(a int, b int) int`
fn signature(func: &FuncDecl) -> String {
    let params: Vec<String> = func
        .params
        .iter()
        .map(|p| format!("{} {}", p.name.name, p.ty.display_name()))
        .collect();
    let mut text = format!("fun {}({})", func.name.name, params.join(", "));
    if let Some(ret) = &func.ret {
        text.push(' ');
        text.push_str(&ret.display_name());
    }
    text
}
