//! Arena of nested scopes for one document.

use super::{ScopeId, Symbol, SymbolId, SymbolKind};
use crate::error::{AnalysisError, Result};
use crate::inference::{Type, infer};
use crate::model::{Position, Range};
use smol_str::SmolStr;
use std::collections::HashMap;

/// Type names bound in the root scope of every table.
pub const BUILTIN_TYPES: [&str; 5] = ["int", "float", "string", "bool", "arr"];

/// Alias chains longer than this are treated as unresolvable.
const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Root,
    Function(SmolStr),
    Branch,
    Loop,
    Spawn,
    /// Fields of the named struct type.
    Members(SmolStr),
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// Source region covered by the scope. The root covers everything.
    pub extent: Option<Range>,
    bindings: HashMap<SmolStr, SymbolId>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind, extent: Option<Range>) -> Self {
        Self {
            parent,
            kind,
            extent,
            bindings: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.bindings.get(name).copied()
    }
}

/// A second declaration of a name already bound in the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationConflict {
    pub name: SmolStr,
    /// The rejected declaration.
    pub range: Range,
    /// The declaration that kept the name; `None` for builtins.
    pub previous: Option<Range>,
}

#[derive(Debug)]
pub struct SymbolTable<'a> {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol<'a>>,
    conflicts: Vec<DeclarationConflict>,
}

impl Default for SymbolTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SymbolTable<'a> {
    /// A table holding only the root scope and its builtin types.
    pub fn new() -> Self {
        let mut table = Self {
            scopes: vec![Scope::new(None, ScopeKind::Root, None)],
            symbols: Vec::new(),
            conflicts: Vec::new(),
        };
        let root = table.root();
        for name in BUILTIN_TYPES {
            let id = SymbolId::from_index(table.symbols.len());
            let mut symbol = Symbol::new(SymbolKind::BuiltinType, name);
            symbol.scope = root;
            table.symbols.push(symbol);
            table.scopes[root.index()].bindings.insert(name.into(), id);
        }
        table
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::from_index(0)
    }

    pub fn new_scope(&mut self, parent: ScopeId, kind: ScopeKind, extent: Range) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent), kind, Some(extent)));
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol<'a> {
        &self.symbols[id.index()]
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.symbols.iter()
    }

    /// Bind `symbol` in `scope`. A name already bound in that same scope is
    /// left untouched and reported as [`AnalysisError::DuplicateName`].
    pub fn define(&mut self, scope: ScopeId, mut symbol: Symbol<'a>) -> Result<SymbolId> {
        if let Some(existing) = self.scopes[scope.index()].get(&symbol.name) {
            return Err(AnalysisError::DuplicateName {
                name: symbol.name,
                existing: self.symbol(existing).decl_range(),
            });
        }
        let id = SymbolId::from_index(self.symbols.len());
        symbol.scope = scope;
        self.scopes[scope.index()]
            .bindings
            .insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    pub fn resolve_id(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Nearest binding of `name`, walking outward from `scope`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&Symbol<'a>> {
        self.resolve_id(scope, name).map(|id| self.symbol(id))
    }

    /// Innermost scope whose extent contains `position`.
    pub fn scope_at(&self, position: Position) -> ScopeId {
        // Scopes are created in source pre-order and siblings never overlap,
        // so the last containing scope is the innermost one.
        self.scopes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, scope)| scope.extent.is_some_and(|extent| extent.contains(position)))
            .map(|(index, _)| ScopeId::from_index(index))
            .unwrap_or_else(|| self.root())
    }

    /// Declared type, else the inferred type of the initializer. Inference
    /// runs at most once per symbol and table.
    pub fn type_of(&self, symbol: &Symbol<'a>) -> Option<Type> {
        if let Some(ty) = &symbol.declared_type {
            return Some(ty.clone());
        }
        let value = symbol.initializer?;
        symbol
            .inferred
            .get_or_init(|| infer(self, symbol.scope, value))
            .clone()
    }

    /// Declared or already inferred type; never triggers inference.
    pub fn known_type(&self, symbol: &Symbol<'a>) -> Option<Type> {
        symbol
            .declared_type
            .clone()
            .or_else(|| symbol.inferred.get().cloned().flatten())
    }

    /// Field `name` of values of type `ty`, with the type name resolved from
    /// `scope`. Aliases of struct types are followed.
    pub fn field(&self, scope: ScopeId, ty: &Type, name: &str) -> Option<&Symbol<'a>> {
        let mut current = ty.clone();
        for _ in 0..MAX_ALIAS_DEPTH {
            let Type::Named(type_name) = &current else {
                return None;
            };
            let owner = self.resolve(scope, type_name).filter(|s| s.is_type())?;
            if let Some(members) = owner.members {
                return self.scope(members).get(name).map(|id| self.symbol(id));
            }
            current = owner.declared_type.clone()?;
        }
        None
    }

    pub fn record_conflict(&mut self, conflict: DeclarationConflict) {
        self.conflicts.push(conflict);
    }

    pub fn conflicts(&self) -> &[DeclarationConflict] {
        &self.conflicts
    }
}
