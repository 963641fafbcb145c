use super::ScopeId;
use crate::inference::Type;
use crate::model::Range;
use ayla_syntax::ast::{Expr, Ident};
use once_cell::unsync::OnceCell;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
    Parameter,
    BuiltinType,
    UserType,
    StructField,
}

impl SymbolKind {
    /// Leading word of the hover signature.
    pub fn keyword(self) -> &'static str {
        match self {
            SymbolKind::Variable => "egg",
            SymbolKind::Constant => "rock",
            SymbolKind::Function => "fun",
            SymbolKind::Parameter => "param",
            SymbolKind::StructField => "field",
            SymbolKind::BuiltinType | SymbolKind::UserType => "type",
        }
    }
}

/// A declared name. Borrows its declaring identifier and initializer from the
/// syntax tree the table was built from.
#[derive(Debug)]
pub struct Symbol<'a> {
    pub kind: SymbolKind,
    pub name: SmolStr,
    /// `None` for builtins.
    pub decl: Option<&'a Ident>,
    pub declared_type: Option<Type>,
    pub initializer: Option<&'a Expr>,
    /// Name of the owning function or type.
    pub owner: Option<SmolStr>,
    /// Scope the symbol is bound in. Assigned by the table on definition.
    pub scope: ScopeId,
    /// Rendered signature for functions.
    pub detail: Option<String>,
    /// Member scope holding the fields of a struct type.
    pub members: Option<ScopeId>,
    pub(crate) inferred: OnceCell<Option<Type>>,
}

impl<'a> Symbol<'a> {
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            decl: None,
            declared_type: None,
            initializer: None,
            owner: None,
            scope: ScopeId::default(),
            detail: None,
            members: None,
            inferred: OnceCell::new(),
        }
    }

    /// A symbol named after, and located at, its declaring identifier.
    pub fn declared(kind: SymbolKind, ident: &'a Ident) -> Self {
        let mut symbol = Self::new(kind, ident.name.clone());
        symbol.decl = Some(ident);
        symbol
    }

    pub fn with_type(mut self, ty: Option<Type>) -> Self {
        self.declared_type = ty;
        self
    }

    pub fn with_initializer(mut self, value: Option<&'a Expr>) -> Self {
        self.initializer = value;
        self
    }

    pub fn with_owner(mut self, owner: impl Into<SmolStr>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_members(mut self, members: ScopeId) -> Self {
        self.members = Some(members);
        self
    }

    pub fn decl_range(&self) -> Option<Range> {
        self.decl.map(Range::of_ident)
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::BuiltinType | SymbolKind::UserType)
    }
}
