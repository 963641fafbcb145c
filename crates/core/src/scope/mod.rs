//! Lexical scopes and the symbols declared in them.

pub mod builder;
pub mod ids;
pub mod symbol;
pub mod table;

pub use builder::{ScopeBuilder, build_symbols};
pub use ids::{ScopeId, SymbolId};
pub use symbol::{Symbol, SymbolKind};
pub use table::{BUILTIN_TYPES, DeclarationConflict, Scope, ScopeKind, SymbolTable};
