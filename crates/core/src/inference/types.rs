//! Inferred and declared types.
//!
//! Unknown is represented by `Option::None` at every API boundary; use
//! [`display`] to render it.

use ayla_syntax::ast::TypeExpr;
use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `int`, `Point`, ...
    Named(SmolStr),
    /// `[]T`
    Array(Box<Type>),
    /// Structural description of a struct type; field names only.
    Record(Vec<SmolStr>),
    /// The type of an anonymous struct literal.
    Structural,
}

impl Type {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Type::Named(name.into())
    }

    pub fn array(elem: Type) -> Self {
        Type::Array(Box::new(elem))
    }

    pub fn from_annotation(ty: &TypeExpr) -> Self {
        match ty {
            TypeExpr::Named(ident) => Type::Named(ident.name.clone()),
            TypeExpr::Array { elem, .. } => Type::array(Type::from_annotation(elem)),
            TypeExpr::Struct { fields, .. } => {
                Type::Record(fields.iter().map(|f| f.name.name.clone()).collect())
            }
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, Type::Named(n) if n == name)
    }

    /// Named types match by name and arrays by element type. Anonymous
    /// struct literals all share the `struct` type. Record descriptions never
    /// match.
    pub fn structurally_equal(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Named(a), Type::Named(b)) => a == b,
            (Type::Array(a), Type::Array(b)) => a.structurally_equal(b),
            (Type::Structural, Type::Structural) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => f.write_str(name),
            Type::Array(elem) => write!(f, "[]{elem}"),
            Type::Record(fields) if fields.is_empty() => f.write_str("struct {}"),
            Type::Record(fields) => write!(f, "struct {{ {} }}", fields.join(", ")),
            Type::Structural => f.write_str("struct"),
        }
    }
}

/// Render a possibly unknown type.
pub fn display(ty: Option<&Type>) -> String {
    match ty {
        Some(ty) => ty.to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_compare_by_element() {
        let a = Type::array(Type::named("int"));
        assert!(a.structurally_equal(&Type::array(Type::named("int"))));
        assert!(!a.structurally_equal(&Type::array(Type::named("float"))));
        assert!(!a.structurally_equal(&Type::named("int")));
    }

    #[test]
    fn anonymous_structs_match_each_other_but_records_never_do() {
        assert!(Type::Structural.structurally_equal(&Type::Structural));
        assert!(!Type::Structural.structurally_equal(&Type::named("struct")));
        let record = Type::Record(vec!["x".into()]);
        assert!(!record.structurally_equal(&record.clone()));
    }

    #[test]
    fn renders_every_shape() {
        assert_eq!(Type::array(Type::array(Type::named("int"))).to_string(), "[][]int");
        assert_eq!(Type::Record(vec!["x".into(), "y".into()]).to_string(), "struct { x, y }");
        assert_eq!(Type::Structural.to_string(), "struct");
        assert_eq!(display(None), "unknown");
    }
}
