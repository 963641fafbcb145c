//! Syntax tree for Ayla programs.
//!
//! The tree is a closed set of enums. Analysis passes match on every variant
//! explicitly, so a new syntax shape cannot be added without the compiler
//! pointing at each visitor that has to learn about it.

use crate::token::utf16_len;
use smol_str::SmolStr;

/// Location of a token: one-based line, and the one-based column just past
/// the token's last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: SmolStr,
    pub pos: Pos,
}

impl Ident {
    pub fn new(name: impl Into<SmolStr>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Width of the identifier in UTF-16 code units.
    pub fn width(&self) -> u32 {
        utf16_len(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A braced statement list. `open` and `close` are the positions of the
/// braces themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub open: Pos,
    pub stmts: Vec<Stmt>,
    pub close: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Named(Ident),
    Array {
        open: Pos,
        elem: Box<TypeExpr>,
    },
    Struct {
        keyword: Pos,
        fields: Vec<FieldDecl>,
        close: Pos,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: Ident,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// `egg x int = ...`
    Egg,
    /// `rock x = ...`
    Rock,
    /// `x := ...`
    Short,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub binding: Binding,
    pub names: Vec<Ident>,
    pub ty: Option<TypeExpr>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Position of the opening parenthesis of the parameter list.
    pub open_paren: Pos,
    pub params: Vec<Param>,
    pub ret: Option<TypeExpr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: Ident,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Block,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Pos,
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Var(VarDecl),
    Func(FuncDecl),
    Type(TypeDecl),
    /// `a = v` or `a, b = v`
    Assign { targets: Vec<Ident>, value: Expr },
    /// `xs[i] = v`
    IndexAssign {
        target: Expr,
        index: Expr,
        value: Expr,
    },
    /// `p.x = v`
    FieldAssign {
        target: Expr,
        field: Ident,
        value: Expr,
    },
    Expr(Expr),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Spawn(Block),
    Return(Option<Expr>),
    Break,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInit {
    pub name: Ident,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Array(Vec<Expr>),
    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Member {
        target: Box<Expr>,
        field: Ident,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `Point { x: 1, y: 2 }`
    StructLit {
        name: Ident,
        fields: Vec<FieldInit>,
    },
    /// `struct { x: 1 }`
    AnonStruct { fields: Vec<FieldInit> },
}

impl TypeExpr {
    /// Source-like rendering of a type annotation, e.g. `[]int` or `struct { x, y }`.
    pub fn display_name(&self) -> String {
        match self {
            TypeExpr::Named(ident) => ident.name.to_string(),
            TypeExpr::Array { elem, .. } => format!("[]{}", elem.display_name()),
            TypeExpr::Struct { fields, .. } => struct_display(fields.iter().map(|f| &f.name)),
        }
    }
}

/// `struct { a, b }`, listing field names only.
pub fn struct_display<'a>(names: impl Iterator<Item = &'a Ident>) -> String {
    let names: Vec<&str> = names.map(|n| n.name.as_str()).collect();
    if names.is_empty() {
        "struct {}".to_string()
    } else {
        format!("struct {{ {} }}", names.join(", "))
    }
}
