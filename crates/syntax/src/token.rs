//! Token definitions shared by the lexer and the parser.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident,
    Int(i64),
    Float(f64),
    Str(String),

    // Keywords
    Egg,
    Rock,
    Fun,
    Type,
    Struct,
    If,
    Else,
    For,
    While,
    Spawn,
    Return,
    Break,
    Continue,
    True,
    False,

    // Operators
    Assign,
    Walrus,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,

    // Punctuation
    Comma,
    Colon,
    Semicolon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    /// A character or sequence the lexer could not make sense of.
    Illegal(String),
    Eof,
}

impl TokenKind {
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "egg" => TokenKind::Egg,
            "rock" => TokenKind::Rock,
            "fun" => TokenKind::Fun,
            "type" => TokenKind::Type,
            "struct" => TokenKind::Struct,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "spawn" => TokenKind::Spawn,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Human readable name used in parse error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Egg => "`egg`",
            TokenKind::Rock => "`rock`",
            TokenKind::Fun => "`fun`",
            TokenKind::Type => "`type`",
            TokenKind::Struct => "`struct`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::For => "`for`",
            TokenKind::While => "`while`",
            TokenKind::Spawn => "`spawn`",
            TokenKind::Return => "`return`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Assign => "`=`",
            TokenKind::Walrus => "`:=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Illegal(_) => "illegal token",
            TokenKind::Eof => "end of file",
        }
    }
}

/// A lexed token.
///
/// `line` and `column` are one-based and point just past the last character
/// of the token, which is where the lexer cursor sits after consuming it.
/// Columns count UTF-16 code units so they line up with editor positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: u32,
    pub column: u32,
    /// True when at least one line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    pub fn width(&self) -> u32 {
        utf16_len(&self.literal)
    }

    /// One-based column of the first character of the token.
    pub fn start_column(&self) -> u32 {
        self.column.saturating_sub(self.width())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of file"),
            _ => write!(f, "`{}`", self.literal),
        }
    }
}

pub(crate) fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
