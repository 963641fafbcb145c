//! Recursive-descent parser for Ayla.
//!
//! The parser never gives up on the first error: a failed statement is
//! recorded as a [`ParseError`] and the token stream is resynchronised at the
//! next statement boundary, so a single typo still yields a usable tree for
//! the rest of the file.

mod expressions;
mod statements;
mod types;

use crate::ast::{Ident, Pos, Program, Stmt};
use crate::error::{PResult, ParseError};
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

/// Deepest nesting of expressions, blocks and types accepted. Anything deeper
/// is reported instead of recursing further.
const MAX_NESTING: usize = 128;

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    errors: Vec<ParseError>,
    /// Set while parsing `if`/`while`/`for` headers, where `name {` opens the
    /// body instead of a struct literal.
    no_struct_literal: bool,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            tokens: tokenize(source),
            cursor: 0,
            errors: Vec::new(),
            no_struct_literal: false,
            depth: 0,
        }
    }

    /// Parse the whole input, returning the tree and every error encountered.
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        while !self.at(&TokenKind::Eof) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            if self.at(&TokenKind::RBrace) {
                let stray = self.bump();
                self.errors.push(ParseError::at(&stray, "unexpected `}`"));
                continue;
            }
            self.statement_into(&mut statements);
        }
        (Program { statements }, self.errors)
    }

    /// Parse one statement into `out`, recovering on failure.
    pub(crate) fn statement_into(&mut self, out: &mut Vec<Stmt>) {
        let start = self.cursor;
        match self.parse_statement() {
            Ok(stmt) => {
                out.push(stmt);
                if !self.at_statement_end() {
                    let err = self.unexpected("end of statement");
                    self.errors.push(err);
                    let here = self.cursor;
                    self.synchronize(here);
                }
            }
            Err(err) => {
                self.errors.push(err);
                self.synchronize(start);
            }
        }
    }

    /// Skip tokens until the start of the next statement. Balanced braces are
    /// skipped as a unit so a broken header does not leak its body, and braces
    /// the failed statement already opened are closed before stopping.
    fn synchronize(&mut self, start: usize) {
        if self.cursor == start && !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
            self.bump();
        }
        let mut depth = self.tokens[start..self.cursor]
            .iter()
            .fold(0usize, |depth, token| match token.kind {
                TokenKind::LBrace => depth + 1,
                TokenKind::RBrace => depth.saturating_sub(1),
                _ => depth,
            });
        loop {
            let kind = self.peek().kind.clone();
            let newline = self.peek().newline_before;
            match kind {
                TokenKind::Eof => return,
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.bump();
                    return;
                }
                _ if depth == 0 && newline => return,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            self.bump();
        }
    }

    pub(crate) fn at_statement_end(&self) -> bool {
        let next = self.peek();
        next.newline_before
            || matches!(
                next.kind,
                TokenKind::Eof | TokenKind::RBrace | TokenKind::Semicolon
            )
    }

    pub(crate) fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    pub(crate) fn peek_at(&self, ahead: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + ahead).min(last)]
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    pub(crate) fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> PResult<Token> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        Err(self.unexpected(kind.describe()))
    }

    pub(crate) fn expect_ident(&mut self) -> PResult<Ident> {
        if self.at(&TokenKind::Ident) {
            let token = self.bump();
            return Ok(ident_from(&token));
        }
        Err(self.unexpected("identifier"))
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.peek();
        match &found.kind {
            TokenKind::Illegal(reason) => ParseError::at(found, reason.clone()),
            _ => ParseError::at(found, format!("expected {expected}, found {found}")),
        }
    }

    /// Run `f` one nesting level deeper, failing at the current token once
    /// [`MAX_NESTING`] is reached.
    pub(crate) fn nested<T>(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::at(self.peek(), format!("{what} nested too deeply")));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` with struct literals enabled or disabled, restoring the
    /// previous setting afterwards even on error.
    pub(crate) fn with_struct_literals<T>(
        &mut self,
        allowed: bool,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = std::mem::replace(&mut self.no_struct_literal, !allowed);
        let result = f(self);
        self.no_struct_literal = saved;
        result
    }
}

pub(crate) fn pos_of(token: &Token) -> Pos {
    Pos {
        line: token.line,
        column: token.column,
    }
}

pub(crate) fn ident_from(token: &Token) -> Ident {
    Ident::new(token.literal.as_str(), pos_of(token))
}

/// Parse `source` into a program and the list of syntax errors found.
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_after_a_broken_statement() {
        let (program, errors) = parse("egg 123 = 4\negg ok int = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn stray_closing_brace_is_reported_once() {
        let (program, errors) = parse("}\nx := 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unexpected `}`");
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn trailing_tokens_on_a_line_are_an_error() {
        let (program, errors) = parse("egg x int 5");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].token, "5");
        assert_eq!((errors[0].line, errors[0].column), (1, 11));
    }

    #[test]
    fn broken_header_skips_its_body() {
        let (program, errors) = parse("if x y {\n  z := 1\n}\nw := 2");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn deep_nesting_is_an_error_instead_of_a_crash() {
        let depth = MAX_NESTING * 3;
        let source = format!("x := {}1{}\ny := 2", "(".repeat(depth), ")".repeat(depth));
        let (program, errors) = parse(&source);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].message, "expression nested too deeply");
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn nesting_below_the_limit_parses() {
        let depth = MAX_NESTING / 2;
        let source = format!("x := {}1{}", "(".repeat(depth), ")".repeat(depth));
        let (_, errors) = parse(&source);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn deeply_nested_blocks_are_reported() {
        let depth = MAX_NESTING * 2;
        let source = format!("{}{}", "spawn {\n".repeat(depth), "}\n".repeat(depth));
        let (_, errors) = parse(&source);
        assert!(
            errors.iter().any(|e| e.message == "block nested too deeply"),
            "{errors:?}"
        );
    }

    #[test]
    fn missing_closing_brace_reports_end_of_file() {
        let (_, errors) = parse("fun f() {\n  x := 1\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].token, "");
        assert!(errors[0].message.contains("end of file"));
    }
}
