//! Pratt expression parser.
//!
//! Infix operators and postfix forms (call, index, member access) only
//! continue an expression when they sit on the same line as what precedes
//! them; a line break always ends the expression.

use super::{Parser, ident_from};
use crate::ast::{Expr, FieldInit, InfixOp, PrefixOp};
use crate::error::{PResult, ParseError};
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Or,
    And,
    Equality,
    Comparison,
    Sum,
    Product,
    Prefix,
}

fn infix_operator(kind: &TokenKind) -> Option<(InfixOp, Precedence)> {
    let op = match kind {
        TokenKind::OrOr => (InfixOp::Or, Precedence::Or),
        TokenKind::AndAnd => (InfixOp::And, Precedence::And),
        TokenKind::EqEq => (InfixOp::Eq, Precedence::Equality),
        TokenKind::NotEq => (InfixOp::NotEq, Precedence::Equality),
        TokenKind::Lt => (InfixOp::Lt, Precedence::Comparison),
        TokenKind::Gt => (InfixOp::Gt, Precedence::Comparison),
        TokenKind::LtEq => (InfixOp::LtEq, Precedence::Comparison),
        TokenKind::GtEq => (InfixOp::GtEq, Precedence::Comparison),
        TokenKind::Plus => (InfixOp::Add, Precedence::Sum),
        TokenKind::Minus => (InfixOp::Sub, Precedence::Sum),
        TokenKind::Star => (InfixOp::Mul, Precedence::Product),
        TokenKind::Slash => (InfixOp::Div, Precedence::Product),
        TokenKind::Percent => (InfixOp::Rem, Precedence::Product),
        _ => return None,
    };
    Some(op)
}

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> PResult<Expr> {
        self.parse_expr_with(Precedence::Lowest)
    }

    fn parse_expr_with(&mut self, min: Precedence) -> PResult<Expr> {
        self.nested("expression", |p| p.parse_operators(min))
    }

    fn parse_operators(&mut self, min: Precedence) -> PResult<Expr> {
        let mut left = self.parse_prefix()?;
        loop {
            if self.peek().newline_before {
                break;
            }
            let kind = self.peek().kind.clone();
            left = match kind {
                TokenKind::LParen => self.parse_call(left)?,
                TokenKind::LBracket => self.parse_index(left)?,
                TokenKind::Dot => {
                    self.bump();
                    let field = self.expect_ident()?;
                    Expr::Member {
                        target: Box::new(left),
                        field,
                    }
                }
                kind => {
                    let Some((op, precedence)) = infix_operator(&kind) else {
                        break;
                    };
                    if precedence <= min {
                        break;
                    }
                    self.bump();
                    let right = self.parse_expr_with(precedence)?;
                    Expr::Infix {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    }
                }
            };
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> PResult<Expr> {
        let token = self.peek().clone();
        let expr = match token.kind {
            TokenKind::Ident => {
                self.bump();
                let name = ident_from(&token);
                if self.at(&TokenKind::LBrace)
                    && !self.no_struct_literal
                    && !self.peek().newline_before
                {
                    let fields = self.parse_field_inits()?;
                    Expr::StructLit { name, fields }
                } else {
                    Expr::Ident(name)
                }
            }
            TokenKind::Int(value) => {
                self.bump();
                Expr::Int(value)
            }
            TokenKind::Float(value) => {
                self.bump();
                Expr::Float(value)
            }
            TokenKind::Str(value) => {
                self.bump();
                Expr::Str(value)
            }
            TokenKind::True | TokenKind::False => {
                self.bump();
                Expr::Bool(token.kind == TokenKind::True)
            }
            TokenKind::Minus | TokenKind::Bang => {
                self.bump();
                let op = if token.kind == TokenKind::Minus {
                    PrefixOp::Neg
                } else {
                    PrefixOp::Not
                };
                let operand = self.parse_expr_with(Precedence::Prefix)?;
                Expr::Prefix {
                    op,
                    operand: Box::new(operand),
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.with_struct_literals(true, |p| p.parse_expression())?;
                self.expect(&TokenKind::RParen)?;
                inner
            }
            TokenKind::LBracket => {
                self.bump();
                Expr::Array(self.parse_expr_list(TokenKind::RBracket)?)
            }
            TokenKind::Struct => {
                self.bump();
                Expr::AnonStruct {
                    fields: self.parse_field_inits()?,
                }
            }
            TokenKind::Illegal(ref reason) => return Err(ParseError::at(&token, reason.clone())),
            _ => return Err(self.unexpected("expression")),
        };
        Ok(expr)
    }

    fn parse_call(&mut self, callee: Expr) -> PResult<Expr> {
        self.bump();
        let args = self.parse_expr_list(TokenKind::RParen)?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
        })
    }

    fn parse_index(&mut self, target: Expr) -> PResult<Expr> {
        self.bump();
        let index = self.with_struct_literals(true, |p| p.parse_expression())?;
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::Index {
            target: Box::new(target),
            index: Box::new(index),
        })
    }

    /// Comma separated expressions up to and including `close`; a trailing
    /// comma is accepted.
    fn parse_expr_list(&mut self, close: TokenKind) -> PResult<Vec<Expr>> {
        self.with_struct_literals(true, |p| {
            let mut items = Vec::new();
            while !p.at(&close) {
                items.push(p.parse_expression()?);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.expect(&close)?;
            Ok(items)
        })
    }

    /// `{ name: value, ... }` for named and anonymous struct literals.
    fn parse_field_inits(&mut self) -> PResult<Vec<FieldInit>> {
        self.expect(&TokenKind::LBrace)?;
        self.with_struct_literals(true, |p| {
            let mut fields = Vec::new();
            while !p.at(&TokenKind::RBrace) && !p.at(&TokenKind::Eof) {
                let name = p.expect_ident()?;
                p.expect(&TokenKind::Colon)?;
                let value = p.parse_expression()?;
                fields.push(FieldInit { name, value });
                if !p.eat(&TokenKind::Comma) && !p.peek().newline_before {
                    break;
                }
            }
            p.expect(&TokenKind::RBrace)?;
            Ok(fields)
        })
    }
}
