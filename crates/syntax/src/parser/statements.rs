use super::{Parser, pos_of};
use crate::ast::{
    Binding, Block, ElseBranch, Expr, ForStmt, FuncDecl, Ident, IfStmt, Param, Stmt, TypeDecl,
    VarDecl, WhileStmt,
};
use crate::error::{PResult, ParseError};
use crate::token::TokenKind;

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> PResult<Stmt> {
        match self.peek().kind {
            TokenKind::Egg => Ok(Stmt::Var(self.parse_var_decl(Binding::Egg)?)),
            TokenKind::Rock => Ok(Stmt::Var(self.parse_var_decl(Binding::Rock)?)),
            TokenKind::Fun => Ok(Stmt::Func(self.parse_func()?)),
            TokenKind::Type => Ok(Stmt::Type(self.parse_type_decl()?)),
            TokenKind::If => Ok(Stmt::If(self.parse_if()?)),
            TokenKind::For => Ok(Stmt::For(self.parse_for()?)),
            TokenKind::While => Ok(Stmt::While(self.parse_while()?)),
            TokenKind::Spawn => {
                self.bump();
                Ok(Stmt::Spawn(self.parse_block()?))
            }
            TokenKind::Return => {
                self.bump();
                if self.at_statement_end() {
                    Ok(Stmt::Return(None))
                } else {
                    Ok(Stmt::Return(Some(self.parse_expression()?)))
                }
            }
            TokenKind::Break => {
                self.bump();
                Ok(Stmt::Break)
            }
            TokenKind::Continue => {
                self.bump();
                Ok(Stmt::Continue)
            }
            _ => self.parse_simple_statement(),
        }
    }

    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        self.nested("block", |p| p.parse_block_body())
    }

    fn parse_block_body(&mut self) -> PResult<Block> {
        let open = self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            self.statement_into(&mut stmts);
        }
        let close = self.expect(&TokenKind::RBrace)?;
        Ok(Block {
            open: pos_of(&open),
            stmts,
            close: pos_of(&close),
        })
    }

    /// `egg a, b [type] [= value]` and `rock a [type] = value`.
    fn parse_var_decl(&mut self, binding: Binding) -> PResult<VarDecl> {
        self.bump();
        let names = self.parse_name_list()?;
        let ty = if self.starts_type() && !self.peek().newline_before {
            Some(self.parse_type()?)
        } else {
            None
        };
        let value = if binding == Binding::Rock {
            self.expect(&TokenKind::Assign)?;
            Some(self.parse_expression()?)
        } else if self.eat(&TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(VarDecl {
            binding,
            names,
            ty,
            value,
        })
    }

    fn parse_name_list(&mut self) -> PResult<Vec<Ident>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    /// Assignments, short declarations and expression statements.
    pub(crate) fn parse_simple_statement(&mut self) -> PResult<Stmt> {
        if self.at(&TokenKind::Ident)
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Comma | TokenKind::Walrus
            )
        {
            let names = self.parse_name_list()?;
            if self.eat(&TokenKind::Walrus) {
                let value = self.parse_expression()?;
                return Ok(Stmt::Var(VarDecl {
                    binding: Binding::Short,
                    names,
                    ty: None,
                    value: Some(value),
                }));
            }
            self.expect(&TokenKind::Assign)?;
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign {
                targets: names,
                value,
            });
        }

        let expr = self.parse_expression()?;
        if !self.at(&TokenKind::Assign) || self.peek().newline_before {
            return Ok(Stmt::Expr(expr));
        }

        let assign = self.bump();
        let value = self.parse_expression()?;
        match expr {
            Expr::Ident(ident) => Ok(Stmt::Assign {
                targets: vec![ident],
                value,
            }),
            Expr::Index { target, index } => Ok(Stmt::IndexAssign {
                target: *target,
                index: *index,
                value,
            }),
            Expr::Member { target, field } => Ok(Stmt::FieldAssign {
                target: *target,
                field,
                value,
            }),
            _ => Err(ParseError::at(&assign, "invalid assignment target")),
        }
    }

    fn parse_func(&mut self) -> PResult<FuncDecl> {
        self.bump();
        let name = self.expect_ident()?;
        let open_paren = self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(&TokenKind::RParen) {
            loop {
                let name = self.expect_ident()?;
                let ty = self.parse_type()?;
                params.push(Param { name, ty });
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        let ret = if self.at(&TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_type()?)
        };
        let body = self.parse_block()?;
        Ok(FuncDecl {
            name,
            open_paren: pos_of(&open_paren),
            params,
            ret,
            body,
        })
    }

    fn parse_type_decl(&mut self) -> PResult<TypeDecl> {
        self.bump();
        let name = self.expect_ident()?;
        let ty = self.parse_type()?;
        Ok(TypeDecl { name, ty })
    }

    fn parse_if(&mut self) -> PResult<IfStmt> {
        self.bump();
        let condition = self.parse_condition()?;
        let then_block = self.parse_block()?;
        let else_branch = if self.eat(&TokenKind::Else) {
            if self.at(&TokenKind::If) {
                Some(ElseBranch::If(Box::new(self.parse_if()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };
        Ok(IfStmt {
            condition,
            then_block,
            else_branch,
        })
    }

    /// `for [init]; [condition]; [post] { body }`
    fn parse_for(&mut self) -> PResult<ForStmt> {
        let keyword = self.bump();
        let (init, condition, post) = self.with_struct_literals(false, |p| {
            let init = if p.at(&TokenKind::Semicolon) {
                None
            } else {
                Some(Box::new(p.parse_for_clause()?))
            };
            p.expect(&TokenKind::Semicolon)?;
            let condition = if p.at(&TokenKind::Semicolon) {
                None
            } else {
                Some(p.parse_expression()?)
            };
            p.expect(&TokenKind::Semicolon)?;
            let post = if p.at(&TokenKind::LBrace) {
                None
            } else {
                Some(Box::new(p.parse_for_clause()?))
            };
            Ok((init, condition, post))
        })?;
        let body = self.parse_block()?;
        Ok(ForStmt {
            keyword: pos_of(&keyword),
            init,
            condition,
            post,
            body,
        })
    }

    fn parse_for_clause(&mut self) -> PResult<Stmt> {
        if self.at(&TokenKind::Egg) {
            Ok(Stmt::Var(self.parse_var_decl(Binding::Egg)?))
        } else {
            self.parse_simple_statement()
        }
    }

    fn parse_while(&mut self) -> PResult<WhileStmt> {
        self.bump();
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(WhileStmt { condition, body })
    }

    fn parse_condition(&mut self) -> PResult<Expr> {
        self.with_struct_literals(false, |p| p.parse_expression())
    }

    pub(crate) fn starts_type(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident | TokenKind::LBracket | TokenKind::Struct
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse;

    fn parse_ok(src: &str) -> Vec<Stmt> {
        let (program, errors) = parse(src);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        program.statements
    }

    #[test]
    fn parses_typed_declaration() {
        let stmts = parse_ok("egg count int = 3");
        let Stmt::Var(decl) = &stmts[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.binding, Binding::Egg);
        assert_eq!(decl.names[0].name, "count");
        assert!(matches!(&decl.ty, Some(TypeExpr::Named(t)) if t.name == "int"));
        assert_eq!(decl.value, Some(Expr::Int(3)));
    }

    #[test]
    fn type_on_next_line_is_not_an_annotation() {
        let stmts = parse_ok("egg x\ny = 2");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[0], Stmt::Var(VarDecl { ty: None, value: None, .. })));
        assert!(matches!(&stmts[1], Stmt::Assign { .. }));
    }

    #[test]
    fn parses_multi_name_forms() {
        let stmts = parse_ok("rock a, b int = 1\nc, d := 2\nc, d = 3");
        assert!(matches!(&stmts[0], Stmt::Var(VarDecl { binding: Binding::Rock, names, .. }) if names.len() == 2));
        assert!(matches!(&stmts[1], Stmt::Var(VarDecl { binding: Binding::Short, names, .. }) if names.len() == 2));
        assert!(matches!(&stmts[2], Stmt::Assign { targets, .. } if targets.len() == 2));
    }

    #[test]
    fn rock_requires_a_value() {
        let (_, errors) = parse("rock pi float");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("`=`"));
    }

    #[test]
    fn parses_function_with_params_and_return_type() {
        let stmts = parse_ok("fun add(a int, b int) int {\n  return a + b\n}");
        let Stmt::Func(func) = &stmts[0] else {
            panic!("expected function");
        };
        assert_eq!(func.name.name, "add");
        assert_eq!(func.params.len(), 2);
        assert!(func.ret.is_some());
        assert!(matches!(func.body.stmts[0], Stmt::Return(Some(Expr::Infix { .. }))));
    }

    #[test]
    fn parses_for_loop_header() {
        let stmts = parse_ok("for egg i = 0; i < 3; i = i + 1 {\n  print(i)\n}");
        let Stmt::For(for_stmt) = &stmts[0] else {
            panic!("expected for loop");
        };
        assert!(matches!(for_stmt.init.as_deref(), Some(Stmt::Var(_))));
        assert!(for_stmt.condition.is_some());
        assert!(matches!(for_stmt.post.as_deref(), Some(Stmt::Assign { .. })));
        assert_eq!(for_stmt.body.stmts.len(), 1);
    }

    #[test]
    fn condition_does_not_swallow_the_body_as_struct_literal() {
        let stmts = parse_ok("if ready {\n  x := 1\n} else if other {\n} else {\n}");
        let Stmt::If(if_stmt) = &stmts[0] else {
            panic!("expected if");
        };
        assert!(matches!(if_stmt.condition, Expr::Ident(_)));
        assert!(matches!(if_stmt.else_branch, Some(ElseBranch::If(_))));
    }

    #[test]
    fn parses_assignment_targets() {
        let stmts = parse_ok("xs[0] = 1\np.x = 2");
        assert!(matches!(stmts[0], Stmt::IndexAssign { .. }));
        assert!(matches!(&stmts[1], Stmt::FieldAssign { field, .. } if field.name == "x"));
    }

    #[test]
    fn rejects_call_as_assignment_target() {
        let (_, errors) = parse("f() = 1");
        assert_eq!(errors[0].message, "invalid assignment target");
    }

    #[test]
    fn parses_struct_type_declaration() {
        let stmts = parse_ok("type Point struct {\n  x int\n  y int\n}");
        let Stmt::Type(decl) = &stmts[0] else {
            panic!("expected type declaration");
        };
        assert_eq!(decl.ty.display_name(), "struct { x, y }");
    }

    #[test]
    fn parses_spawn_block() {
        let stmts = parse_ok("spawn {\n  work()\n}");
        assert!(matches!(&stmts[0], Stmt::Spawn(block) if block.stmts.len() == 1));
    }
}
