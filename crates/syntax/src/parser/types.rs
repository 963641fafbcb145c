use super::{Parser, pos_of};
use crate::ast::{FieldDecl, TypeExpr};
use crate::error::PResult;
use crate::token::TokenKind;

impl Parser {
    /// `name`, `[]elem` or `struct { field type ... }`.
    pub(crate) fn parse_type(&mut self) -> PResult<TypeExpr> {
        self.nested("type", |p| p.parse_type_expr())
    }

    fn parse_type_expr(&mut self) -> PResult<TypeExpr> {
        match self.peek().kind {
            TokenKind::Ident => Ok(TypeExpr::Named(self.expect_ident()?)),
            TokenKind::LBracket => {
                let open = self.bump();
                self.expect(&TokenKind::RBracket)?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Array {
                    open: pos_of(&open),
                    elem: Box::new(elem),
                })
            }
            TokenKind::Struct => {
                let keyword = self.bump();
                self.expect(&TokenKind::LBrace)?;
                let mut fields = Vec::new();
                while !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
                    let name = self.expect_ident()?;
                    let ty = self.parse_type()?;
                    fields.push(FieldDecl { name, ty });
                    if !self.eat(&TokenKind::Comma)
                        && !self.peek().newline_before
                        && !self.at(&TokenKind::RBrace)
                    {
                        return Err(self.unexpected("`,` or `}`"));
                    }
                }
                let close = self.expect(&TokenKind::RBrace)?;
                Ok(TypeExpr::Struct {
                    keyword: pos_of(&keyword),
                    fields,
                    close: pos_of(&close),
                })
            }
            _ => Err(self.unexpected("type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Stmt, TypeExpr};
    use crate::parse;

    fn declared_type(src: &str) -> TypeExpr {
        let (program, errors) = parse(src);
        assert!(errors.is_empty(), "{errors:?}");
        match program.statements.into_iter().next() {
            Some(Stmt::Var(decl)) => decl.ty.expect("annotation"),
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn parses_nested_array_type() {
        let ty = declared_type("egg grid [][]int");
        assert_eq!(ty.display_name(), "[][]int");
    }

    #[test]
    fn parses_inline_struct_type_with_commas() {
        let ty = declared_type("egg p struct { x int, y float }");
        let TypeExpr::Struct { fields, .. } = ty else {
            panic!("expected struct type");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].name.name, "y");
    }

    #[test]
    fn missing_field_separator_is_an_error() {
        let (_, errors) = parse("type P struct { x int y int }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].token, "y");
    }
}
