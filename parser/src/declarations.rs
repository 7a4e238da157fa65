use model::{DeclId, Declaration, FuncDef, ParseError, Stmt, Token, VarDef};
use crate::expressions::ExpressionParser;
use crate::parser::Parser;
use crate::statements::StatementParser;
use crate::types::TypeParser;

/// Variable and function definitions
pub(crate) trait DeclarationParser {
    /// `[const] type name ( params ) { ... }` or `[const] type name [= expr] ;`
    fn parse_definition(&mut self) -> Result<DeclId, ParseError>;
    /// A definition wrapped as a statement.
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError>;
    fn parse_function_params(&mut self) -> Result<Vec<DeclId>, ParseError>;
}

impl<'a> DeclarationParser for Parser<'a> {
    fn parse_definition(&mut self) -> Result<DeclId, ParseError> {
        let is_const = self.match_token(|t| matches!(t, Token::Const));
        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;

        if self.check(|t| matches!(t, Token::OpenParenthesis)) {
            if is_const {
                return Err(ParseError::ConstFunction(name));
            }
            let params = self.parse_function_params()?;
            let body = self.parse_block()?;
            let function = FuncDef {
                return_type: ty,
                name,
                params,
                body,
            };
            return Ok(self.alloc(Declaration::Func(function)));
        }

        let init = if self.match_token(|t| matches!(t, Token::Equal)) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(|t| matches!(t, Token::Semicolon), "';'")?;

        let var = VarDef {
            r#type: ty,
            name,
            init,
            is_const,
        };
        Ok(self.alloc(Declaration::Var(var)))
    }

    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        let id = self.parse_definition()?;
        Ok(match self.declarations[id.0] {
            Declaration::Var(_) => Stmt::VarDecl(id),
            Declaration::Func(_) => Stmt::FuncDecl(id),
        })
    }

    fn parse_function_params(&mut self) -> Result<Vec<DeclId>, ParseError> {
        self.expect(|t| matches!(t, Token::OpenParenthesis), "'('")?;
        let mut params = Vec::new();

        if self.match_token(|t| matches!(t, Token::CloseParenthesis)) {
            return Ok(params);
        }

        loop {
            let is_const = self.match_token(|t| matches!(t, Token::Const));
            let ty = self.parse_type()?;
            let name = self.expect_identifier()?;
            params.push(self.alloc(Declaration::Var(VarDef {
                r#type: ty,
                name,
                init: None,
                is_const,
            })));

            if !self.match_token(|t| matches!(t, Token::Comma)) {
                break;
            }
        }

        self.expect(|t| matches!(t, Token::CloseParenthesis), "')'")?;
        Ok(params)
    }
}
