use model::{Block, Expr, Jump, JumpKind, ParseError, Stmt, Token};
use crate::declarations::DeclarationParser;
use crate::expressions::ExpressionParser;
use crate::parser::Parser;

/// Statement parsing functionality
pub(crate) trait StatementParser {
    fn parse_stmt(&mut self) -> Result<Stmt, ParseError>;
    fn parse_block(&mut self) -> Result<Block, ParseError>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(|t| matches!(t, Token::OpenBrace), "'{'")?;
        let mut statements = Vec::new();
        while !self.check(|t| matches!(t, Token::CloseBrace)) && !self.is_at_end() {
            statements.push(self.parse_stmt()?);
        }
        self.expect(|t| matches!(t, Token::CloseBrace), "'}'")?;
        Ok(Block { statements })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(|t| matches!(t, Token::If)) {
            return self.parse_if_stmt();
        }

        if self.match_token(|t| matches!(t, Token::While)) {
            return self.parse_while_stmt();
        }

        if self.check(|t| matches!(t, Token::Break | Token::Continue | Token::Return)) {
            return self.parse_jump_stmt();
        }

        // Declarations start with a type name or the const marker
        if self.check(|t| t.is_type_name() || matches!(t, Token::Const)) {
            return self.parse_declaration();
        }

        // Nested block
        if self.check(|t| matches!(t, Token::OpenBrace)) {
            return Ok(Stmt::Block(self.parse_block()?));
        }

        let expr = self.parse_expr()?;
        self.expect(|t| matches!(t, Token::Semicolon), "';'")?;
        Ok(Stmt::Expr(expr))
    }
}

impl<'a> Parser<'a> {
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(|t| matches!(t, Token::OpenParenthesis), "'('")?;
        let cond = self.parse_expr()?;
        self.expect(|t| matches!(t, Token::CloseParenthesis), "')'")?;
        Ok(cond)
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let cond = self.parse_condition()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(|t| matches!(t, Token::Else)) {
            if self.match_token(|t| matches!(t, Token::If)) {
                Some(Box::new(self.parse_if_stmt()?))
            } else {
                Some(Box::new(Stmt::Block(self.parse_block()?)))
            }
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let cond = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_jump_stmt(&mut self) -> Result<Stmt, ParseError> {
        let kind = match self.advance() {
            Token::Break => JumpKind::Break,
            Token::Continue => JumpKind::Continue,
            _ => JumpKind::Return,
        };

        let value = if kind == JumpKind::Return && !self.check(|t| matches!(t, Token::Semicolon)) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(|t| matches!(t, Token::Semicolon), "';'")?;
        Ok(Stmt::Jump(Jump { kind, value }))
    }
}
