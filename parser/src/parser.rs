use model::{DeclId, Declaration, ParseError, Program, Token};
use crate::declarations::DeclarationParser;

static END: Token = Token::End;

/// Core parser struct that maintains parsing state
pub(crate) struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) pos: usize,
    /// Arena receiving every variable and function definition
    pub(crate) declarations: Vec<Declaration>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            declarations: Vec::new(),
        }
    }

    /// Parse the entire program: declaration statements until the end token
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut items = Vec::new();

        while !self.is_at_end() {
            items.push(self.parse_definition()?);
        }

        Ok(Program {
            items,
            declarations: self.declarations,
        })
    }

    pub(crate) fn alloc(&mut self, declaration: Declaration) -> DeclId {
        self.declarations.push(declaration);
        DeclId(self.declarations.len() - 1)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::End)
    }

    pub(crate) fn peek(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&END)
    }

    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn match_token<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&Token) -> bool,
    {
        if self.check(predicate) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Token) -> bool,
    {
        predicate(self.peek())
    }

    pub(crate) fn expect<F>(&mut self, predicate: F, expected: &str) -> Result<(), ParseError>
    where
        F: Fn(&Token) -> bool,
    {
        if self.check(predicate) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(expected))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Identifier { value } => {
                self.advance();
                Ok(value.clone())
            }
            _ => Err(self.error_expected("identifier")),
        }
    }

    pub(crate) fn error_expected(&self, expected: &str) -> ParseError {
        let found = self.peek().clone();
        tracing::debug!(pos = self.pos, expected, %found, "parse error");
        ParseError::Expected {
            expected: expected.to_string(),
            found,
        }
    }
}
