use model::{ParseError, Token, Type};
use crate::parser::Parser;

/// Type parsing functionality
pub(crate) trait TypeParser {
    fn parse_type(&mut self) -> Result<Type, ParseError>;
}

impl<'a> TypeParser for Parser<'a> {
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let ty = match self.peek() {
            Token::Int => Type::Int,
            // `float` is the legacy spelling of `double`
            Token::Double | Token::Float => Type::Double,
            Token::Char => Type::Char,
            Token::Bool => Type::Bool,
            Token::Void => Type::Void,
            _ => return Err(self.error_expected("type name")),
        };
        self.advance();
        Ok(ty)
    }
}
