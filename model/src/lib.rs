// Shared data model for every stage of the pipeline:
// - lib.rs: tokens and declared types
// - ast.rs: the syntax tree and its declaration arena
// - scope.rs: the scope chain used by the analyzer and the executor
// - error.rs: one error enum per pass plus the pipeline-level `Error`

pub mod ast;
pub mod error;
pub mod scope;

use std::fmt;

pub use ast::{
    BinaryOp, Block, DeclId, Declaration, Expr, FuncDef, Jump, JumpKind, Program, SignOp, StepOp,
    Stmt, VarDef,
};
pub use error::{Error, LexError, ParseError, RuntimeError, ScopeError, SemanticError};
pub use scope::{ScopeChain, ScopeId};

/// Names handled by the executor itself instead of user-defined functions.
pub const BUILTIN_PRINT: &str = "print";
pub const BUILTIN_SCAN: &str = "scan";

/// Name of the program entry point.
pub const ENTRY_POINT: &str = "main";

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    Identifier { value: String },
    IntLiteral { value: String },
    DoubleLiteral { value: String },
    CharLiteral { value: u8 },
    BoolLiteral { value: bool },
    OpenParenthesis,
    CloseParenthesis,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comma,
    // Keywords
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    Const,
    // Type names
    Int,
    Double,
    Char,
    Bool,
    Void,
    Float, // legacy spelling of double
    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Equal,
    EqualEqual,
    BangEqual,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PlusPlus,
    MinusMinus,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Bang,
    AndAnd,
    OrOr,
    Ampersand,
    Pipe,
    End,
}

impl Token {
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            Token::Int | Token::Double | Token::Char | Token::Bool | Token::Void | Token::Float
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Identifier { value }
            | Token::IntLiteral { value }
            | Token::DoubleLiteral { value } => return write!(f, "'{value}'"),
            Token::CharLiteral { value } => return write!(f, "'{}'", char::from(*value)),
            Token::BoolLiteral { value } => return write!(f, "'{value}'"),
            Token::End => return write!(f, "end of input"),
            Token::OpenParenthesis => "(",
            Token::CloseParenthesis => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::For => "for",
            Token::Return => "return",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Const => "const",
            Token::Int => "int",
            Token::Double => "double",
            Token::Char => "char",
            Token::Bool => "bool",
            Token::Void => "void",
            Token::Float => "float",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Caret => "^",
            Token::Equal => "=",
            Token::EqualEqual => "==",
            Token::BangEqual => "!=",
            Token::PlusEqual => "+=",
            Token::MinusEqual => "-=",
            Token::StarEqual => "*=",
            Token::SlashEqual => "/=",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::Bang => "!",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Ampersand => "&",
            Token::Pipe => "|",
        };
        write!(f, "'{text}'")
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Type {
    Int,
    Double,
    Char,
    Bool,
    Void,
}

impl Type {
    /// Types that accept unary sign and increment/decrement.
    pub fn is_signed_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Double)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Double => "double",
            Type::Char => "char",
            Type::Bool => "bool",
            Type::Void => "void",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_display_quotes_text() {
        assert_eq!(Token::PlusEqual.to_string(), "'+='");
        assert_eq!(Token::Identifier { value: "x".to_string() }.to_string(), "'x'");
        assert_eq!(Token::CharLiteral { value: b'a' }.to_string(), "'a'");
        assert_eq!(Token::End.to_string(), "end of input");
    }

    #[test]
    fn type_names() {
        assert!(Token::Float.is_type_name());
        assert!(!Token::Const.is_type_name());
        assert_eq!(Type::Double.to_string(), "double");
    }
}
