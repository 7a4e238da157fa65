use thiserror::Error;

use crate::{Token, Type};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unknown symbol '{symbol}' at offset {offset}")]
    UnknownSymbol { symbol: char, offset: usize },
    #[error("malformed number at offset {offset}: '.' needs a digit on at least one side")]
    MalformedNumber { offset: usize },
    #[error("invalid char literal at offset {offset}: expected exactly one character between quotes")]
    InvalidCharLiteral { offset: usize },
    #[error("unterminated block comment starting at offset {offset}")]
    UnterminatedComment { offset: usize },
    #[error("invalid operator at offset {offset}")]
    InvalidOperator { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: Token },
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    #[error("invalid numeric literal '{0}'")]
    InvalidLiteral(String),
    #[error("function '{0}' cannot be declared const")]
    ConstFunction(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("redeclaration of '{0}' in the same scope")]
    Redeclaration(String),
    #[error("cannot exit the root scope")]
    ExitRoot,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error("use of undeclared identifier '{0}'")]
    Undeclared(String),
    #[error("call to undefined function '{0}'")]
    UndefinedFunction(String),
    #[error("'{0}' is a variable, not a function")]
    NotAFunction(String),
    #[error("'{0}' is a function, not a variable")]
    NotAVariable(String),
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },
    #[error("variable '{0}' cannot have type void")]
    VoidVariable(String),
    #[error("cannot modify const variable '{0}'")]
    ConstAssignment(String),
    #[error("left side of '{0}' is not assignable")]
    InvalidLvalue(&'static str),
    #[error("chained assignment is not allowed")]
    ChainedAssignment,
    #[error("operator '{op}' cannot be applied to {ty}")]
    InvalidOperand { op: &'static str, ty: Type },
    #[error("'{op}' needs a variable operand")]
    InvalidStepOperand { op: &'static str },
    #[error("function '{name}' takes {expected} argument(s), {found} given")]
    ArityMismatch { name: String, expected: usize, found: usize },
    #[error("argument {index} of '{name}': expected {expected}, found {found}")]
    ArgumentType { name: String, index: usize, expected: Type, found: Type },
    #[error("'{0}' outside of a loop")]
    JumpOutsideLoop(&'static str),
    #[error("'{keyword}' at the top level of function '{function}'")]
    JumpInFunctionBody { keyword: &'static str, function: String },
    #[error("non-void function '{0}' has no top-level return")]
    MissingReturn(String),
    #[error("function '{function}' returns {expected}, found {found}")]
    ReturnType { function: String, expected: Type, found: Type },
    #[error("'{0}' used before initialization")]
    UninitializedUse(String),
    #[error("no 'main' function declared")]
    MissingMain,
    #[error("'main' declared {0} times")]
    MultipleMain(usize),
    #[error("'main' cannot take parameters")]
    MainParameters,
    #[error("condition must be bool, found {0}")]
    ConditionType(Type),
    #[error("'{0}' is a builtin and cannot be redefined")]
    BuiltinRedefinition(String),
    #[error("scan arguments must be variables")]
    ScanTarget,
    #[error("cannot print a void value")]
    VoidArgument,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error("unresolved identifier '{0}'")]
    UnresolvedIdentifier(String),
    #[error("unresolved function '{0}'")]
    UnresolvedFunction(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("operator '{op}' cannot combine {left} and {right}")]
    OperandMismatch { op: &'static str, left: Type, right: Type },
    #[error("operator '{op}' cannot be applied to {ty}")]
    InvalidOperand { op: &'static str, ty: Type },
    #[error("condition did not evaluate to bool")]
    NonBoolCondition,
    #[error("function '{0}' did not produce a value")]
    VoidValue(String),
    #[error("expression is not assignable")]
    NotAssignable,
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEndOfInput(Type),
    #[error("cannot read {ty} from '{text}'")]
    InvalidInput { ty: Type, text: String },
    #[error("i/o failure: {0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io(err.to_string())
    }
}

/// Any failure of the pipeline; each pass aborts on its first error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_prefixes_pass() {
        let err: Error = SemanticError::Undeclared("y".to_string()).into();
        assert_eq!(err.to_string(), "semantic error: use of undeclared identifier 'y'");

        let err: Error = ParseError::Expected { expected: "';'".to_string(), found: Token::CloseBrace }.into();
        assert_eq!(err.to_string(), "syntax error: expected ';', found '}'");
    }

    #[test]
    fn scope_errors_pass_through() {
        let err: SemanticError = ScopeError::Redeclaration("x".to_string()).into();
        assert_eq!(err.to_string(), "redeclaration of 'x' in the same scope");
    }
}
