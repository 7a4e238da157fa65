use model::Token;

/// Classify a scanned word as a keyword, type name, bool literal, the
/// `const` marker, or a plain identifier.
pub(crate) fn keyword_or_identifier(text: &str) -> Token {
    match text {
        "if" => Token::If,
        "else" => Token::Else,
        "while" => Token::While,
        "for" => Token::For,
        "return" => Token::Return,
        "break" => Token::Break,
        "continue" => Token::Continue,
        "true" => Token::BoolLiteral { value: true },
        "false" => Token::BoolLiteral { value: false },
        "const" => Token::Const,
        "int" => Token::Int,
        "double" => Token::Double,
        "char" => Token::Char,
        "bool" => Token::Bool,
        "void" => Token::Void,
        "float" => Token::Float,
        _ => Token::Identifier { value: text.to_string() },
    }
}
