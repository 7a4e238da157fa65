use model::Token;

const OPERATOR_CHARS: &str = "+-*/^=!<>|&";

pub(crate) fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(ch)
}

/// Every operator spelling the lexer knows.
pub(crate) fn operator_token(text: &str) -> Option<Token> {
    let token = match text {
        "+" => Token::Plus,
        "-" => Token::Minus,
        "*" => Token::Star,
        "/" => Token::Slash,
        "^" => Token::Caret,
        "=" => Token::Equal,
        "==" => Token::EqualEqual,
        "!=" => Token::BangEqual,
        "+=" => Token::PlusEqual,
        "-=" => Token::MinusEqual,
        "*=" => Token::StarEqual,
        "/=" => Token::SlashEqual,
        "++" => Token::PlusPlus,
        "--" => Token::MinusMinus,
        "<" => Token::Less,
        ">" => Token::Greater,
        "<=" => Token::LessEqual,
        ">=" => Token::GreaterEqual,
        "!" => Token::Bang,
        "&&" => Token::AndAnd,
        "||" => Token::OrOr,
        "&" => Token::Ampersand,
        "|" => Token::Pipe,
        _ => return None,
    };
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_char_starts_an_operator() {
        for ch in OPERATOR_CHARS.chars() {
            assert!(operator_token(&ch.to_string()).is_some(), "no operator for {ch}");
        }
    }

    #[test]
    fn unknown_spellings() {
        assert_eq!(operator_token("+-"), None);
        assert_eq!(operator_token("=>"), None);
        assert_eq!(operator_token("<<"), None);
    }
}
