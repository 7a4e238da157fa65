use model::{LexError, Token};
use crate::keywords::keyword_or_identifier;
use crate::operators::{is_operator_char, operator_token};

pub struct StateMachineLexer<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
    token_start: usize,
}

impl<'a> StateMachineLexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            pos: 0,
            token_start: 0,
        }
    }

    /// Tokenize the whole input. The result always ends with `Token::End`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.pos < self.input.len() {
            match self.lex_next_token()? {
                Some(token) => tokens.push(token),
                None => continue, // Whitespace or comment consumed
            }
        }

        tokens.push(Token::End);
        Ok(tokens)
    }

    fn lex_next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        if self.pos >= self.input.len() {
            return Ok(None);
        }

        self.token_start = self.pos;
        let ch = self.current_char();

        match ch {
            '/' if self.peek(1) == Some('/') => {
                self.skip_line_comment();
                Ok(None)
            }
            '/' if self.peek(1) == Some('*') => {
                self.skip_block_comment()?;
                Ok(None)
            }
            '0'..='9' | '.' => self.lex_number(),
            '\'' => self.lex_char(),
            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier(),
            c if is_operator_char(c) => self.lex_operator(),
            _ => self.lex_punctuation(),
        }
    }

    fn current_char(&self) -> char {
        char::from(self.input[self.pos])
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied().map(char::from)
    }

    fn current_slice(&self) -> &'a str {
        &self.source[self.token_start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            match self.current_char() {
                ' ' | '\t' | '\n' | '\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.input.len() && self.current_char() != '\n' {
            self.pos += 1;
        }
        if self.pos < self.input.len() {
            self.pos += 1; // Skip the newline
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        self.pos += 2; // Skip the initial /*

        while self.pos < self.input.len() {
            if self.current_char() == '*' && self.peek(1) == Some('/') {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }

        Err(LexError::UnterminatedComment { offset: self.token_start })
    }

    fn consume_digits(&mut self) -> usize {
        let start = self.pos;
        while self.pos < self.input.len() && self.current_char().is_ascii_digit() {
            self.pos += 1;
        }
        self.pos - start
    }

    fn lex_number(&mut self) -> Result<Option<Token>, LexError> {
        let int_digits = self.consume_digits();

        if self.peek(0) != Some('.') {
            let value = self.current_slice().to_string();
            return Ok(Some(Token::IntLiteral { value }));
        }

        self.pos += 1; // Skip the dot
        let frac_digits = self.consume_digits();
        if int_digits == 0 && frac_digits == 0 {
            return Err(LexError::MalformedNumber { offset: self.token_start });
        }

        let value = self.current_slice().to_string();
        Ok(Some(Token::DoubleLiteral { value }))
    }

    fn lex_char(&mut self) -> Result<Option<Token>, LexError> {
        // Exactly one byte between the quotes: 'x'
        let content = self.input.get(self.pos + 1).copied();
        let closing = self.input.get(self.pos + 2).copied();
        match (content, closing) {
            (Some(value), Some(b'\'')) if value.is_ascii() => {
                self.pos += 3;
                Ok(Some(Token::CharLiteral { value }))
            }
            _ => Err(LexError::InvalidCharLiteral { offset: self.token_start }),
        }
    }

    fn lex_identifier(&mut self) -> Result<Option<Token>, LexError> {
        while self.pos < self.input.len() {
            match self.current_char() {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => self.pos += 1,
                _ => break,
            }
        }

        Ok(Some(keyword_or_identifier(self.current_slice())))
    }

    /// Longest match: keep extending while the longer text is still a known
    /// operator, otherwise fall back to the last recognized length.
    fn lex_operator(&mut self) -> Result<Option<Token>, LexError> {
        let mut len = 0;
        let mut matched = None;

        while let Some(ch) = self.peek(len) {
            if !is_operator_char(ch) {
                break;
            }
            match operator_token(&self.source[self.pos..self.pos + len + 1]) {
                Some(token) => {
                    matched = Some(token);
                    len += 1;
                }
                None => break,
            }
        }

        match matched {
            Some(token) => {
                self.pos += len;
                Ok(Some(token))
            }
            None => Err(LexError::InvalidOperator { offset: self.token_start }),
        }
    }

    fn lex_punctuation(&mut self) -> Result<Option<Token>, LexError> {
        let token = match self.current_char() {
            '(' => Token::OpenParenthesis,
            ')' => Token::CloseParenthesis,
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            _ => {
                let symbol = self.source[self.pos..].chars().next().unwrap_or('\u{FFFD}');
                return Err(LexError::UnknownSymbol { symbol, offset: self.pos });
            }
        };

        self.pos += 1;
        Ok(Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine_basic() {
        let input = "int x = 123;";
        let mut lexer = StateMachineLexer::new(input);
        let tokens = lexer.tokenize().expect("Should tokenize");

        assert_eq!(tokens.len(), 6);
        assert!(matches!(tokens[0], Token::Int));
        assert!(matches!(tokens[1], Token::Identifier { .. }));
        assert!(matches!(tokens[2], Token::Equal));
        assert!(matches!(&tokens[3], Token::IntLiteral { value } if value == "123"));
        assert!(matches!(tokens[4], Token::Semicolon));
        assert!(matches!(tokens[5], Token::End));
    }

    #[test]
    fn test_state_machine_double() {
        let input = "double x = 3.14;";
        let mut lexer = StateMachineLexer::new(input);
        let tokens = lexer.tokenize().expect("Should tokenize");

        assert!(matches!(&tokens[3], Token::DoubleLiteral { value } if value == "3.14"));
    }

    #[test]
    fn test_state_machine_comments() {
        let input = "int /* comment */ x; // line comment\nint y;";
        let mut lexer = StateMachineLexer::new(input);
        let tokens = lexer.tokenize().expect("Should tokenize");

        // int x ; int y ; <end>
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_state_machine_unknown_symbol_offset() {
        let mut lexer = StateMachineLexer::new("int x = 1 # 2;");
        assert_eq!(
            lexer.tokenize(),
            Err(LexError::UnknownSymbol { symbol: '#', offset: 10 })
        );
    }
}
