mod keywords;
mod operators;
mod state_machine;

use model::{LexError, Token};
use state_machine::StateMachineLexer;
use tracing::debug;

/// Main lexer entry point. The returned sequence is terminated by `Token::End`.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = StateMachineLexer::new(input);
    let tokens = lexer.tokenize()?;
    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
