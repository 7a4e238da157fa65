use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::LazyLock;

use model::{RuntimeError, Type};
use regex_lite::Regex;

use crate::value::Value;

static INT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("int pattern is valid"));
static DOUBLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("double pattern is valid")
});
static BOOL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(true|false|1|0)$").expect("bool pattern is valid"));

/// Whitespace-delimited words read lazily from a line source.
pub(crate) struct Input<R> {
    reader: R,
    words: VecDeque<String>,
}

impl<R: BufRead> Input<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            words: VecDeque::new(),
        }
    }

    fn next_word(&mut self) -> Result<Option<String>, RuntimeError> {
        while self.words.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.words.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.words.pop_front())
    }

    /// Read one value of type `ty`.
    pub(crate) fn read(&mut self, ty: Type) -> Result<Value, RuntimeError> {
        let word = self
            .next_word()?
            .ok_or(RuntimeError::UnexpectedEndOfInput(ty))?;
        parse_word(ty, &word)
    }
}

fn parse_word(ty: Type, word: &str) -> Result<Value, RuntimeError> {
    let invalid = || RuntimeError::InvalidInput {
        ty,
        text: word.to_string(),
    };

    match ty {
        Type::Int if INT_WORD.is_match(word) => word.parse().map(Value::Int).map_err(|_| invalid()),
        Type::Double if DOUBLE_WORD.is_match(word) => word.parse().map(Value::Double).map_err(|_| invalid()),
        Type::Bool if BOOL_WORD.is_match(word) => Ok(Value::Bool(matches!(word, "true" | "1"))),
        // A char takes the first byte of the word
        Type::Char => word.bytes().next().map(Value::Char).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// `print`: one line per value.
pub(crate) fn print_values<W: Write>(output: &mut W, values: &[Value]) -> Result<(), RuntimeError> {
    for value in values {
        writeln!(output, "{value}")?;
    }
    Ok(())
}
