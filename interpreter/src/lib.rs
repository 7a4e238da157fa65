// Interpreter: executes an analyzed program by walking the AST.
//
// - executor.rs: Executor state, declarations, statements and calls
// - expressions.rs: expression evaluation, assignment and builtins dispatch
// - value.rs: runtime values and operator semantics
// - builtins.rs: `print` formatting and `scan` input parsing
// - symbol.rs: runtime symbols and statement completion

mod builtins;
mod executor;
mod expressions;
mod symbol;
mod value;

use std::io::{self, BufRead, Write};

use model::{Program, RuntimeError};

pub use executor::Executor;
pub use value::Value;

/// Execute against the process's standard input and output.
pub fn execute(program: &Program) -> Result<(), RuntimeError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    execute_with(program, stdin.lock(), stdout.lock())
}

/// Execute with explicit input and output streams.
pub fn execute_with<R: BufRead, W: Write>(program: &Program, input: R, output: W) -> Result<(), RuntimeError> {
    Executor::new(program, input, output).run()
}
