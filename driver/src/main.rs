use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser}; // clap crate for CLI argument parsing
use model::Error;
use tracing::{info, Level};

/*
Each stage flag stops the pipeline early and prints what that stage
produced. With no flag the program is analyzed and then executed; its
`print` output is the only thing written to stdout. Logs go to stderr.
*/

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program; standard input is read when omitted
    input_path: Option<PathBuf>,

    /// Run lexer only and print one token per line
    #[arg(short, long)]
    lex: bool,

    /// Run lexer and parser only and print the AST
    #[arg(short, long)]
    parse: bool,

    /// Run lexer, parser and semantic analysis only
    #[arg(short, long)]
    check: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Lex,
    Parse,
    Check,
    Run,
}

impl Args {
    fn stage(&self) -> Stage {
        if self.lex {
            Stage::Lex
        } else if self.parse {
            Stage::Parse
        } else if self.check {
            Stage::Check
        } else {
            Stage::Run
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // I/O failures print their cause chain
            match err.downcast_ref::<Error>() {
                Some(pipeline) => eprintln!("error: {pipeline}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = read_source(args.input_path.as_deref())?;
    info!(bytes = source.len(), stage = ?args.stage(), "source loaded");
    pipeline(&source, args.stage())?;
    Ok(())
}

fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("reading program from standard input")?;
            Ok(source)
        }
    }
}

/// Lex, parse, analyze and execute, stopping after `stage`.
fn pipeline(source: &str, stage: Stage) -> Result<(), Error> {
    let tokens = lexer::lex(source)?;
    if stage == Stage::Lex {
        for token in &tokens {
            println!("{token}");
        }
        return Ok(());
    }

    let program = parser::parse_tokens(&tokens)?;
    if stage == Stage::Parse {
        println!("{program:#?}");
        return Ok(());
    }

    semantic::analyze(&program)?;
    info!("semantic analysis passed");
    if stage == Stage::Check {
        return Ok(());
    }

    interpreter::execute(&program)?;
    Ok(())
}
