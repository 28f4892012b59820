mod cli;
mod compiler;


use std::process::ExitCode;

use clap::Parser as _;
use cli::{Cli, Command};
use myc_frontend::print;
use myc_session::diagnostics::PrettyDiagnosticEmitter;
use myc_session::ErrorsEmitted;

use crate::compiler::Compiler;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("errors while parsing")]
    HadErrors,
}

impl From<ErrorsEmitted> for CompilerError {
    fn from(_: ErrorsEmitted) -> Self {
        Self::HadErrors
    }
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CompilerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            input,
            tokens,
            canonical,
            verbose,
        } => {
            let source = input.load()?;

            let mut compiler = Compiler::new(PrettyDiagnosticEmitter::verbose(verbose));
            let parsed = compiler.parse(source)?;

            if tokens {
                println!("{}", print::dump_tokens(&parsed.tokens));
            }

            if canonical {
                let types = &compiler.grammar().types;
                print!("{}", print::render_program(&parsed.program, types));
            } else {
                print!("{}", print::dump_program(&parsed.program));
            }
        }

        Command::Tokens { input } => {
            let source = input.load()?;

            let mut compiler = Compiler::new(PrettyDiagnosticEmitter::default());
            let tokens = compiler.tokenize(source)?;

            print!("{}", print::dump_tokens(&tokens));
        }
    }

    Ok(())
}
