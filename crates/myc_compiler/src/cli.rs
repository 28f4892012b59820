use clap::{Args, Parser, Subcommand};
use myc_session::sourcemap::Source;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a program and print its syntax tree.
    Parse {
        #[command(flatten)]
        input: Input,

        /// Print the tokens before the tree.
        #[clap(long, action)]
        tokens: bool,

        /// Print the program back out as fully parenthesized source instead
        /// of as a tree.
        #[clap(long, action)]
        canonical: bool,

        /// Also show notes, such as ignored comments.
        #[clap(long, short, action)]
        verbose: bool,
    },

    /// Split a program into tokens and print them.
    Tokens {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args)]
pub struct Input {
    /// The input file.
    pub input: String,

    /// Whether the given input should be used directly as the source instead
    /// of as the source file path.
    #[clap(long, short, action)]
    pub source: bool,
}

impl Input {
    pub fn load(self) -> std::io::Result<Source> {
        if self.source {
            return Ok(Source::new("<unnamed>", self.input));
        }

        let source = std::fs::read_to_string(&self.input)?;
        Ok(Source::new(self.input.clone(), source).with_path(self.input))
    }
}
