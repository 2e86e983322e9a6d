use std::path::PathBuf;

use ast::{Options, OutputStyle};
use clap::{Args, Parser, Subcommand, ValueEnum};
use runtime::DEFAULT_PRECISION;

#[derive(Parser, Debug)]
#[command(name = "sassy", version, about = "Evaluates SassScript")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs a file of variable declarations, `@debug` and `@for` statements
    Run {
        file: PathBuf,
        /// Print the parsed program instead of running it
        #[arg(long)]
        dump_ast: bool,
        /// Print the program back as SassScript instead of running it
        #[arg(long, conflicts_with = "dump_ast")]
        to_sass: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Evaluates a single expression
    Eval {
        expression: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Starts an interactive session
    Repl {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    Expanded,
    Compressed,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Style::Expanded)]
    pub style: Style,
    /// Digits after the decimal point
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,
}

impl OutputArgs {
    pub fn options(&self) -> Options {
        let style = match self.style {
            Style::Expanded => OutputStyle::Expanded,
            Style::Compressed => OutputStyle::Compressed,
        };
        Options {
            style,
            precision: self.precision,
        }
    }
}
