use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "goc",
    about = "Translate a restricted subset of Go declarations into C",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a Go file to C
    Transpile {
        /// Input Go file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the C output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a Go file and summarize its declarations
    Parse {
        /// Input Go file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the syntax tree as JSON
        #[arg(long)]
        output_ast: bool,
    },

    /// Check that files translate, without writing any output
    Check {
        /// Input Go files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,
    },
}
