//! CLI parsing using clap.

use clap::Parser as CliParser;
use std::path::PathBuf;

#[derive(CliParser, Debug)]
#[clap(
    name = "semtab",
    about = "Symbol and type table explorer for a toy C-like language"
)]
pub struct Cli {
    /// Input source files; each is processed by a fresh session
    #[clap(value_parser, required = true)]
    pub input_files: Vec<PathBuf>,

    /// Enable verbose diagnostic output
    #[clap(short, long)]
    pub verbose: bool,

    /// Disable ANSI colors in the rendered tables
    #[clap(long)]
    pub no_color: bool,
}
