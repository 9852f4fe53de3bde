//! # gin-mkdata CLI
//!
//! This is the binary entry point for the `gin-mkdata` command-line tool.
//!
//! It parses the command line with `clap`, sets up logging, and hands the
//! configuration document to the library's orchestrator. Errors bubble up to
//! `main`, which prints them and exits with a non-zero status.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
