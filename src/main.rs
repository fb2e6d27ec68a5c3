//! # Meshwork CLI
//!
//! Binary entry point for the `meshwork` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Resolving the configuration and running the merge batch.
//! - Letting any error propagate to process termination with a non-zero
//!   status and the error message on stderr.
//!
//! All application logic lives in the library crate; the binary is a thin
//! wrapper around it.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::Cli::parse();
    cli.execute()
}
