//! CLI argument parsing and execution

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use meshwork::config::{self, Options};
use meshwork::Orchestrator;

/// Meshwork - Merge a base package.json into a set of module packages
#[derive(Parser, Debug)]
#[command(name = "meshwork")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The base package file whose fields are propagated
    #[arg(short, long, value_name = "PATH")]
    base: PathBuf,

    /// The list of modules that will take part in the merge
    #[arg(
        short,
        long,
        value_name = "PATH[,PATH...]",
        value_delimiter = ',',
        required = true
    )]
    modules: Vec<PathBuf>,

    /// Path to config file; when it exists it supersedes the other flags
    #[arg(short, long, value_name = "PATH", env = "MESHWORK_CONFIG")]
    config: Option<PathBuf>,

    /// Prints information on operations as they occur
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Execute the merge batch described by the parsed arguments.
    pub fn execute(self) -> Result<()> {
        let opts = Options {
            config_file: self.config,
            base: Some(self.base),
            modules: Some(self.modules),
            verbose: self.verbose,
        };

        let config = config::resolve(opts)?;
        Orchestrator::new(config).run()?;
        Ok(())
    }
}
