//! CLI argument parsing and execution

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gin_mkdata::config;
use gin_mkdata::orchestrator;
use gin_mkdata::settings::{self, Settings};

/// Generate a sample data directory (users, SSH keys, bare repositories)
#[derive(Parser, Debug)]
#[command(name = "gin-mkdata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YAML document describing users and their repositories
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Directory receiving users/, repos/ and tmp/ (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR", env = "GIN_MKDATA_ROOT")]
    root: Option<PathBuf>,

    /// Directory generator programs are resolved against (defaults to the executable's directory)
    #[arg(long, value_name = "DIR", env = "GIN_MKDATA_SCRIPTS")]
    script_dir: Option<PathBuf>,

    /// Git executable
    #[arg(long, value_name = "PROGRAM", env = "GIN_MKDATA_GIT", default_value = settings::DEFAULT_GIT)]
    git: String,

    /// SSH key generator, invoked with ssh-keygen arguments
    #[arg(long, value_name = "PROGRAM", env = "GIN_MKDATA_KEYGEN", default_value = settings::DEFAULT_KEYGEN)]
    keygen: String,

    /// Suppress the summary printed after a successful run
    #[arg(short, long)]
    quiet: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&self.log_level))
            .format_timestamp(None)
            .init();

        if !self.file.exists() {
            anyhow::bail!("Configuration file not found: {}", self.file.display());
        }
        let document = config::from_file(&self.file)?;

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let mut settings = Settings::new(root)
            .with_git(self.git)
            .with_keygen(self.keygen);
        if let Some(script_dir) = self.script_dir {
            settings = settings.with_script_dir(script_dir);
        }

        let summary = orchestrator::run(&document, &settings)?;

        if !self.quiet {
            if summary.created_anything() {
                println!("Created in {}: {}", settings.root.display(), summary);
            } else {
                println!("Nothing to do, {} is up to date", settings.root.display());
            }
        }

        Ok(())
    }
}
