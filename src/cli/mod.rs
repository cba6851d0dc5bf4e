//! Command-line interface for pomres.
//!
//! The CLI is a thin driver over the library: it loads the global
//! configuration, resolves one descriptor and prints what was asked for.
//!
//! # Commands
//!
//! - `resolve` - Print the inheritance-resolved project
//! - `property` - Print one property with its macros substituted
//! - `eval` - Substitute macros in arbitrary text
//! - `deps` - Walk transitive dependencies through the local repository
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - No logging at all
//! - `--config` / `-c` - Alternative configuration file
//!
//! Without `--verbose` or `--quiet` the `RUST_LOG` filter applies, defaulting
//! to warnings only.

mod common;
mod deps;
mod eval;
mod property;
mod resolve;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;

pub use common::OutputFormat;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter to install. `None` disables logging.
    pub log_level: Option<String>,

    /// Explicit configuration file, overriding `POMRES_CONFIG` and the default.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with logging off and the default config file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolve Maven project descriptors.
#[derive(Parser, Debug)]
#[command(
    name = "pomres",
    about = "Resolve Maven project descriptors",
    version,
    long_about = "pomres resolves a pom.xml with its whole parent chain: merged properties, \
                  repositories and dependencies, ${..} macro substitution and transitive \
                  dependency walks against a local repository."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable all logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the inheritance-resolved project
    Resolve(resolve::ResolveCommand),

    /// Print one property with its macros substituted
    Property(property::PropertyCommand),

    /// Substitute ${..} macros in the given text
    Eval(eval::EvalCommand),

    /// List transitive dependencies found in the local repository
    Deps(deps::DepsCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Propagates configuration, resolution and output errors.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Derive the [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some(std::env::var("RUST_LOG").ok().filter(|v| !v.is_empty()).unwrap_or_else(|| "warn".to_string()))
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration instead of the global flags.
    ///
    /// # Errors
    ///
    /// Propagates configuration, resolution and output errors.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        init_logging(config.log_level.as_deref());

        let global = GlobalConfig::load_with_optional(config.config_path)?;

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&global),
            Commands::Property(cmd) => cmd.execute(&global),
            Commands::Eval(cmd) => cmd.execute(&global),
            Commands::Deps(cmd) => cmd.execute(&global),
        }
    }
}

/// Install a stderr `tracing` subscriber with the given filter.
///
/// Does nothing when `level` is `None` or a subscriber is already installed.
pub fn init_logging(level: Option<&str>) {
    let Some(level) = level else {
        return;
    };

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
