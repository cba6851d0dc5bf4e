//! Helpers shared by the CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::GlobalConfig;
use crate::resolver::{LocalRepository, ProjectPom, ProjectResolver};

/// Output format for commands that print structured data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// The local repository configured in `global`.
pub(crate) fn local_repository(global: &GlobalConfig) -> Result<LocalRepository> {
    let root = global.local_repository_path()?;
    debug!("Using local repository {}", root.display());
    Ok(LocalRepository::new(root))
}

/// Resolve the descriptor at `path`, looking up remote parents in the local
/// repository.
pub(crate) fn resolve_project(path: &Path, global: &GlobalConfig) -> Result<ProjectPom> {
    let repository = local_repository(global)?;
    ProjectResolver::new(&repository)
        .resolve(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))
}
