//! External coordinate lookup.
//!
//! The resolver needs descriptors it cannot find next to the project: a parent
//! referenced only by coordinate, and every dependency during a transitive
//! walk. [`PomLookup`] is the seam for that. Closures implement it too, which
//! keeps tests free of filesystem setup.
//!
//! [`LocalRepository`] reads the standard repository layout from the local
//! repository directory and from any `file:` repository it is given. Remote
//! schemes are skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use url::Url;

use crate::core::{FileOps, PomError};
use crate::pom::{Coordinate, Pom};

/// Fetches read-only descriptors by coordinate.
pub trait PomLookup {
    /// Look up `coordinate`, consulting `repositories` in order.
    ///
    /// `Ok(None)` means the descriptor does not exist in any of them.
    ///
    /// # Errors
    ///
    /// Implementations fail when a descriptor exists but cannot be read.
    fn fetch(&self, coordinate: &Coordinate, repositories: &[Url]) -> Result<Option<Pom>>;
}

impl<F> PomLookup for F
where
    F: Fn(&Coordinate, &[Url]) -> Result<Option<Pom>>,
{
    fn fetch(&self, coordinate: &Coordinate, repositories: &[Url]) -> Result<Option<Pom>> {
        self(coordinate, repositories)
    }
}

/// Repository-layout lookup on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    /// Create a lookup rooted at `root` (usually `~/.m2/repository`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// The local repository directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<base>/<group/as/dirs>/<artifact>/<version>/<artifact>-<version>.pom`
    #[must_use]
    pub fn layout_path(base: &Path, coordinate: &Coordinate) -> PathBuf {
        let mut path = base.to_path_buf();
        path.extend(coordinate.group_id.split('.'));
        path.push(&coordinate.artifact_id);
        path.push(&coordinate.version);
        path.push(format!("{}-{}.pom", coordinate.artifact_id, coordinate.version));
        path
    }

    fn candidate_roots(&self, repositories: &[Url]) -> Vec<PathBuf> {
        let mut roots = vec![self.root.clone()];
        for repository in repositories {
            if repository.scheme() != "file" {
                trace!("Skipping non-file repository {repository}");
                continue;
            }
            match repository.to_file_path() {
                Ok(path) => roots.push(path),
                Err(()) => debug!("Repository {repository} has no local path"),
            }
        }
        roots
    }
}

impl PomLookup for LocalRepository {
    fn fetch(&self, coordinate: &Coordinate, repositories: &[Url]) -> Result<Option<Pom>> {
        if coordinate.is_incomplete() {
            debug!("Not looking up incomplete coordinate {coordinate}");
            return Ok(None);
        }

        for root in self.candidate_roots(repositories) {
            let path = Self::layout_path(&root, coordinate);
            if FileOps::is_file_with_context(&path, "locating descriptor", "local repository")
                .map_err(PomError::from)?
            {
                debug!("Found {coordinate} at {}", path.display());
                return Pom::load(&path).map(Some).with_context(|| PomError::LookupFailed {
                    coordinate: coordinate.to_string(),
                    reason: format!("{} is not a usable descriptor", path.display()),
                });
            }
        }

        Ok(None)
    }
}
