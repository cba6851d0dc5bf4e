//! Inheritance resolution for project descriptors.
//!
//! [`ProjectResolver::resolve`] turns a `pom.xml` into a [`ProjectPom`]: the
//! descriptor with every ancestor merged in. Resolution is a top-down request
//! with a bottom-up merge. The parent is fully resolved first, then folded
//! into the child.
//!
//! # Parent discovery
//!
//! A `parent` element names its ancestor twice: as a file (`relativePath`,
//! defaulting to `../pom.xml`) and as a coordinate. The file wins when it
//! exists. Otherwise the coordinate goes to the [`PomLookup`], and only the
//! fetched descriptor's dependencies and identity are inherited.
//!
//! # Merge rules
//!
//! | Part          | Local parent                         | Looked-up parent |
//! |---------------|--------------------------------------|------------------|
//! | dependencies  | parent's appended after the child's  | same             |
//! | properties    | child wins, parent fills the gaps    | not inherited    |
//! | repositories  | parent's first, then the child's     | not inherited    |
//! | identity      | blank child fields are backfilled    | same             |
//! | description   | `"{parent}\n{child}"`                | not inherited    |
//!
//! Parent chains are guarded against cycles with the stack of canonical
//! paths currently being resolved.

pub mod dependencies;
pub mod exclusion;
pub mod lookup;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use url::Url;

use crate::core::{FileOps, PomError};
use crate::pom::collector::{collect_properties, collect_repositories};
use crate::pom::{Pom, PomDocument};
use crate::substitution::{PropertySource, substitute};

pub use exclusion::ExclusionLink;
pub use lookup::{LocalRepository, PomLookup};

/// A descriptor with its whole parent chain merged in.
#[derive(Debug, Clone)]
pub struct ProjectPom {
    pom: Pom,
    packaging: Option<String>,
    url: Option<String>,
    properties: BTreeMap<String, String>,
    repositories: Vec<Url>,
    path: PathBuf,
}

impl ProjectPom {
    /// The merged descriptor: identity, description and dependencies.
    #[must_use]
    pub fn pom(&self) -> &Pom {
        &self.pom
    }

    /// `project/packaging` of this document, not inherited.
    #[must_use]
    pub fn packaging(&self) -> Option<&str> {
        self.packaging.as_deref()
    }

    /// `project/url` of this document, not inherited.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The merged property map.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Merged repositories, ancestors first. May contain duplicates.
    #[must_use]
    pub fn repositories(&self) -> &[Url] {
        &self.repositories
    }

    /// The descriptor file this project was resolved from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `key` the way `${key}` macros are resolved.
    ///
    /// `pom.artifactId`, `pom.groupId`, `pom.version` and `pom.name` read the
    /// identity fields and never fall through, then the merged properties
    /// are consulted, then `system`.
    pub fn lookup(&self, key: &str, system: &dyn PropertySource) -> Option<String> {
        let alias = match key {
            "pom.artifactId" => Some(self.pom.artifact_id()),
            "pom.groupId" => Some(self.pom.group_id()),
            "pom.version" => Some(self.pom.version()),
            "pom.name" => Some(self.pom.name()),
            _ => None,
        };
        if let Some(value) = alias {
            return value.map(str::to_string);
        }

        self.properties.get(key).cloned().or_else(|| system.property(key))
    }

    /// Substitute every `${key}` in `input` through [`Self::lookup`].
    pub fn replace<'s>(&self, input: &'s str, system: &dyn PropertySource) -> Cow<'s, str> {
        substitute(input, |key| self.lookup(key, system))
    }

    /// The declared property `key` with its macros substituted.
    ///
    /// `None` when the key is not in the merged property map.
    pub fn property(&self, key: &str, system: &dyn PropertySource) -> Option<String> {
        self.properties.get(key).map(|raw| self.replace(raw, system).into_owned())
    }
}

/// Resolves descriptors and their parent chains.
pub struct ProjectResolver<'a> {
    lookup: &'a dyn PomLookup,
}

impl<'a> ProjectResolver<'a> {
    /// Create a resolver that falls back to `lookup` for parents without a
    /// local file.
    pub fn new(lookup: &'a dyn PomLookup) -> Self {
        Self {
            lookup,
        }
    }

    /// Resolve the descriptor at `path` and all of its ancestors.
    ///
    /// # Errors
    ///
    /// - [`PomError::FileOperation`] when `path` or a local parent file cannot be read
    /// - [`PomError::MalformedDescriptor`] / [`PomError::EmptyPropertyDeclaration`]
    ///   from any descriptor in the chain
    /// - [`PomError::ParentNotFound`] when the lookup does not know the parent
    /// - [`PomError::CircularParent`] when the chain loops
    /// - errors from the lookup itself, unchanged
    pub fn resolve(&self, path: &Path) -> Result<ProjectPom> {
        self.resolve_in(path, &mut Vec::new())
    }

    fn resolve_in(&self, path: &Path, stack: &mut Vec<PathBuf>) -> Result<ProjectPom> {
        let canonical = FileOps::canonicalize_with_context(path, "resolving descriptor", "resolver")
            .map_err(PomError::from)?;

        if stack.contains(&canonical) {
            let chain = stack
                .iter()
                .chain(std::iter::once(&canonical))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(PomError::CircularParent {
                chain,
            }
            .into());
        }

        stack.push(canonical);
        let result = self.resolve_document(path, stack);
        stack.pop();
        result
    }

    fn resolve_document(&self, path: &Path, stack: &mut Vec<PathBuf>) -> Result<ProjectPom> {
        let text = FileOps::read_with_context(path, "reading descriptor", "resolver")
            .map_err(PomError::from)?;
        let doc = PomDocument::parse(&text, path)?;

        let mut project = ProjectPom {
            pom: doc.descriptor()?,
            packaging: doc.text(&["packaging"]),
            url: doc.text(&["url"]),
            properties: BTreeMap::new(),
            repositories: Vec::new(),
            path: path.to_path_buf(),
        };
        let own_repositories = collect_repositories(&doc, path)?;

        if let Some(reference) = doc.parent_reference() {
            let child_dir = path.parent().unwrap_or_else(|| Path::new("."));
            let candidate = reference.candidate_path(child_dir);

            if FileOps::is_file_with_context(&candidate, "locating parent", "resolver")
                .map_err(PomError::from)?
            {
                debug!("{} inherits from {}", path.display(), candidate.display());
                let parent = self.resolve_in(&candidate, stack).with_context(|| {
                    format!("Failed to resolve parent of {}", path.display())
                })?;

                project.pom.inherit_dependencies(&parent.pom);
                for (key, value) in &parent.properties {
                    project.properties.entry(key.clone()).or_insert_with(|| value.clone());
                }
                project.repositories.extend(parent.repositories.iter().cloned());
                project.pom.backfill_identity(&parent.pom);
                project.pom.inherit_description(&parent.pom);
            } else {
                let coordinate = reference.coordinate();
                debug!(
                    "No parent file at {}, looking up {coordinate}",
                    candidate.display()
                );
                let parent = self
                    .lookup
                    .fetch(&coordinate, &own_repositories)?
                    .ok_or_else(|| PomError::ParentNotFound {
                        coordinate: coordinate.to_string(),
                    })?;

                project.pom.inherit_dependencies(&parent);
                project.pom.backfill_identity(&parent);
            }
        }

        for (key, value) in collect_properties(&doc)? {
            project.properties.insert(key, value);
        }
        project.repositories.extend(own_repositories);

        debug!(
            "Resolved {} as {} ({} dependencies, {} properties, {} repositories)",
            path.display(),
            project.pom.coordinate(),
            project.pom.dependencies().len(),
            project.properties.len(),
            project.repositories.len()
        );
        Ok(project)
    }
}
