//! Descriptor model.
//!
//! A [`Pom`] is the plain, non-inherited view of one descriptor: its identity
//! fields, description and declared dependencies. The inheritance-resolved view
//! lives in [`crate::resolver::ProjectPom`], which owns a `Pom` and adds
//! packaging, url, properties and repositories.
//!
//! Identity fields and the description are `Option<String>`. `None` means the
//! element was absent; `Some("")` means it was present but empty. Both count as
//! "blank" for inheritance backfill.
//!
//! # Dependencies
//!
//! A [`Dependency`] is created while reading one descriptor and never mutated
//! afterwards. When a child inherits from a parent the parent's records are
//! cloned into the child, so a resolved parent stays reusable.

pub mod collector;
pub mod document;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{FileOps, PomError};
pub use document::{ParentReference, PomDocument};

/// A `(groupId, artifactId, version)` triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// The group id, e.g. `org.apache.commons`
    pub group_id: String,
    /// The artifact id, e.g. `commons-lang3`
    pub artifact_id: String,
    /// The version, e.g. `3.14.0`
    pub version: String,
}

impl Coordinate {
    /// Create a coordinate from its three parts.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// The exclusion name of this coordinate: `groupId:artifactId`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// True when any of the three parts is empty.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.group_id.is_empty() || self.artifact_id.is_empty() || self.version.is_empty()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Dependency scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Available everywhere; the default
    #[default]
    Compile,
    /// Needed at runtime only
    Runtime,
    /// Needed to compile and run tests
    Test,
    /// Supplied by the runtime container
    Provided,
    /// Supplied by an explicit system path
    System,
    /// Imports a dependency-management section
    Import,
}

impl Scope {
    /// The lowercase name used in descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::Provided => "provided",
            Self::System => "system",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "provided" => Ok(Self::Provided),
            "system" => Ok(Self::System),
            "import" => Ok(Self::Import),
            other => Err(format!(
                "unknown scope '{other}' (expected compile, runtime, test, provided, system or import)"
            )),
        }
    }
}

/// One declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Group id as declared; may contain `${..}` macros
    pub group_id: String,
    /// Artifact id as declared; may contain `${..}` macros
    pub artifact_id: String,
    /// Version as declared; empty when the descriptor omits it
    pub version: String,
    /// Packaging type of the dependency, `jar` unless declared
    #[serde(rename = "type")]
    pub kind: String,
    /// Declared scope
    pub scope: Scope,
    /// `<optional>true</optional>`
    pub optional: bool,
    /// Excluded `groupId:artifactId` names
    pub exclusions: BTreeSet<String>,
}

impl Dependency {
    /// The exclusion name `groupId:artifactId` as declared (no substitution).
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// True when this dependency declares an exclusion for `name`.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        self.exclusions.contains(name)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{} ({})", self.group_id, self.artifact_id, self.version, self.scope)
    }
}

/// A single descriptor without inheritance applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pom {
    pub(crate) group_id: Option<String>,
    pub(crate) artifact_id: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) dependencies: Vec<Dependency>,
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(String::is_empty)
}

impl Pom {
    /// Read and parse the descriptor at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a well-formed descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let text = FileOps::read_with_context(path, "reading descriptor", "pom")
            .map_err(PomError::from)?;
        Self::from_xml(&text, path)
            .with_context(|| format!("Failed to parse descriptor {}", path.display()))
    }

    /// Parse descriptor text. `source` is used for error messages.
    ///
    /// # Errors
    ///
    /// Fails when the XML is malformed or required nodes are missing.
    pub fn from_xml(text: &str, source: &Path) -> Result<Self> {
        let doc = PomDocument::parse(text, source)?;
        doc.descriptor()
    }

    /// The group id, `None` when neither this descriptor nor its parent
    /// reference declare one.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// The artifact id.
    #[must_use]
    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    /// The version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The human readable `name`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The description, possibly joined with ancestors' descriptions.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared (and, after resolution, inherited) dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// The file this descriptor was read from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The identity as a coordinate; absent parts become empty strings.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(
            self.group_id.clone().unwrap_or_default(),
            self.artifact_id.clone().unwrap_or_default(),
            self.version.clone().unwrap_or_default(),
        )
    }

    /// Fill blank identity fields from `ancestor`. Non-blank fields are kept.
    pub(crate) fn backfill_identity(&mut self, ancestor: &Self) {
        if is_blank(self.artifact_id.as_ref()) {
            self.artifact_id.clone_from(&ancestor.artifact_id);
        }
        if is_blank(self.group_id.as_ref()) {
            self.group_id.clone_from(&ancestor.group_id);
        }
        if is_blank(self.version.as_ref()) {
            self.version.clone_from(&ancestor.version);
        }
    }

    /// Combine descriptions: the ancestor's text comes first, then this
    /// descriptor's, separated by a newline.
    pub(crate) fn inherit_description(&mut self, ancestor: &Self) {
        let Some(parent) = ancestor.description.as_ref().filter(|d| !d.is_empty()) else {
            return;
        };
        self.description = match self.description.take().filter(|d| !d.is_empty()) {
            Some(own) => Some(format!("{parent}\n{own}")),
            None => Some(parent.clone()),
        };
    }

    /// Append clones of `ancestor`'s dependencies after this descriptor's.
    pub(crate) fn inherit_dependencies(&mut self, ancestor: &Self) {
        self.dependencies.extend(ancestor.dependencies.iter().cloned());
    }
}
