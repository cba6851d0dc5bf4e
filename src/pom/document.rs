//! Tree queries over a parsed descriptor.
//!
//! [`PomDocument`] wraps a [`roxmltree::Document`] and answers the handful of
//! path queries the resolver needs (`project/parent/groupId`,
//! `project/dependencies/dependency`, ...). Elements are matched on their
//! local name, so descriptors with and without the POM namespace behave the
//! same.

use std::path::{Path, PathBuf};

use anyhow::Result;
use roxmltree::{Document, Node};

use super::{Dependency, Pom, Scope};
use crate::core::PomError;
use crate::utils::normalize_path;

/// Default location of a parent descriptor, relative to the child's directory.
pub const DEFAULT_PARENT_PATH: &str = "../pom.xml";

/// A parsed descriptor plus the path it came from.
pub struct PomDocument<'input> {
    doc: Document<'input>,
    file: PathBuf,
}

impl<'input> PomDocument<'input> {
    /// Parse `text`; the root element must be `project`.
    ///
    /// # Errors
    ///
    /// Returns [`PomError::MalformedDescriptor`] for XML syntax errors or a
    /// different root element.
    pub fn parse(text: &'input str, file: &Path) -> Result<Self> {
        let doc = Document::parse(text).map_err(|e| PomError::MalformedDescriptor {
            file: file.display().to_string(),
            reason: e.to_string(),
        })?;

        let root = doc.root_element().tag_name().name();
        if root != "project" {
            return Err(PomError::MalformedDescriptor {
                file: file.display().to_string(),
                reason: format!("expected <project> root element, found <{root}>"),
            }
            .into());
        }

        Ok(Self {
            doc,
            file: file.to_path_buf(),
        })
    }

    /// The path this document was read from.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> PomError {
        PomError::MalformedDescriptor {
            file: self.file.display().to_string(),
            reason: reason.into(),
        }
    }

    /// The `project` element.
    #[must_use]
    pub fn project(&self) -> Node<'_, 'input> {
        self.doc.root_element()
    }

    /// Follow `path` from the `project` element, taking the first matching
    /// child element at each step.
    #[must_use]
    pub fn node(&self, path: &[&str]) -> Option<Node<'_, 'input>> {
        path.iter().try_fold(self.project(), |node, name| child(node, name))
    }

    /// All elements matching `path`, in document order. The last step may
    /// match several siblings under every node matched by the earlier steps.
    #[must_use]
    pub fn nodes(&self, path: &[&str]) -> Vec<Node<'_, 'input>> {
        let mut current = vec![self.project()];
        for &name in path {
            current = current
                .into_iter()
                .flat_map(move |node| {
                    node.children().filter(move |c| c.is_element() && c.tag_name().name() == name)
                })
                .collect();
        }
        current
    }

    /// Trimmed text of the element at `path`. `None` when the element is absent.
    #[must_use]
    pub fn text(&self, path: &[&str]) -> Option<String> {
        self.node(path).map(text_content)
    }

    /// The `parent` reference, if the descriptor declares one with content.
    #[must_use]
    pub fn parent_reference(&self) -> Option<ParentReference> {
        let parent = self.node(&["parent"])?;
        if !parent.children().any(|c| c.is_element()) {
            return None;
        }

        let field = |name: &str| child(parent, name).map(text_content).unwrap_or_default();
        Some(ParentReference {
            group_id: field("groupId"),
            artifact_id: field("artifactId"),
            version: field("version"),
            relative_path: field("relativePath"),
        })
    }

    /// Identity, description and dependencies of this descriptor alone.
    ///
    /// `groupId` and `version` fall back to the parent reference when the
    /// project omits them. A descriptor with no artifactId anywhere is
    /// malformed.
    ///
    /// # Errors
    ///
    /// Fails on a missing artifactId or a malformed dependency.
    pub fn descriptor(&self) -> Result<Pom> {
        let parent = |name: &str| self.text(&["parent", name]).filter(|v| !v.is_empty());

        let group_id = self.text(&["groupId"]).filter(|v| !v.is_empty()).or_else(|| parent("groupId"));
        let version = self.text(&["version"]).filter(|v| !v.is_empty()).or_else(|| parent("version"));
        let artifact_id = self.text(&["artifactId"]);

        if artifact_id.as_deref().is_none_or(str::is_empty) && self.parent_reference().is_none() {
            return Err(self.malformed("missing <artifactId>").into());
        }

        let dependencies = self
            .nodes(&["dependencies", "dependency"])
            .into_iter()
            .map(|node| self.dependency(node))
            .collect::<Result<Vec<_>>>()?;

        Ok(Pom {
            group_id,
            artifact_id,
            version,
            name: self.text(&["name"]),
            description: self.text(&["description"]),
            dependencies,
            source: Some(self.file.clone()),
        })
    }

    fn dependency(&self, node: Node<'_, 'input>) -> Result<Dependency> {
        let field = |name: &str| child(node, name).map(text_content).unwrap_or_default();

        let group_id = field("groupId");
        let artifact_id = field("artifactId");
        if group_id.is_empty() || artifact_id.is_empty() {
            return Err(self
                .malformed(format!(
                    "<dependency> at line {} needs both groupId and artifactId",
                    self.line_of(node)
                ))
                .into());
        }

        let scope = match child(node, "scope").map(text_content) {
            Some(s) if !s.is_empty() => {
                s.parse::<Scope>().map_err(|reason| self.malformed(reason))?
            }
            _ => Scope::default(),
        };

        let kind = Some(field("type")).filter(|t| !t.is_empty()).unwrap_or_else(|| "jar".to_string());

        let exclusions = child(node, "exclusions")
            .into_iter()
            .flat_map(|e| children(e, "exclusion"))
            .map(|exclusion| {
                let part = |name: &str| child(exclusion, name).map(text_content).unwrap_or_default();
                format!("{}:{}", part("groupId"), part("artifactId"))
            })
            .collect();

        Ok(Dependency {
            group_id,
            artifact_id,
            version: field("version"),
            kind,
            scope,
            optional: field("optional").eq_ignore_ascii_case("true"),
            exclusions,
        })
    }

    fn line_of(&self, node: Node<'_, 'input>) -> u32 {
        self.doc.text_pos_at(node.range().start).row
    }
}

/// The contents of a `parent` element. Every field is trimmed; absent
/// fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentReference {
    /// Declared parent groupId
    pub group_id: String,
    /// Declared parent artifactId
    pub artifact_id: String,
    /// Declared parent version
    pub version: String,
    /// Declared `relativePath`
    pub relative_path: String,
}

impl ParentReference {
    /// Where the parent file would be for a child living in `child_dir`.
    ///
    /// Uses `relativePath` when set, otherwise [`DEFAULT_PARENT_PATH`]. A
    /// path that names a directory points at the `pom.xml` inside it.
    #[must_use]
    pub fn candidate_path(&self, child_dir: &Path) -> PathBuf {
        let relative = if self.relative_path.is_empty() {
            DEFAULT_PARENT_PATH
        } else {
            self.relative_path.as_str()
        };

        let candidate = normalize_path(&child_dir.join(relative));
        if candidate.is_dir() {
            candidate.join("pom.xml")
        } else {
            candidate
        }
    }

    /// The coordinate used when the parent has to be looked up remotely.
    #[must_use]
    pub fn coordinate(&self) -> super::Coordinate {
        super::Coordinate::new(&self.group_id, &self.artifact_id, &self.version)
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.is_element() && c.tag_name().name() == name)
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |c| c.is_element() && c.tag_name().name() == name)
}

/// All descendant text of `node`, concatenated and trimmed.
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    let text: String = node.descendants().filter(|n| n.is_text()).filter_map(|n| n.text()).collect();
    text.trim().to_string()
}
