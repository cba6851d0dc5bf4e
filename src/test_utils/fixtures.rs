//! Descriptor fixtures
//!
//! [`PomFixture`] renders a `pom.xml` from a few builder calls so tests can
//! describe parent chains without inline XML.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pom::Coordinate;
use crate::resolver::LocalRepository;

/// A `<dependency>` entry.
#[derive(Clone, Debug, Default)]
pub struct DependencyFixture {
    pub group_id: String,
    pub artifact_id: String,
    /// Left out of the XML when empty
    pub version: String,
    /// Left out of the XML when `None`, which means compile scope
    pub scope: Option<String>,
    pub optional: bool,
    /// `(groupId, artifactId)` pairs for `<exclusions>`
    pub exclusions: Vec<(String, String)>,
}

impl DependencyFixture {
    /// A compile-scope dependency with no exclusions.
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            ..Self::default()
        }
    }

    /// Set `<scope>`.
    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    /// Mark `<optional>true</optional>`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Add an `<exclusion>`.
    pub fn exclude(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.exclusions.push((group_id.to_string(), artifact_id.to_string()));
        self
    }

    fn render(&self, out: &mut String) {
        let _ = write!(
            out,
            "    <dependency>\n      <groupId>{}</groupId>\n      <artifactId>{}</artifactId>\n",
            self.group_id, self.artifact_id
        );
        if !self.version.is_empty() {
            let _ = writeln!(out, "      <version>{}</version>", self.version);
        }
        if let Some(scope) = &self.scope {
            let _ = writeln!(out, "      <scope>{scope}</scope>");
        }
        if self.optional {
            out.push_str("      <optional>true</optional>\n");
        }
        if !self.exclusions.is_empty() {
            out.push_str("      <exclusions>\n");
            for (group, artifact) in &self.exclusions {
                let _ = writeln!(
                    out,
                    "        <exclusion><groupId>{group}</groupId><artifactId>{artifact}</artifactId></exclusion>"
                );
            }
            out.push_str("      </exclusions>\n");
        }
        out.push_str("    </dependency>\n");
    }
}

/// A `pom.xml` under construction.
#[derive(Clone, Debug, Default)]
pub struct PomFixture {
    /// Identity fields; `None` leaves the element out
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub packaging: Option<String>,
    pub url: Option<String>,
    /// `(groupId, artifactId, version, relativePath)`
    pub parent: Option<(String, String, String, Option<String>)>,
    /// Rendered in order, so a repeated key is declared twice
    pub properties: Vec<(String, String)>,
    /// Repository URLs exactly as they appear in `<url>`
    pub repositories: Vec<String>,
    pub dependencies: Vec<DependencyFixture>,
}

impl PomFixture {
    /// A descriptor with a full identity.
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: Some(group_id.to_string()),
            artifact_id: Some(artifact_id.to_string()),
            version: Some(version.to_string()),
            ..Self::default()
        }
    }

    /// A descriptor with only an artifactId, inheriting the rest.
    pub fn child(artifact_id: &str) -> Self {
        Self {
            artifact_id: Some(artifact_id.to_string()),
            ..Self::default()
        }
    }

    /// Reference a parent with the default `relativePath`.
    pub fn parent(mut self, group_id: &str, artifact_id: &str, version: &str) -> Self {
        self.parent = Some((group_id.to_string(), artifact_id.to_string(), version.to_string(), None));
        self
    }

    /// Reference a parent found at `relative_path`.
    pub fn parent_at(mut self, group_id: &str, artifact_id: &str, version: &str, relative_path: &str) -> Self {
        self.parent = Some((
            group_id.to_string(),
            artifact_id.to_string(),
            version.to_string(),
            Some(relative_path.to_string()),
        ));
        self
    }

    /// Set `<name>`.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set `<description>`.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set `<packaging>`.
    pub fn packaging(mut self, packaging: &str) -> Self {
        self.packaging = Some(packaging.to_string());
        self
    }

    /// Set `<url>`.
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Declare a property.
    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.properties.push((key.to_string(), value.to_string()));
        self
    }

    /// Declare a repository URL.
    pub fn repository(mut self, url: &str) -> Self {
        self.repositories.push(url.to_string());
        self
    }

    /// Add a plain compile-scope dependency.
    pub fn dependency(self, group_id: &str, artifact_id: &str, version: &str) -> Self {
        self.with_dependency(DependencyFixture::new(group_id, artifact_id, version))
    }

    /// Add a dependency built with [`DependencyFixture`].
    pub fn with_dependency(mut self, dependency: DependencyFixture) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// The coordinate this fixture declares; missing parts are empty.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(
            self.group_id.clone().unwrap_or_default(),
            self.artifact_id.clone().unwrap_or_default(),
            self.version.clone().unwrap_or_default(),
        )
    }

    /// Render the XML text.
    pub fn render(&self) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n  <modelVersion>4.0.0</modelVersion>\n",
        );

        if let Some((group, artifact, version, relative_path)) = &self.parent {
            let _ = write!(
                out,
                "  <parent>\n    <groupId>{group}</groupId>\n    <artifactId>{artifact}</artifactId>\n    <version>{version}</version>\n"
            );
            if let Some(relative_path) = relative_path {
                let _ = writeln!(out, "    <relativePath>{relative_path}</relativePath>");
            }
            out.push_str("  </parent>\n");
        }

        for (tag, value) in [
            ("groupId", &self.group_id),
            ("artifactId", &self.artifact_id),
            ("version", &self.version),
            ("name", &self.name),
            ("description", &self.description),
            ("packaging", &self.packaging),
            ("url", &self.url),
        ] {
            if let Some(value) = value {
                let _ = writeln!(out, "  <{tag}>{value}</{tag}>");
            }
        }

        if !self.properties.is_empty() {
            out.push_str("  <properties>\n");
            for (key, value) in &self.properties {
                let _ = writeln!(out, "    <{key}>{value}</{key}>");
            }
            out.push_str("  </properties>\n");
        }

        if !self.repositories.is_empty() {
            out.push_str("  <repositories>\n");
            for url in &self.repositories {
                let _ = writeln!(out, "    <repository><url>{url}</url></repository>");
            }
            out.push_str("  </repositories>\n");
        }

        if !self.dependencies.is_empty() {
            out.push_str("  <dependencies>\n");
            for dependency in &self.dependencies {
                dependency.render(&mut out);
            }
            out.push_str("  </dependencies>\n");
        }

        out.push_str("</project>\n");
        out
    }

    /// Write `pom.xml` into `dir`, creating the directory. Returns the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("pom.xml");
        fs::write(&path, self.render()).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Install `fixture` into a repository laid out under `root`.
pub fn install_pom(root: &Path, fixture: &PomFixture) -> Result<PathBuf> {
    let path = LocalRepository::layout_path(root, &fixture.coordinate());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, fixture.render()).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
