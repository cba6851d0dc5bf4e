//! `pomres resolve`: print a resolved project.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{OutputFormat, resolve_project};
use crate::config::GlobalConfig;
use crate::pom::Dependency;
use crate::resolver::ProjectPom;

/// Print identity, properties, repositories and dependencies of a project.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Path to the pom.xml to resolve
    #[arg(value_name = "POM")]
    pub pom: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Serializable view of a [`ProjectPom`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectReport<'a> {
    file: String,
    group_id: Option<&'a str>,
    artifact_id: Option<&'a str>,
    version: Option<&'a str>,
    name: Option<&'a str>,
    description: Option<&'a str>,
    packaging: Option<&'a str>,
    url: Option<&'a str>,
    properties: &'a BTreeMap<String, String>,
    repositories: Vec<String>,
    dependencies: &'a [Dependency],
}

impl<'a> ProjectReport<'a> {
    fn new(project: &'a ProjectPom) -> Self {
        let pom = project.pom();
        Self {
            file: project.path().display().to_string(),
            group_id: pom.group_id(),
            artifact_id: pom.artifact_id(),
            version: pom.version(),
            name: pom.name(),
            description: pom.description(),
            packaging: project.packaging(),
            url: project.url(),
            properties: project.properties(),
            repositories: project.repositories().iter().map(ToString::to_string).collect(),
            dependencies: pom.dependencies(),
        }
    }

    fn print_text(&self) {
        let coordinate = format!(
            "{}:{}:{}",
            self.group_id.unwrap_or("?"),
            self.artifact_id.unwrap_or("?"),
            self.version.unwrap_or("?")
        );
        println!("{} {}", "Project".bold(), coordinate);
        println!("  file: {}", self.file);
        for (label, value) in [
            ("name", self.name),
            ("packaging", self.packaging),
            ("url", self.url),
        ] {
            if let Some(value) = value {
                println!("  {label}: {value}");
            }
        }
        if let Some(description) = self.description {
            println!("  description:");
            for line in description.lines() {
                println!("    {line}");
            }
        }

        if !self.properties.is_empty() {
            println!("\n{}", "Properties".bold());
            for (key, value) in self.properties {
                println!("  {key} = {value}");
            }
        }

        if !self.repositories.is_empty() {
            println!("\n{}", "Repositories".bold());
            for repository in &self.repositories {
                println!("  {repository}");
            }
        }

        if !self.dependencies.is_empty() {
            println!("\n{}", "Dependencies".bold());
            for dependency in self.dependencies {
                let optional = if dependency.optional { " optional" } else { "" };
                println!("  {dependency}{optional}");
            }
        }
    }
}

impl ResolveCommand {
    /// Resolve and print the project.
    ///
    /// # Errors
    ///
    /// Fails when resolution fails or JSON serialization fails.
    pub fn execute(self, global: &GlobalConfig) -> Result<()> {
        let project = resolve_project(&self.pom, global)?;
        let report = ProjectReport::new(&project);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => report.print_text(),
        }
        Ok(())
    }
}
