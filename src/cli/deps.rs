//! `pomres deps`: transitive dependency walk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use super::common::{local_repository, resolve_project};
use crate::config::GlobalConfig;
use crate::pom::Scope;

/// List the descriptors reachable from a project's dependencies.
///
/// Descriptors are looked up in the local repository and in `file:`
/// repositories declared by the project, the configuration or
/// `--repository`. One `groupId:artifactId:version` is printed per line.
#[derive(Args, Debug)]
pub struct DepsCommand {
    /// Path to the pom.xml to resolve
    #[arg(value_name = "POM")]
    pub pom: PathBuf,

    /// Dependency scope to walk
    #[arg(long, default_value = "compile", value_parser = parse_scope)]
    pub scope: Scope,

    /// Extra repository URL, may be repeated
    #[arg(long = "repository", value_name = "URL")]
    pub repositories: Vec<Url>,
}

fn parse_scope(value: &str) -> Result<Scope, String> {
    value.parse()
}

impl DepsCommand {
    /// Resolve the project and print its transitive dependencies.
    ///
    /// # Errors
    ///
    /// Fails when the project cannot be resolved or the configured
    /// repositories are invalid. Dependencies that cannot be found are
    /// logged as warnings and left out.
    pub fn execute(self, global: &GlobalConfig) -> Result<()> {
        let project = resolve_project(&self.pom, global)?;
        let repository = local_repository(global)?;
        let system = global.system_properties();

        let mut extra = global.repository_urls().context("Invalid repositories in configuration")?;
        extra.extend(self.repositories);

        for pom in project.dependencies(self.scope, &extra, &repository, &system) {
            println!("{}", pom.coordinate());
        }
        Ok(())
    }
}
