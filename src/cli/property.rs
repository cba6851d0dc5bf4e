//! `pomres property`: print one substituted property.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;

use super::common::resolve_project;
use crate::config::GlobalConfig;

/// Print a property of the resolved project with its macros substituted.
#[derive(Args, Debug)]
pub struct PropertyCommand {
    /// Path to the pom.xml to resolve
    #[arg(value_name = "POM")]
    pub pom: PathBuf,

    /// Property name, e.g. `project.build.sourceEncoding`
    #[arg(value_name = "KEY")]
    pub key: String,
}

impl PropertyCommand {
    /// Resolve the project and print the property.
    ///
    /// # Errors
    ///
    /// Fails when resolution fails or the property is not declared anywhere
    /// in the parent chain.
    pub fn execute(self, global: &GlobalConfig) -> Result<()> {
        let project = resolve_project(&self.pom, global)?;
        let system = global.system_properties();

        let value = project.property(&self.key, &system).ok_or_else(|| {
            anyhow!("Property '{}' is not declared in {} or its parents", self.key, self.pom.display())
        })?;
        println!("{value}");
        Ok(())
    }
}
