//! `pomres eval`: substitute macros in free text.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::common::resolve_project;
use crate::config::GlobalConfig;

/// Substitute `${..}` macros in text using a resolved project.
///
/// Undefined macros are printed as written.
#[derive(Args, Debug)]
pub struct EvalCommand {
    /// Path to the pom.xml to resolve
    #[arg(value_name = "POM")]
    pub pom: PathBuf,

    /// Text containing `${key}` macros
    #[arg(value_name = "TEXT")]
    pub text: String,
}

impl EvalCommand {
    /// Resolve the project and print the substituted text.
    ///
    /// # Errors
    ///
    /// Fails only when the project cannot be resolved.
    pub fn execute(self, global: &GlobalConfig) -> Result<()> {
        let project = resolve_project(&self.pom, global)?;
        let system = global.system_properties();
        println!("{}", project.replace(&self.text, &system));
        Ok(())
    }
}
