//! Global configuration file.
//!
//! # Location
//!
//! - `--config PATH` on the command line
//! - otherwise the `POMRES_CONFIG` environment variable
//! - otherwise `~/.pomres/config.toml`
//!
//! A missing file is not an error; every field has a default.
//!
//! # File Format
//!
//! ```toml
//! # Where descriptors are looked up by coordinate (default ~/.m2/repository)
//! local_repository = "~/.m2/repository"
//!
//! # Appended to the project's own repositories on every dependency walk
//! repositories = ["file:///srv/maven/releases"]
//!
//! # Fallback values for ${..} macros
//! [properties]
//! "java.version" = "21"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::core::PomError;
use crate::substitution::SystemProperties;
use crate::utils::{read_text_file, resolve_path};

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV_VAR: &str = "POMRES_CONFIG";

const DEFAULT_LOCAL_REPOSITORY: &str = "~/.m2/repository";

/// User-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Local repository directory; `~` and `$VAR` are expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<String>,

    /// Extra repository URLs for dependency walks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,

    /// System property overrides used as the last macro fallback
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl GlobalConfig {
    /// Load from `path` when given, otherwise from [`Self::default_path`].
    ///
    /// An explicit path must exist. The default path may be missing, which
    /// yields the default configuration.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid TOML for this
    /// structure.
    pub fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    debug!("No configuration at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_text_file(path)?;
        let config = toml::from_str(&content).map_err(|e| PomError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `$POMRES_CONFIG` if set, otherwise `~/.pomres/config.toml`.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
        Ok(home.join(".pomres").join("config.toml"))
    }

    /// The local repository directory with `~` and variables expanded.
    ///
    /// # Errors
    ///
    /// Fails when expansion fails, e.g. on an undefined variable.
    pub fn local_repository_path(&self) -> Result<PathBuf> {
        let raw = self.local_repository.as_deref().unwrap_or(DEFAULT_LOCAL_REPOSITORY);
        resolve_path(raw).with_context(|| format!("Invalid local_repository '{raw}'"))
    }

    /// The configured extra repositories as URLs.
    ///
    /// # Errors
    ///
    /// Returns [`PomError::ConfigError`] for the first entry that is not an
    /// absolute URL.
    pub fn repository_urls(&self) -> Result<Vec<Url>> {
        self.repositories
            .iter()
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    anyhow::Error::from(PomError::ConfigError {
                        message: format!("repository '{raw}' is not a valid URL: {e}"),
                    })
                })
            })
            .collect()
    }

    /// System properties backed by this configuration's overrides.
    #[must_use]
    pub fn system_properties(&self) -> SystemProperties {
        SystemProperties::new(self.properties.clone())
    }
}
