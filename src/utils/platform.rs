//! Platform-aware path helpers.
//!
//! Home directory lookup plus `~` and `$VAR` expansion for paths taken from
//! configuration.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns true if running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Get the home directory path for the current user.
///
/// # Errors
///
/// Fails when the platform home directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Resolves a path from configuration: expands a leading `~/` and
/// environment variables (`$VAR`, `${VAR}`).
///
/// # Examples
///
/// ```rust,no_run
/// use pomres::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let repo = resolve_path("~/.m2/repository")?;
/// let custom = resolve_path("$MAVEN_REPO/releases")?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - `~user/...` forms, which are not supported
/// - Undefined environment variables
/// - Home directory cannot be determined
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = if let Some(stripped) = path.strip_prefix("~/") {
        get_home_dir()?.join(stripped)
    } else if path == "~" {
        get_home_dir()?
    } else if path.starts_with('~') {
        return Err(anyhow::anyhow!(
            "Invalid path: {path}\n\n\
            Tilde expansion only supports '~/' for home directory.\n\
            Use '~/' followed by a relative path, like '~/.m2/repository'"
        ));
    } else {
        PathBuf::from(path)
    };

    let path_str = expanded.to_string_lossy();
    let expanded_str = shellexpand::env(&path_str)
        .with_context(|| {
            format!(
                "Failed to expand environment variables in path: {path_str}\n\n\
                Common issues:\n\
                - Undefined environment variable (e.g., $UNDEFINED_VAR)\n\
                - Invalid variable syntax (use $VAR or ${{VAR}})"
            )
        })?
        .into_owned();

    Ok(PathBuf::from(expanded_str))
}
