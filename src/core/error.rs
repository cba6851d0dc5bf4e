//! Error handling for pomres
//!
//! This module provides the error types raised while resolving a project
//! descriptor and the user-facing rendering of those errors. The error system
//! is built around two pieces:
//! 1. **Strongly-typed errors** ([`PomError`]) so callers can react to a
//!    specific failure mode
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and
//!    suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Descriptor structure**: [`PomError::MalformedDescriptor`],
//!   [`PomError::EmptyPropertyDeclaration`], [`PomError::InvalidRepositoryUrl`]
//! - **Inheritance**: [`PomError::ParentNotFound`], [`PomError::CircularParent`]
//! - **External lookup**: [`PomError::LookupFailed`]
//! - **File system**: [`PomError::FileOperation`]
//! - **Configuration**: [`PomError::ConfigError`]
//!
//! Resolution functions return [`anyhow::Result`] and attach context as the
//! error travels up through ancestor descriptors. The original [`PomError`]
//! stays reachable with [`anyhow::Error::downcast_ref`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use pomres::core::{PomError, user_friendly_error};
//!
//! let error = PomError::EmptyPropertyDeclaration {
//!     file: "pom.xml".to_string(),
//!     key: Some("project.build.sourceEncoding".to_string()),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with a suggestion
//! ```

use crate::core::file_error::FileOperationError;
use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for pomres operations
///
/// Every variant aborts the whole resolution chain. There is no partial
/// success: a descriptor either resolves completely or the call fails.
///
/// A missing local parent file is deliberately absent from this list. It is
/// not an error; it switches the resolver to the external coordinate lookup.
#[derive(Error, Debug)]
pub enum PomError {
    /// The XML is present but a required node is missing or unparseable
    ///
    /// # Fields
    /// - `file`: The descriptor that failed to parse
    /// - `reason`: What was missing or malformed
    #[error("Malformed descriptor {file}: {reason}")]
    MalformedDescriptor {
        /// Path of the descriptor that failed to parse
        file: String,
        /// Specific reason for the failure
        reason: String,
    },

    /// A `properties` block declared an element with an empty key or value
    ///
    /// Raised the moment the empty declaration is seen, before any property
    /// map is handed out.
    #[error("{}", empty_property_message(.file, .key.as_deref()))]
    EmptyPropertyDeclaration {
        /// Path of the descriptor declaring the property
        file: String,
        /// The property key, or `None` when the key itself is empty
        key: Option<String>,
    },

    /// The parent could not be found locally nor through the coordinate lookup
    #[error("Parent descriptor {coordinate} could not be found")]
    ParentNotFound {
        /// The `groupId:artifactId:version` coordinate of the missing parent
        coordinate: String,
    },

    /// The external coordinate lookup failed
    #[error("Lookup of {coordinate} failed: {reason}")]
    LookupFailed {
        /// The coordinate being looked up
        coordinate: String,
        /// Reason reported by the lookup
        reason: String,
    },

    /// A parent chain loops back to a descriptor that is still being resolved
    ///
    /// # Fields
    /// - `chain`: The descriptor paths forming the loop, joined with ` -> `
    #[error("Circular parent reference detected: {chain}")]
    CircularParent {
        /// String representation of the circular parent chain
        chain: String,
    },

    /// A repository URL could not be parsed or turned into a location
    #[error("Invalid repository URL '{url}' in {file}: {reason}")]
    InvalidRepositoryUrl {
        /// Path of the descriptor declaring the repository
        file: String,
        /// The URL as declared
        url: String,
        /// Why it could not be used
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A declared file exists but could not be read
    #[error(transparent)]
    FileOperation(#[from] FileOperationError),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

fn empty_property_message(file: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("Descriptor {file} has an empty value for property '{key}'"),
        None => format!("Descriptor {file} has an empty property key"),
    }
}

impl Clone for PomError {
    fn clone(&self) -> Self {
        match self {
            Self::MalformedDescriptor {
                file,
                reason,
            } => Self::MalformedDescriptor {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::EmptyPropertyDeclaration {
                file,
                key,
            } => Self::EmptyPropertyDeclaration {
                file: file.clone(),
                key: key.clone(),
            },
            Self::ParentNotFound {
                coordinate,
            } => Self::ParentNotFound {
                coordinate: coordinate.clone(),
            },
            Self::LookupFailed {
                coordinate,
                reason,
            } => Self::LookupFailed {
                coordinate: coordinate.clone(),
                reason: reason.clone(),
            },
            Self::CircularParent {
                chain,
            } => Self::CircularParent {
                chain: chain.clone(),
            },
            Self::InvalidRepositoryUrl {
                file,
                url,
                reason,
            } => Self::InvalidRepositoryUrl {
                file: file.clone(),
                url: url.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error inside is not Clone
            Self::FileOperation(e) => Self::Other {
                message: e.user_message(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`PomError`] and adds optional details and a
/// suggestion for resolution.
///
/// # Display Format
///
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use pomres::core::{ErrorContext, PomError};
///
/// let context = ErrorContext::new(PomError::ParentNotFound {
///     coordinate: "org.example:parent:1.0".to_string(),
/// })
/// .with_suggestion("Install the parent into the local repository")
/// .with_details("No ../pom.xml was found next to the project");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PomError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`PomError`]
    #[must_use]
    pub const fn new(error: PomError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`PomError`] anywhere in the error (including below added
/// context) and [`std::io::Error`]. Anything else is reported with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pom_error) = error.downcast_ref::<PomError>() {
        let mut ctx = create_error_context(pom_error.clone());
        let contexts = context_chain(&error);
        if ctx.details.is_none() && !contexts.is_empty() {
            ctx.details = Some(contexts);
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PomError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the descriptor tree");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PomError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain = cause_chain(&error);
    if !chain.is_empty() {
        message.push_str("\n\n");
        message.push_str(&chain);
    }

    ErrorContext::new(PomError::Other {
        message,
    })
}

fn cause_chain(error: &anyhow::Error) -> String {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if causes.is_empty() {
        return String::new();
    }

    let mut message = String::from("Caused by:");
    for (i, cause) in causes.iter().enumerate() {
        message.push_str(&format!("\n  {}: {}", i + 1, cause));
    }
    message
}

/// The context messages added on top of the [`PomError`], outermost first.
fn context_chain(error: &anyhow::Error) -> String {
    let contexts: Vec<String> = error
        .chain()
        .take_while(|cause| cause.downcast_ref::<PomError>().is_none())
        .map(ToString::to_string)
        .collect();
    if contexts.is_empty() {
        return String::new();
    }

    let mut message = String::from("While:");
    for (i, context) in contexts.iter().enumerate() {
        message.push_str(&format!("\n  {}: {}", i + 1, context));
    }
    message
}

fn create_error_context(error: PomError) -> ErrorContext {
    match &error {
        PomError::MalformedDescriptor {
            file, ..
        } => {
            let suggestion = format!(
                "Check the XML structure of {file}; every <dependency> needs a groupId and artifactId"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        PomError::EmptyPropertyDeclaration {
            key, ..
        } => {
            let suggestion = match key {
                Some(key) => format!("Give <{key}> a value or remove it from <properties>"),
                None => "Remove the unnamed element from <properties>".to_string(),
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        PomError::ParentNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Set <relativePath> to the parent's pom.xml, or install the parent into the local repository",
            )
            .with_details(
                "Without a local parent file the parent is looked up by its coordinate",
            ),
        PomError::CircularParent {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the <parent> references so that no descriptor inherits from itself"),
        PomError::InvalidRepositoryUrl {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Use an absolute URL with a scheme, or a path relative to the descriptor",
        ),
        PomError::ConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check ~/.pomres/config.toml, or point POMRES_CONFIG at a valid file",
        ),
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_empty_property_messages() {
        let with_key = PomError::EmptyPropertyDeclaration {
            file: "pom.xml".to_string(),
            key: Some("foo".to_string()),
        };
        assert_eq!(with_key.to_string(), "Descriptor pom.xml has an empty value for property 'foo'");

        let without_key = PomError::EmptyPropertyDeclaration {
            file: "pom.xml".to_string(),
            key: None,
        };
        assert_eq!(without_key.to_string(), "Descriptor pom.xml has an empty property key");
    }

    #[test]
    fn test_user_friendly_error_sees_through_context() {
        let result: anyhow::Result<()> = Err(PomError::CircularParent {
            chain: "a/pom.xml -> b/pom.xml -> a/pom.xml".to_string(),
        }
        .into());
        let error = result.context("Failed to resolve a/pom.xml").unwrap_err();

        let ctx = user_friendly_error(error);
        assert!(matches!(ctx.error, PomError::CircularParent { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_context_details_list_outer_messages_once() {
        let result: anyhow::Result<()> = Err(PomError::EmptyPropertyDeclaration {
            file: "/p/pom.xml".to_string(),
            key: Some("foo".to_string()),
        }
        .into());
        let error = result
            .context("Failed to resolve parent of /p/child/pom.xml")
            .context("Failed to resolve /p/child/pom.xml")
            .unwrap_err();

        let ctx = user_friendly_error(error);
        let details = ctx.details.as_deref().unwrap();
        assert!(details.contains("1: Failed to resolve /p/child/pom.xml"));
        assert!(details.contains("2: Failed to resolve parent of /p/child/pom.xml"));
        assert!(!details.contains("empty value"));
    }

    #[test]
    fn test_bare_pom_error_has_no_context_details() {
        let error = anyhow::Error::from(PomError::CircularParent {
            chain: "a -> a".to_string(),
        });
        assert!(user_friendly_error(error).details.is_none());
    }

    #[test]
    fn test_generic_error_includes_chain() {
        let error = anyhow::anyhow!("root cause").context("outer");
        let ctx = user_friendly_error(error);
        let rendered = ctx.to_string();
        assert!(rendered.contains("outer"));
        assert!(rendered.contains("Caused by:"));
        assert!(rendered.contains("root cause"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(PomError::ConfigError {
            message: "bad".to_string(),
        })
        .with_details("d")
        .with_suggestion("s");
        assert_eq!(ctx.to_string(), "Configuration error: bad\nDetails: d\nSuggestion: s");
    }

    #[test]
    fn test_clone_file_operation_becomes_other() {
        use crate::core::file_error::{FileOperation, FileOperationContext};

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PomError::FileOperation(FileOperationError::new(
            FileOperationContext::new(FileOperation::Read, "/x/pom.xml", "reading parent", "resolver"),
            io,
        ));
        assert!(matches!(err.clone(), PomError::Other { .. }));
    }
}
