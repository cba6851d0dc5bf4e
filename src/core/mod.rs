//! Core types shared across pomres: error kinds and file-operation context.

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, PomError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
