//! Cross-platform path and file helpers.

pub mod fs;
pub mod platform;

pub use fs::{normalize_path, read_text_file};
pub use platform::{get_home_dir, resolve_path};
