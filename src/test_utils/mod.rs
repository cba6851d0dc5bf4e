//! Test utilities for pomres
//!
//! Logging setup for tests and builders that write descriptor trees to disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use pomres::test_utils::PomFixture;
//! # fn example(dir: &std::path::Path) -> anyhow::Result<()> {
//! let path = PomFixture::new("org.example", "app", "1.0")
//!     .property("lib.version", "2.1")
//!     .dependency("org.lib", "core", "${lib.version}")
//!     .write_to(dir)?;
//! # Ok(())
//! # }
//! ```

pub mod fixtures;

pub use fixtures::{DependencyFixture, PomFixture, install_pom};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=pomres=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}
