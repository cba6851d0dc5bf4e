//! pomres - Maven project descriptor resolution
//!
//! Resolves a `pom.xml` into an inheritance-resolved model: merged
//! dependencies, repositories and properties, plus `${..}` macro substitution
//! over those properties and the project's identity.
//!
//! # Architecture Overview
//!
//! Resolution is a top-down request with a bottom-up merge. The caller asks
//! for the leaf descriptor; the resolver finds its parent (next to it on disk,
//! or by coordinate through a [`resolver::PomLookup`]), resolves that parent
//! completely, then merges it into the child.
//!
//! ```text
//! pom.xml ──parse──▶ PomDocument ──descriptor──▶ Pom
//!                        │                          │
//!                        ├─ properties ─┐           │
//!                        └─ repositories┴──merge──▶ ProjectPom ──▶ lookup / replace / dependencies
//!                                           ▲
//!                      resolved parent ─────┘
//! ```
//!
//! # Core Modules
//!
//! - [`pom`] - Descriptor model, XML tree queries, property and repository collection
//! - [`resolver`] - Parent inheritance, exclusion chains, coordinate lookup, dependency walks
//! - [`substitution`] - `${key}` macro substitution and system properties
//!
//! # Supporting Modules
//!
//! - [`cli`] - Command-line driver
//! - [`config`] - Global configuration (`~/.pomres/config.toml`)
//! - [`core`] - Error types and user-facing error rendering
//! - [`utils`] - Path normalization and expansion
//!
//! # Example
//!
//! ```rust,no_run
//! use pomres::resolver::{LocalRepository, ProjectResolver};
//! use pomres::substitution::SystemProperties;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let repository = LocalRepository::new("/home/me/.m2/repository");
//! let project = ProjectResolver::new(&repository).resolve(Path::new("pom.xml"))?;
//!
//! let system = SystemProperties::default();
//! println!("{}", project.replace("${pom.artifactId}-${pom.version}.jar", &system));
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod core;
pub mod pom;
pub mod resolver;
pub mod substitution;

// Supporting modules
pub mod cli;
pub mod config;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
