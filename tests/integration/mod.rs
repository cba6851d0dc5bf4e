//! Integration test suite for pomres
//!
//! End-to-end tests over descriptor trees written to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **inheritance**: Multi-level parent chains, remote parents, cycles
//! - **macros**: `${..}` substitution through a resolved project
//! - **transitive**: Dependency walks against an on-disk repository
//! - **cli**: The `pomres` binary

mod cli;
mod inheritance;
mod macros;
mod transitive;
