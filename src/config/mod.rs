//! Configuration for pomres.
//!
//! There is one configuration file, the user-wide [`GlobalConfig`] at
//! `~/.pomres/config.toml`. It tells the CLI where the local repository
//! lives, which extra repositories every dependency walk consults, and which
//! system properties back `${..}` macros that a descriptor does not define.
//!
//! The library itself never reads this file. Callers build a
//! [`crate::substitution::SystemProperties`] and a
//! [`crate::resolver::LocalRepository`] from it and pass them in.

mod global;

pub use global::{CONFIG_ENV_VAR, GlobalConfig};
