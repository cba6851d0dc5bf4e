//! `${key}` macro substitution.
//!
//! A macro is `${` + optional whitespace + a key made of anything but
//! whitespace and `}` + optional whitespace + `}`. Scanning runs left to right
//! over non-overlapping matches. Each macro is replaced by whatever the lookup
//! returns for its key; a key the lookup does not know is left in place
//! verbatim, delimiters included. Substituted text is never re-scanned.
//!
//! Substitution cannot fail. An unresolved macro degrades to literal text so
//! that an incomplete build still yields a usable string.
//!
//! The last level of a descriptor's lookup is process-wide configuration.
//! That level is modelled as an injected [`PropertySource`] rather than read
//! implicitly, see [`SystemProperties`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn macro_pattern() -> &'static Regex {
    static MACRO: OnceLock<Regex> = OnceLock::new();
    MACRO.get_or_init(|| Regex::new(r"\$\{\s*([^}\s]+)\s*\}").expect("macro pattern is valid"))
}

/// Replace every `${key}` in `input` using `lookup`.
///
/// Returns [`Cow::Borrowed`] with the original input when nothing matched.
///
/// # Examples
///
/// ```rust
/// use pomres::substitution::substitute;
///
/// let out = substitute("${ greeting }, ${who}", |key| match key {
///     "greeting" => Some("hello".to_string()),
///     _ => None,
/// });
/// assert_eq!(out, "hello, ${who}");
/// ```
pub fn substitute<F>(input: &str, mut lookup: F) -> Cow<'_, str>
where
    F: FnMut(&str) -> Option<String>,
{
    macro_pattern().replace_all(input, |caps: &Captures<'_>| match lookup(&caps[1]) {
        Some(value) => value,
        None => caps[0].to_string(),
    })
}

/// A read-only source of named properties.
pub trait PropertySource {
    /// Value of `key`, or `None` when this source does not define it.
    fn property(&self, key: &str) -> Option<String>;
}

impl PropertySource for BTreeMap<String, String> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn property(&self, key: &str) -> Option<String> {
        (**self).property(key)
    }
}

/// A source that defines nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProperties;

impl PropertySource for NoProperties {
    fn property(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Process-wide properties used as the final macro fallback.
///
/// Resolution order:
/// 1. explicit overrides (from the global config's `[properties]` table)
/// 2. built-ins: `user.home`, `user.dir`, `os.name`, `file.separator`,
///    `path.separator`, `line.separator`
/// 3. `env.NAME` reads the environment variable `NAME`
#[derive(Debug, Clone, Default)]
pub struct SystemProperties {
    overrides: BTreeMap<String, String>,
}

impl SystemProperties {
    /// Create system properties with the given explicit overrides.
    #[must_use]
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides,
        }
    }

    fn builtin(key: &str) -> Option<String> {
        match key {
            "user.home" => dirs::home_dir().map(|p| p.display().to_string()),
            "user.dir" => std::env::current_dir().ok().map(|p| p.display().to_string()),
            "os.name" => Some(std::env::consts::OS.to_string()),
            "file.separator" => Some(std::path::MAIN_SEPARATOR.to_string()),
            "path.separator" => Some(if cfg!(windows) { ";" } else { ":" }.to_string()),
            "line.separator" => Some(if cfg!(windows) { "\r\n" } else { "\n" }.to_string()),
            _ => None,
        }
    }
}

impl PropertySource for SystemProperties {
    fn property(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }
        if let Some(value) = Self::builtin(key) {
            return Some(value);
        }
        key.strip_prefix("env.").and_then(|name| std::env::var(name).ok())
    }
}
