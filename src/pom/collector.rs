//! Property and repository collection for one descriptor.
//!
//! Both collectors read only the document they are given. Merging with
//! ancestors happens in the resolver.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use tracing::trace;
use url::Url;

use super::document::{PomDocument, text_content};
use crate::core::PomError;
use crate::utils::normalize_path;

/// Collect `project/properties/*` as a key/value map.
///
/// The element's local name is the key and its trimmed text is the value, so
/// a namespace prefix such as `<ns:key>` is dropped and the key is `key`.
/// This matches how every other element is queried. Within one document a
/// later declaration of the same key replaces an earlier one.
///
/// # Errors
///
/// Returns [`PomError::EmptyPropertyDeclaration`] on the first element with an
/// empty key or value. No map is produced in that case.
pub fn collect_properties(doc: &PomDocument<'_>) -> Result<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();

    for node in doc.nodes(&["properties"]).into_iter().flat_map(|p| p.children()) {
        if !node.is_element() {
            continue;
        }

        let key = node.tag_name().name();
        if key.is_empty() {
            return Err(PomError::EmptyPropertyDeclaration {
                file: doc.file().display().to_string(),
                key: None,
            }
            .into());
        }

        let value = text_content(node);
        if value.is_empty() {
            return Err(PomError::EmptyPropertyDeclaration {
                file: doc.file().display().to_string(),
                key: Some(key.to_string()),
            }
            .into());
        }

        trace!("property {key} = {value}");
        properties.insert(key.to_string(), value);
    }

    Ok(properties)
}

/// Collect `project/repositories/repository/url` in declaration order.
///
/// A URL with a scheme is kept as declared. Anything else is a filesystem
/// path relative to the directory of `pom_file`, returned as a `file:` URL.
/// Duplicates are kept.
///
/// # Errors
///
/// Returns [`PomError::InvalidRepositoryUrl`] for URLs that cannot be parsed.
pub fn collect_repositories(doc: &PomDocument<'_>, pom_file: &Path) -> Result<Vec<Url>> {
    doc.nodes(&["repositories", "repository", "url"])
        .into_iter()
        .map(|node| repository_location(&text_content(node), pom_file))
        .collect()
}

/// Turn one declared repository URL into a location.
///
/// # Errors
///
/// Fails when `declared` has a scheme but is otherwise invalid, or when the
/// resolved path cannot be expressed as a `file:` URL.
pub fn repository_location(declared: &str, pom_file: &Path) -> Result<Url> {
    let invalid = |reason: String| PomError::InvalidRepositoryUrl {
        file: pom_file.display().to_string(),
        url: declared.to_string(),
        reason,
    };

    match Url::parse(declared) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = pom_file.parent().unwrap_or_else(|| Path::new("."));
            let joined = std::path::absolute(base.join(declared))
                .map_err(|e| invalid(e.to_string()))?;
            let location = normalize_path(&joined);
            Url::from_directory_path(&location)
                .map_err(|()| invalid(format!("{} is not an absolute path", location.display())).into())
        }
        Err(e) => Err(invalid(e.to_string()).into()),
    }
}
