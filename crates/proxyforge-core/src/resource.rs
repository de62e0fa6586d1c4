//! Embedded resource files.

use serde::{Deserialize, Serialize};

/// An inline file carried by a policy, keyed by a `scheme://path` URL where the
/// scheme names the scripting language (`jsc`, `py`, `xsl`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub url: String,
    pub content: String,
}

impl Resource {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Split a resource URL into its scheme and path.
///
/// Returns `None` unless both parts are non-empty.
pub fn split_resource_url(url: &str) -> Option<(&str, &str)> {
    let (scheme, path) = url.split_once("://")?;
    if scheme.is_empty() || path.is_empty() {
        return None;
    }
    Some((scheme, path))
}
