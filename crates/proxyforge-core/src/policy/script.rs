//! Script-backed policies.

use serde::{Deserialize, Serialize};

use crate::fragment::Property;

/// Runs a hosted script (Python by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub resource_url: String,
    pub include_urls: Vec<String>,
    /// Inline source, extracted into the bundle's resources.
    pub content: Option<String>,
}

/// Runs a JavaScript resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaScript {
    pub resource_url: String,
    pub include_urls: Vec<String>,
    /// Milliseconds the script may run.
    pub time_limit: Option<i64>,
    pub properties: Vec<Property>,
    pub content: Option<String>,
}
