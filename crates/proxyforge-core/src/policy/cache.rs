//! Response Cache policy.

use serde::{Deserialize, Serialize};

use crate::fragment::ValueRef;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseCache {
    pub cache_type: Option<String>,
    pub cache_key: Option<CacheKey>,
    pub scope: Option<String>,
    pub expiry: Option<Expiry>,
    pub cache_resource: Option<String>,
    pub lookup_timeout: Option<i64>,
    pub exclude_error_response: bool,
    pub skip_cache_lookup: Option<String>,
    pub skip_cache_population: Option<String>,
    pub use_accept_header: bool,
    pub use_response_cache_headers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheKey {
    pub prefix: Option<String>,
    /// Concatenated in declaration order to form the key.
    pub fragments: Vec<ValueRef>,
}

/// When a cached entry expires. At most one form may be configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    TimeOfDay(ValueRef),
    TimeoutInSec(ValueRef),
    ExpiryDate(ValueRef),
}
