//! Extract Variables policy.

use serde::{Deserialize, Serialize};

/// Pulls values out of a message into flow variables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractVariables {
    pub source: Option<ExtractSource>,
    pub variable_prefix: Option<String>,
    pub ignore_unresolved_variables: bool,
    pub uri_paths: Vec<UriPath>,
    pub query_params: Vec<NamedPatterns>,
    pub headers: Vec<NamedPatterns>,
    pub form_params: Vec<NamedPatterns>,
    pub variables: Vec<NamedPatterns>,
    pub json_payload: Option<JsonPayload>,
    pub xml_payload: Option<XmlPayload>,
}

impl ExtractVariables {
    /// Whether at least one extraction source is configured.
    pub fn has_source(&self) -> bool {
        !self.uri_paths.is_empty()
            || !self.query_params.is_empty()
            || !self.headers.is_empty()
            || !self.form_params.is_empty()
            || !self.variables.is_empty()
            || self.json_payload.is_some()
            || self.xml_payload.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractSource {
    pub clear_payload: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pattern {
    pub ignore_case: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UriPath {
    pub patterns: Vec<Pattern>,
}

/// Patterns applied to a named header, query param, form param or variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPatterns {
    pub name: String,
    pub patterns: Vec<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsonPayload {
    pub variables: Vec<JsonVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonVariable {
    pub name: String,
    pub variable_type: Option<String>,
    pub json_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XmlPayload {
    pub stop_payload_processing: bool,
    pub namespaces: Vec<XmlNamespace>,
    pub variables: Vec<XmlVariable>,
}

/// Binds a prefix used in XPath expressions to a namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNamespace {
    pub prefix: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlVariable {
    pub name: String,
    pub variable_type: Option<String>,
    pub xpath: Option<String>,
}
