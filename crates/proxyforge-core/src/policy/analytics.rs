//! Verify API Key, Statistics Collector and XML to JSON policies.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::fragment::ValueRef;

/// Checks an API key against the registered developer apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyApiKey {
    pub api_key: ValueRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatisticsCollector {
    pub statistics: Vec<Statistic>,
}

/// A custom analytics dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub name: String,
    /// Flow variable supplying the value.
    pub reference: String,
    pub statistic_type: StatisticType,
    /// Default used when the reference is unresolved.
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum StatisticType {
    #[display("string")]
    String,
    #[display("integer")]
    Integer,
    #[display("float")]
    Float,
    #[display("long")]
    Long,
    #[display("double")]
    Double,
}

impl StatisticType {
    pub const ALL: [StatisticType; 5] = [
        StatisticType::String,
        StatisticType::Integer,
        StatisticType::Float,
        StatisticType::Long,
        StatisticType::Double,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_string() == s)
    }
}

/// Converts an XML payload to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlToJson {
    pub source: Option<String>,
    pub output_variable: Option<String>,
    pub conversion: XmlToJsonConversion,
}

/// Either explicit options or one of the named format presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XmlToJsonConversion {
    Options(XmlToJsonOptions),
    Format(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XmlToJsonOptions {
    pub recognize_number: bool,
    pub recognize_boolean: bool,
    pub recognize_null: bool,
    pub null_value: Option<String>,
    pub namespace_block_name: Option<String>,
    pub default_namespace_node_name: Option<String>,
    pub namespace_separator: Option<String>,
    pub text_always_as_property: bool,
    pub text_node_name: Option<String>,
    pub attribute_block_name: Option<String>,
    pub attribute_prefix: Option<String>,
    pub output_prefix: Option<String>,
    pub output_suffix: Option<String>,
    pub strip_levels: Option<i64>,
    pub treat_as_array: Vec<TreatAsArrayPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatAsArrayPath {
    pub path: String,
    pub unwrap: bool,
}
