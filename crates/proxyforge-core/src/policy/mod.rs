//! Policy definitions.
//!
//! Every policy shares a common header ([`Policy`]) and carries exactly one
//! kind-specific payload ([`PolicyKind`]). The set of kinds is closed; the
//! DSL name of each kind is given by [`PolicyType`].

pub mod analytics;
pub mod cache;
pub mod callout;
pub mod extract;
pub mod fault;
pub mod message;
pub mod script;
pub mod traffic;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

pub use analytics::{
    Statistic, StatisticType, StatisticsCollector, TreatAsArrayPath, VerifyApiKey, XmlToJson,
    XmlToJsonConversion, XmlToJsonOptions,
};
pub use cache::{CacheKey, Expiry, ResponseCache};
pub use callout::{CalloutRequest, CalloutTarget, ServiceCallout};
pub use extract::{
    ExtractSource, ExtractVariables, JsonPayload, JsonVariable, NamedPatterns, Pattern, UriPath,
    XmlNamespace, XmlPayload, XmlVariable,
};
pub use fault::{FaultCopy, FaultRemove, FaultResponse, FaultSet, RaiseFault};
pub use message::{
    AssignMessage, AssignTo, AssignVariable, MessageAdd, MessageCopy, MessageRemove, MessageSet,
    Payload,
};
pub use script::{JavaScript, Script};
pub use traffic::{
    AsyncConfiguration, Quota, QuotaAllow, QuotaClass, QuotaClassAllow, SpikeArrest,
};

/// A policy attached to flows by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Internal name referenced by flow steps.
    pub name: String,
    pub display_name: Option<String>,
    pub enabled: bool,
    pub continue_on_error: bool,
    pub r#async: bool,
    pub kind: PolicyKind,
}

impl Policy {
    /// Create a policy with the default header: enabled, synchronous, fail on error.
    pub fn new(name: impl Into<String>, kind: PolicyKind) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            enabled: true,
            continue_on_error: false,
            r#async: false,
            kind,
        }
    }

    pub fn policy_type(&self) -> PolicyType {
        self.kind.policy_type()
    }

    /// The embedded resource file carried by this policy, if any.
    ///
    /// Only script policies with both a resource URL and inline content have one.
    pub fn resource(&self) -> Option<Resource> {
        let (url, content) = match &self.kind {
            PolicyKind::Script(s) => (&s.resource_url, s.content.as_ref()),
            PolicyKind::JavaScript(js) => (&js.resource_url, js.content.as_ref()),
            _ => return None,
        };

        match content {
            Some(content) if !url.is_empty() && !content.is_empty() => {
                Some(Resource::new(url.clone(), content.clone()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyKind {
    AssignMessage(AssignMessage),
    ExtractVariables(ExtractVariables),
    Script(Script),
    #[serde(rename = "javascript")]
    JavaScript(JavaScript),
    Quota(Quota),
    SpikeArrest(SpikeArrest),
    ResponseCache(ResponseCache),
    RaiseFault(RaiseFault),
    ServiceCallout(ServiceCallout),
    VerifyApiKey(VerifyApiKey),
    StatisticsCollector(StatisticsCollector),
    XmlToJson(XmlToJson),
}

impl PolicyKind {
    pub fn policy_type(&self) -> PolicyType {
        match self {
            PolicyKind::AssignMessage(_) => PolicyType::AssignMessage,
            PolicyKind::ExtractVariables(_) => PolicyType::ExtractVariables,
            PolicyKind::Script(_) => PolicyType::Script,
            PolicyKind::JavaScript(_) => PolicyType::JavaScript,
            PolicyKind::Quota(_) => PolicyType::Quota,
            PolicyKind::SpikeArrest(_) => PolicyType::SpikeArrest,
            PolicyKind::ResponseCache(_) => PolicyType::ResponseCache,
            PolicyKind::RaiseFault(_) => PolicyType::RaiseFault,
            PolicyKind::ServiceCallout(_) => PolicyType::ServiceCallout,
            PolicyKind::VerifyApiKey(_) => PolicyType::VerifyApiKey,
            PolicyKind::StatisticsCollector(_) => PolicyType::StatisticsCollector,
            PolicyKind::XmlToJson(_) => PolicyType::XmlToJson,
        }
    }
}

/// The DSL name of each policy kind, as written in `policy "<type>" "<name>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    #[display("assign_message")]
    AssignMessage,
    #[display("extract_variables")]
    ExtractVariables,
    #[display("script")]
    Script,
    #[display("javascript")]
    #[serde(rename = "javascript")]
    JavaScript,
    #[display("quota")]
    Quota,
    #[display("spike_arrest")]
    SpikeArrest,
    #[display("response_cache")]
    ResponseCache,
    #[display("raise_fault")]
    RaiseFault,
    #[display("service_callout")]
    ServiceCallout,
    #[display("verify_api_key")]
    VerifyApiKey,
    #[display("statistics_collector")]
    StatisticsCollector,
    #[display("xml_to_json")]
    XmlToJson,
}

impl PolicyType {
    pub const ALL: [PolicyType; 12] = [
        PolicyType::AssignMessage,
        PolicyType::ExtractVariables,
        PolicyType::Script,
        PolicyType::JavaScript,
        PolicyType::Quota,
        PolicyType::SpikeArrest,
        PolicyType::ResponseCache,
        PolicyType::RaiseFault,
        PolicyType::ServiceCallout,
        PolicyType::VerifyApiKey,
        PolicyType::StatisticsCollector,
        PolicyType::XmlToJson,
    ];

    /// Look up a policy type by its DSL name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_string() == name)
    }
}
