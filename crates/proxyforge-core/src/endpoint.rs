//! Proxy and target endpoint definitions.

use serde::{Deserialize, Serialize};

use crate::flow::{DefaultFaultRule, FaultRule, Flow, FlowSteps};
use crate::fragment::{EnvironmentVariable, Property};

/// The client-facing side of a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    pub name: String,
    pub pre_flow: Option<FlowSteps>,
    pub flows: Vec<Flow>,
    pub post_flow: Option<FlowSteps>,
    pub post_client_flow: Option<FlowSteps>,
    pub fault_rules: Vec<FaultRule>,
    pub default_fault_rule: Option<DefaultFaultRule>,
    pub http_proxy_connection: Option<HttpProxyConnection>,
    /// Evaluated in declaration order; the first match wins.
    pub route_rules: Vec<RouteRule>,
}

/// Listener settings of a proxy endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProxyConnection {
    pub base_path: String,
    pub virtual_hosts: Vec<String>,
    pub properties: Vec<Property>,
}

/// Routes a request to a target once the proxy flows have run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub name: String,
    pub condition: Option<String>,
    /// `None` is a null route: the proxy answers without calling a backend.
    pub target: Option<RouteTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// Name of a target endpoint in the same bundle.
    TargetEndpoint(String),
    /// Literal backend URL.
    Url(String),
}

/// The backend-facing side of a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEndpoint {
    pub name: String,
    pub pre_flow: Option<FlowSteps>,
    pub flows: Vec<Flow>,
    pub post_flow: Option<FlowSteps>,
    pub fault_rules: Vec<FaultRule>,
    pub default_fault_rule: Option<DefaultFaultRule>,
    pub connection: Option<TargetConnection>,
    pub ssl_info: Option<SslInfo>,
}

/// How a target endpoint reaches its backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetConnection {
    Http(HttpTargetConnection),
    Local(LocalTargetConnection),
    Script(ScriptTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpTargetConnection {
    /// Absent when a load balancer names the servers instead.
    pub url: Option<String>,
    pub load_balancer: Option<LoadBalancer>,
    pub properties: Vec<Property>,
}

/// Chains to another proxy deployed in the same organization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalTargetConnection {
    pub api_proxy: Option<String>,
    pub proxy_endpoint: Option<String>,
    pub path: Option<String>,
}

/// A hosted script acting as the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTarget {
    pub resource_url: String,
    pub environment_variables: Vec<EnvironmentVariable>,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub algorithm: String,
    pub servers: Vec<LoadBalancerServer>,
    pub max_failures: Option<i64>,
    pub retry_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerServer {
    /// Name of a target server configured in the environment.
    pub name: String,
    pub weight: Option<i64>,
    pub is_fallback: bool,
}

/// TLS settings for the backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SslInfo {
    pub enabled: bool,
    pub client_auth_enabled: bool,
    pub trust_store: Option<String>,
    pub key_store: Option<String>,
    pub key_alias: Option<String>,
    pub ciphers: Vec<String>,
    pub protocols: Vec<String>,
}
