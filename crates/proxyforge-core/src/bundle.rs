//! The root aggregate of a proxy bundle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::endpoint::{ProxyEndpoint, TargetEndpoint};
use crate::error::{BundleError, Result};
use crate::policy::Policy;
use crate::resource::{Resource, split_resource_url};

/// The proxy descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

/// Everything decoded from one or more configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bundle {
    pub proxy: Option<Proxy>,
    pub proxy_endpoints: Vec<ProxyEndpoint>,
    pub target_endpoints: Vec<TargetEndpoint>,
    pub policies: Vec<Policy>,
    /// Embedded resource contents keyed by `scheme://path`.
    pub resources: BTreeMap<String, String>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a policy, surfacing its embedded resource if it has one.
    pub fn push_policy(&mut self, policy: Policy) {
        if let Some(resource) = policy.resource() {
            self.insert_resource(resource);
        }
        self.policies.push(policy);
    }

    /// Record a resource. A later resource with the same URL replaces the earlier one.
    pub fn insert_resource(&mut self, resource: Resource) {
        self.resources.insert(resource.url, resource.content);
    }

    /// Merge a bundle decoded from a later file into this one.
    ///
    /// The later proxy replaces the current one; lists are appended in order and
    /// resources are merged last-write-wins.
    pub fn merge(&mut self, other: Bundle) {
        if other.proxy.is_some() {
            self.proxy = other.proxy;
        }
        self.proxy_endpoints.extend(other.proxy_endpoints);
        self.target_endpoints.extend(other.target_endpoints);
        self.policies.extend(other.policies);
        self.resources.extend(other.resources);
    }

    /// Check the invariants a complete bundle must satisfy before it is written.
    pub fn validate(&self) -> Result<()> {
        if self.proxy.is_none() {
            return Err(BundleError::MissingProxy);
        }
        if self.proxy_endpoints.is_empty() {
            return Err(BundleError::MissingProxyEndpoint);
        }
        if let Some(url) = self
            .resources
            .keys()
            .find(|url| split_resource_url(url).is_none())
        {
            return Err(BundleError::InvalidResourceUrl(url.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{JavaScript, PolicyKind};

    fn proxy(name: &str) -> Proxy {
        Proxy {
            name: name.to_string(),
            display_name: None,
            description: None,
        }
    }

    fn endpoint(name: &str) -> ProxyEndpoint {
        ProxyEndpoint {
            name: name.to_string(),
            pre_flow: None,
            flows: Vec::new(),
            post_flow: None,
            post_client_flow: None,
            fault_rules: Vec::new(),
            default_fault_rule: None,
            http_proxy_connection: None,
            route_rules: Vec::new(),
        }
    }

    fn javascript(name: &str, url: &str, content: &str) -> Policy {
        Policy::new(
            name,
            PolicyKind::JavaScript(JavaScript {
                resource_url: url.to_string(),
                include_urls: Vec::new(),
                time_limit: None,
                properties: Vec::new(),
                content: Some(content.to_string()),
            }),
        )
    }

    #[test]
    fn test_push_policy_extracts_resource() {
        let mut bundle = Bundle::new();
        bundle.push_policy(javascript("cors", "jsc://cors.js", "a()"));
        bundle.push_policy(javascript("cors-again", "jsc://cors.js", "b()"));

        assert_eq!(bundle.policies.len(), 2);
        assert_eq!(bundle.resources.len(), 1);
        assert_eq!(bundle.resources["jsc://cors.js"], "b()");
    }

    #[test]
    fn test_merge_later_proxy_wins() {
        let mut first = Bundle::new();
        first.proxy = Some(proxy("first"));
        first.proxy_endpoints.push(endpoint("a"));

        let mut second = Bundle::new();
        second.proxy = Some(proxy("second"));
        second.proxy_endpoints.push(endpoint("b"));

        let mut third = Bundle::new();
        third.proxy_endpoints.push(endpoint("c"));

        first.merge(second);
        first.merge(third);

        assert_eq!(first.proxy.as_ref().unwrap().name, "second");
        let names: Vec<_> = first.proxy_endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_validate() {
        let mut bundle = Bundle::new();
        assert_eq!(bundle.validate(), Err(BundleError::MissingProxy));

        bundle.proxy = Some(proxy("hello"));
        assert_eq!(bundle.validate(), Err(BundleError::MissingProxyEndpoint));

        bundle.proxy_endpoints.push(endpoint("default"));
        assert_eq!(bundle.validate(), Ok(()));

        bundle.insert_resource(Resource::new("cors.js", "x"));
        assert_eq!(
            bundle.validate(),
            Err(BundleError::InvalidResourceUrl("cors.js".to_string()))
        );
    }

    #[test]
    fn test_bundle_serializes_policy_type_tag() {
        let mut bundle = Bundle::new();
        bundle.push_policy(javascript("cors", "jsc://cors.js", "a()"));
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["policies"][0]["kind"]["type"], "javascript");
        assert_eq!(json["policies"][0]["async"], false);
    }
}
