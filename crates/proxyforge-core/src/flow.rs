//! Flow scaffolding shared by proxy and target endpoints.

use serde::{Deserialize, Serialize};

/// A reference to a policy executed as part of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Name of the policy to run.
    pub name: String,
    /// Condition expression, passed through unevaluated.
    pub condition: Option<String>,
}

/// Request and response step lists of a flow, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowSteps {
    pub request: Vec<Step>,
    pub response: Vec<Step>,
}

impl FlowSteps {
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty()
    }
}

/// A named conditional flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    pub condition: Option<String>,
    #[serde(flatten)]
    pub steps: FlowSteps,
}

/// A fault rule executed when its condition matches a raised fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRule {
    pub name: String,
    pub condition: Option<String>,
    pub steps: Vec<Step>,
}

/// The fallback fault rule of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultFaultRule {
    pub name: String,
    pub condition: Option<String>,
    pub steps: Vec<Step>,
    /// Run even when another fault rule already handled the fault.
    pub always_enforce: bool,
}
