//! Service Callout policy.

use serde::{Deserialize, Serialize};

use super::message::{MessageAdd, MessageCopy, MessageRemove, MessageSet};
use crate::endpoint::{HttpTargetConnection, LocalTargetConnection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCallout {
    pub request: Option<CalloutRequest>,
    pub target: CalloutTarget,
    /// Variable receiving the response.
    pub response: Option<String>,
    pub timeout: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalloutRequest {
    pub clear_payload: bool,
    /// Variable holding the request message.
    pub variable: Option<String>,
    pub add: Option<MessageAdd>,
    pub copy: Option<MessageCopy>,
    pub remove: Option<MessageRemove>,
    pub set: Option<MessageSet>,
    pub ignore_unresolved_variables: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutTarget {
    Http(HttpTargetConnection),
    Local(LocalTargetConnection),
}
