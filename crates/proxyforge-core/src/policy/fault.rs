//! Raise Fault policy.

use serde::{Deserialize, Serialize};

use super::message::Payload;
use crate::fragment::Header;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseFault {
    pub fault_response: Option<FaultResponse>,
    /// Defaults to true when not configured.
    pub ignore_unresolved_variables: bool,
}

/// The error response returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaultResponse {
    pub copy: Option<FaultCopy>,
    pub remove: Option<FaultRemove>,
    pub set: Option<FaultSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaultCopy {
    pub source: Option<String>,
    pub headers: Vec<Header>,
    pub status_code: bool,
    pub reason_phrase: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaultRemove {
    pub headers: Vec<Header>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaultSet {
    pub headers: Vec<Header>,
    pub payload: Option<Payload>,
    pub status_code: Option<i64>,
    pub reason_phrase: Option<String>,
}
