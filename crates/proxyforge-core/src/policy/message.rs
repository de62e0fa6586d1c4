//! Message manipulation blocks shared by Assign Message, Raise Fault and
//! Service Callout.

use serde::{Deserialize, Serialize};

use crate::fragment::{FormParam, Header, QueryParam};

/// Creates or modifies a request or response message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignMessage {
    pub add: Option<MessageAdd>,
    pub copy: Option<MessageCopy>,
    pub remove: Option<MessageRemove>,
    pub set: Option<MessageSet>,
    pub assign_variable: Option<AssignVariable>,
    pub assign_to: Option<AssignTo>,
    pub ignore_unresolved_variables: bool,
}

/// Headers and parameters appended to a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageAdd {
    pub headers: Vec<Header>,
    pub query_params: Vec<QueryParam>,
    pub form_params: Vec<FormParam>,
}

/// Parts copied from the source message. Boolean fields select whole parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageCopy {
    /// Variable naming the message to copy from; the current message when absent.
    pub source: Option<String>,
    pub headers: Vec<Header>,
    pub query_params: Vec<QueryParam>,
    pub form_params: Vec<FormParam>,
    pub payload: bool,
    pub version: bool,
    pub verb: bool,
    pub path: bool,
    pub status_code: bool,
    pub reason_phrase: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageRemove {
    pub headers: Vec<Header>,
    pub query_params: Vec<QueryParam>,
    pub form_params: Vec<FormParam>,
    pub payload: bool,
}

/// Values overwritten on the message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageSet {
    pub headers: Vec<Header>,
    pub query_params: Vec<QueryParam>,
    pub form_params: Vec<FormParam>,
    pub payload: Option<Payload>,
    pub version: Option<String>,
    pub verb: Option<String>,
    pub path: Option<String>,
    pub status_code: Option<i64>,
    pub reason_phrase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Payload {
    pub content_type: Option<String>,
    pub variable_prefix: Option<String>,
    pub variable_suffix: Option<String>,
    pub value: String,
}

/// Assigns a flow variable from a reference or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignVariable {
    pub name: String,
    pub reference: Option<String>,
    pub value: Option<String>,
}

/// Target message of an Assign Message policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignTo {
    pub create_new: bool,
    pub transport: Option<String>,
    /// `request` or `response`.
    pub message_type: Option<String>,
    pub value: Option<String>,
}
