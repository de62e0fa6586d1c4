//! Traffic management policies: Quota and Spike Arrest.

use serde::{Deserialize, Serialize};

use crate::fragment::ValueRef;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quota {
    /// `calendar`, `rollingwindow` or `flexi`.
    pub quota_type: Option<String>,
    pub allows: Vec<QuotaAllow>,
    pub interval: Option<ValueRef>,
    pub time_unit: Option<ValueRef>,
    pub start_time: Option<String>,
    pub distributed: bool,
    pub synchronous: bool,
    pub asynchronous_configuration: Option<AsyncConfiguration>,
    pub identifier: Option<String>,
    pub message_weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuotaAllow {
    pub count: Option<i64>,
    pub count_ref: Option<String>,
    pub classes: Vec<QuotaClass>,
}

/// Per-class overrides selected by a flow variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuotaClass {
    pub reference: Option<String>,
    pub allows: Vec<QuotaClassAllow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuotaClassAllow {
    pub class: Option<String>,
    pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AsyncConfiguration {
    pub sync_interval_in_seconds: Option<i64>,
    pub sync_message_count: Option<i64>,
}

/// Smooths traffic bursts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpikeArrest {
    pub identifier: Option<String>,
    pub message_weight: Option<String>,
    /// Rate such as `30ps` or `12pm`.
    pub rate: Option<ValueRef>,
}
