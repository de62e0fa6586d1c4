//! Policy decoders.
//!
//! A policy block is written `policy "<type>" "<name>" { ... }`. The common
//! header is decoded here; the body is handed to the decoder registered for
//! the type in [`decode_kind`].

mod analytics;
mod cache;
mod callout;
mod extract;
mod fault;
mod message;
mod script;
mod traffic;

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{Policy, PolicyKind, PolicyType};
use tracing::debug;

use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::tree::label;

/// Decode a `policy` block into a policy with its kind-specific payload.
pub fn decode_policy(d: &mut Decoder<'_>, node: &KdlNode) -> Option<Policy> {
    let mark = d.checkpoint();

    let (kind, name) = match (label(node, 0), label(node, 1)) {
        (Some(kind), Some(name)) if !kind.is_empty() && !name.is_empty() => (kind, name),
        _ => {
            d.required(node, "policy requires a type and name");
            return None;
        }
    };

    let Some(policy_type) = PolicyType::from_name(kind) else {
        let expected = PolicyType::ALL
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let position = d.position(node);
        d.report(DecodeError::UnknownKind {
            position,
            kind: kind.to_string(),
            expected,
        });
        return None;
    };

    let body = d.object(node, &format!("{kind} policy"))?;

    let display_name = d.string(body, "display_name");
    let enabled = d.flag(body, "enabled").unwrap_or(true);
    let continue_on_error = d.flag(body, "continue_on_error").unwrap_or(false);
    let r#async = d.flag(body, "async").unwrap_or(false);
    let kind = decode_kind(d, policy_type, node, body);

    let policy = Policy {
        name: name.to_string(),
        display_name,
        enabled,
        continue_on_error,
        r#async,
        kind: kind?,
    };
    let policy = d.complete(mark, policy)?;
    debug!(name = %policy.name, kind = %policy_type, "decoded policy");
    Some(policy)
}

/// Static dispatch from policy type to its decoder.
fn decode_kind(
    d: &mut Decoder<'_>,
    policy_type: PolicyType,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<PolicyKind> {
    match policy_type {
        PolicyType::AssignMessage => {
            message::decode_assign_message(d, body).map(PolicyKind::AssignMessage)
        }
        PolicyType::ExtractVariables => {
            extract::decode_extract_variables(d, node, body).map(PolicyKind::ExtractVariables)
        }
        PolicyType::Script => script::decode_script(d, node, body).map(PolicyKind::Script),
        PolicyType::JavaScript => {
            script::decode_javascript(d, node, body).map(PolicyKind::JavaScript)
        }
        PolicyType::Quota => traffic::decode_quota(d, node, body).map(PolicyKind::Quota),
        PolicyType::SpikeArrest => {
            traffic::decode_spike_arrest(d, body).map(PolicyKind::SpikeArrest)
        }
        PolicyType::ResponseCache => {
            cache::decode_response_cache(d, body).map(PolicyKind::ResponseCache)
        }
        PolicyType::RaiseFault => fault::decode_raise_fault(d, body).map(PolicyKind::RaiseFault),
        PolicyType::ServiceCallout => {
            callout::decode_service_callout(d, node, body).map(PolicyKind::ServiceCallout)
        }
        PolicyType::VerifyApiKey => {
            analytics::decode_verify_api_key(d, node, body).map(PolicyKind::VerifyApiKey)
        }
        PolicyType::StatisticsCollector => {
            analytics::decode_statistics_collector(d, body).map(PolicyKind::StatisticsCollector)
        }
        PolicyType::XmlToJson => {
            analytics::decode_xml_to_json(d, node, body).map(PolicyKind::XmlToJson)
        }
    }
}
