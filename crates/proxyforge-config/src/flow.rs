//! Flow, fault rule and default fault rule decoders.

use kdl::KdlDocument;
use proxyforge_core::flow::{DefaultFaultRule, FaultRule, Flow, FlowSteps};

use crate::decoder::Decoder;
use crate::fragment::decode_steps;

/// The `request` and `response` step lists of a flow body.
fn decode_flow_steps(d: &mut Decoder<'_>, body: &KdlDocument) -> FlowSteps {
    let request = d
        .optional_block(body, "request", "request", |d, _, block| Some(decode_steps(d, block)))
        .unwrap_or_default();
    let response = d
        .optional_block(body, "response", "response", |d, _, block| Some(decode_steps(d, block)))
        .unwrap_or_default();
    FlowSteps { request, response }
}

/// An unnamed flow container such as `pre_flow`, `post_flow` or `post_client_flow`.
pub fn decode_flow_container(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
    key: &str,
) -> Option<FlowSteps> {
    let what = key.replace('_', " ");
    d.optional_block(body, key, &what, |d, _, block| Some(decode_flow_steps(d, block)))
}

pub fn decode_pre_flow(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<FlowSteps> {
    decode_flow_container(d, body, "pre_flow")
}

pub fn decode_post_flow(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<FlowSteps> {
    decode_flow_container(d, body, "post_flow")
}

pub fn decode_post_client_flow(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<FlowSteps> {
    decode_flow_container(d, body, "post_client_flow")
}

/// Named conditional flows in declaration order.
pub fn decode_flows(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<Flow> {
    d.named_blocks(body, "flow", "flow", |d, name, _, block| {
        let condition = d.string(block, "condition");
        let steps = decode_flow_steps(d, block);
        Some(Flow {
            name: name.to_string(),
            condition,
            steps,
        })
    })
}

pub fn decode_fault_rules(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<FaultRule> {
    d.named_blocks(body, "fault_rule", "fault rule", |d, name, _, block| {
        Some(FaultRule {
            name: name.to_string(),
            condition: d.string(block, "condition"),
            steps: decode_steps(d, block),
        })
    })
}

pub fn decode_default_fault_rule(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
) -> Option<DefaultFaultRule> {
    let mut rules = d
        .named_blocks(
            body,
            "default_fault_rule",
            "default fault rule",
            |d, name, node, block| {
                let rule = DefaultFaultRule {
                    name: name.to_string(),
                    condition: d.string(block, "condition"),
                    steps: decode_steps(d, block),
                    always_enforce: d.flag(block, "always_enforce").unwrap_or(false),
                };
                Some((node, rule))
            },
        )
        .into_iter();

    let (_, first) = rules.next()?;
    for (node, _) in rules {
        d.exclusive(node, "only one default fault rule block is allowed");
    }
    Some(first)
}
