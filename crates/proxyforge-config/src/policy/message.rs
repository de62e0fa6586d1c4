//! Assign Message and the add/copy/remove/set blocks it shares with other policies.

use kdl::KdlDocument;
use proxyforge_core::policy::{
    AssignMessage, AssignTo, AssignVariable, MessageAdd, MessageCopy, MessageRemove, MessageSet,
    Payload,
};

use crate::decoder::Decoder;
use crate::fragment::{decode_form_params, decode_headers, decode_query_params};
use crate::tree::label;

pub fn decode_assign_message(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<AssignMessage> {
    let add = decode_add(d, body);
    let copy = decode_copy(d, body);
    let remove = decode_remove(d, body);
    let set = decode_set(d, body);
    let assign_variable = d.optional_block(
        body,
        "assign_variable",
        "assign variable",
        |d, node, block| {
            let name = d.required_string(node, block, "name", "assign_variable");
            let reference = d.string(block, "ref");
            let value = d.string(block, "value");
            Some(AssignVariable {
                name: name?,
                reference,
                value,
            })
        },
    );
    let assign_to = d.optional_block(body, "assign_to", "assign to", |d, _, block| {
        Some(AssignTo {
            create_new: d.flag(block, "create_new").unwrap_or(false),
            transport: d.string(block, "transport"),
            message_type: d.string(block, "type"),
            value: d.string(block, "value"),
        })
    });

    Some(AssignMessage {
        add,
        copy,
        remove,
        set,
        assign_variable,
        assign_to,
        ignore_unresolved_variables: d.flag(body, "ignore_unresolved_variables").unwrap_or(false),
    })
}

pub fn decode_add(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<MessageAdd> {
    d.optional_block(body, "add", "add", |d, _, block| {
        Some(MessageAdd {
            headers: decode_headers(d, block),
            query_params: decode_query_params(d, block),
            form_params: decode_form_params(d, block),
        })
    })
}

/// `copy "<source>" { ... }`; the source label is optional.
pub fn decode_copy(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<MessageCopy> {
    d.optional_block(body, "copy", "copy", |d, node, block| {
        Some(MessageCopy {
            source: label(node, 0).map(str::to_string),
            headers: decode_headers(d, block),
            query_params: decode_query_params(d, block),
            form_params: decode_form_params(d, block),
            payload: d.flag(block, "payload").unwrap_or(false),
            version: d.flag(block, "version").unwrap_or(false),
            verb: d.flag(block, "verb").unwrap_or(false),
            path: d.flag(block, "path").unwrap_or(false),
            status_code: d.flag(block, "status_code").unwrap_or(false),
            reason_phrase: d.flag(block, "reason_phrase").unwrap_or(false),
        })
    })
}

pub fn decode_remove(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<MessageRemove> {
    d.optional_block(body, "remove", "remove", |d, _, block| {
        Some(MessageRemove {
            headers: decode_headers(d, block),
            query_params: decode_query_params(d, block),
            form_params: decode_form_params(d, block),
            payload: d.flag(block, "payload").unwrap_or(false),
        })
    })
}

pub fn decode_set(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<MessageSet> {
    d.optional_block(body, "set", "set", |d, _, block| {
        Some(MessageSet {
            headers: decode_headers(d, block),
            query_params: decode_query_params(d, block),
            form_params: decode_form_params(d, block),
            payload: decode_payload(d, block),
            version: d.string(block, "version"),
            verb: d.string(block, "verb"),
            path: d.string(block, "path"),
            status_code: d.integer(block, "status_code"),
            reason_phrase: d.string(block, "reason_phrase"),
        })
    })
}

/// `payload { content_type "application/json"; value "{...}" }`
pub fn decode_payload(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<Payload> {
    d.optional_block(body, "payload", "payload", |d, _, block| {
        Some(Payload {
            content_type: d.string(block, "content_type"),
            variable_prefix: d.string(block, "variable_prefix"),
            variable_suffix: d.string(block, "variable_suffix"),
            value: d.string(block, "value").unwrap_or_default(),
        })
    })
}
