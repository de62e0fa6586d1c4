//! Extract Variables decoder.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{
    ExtractSource, ExtractVariables, JsonPayload, JsonVariable, NamedPatterns, Pattern, UriPath,
    XmlNamespace, XmlPayload, XmlVariable,
};

use crate::decoder::Decoder;

pub fn decode_extract_variables(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<ExtractVariables> {
    let mark = d.checkpoint();

    let policy = ExtractVariables {
        source: d.optional_block(body, "source", "source", |d, _, block| {
            Some(ExtractSource {
                clear_payload: d.flag(block, "clear_payload").unwrap_or(false),
                value: d.string(block, "value").unwrap_or_default(),
            })
        }),
        variable_prefix: d.string(body, "variable_prefix"),
        ignore_unresolved_variables: d.flag(body, "ignore_unresolved_variables").unwrap_or(false),
        uri_paths: d.blocks(body, "uri_path", "uri path", |d, _, block| {
            Some(UriPath {
                patterns: decode_patterns(d, block),
            })
        }),
        query_params: decode_named_patterns(d, body, "query_param", "query param"),
        headers: decode_named_patterns(d, body, "header", "header"),
        form_params: decode_named_patterns(d, body, "form_param", "form param"),
        variables: decode_named_patterns(d, body, "variable", "variable"),
        json_payload: d.optional_block(body, "json_payload", "json payload", |d, _, block| {
            Some(JsonPayload {
                variables: d.named_blocks(block, "variable", "variable", |d, name, _, var| {
                    Some(JsonVariable {
                        name: name.to_string(),
                        variable_type: d.string(var, "type"),
                        json_path: d.string(var, "json_path"),
                    })
                }),
            })
        }),
        xml_payload: d.optional_block(body, "xml_payload", "xml payload", |d, _, block| {
            Some(decode_xml_payload(d, block))
        }),
    };

    // Only meaningful once every source decoded cleanly.
    let policy = d.complete(mark, policy)?;
    if !policy.has_source() {
        d.exclusive(
            node,
            "extract_variables requires one of uri_path, query_param, header, form_param, \
             variable, json_payload, or xml_payload",
        );
        return None;
    }
    Some(policy)
}

fn decode_patterns(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<Pattern> {
    d.blocks(body, "pattern", "pattern", |d, _, block| {
        Some(Pattern {
            ignore_case: d.flag(block, "ignore_case").unwrap_or(false),
            value: d.string(block, "value").unwrap_or_default(),
        })
    })
}

fn decode_named_patterns(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
    key: &str,
    what: &str,
) -> Vec<NamedPatterns> {
    d.named_blocks(body, key, what, |d, name, _, block| {
        Some(NamedPatterns {
            name: name.to_string(),
            patterns: decode_patterns(d, block),
        })
    })
}

fn decode_xml_payload(d: &mut Decoder<'_>, body: &KdlDocument) -> XmlPayload {
    XmlPayload {
        stop_payload_processing: d.flag(body, "stop_payload_processing").unwrap_or(false),
        namespaces: d.named_blocks(body, "namespace", "namespace", |d, prefix, _, block| {
            Some(XmlNamespace {
                prefix: prefix.to_string(),
                uri: d.string(block, "value").unwrap_or_default(),
            })
        }),
        variables: d.named_blocks(body, "variable", "variable", |d, name, _, block| {
            Some(XmlVariable {
                name: name.to_string(),
                variable_type: d.string(block, "type"),
                xpath: d.string(block, "xpath"),
            })
        }),
    }
}
