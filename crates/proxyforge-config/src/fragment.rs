//! Decoders for fragments shared across endpoints and policies.

use kdl::KdlDocument;
use proxyforge_core::flow::Step;
use proxyforge_core::fragment::{
    EnvironmentVariable, FormParam, Header, Property, QueryParam, ValueRef,
};

use crate::decoder::Decoder;
use crate::tree::{arguments, children, literal_text};

/// Entries of every `key` block, where each child node is `name value`.
fn literal_pairs<T>(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
    key: &str,
    what: &str,
    make: impl Fn(String, String) -> T,
) -> Vec<T> {
    let mut out = Vec::new();
    for node in children(body, key) {
        let Some(block) = d.object(node, key) else {
            continue;
        };
        for entry in block.nodes() {
            let name = entry.name().value();
            match arguments(entry).next().and_then(literal_text) {
                Some(value) if entry.children().is_none() => {
                    out.push(make(name.to_string(), value));
                }
                _ => d.shape(entry, format!("{what} {name} requires a value")),
            }
        }
    }
    out
}

/// `properties { connect.timeout.millis 1500 }`
pub fn decode_properties(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<Property> {
    literal_pairs(d, body, "properties", "property", |name, value| Property::new(name, value))
}

/// `environment_variables { NAME "value" }`
pub fn decode_environment_variables(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
) -> Vec<EnvironmentVariable> {
    literal_pairs(
        d,
        body,
        "environment_variables",
        "environment variable",
        |name, value| EnvironmentVariable::new(name, value),
    )
}

/// Named blocks carrying an optional `value`, such as `header "Accept" { value "*/*" }`.
pub fn decode_named_values<T>(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
    key: &str,
    make: impl Fn(String, String) -> T,
) -> Vec<T> {
    let what = key.replace('_', " ");
    d.named_blocks(body, key, &what, |d, name, _, block| {
        let value = d.string(block, "value").unwrap_or_default();
        Some(make(name.to_string(), value))
    })
}

pub fn decode_headers(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<Header> {
    decode_named_values(d, body, "header", |name, value| Header::new(name, value))
}

pub fn decode_query_params(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<QueryParam> {
    decode_named_values(d, body, "query_param", |name, value| QueryParam::new(name, value))
}

pub fn decode_form_params(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<FormParam> {
    decode_named_values(d, body, "form_param", |name, value| FormParam::new(name, value))
}

/// Steps in declaration order.
pub fn decode_steps(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<Step> {
    d.named_blocks(body, "step", "step", |d, name, _, block| {
        Some(Step {
            name: name.to_string(),
            condition: d.string(block, "condition"),
        })
    })
}

pub fn decode_value_ref(d: &mut Decoder<'_>, body: &KdlDocument) -> ValueRef {
    ValueRef {
        reference: d.string(body, "ref"),
        value: d.string(body, "value"),
    }
}

/// A `key { ref "..."; value "..." }` block, if present.
pub fn optional_value_ref(d: &mut Decoder<'_>, body: &KdlDocument, key: &str) -> Option<ValueRef> {
    d.optional_block(body, key, key, |d, _, block| Some(decode_value_ref(d, block)))
}

/// The `ref` of a `key { ref "..." }` block, if present.
pub fn optional_ref(d: &mut Decoder<'_>, body: &KdlDocument, key: &str) -> Option<String> {
    d.optional_block(body, key, key, |d, _, block| Some(d.string(block, "ref")))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::testing::decode;

    #[test]
    fn test_properties_keep_literal_text() {
        let (props, diags) = decode(
            r#"
            properties {
                connect.timeout.millis 1500
                ratio 1.50
                keepalive #true
                name "backend"
            }
            "#,
            decode_properties,
        );
        assert!(diags.is_empty());
        let values: Vec<_> = props.iter().map(|p| (p.name.as_str(), p.value.as_str())).collect();
        assert_eq!(
            values,
            vec![
                ("connect.timeout.millis", "1500"),
                ("ratio", "1.50"),
                ("keepalive", "true"),
                ("name", "backend"),
            ]
        );
    }

    #[test]
    fn test_absent_properties_is_empty() {
        let (props, diags) = decode("other 1", decode_properties);
        assert!(props.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_properties_not_an_object() {
        let (props, diags) = decode(r#"properties "x""#, decode_properties);
        assert!(props.is_empty());
        assert!(matches!(diags.iter().next(), Some(DecodeError::Shape { .. })));
    }

    #[test]
    fn test_environment_variables() {
        let (vars, diags) = decode(
            r#"
            environment_variables {
                NODE_ENV "production"
                WORKERS 4
            }
            "#,
            decode_environment_variables,
        );
        assert!(diags.is_empty());
        assert_eq!(vars[0], EnvironmentVariable::new("NODE_ENV", "production"));
        assert_eq!(vars[1], EnvironmentVariable::new("WORKERS", "4"));
    }

    #[test]
    fn test_headers_and_params() {
        let (out, diags) = decode(
            r#"
            header "Accept" { value "application/json" }
            header "X-Empty" {}
            query_param "q" { value "{request.queryparam.q}" }
            form_param "user" { value "alice" }
            "#,
            |d, doc| {
                (
                    decode_headers(d, doc),
                    decode_query_params(d, doc),
                    decode_form_params(d, doc),
                )
            },
        );
        assert!(diags.is_empty());
        assert_eq!(
            out.0,
            vec![
                Header::new("Accept", "application/json"),
                Header::new("X-Empty", ""),
            ]
        );
        assert_eq!(out.1, vec![QueryParam::new("q", "{request.queryparam.q}")]);
        assert_eq!(out.2, vec![FormParam::new("user", "alice")]);
    }

    #[test]
    fn test_header_requires_name() {
        let (headers, diags) = decode(r#"header { value "x" }"#, decode_headers);
        assert!(headers.is_empty());
        assert!(diags.to_string().contains("header requires a name"));
    }

    #[test]
    fn test_steps_keep_order() {
        let (steps, diags) = decode(
            r#"
            step "c" {}
            step "a" { condition "request.verb = \"GET\"" }
            step "b" {}
            "#,
            decode_steps,
        );
        assert!(diags.is_empty());
        let names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(steps[1].condition.as_deref(), Some("request.verb = \"GET\""));
        assert_eq!(steps[0].condition, None);
    }

    #[test]
    fn test_value_refs() {
        let (out, diags) = decode(
            r#"
            rate { ref "request.header.rate"; value "30ps" }
            identifier { ref "client_id" }
            "#,
            |d, doc| {
                (
                    optional_value_ref(d, doc, "rate"),
                    optional_ref(d, doc, "identifier"),
                    optional_value_ref(d, doc, "interval"),
                )
            },
        );
        assert!(diags.is_empty());
        let rate = out.0.unwrap();
        assert_eq!(rate.reference.as_deref(), Some("request.header.rate"));
        assert_eq!(rate.value.as_deref(), Some("30ps"));
        assert_eq!(out.1.as_deref(), Some("client_id"));
        assert!(out.2.is_none());
    }
}
