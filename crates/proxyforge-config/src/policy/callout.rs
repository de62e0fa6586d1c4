//! Service Callout decoder.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{CalloutRequest, CalloutTarget, ServiceCallout};

use super::message::{decode_add, decode_copy, decode_remove, decode_set};
use crate::decoder::Decoder;
use crate::endpoint::{decode_http_target_connection, decode_local_target_connection};
use crate::tree::first_child;

pub fn decode_service_callout(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<ServiceCallout> {
    let request = d.optional_block(body, "request", "request", |d, _, block| {
        Some(CalloutRequest {
            clear_payload: d.flag(block, "clear_payload").unwrap_or(false),
            variable: d.string(block, "variable"),
            add: decode_add(d, block),
            copy: decode_copy(d, block),
            remove: decode_remove(d, block),
            set: decode_set(d, block),
            ignore_unresolved_variables: d
                .flag(block, "ignore_unresolved_variables")
                .unwrap_or(false),
        })
    });
    let target = decode_callout_target(d, node, body);
    let response = d.string(body, "response");
    let timeout = d.integer(body, "timeout");

    Some(ServiceCallout {
        request,
        target: target?,
        response,
        timeout,
    })
}

/// Exactly one of `http_target_connection` or `local_target_connection`.
fn decode_callout_target(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<CalloutTarget> {
    let http = first_child(body, "http_target_connection").is_some();
    let local = first_child(body, "local_target_connection").is_some();
    match (http, local) {
        (true, true) => {
            d.exclusive(
                node,
                "service_callout must specify either http_target_connection or \
                 local_target_connection, not both",
            );
            None
        }
        (false, false) => {
            d.exclusive(
                node,
                "service_callout must specify either http_target_connection or \
                 local_target_connection",
            );
            None
        }
        (true, false) => decode_http_target_connection(d, body).map(CalloutTarget::Http),
        (false, true) => decode_local_target_connection(d, body).map(CalloutTarget::Local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::testing::decode_node;

    fn decode_callout(kdl: &str) -> (Option<ServiceCallout>, crate::error::Diagnostics) {
        decode_node(kdl, |d, node| {
            decode_service_callout(d, node, node.children().unwrap())
        })
    }

    #[test]
    fn test_service_callout_http() {
        let (callout, diags) = decode_callout(
            r#"
            policy "service_callout" "get-weather" {
                request {
                    variable "weatherRequest"
                    clear_payload #true
                    set {
                        verb "GET"
                        query_param "city" { value "{request.queryparam.city}" }
                    }
                }
                response "weatherResponse"
                timeout 3000
                http_target_connection {
                    url "https://weather.example.com/v1/current"
                    properties { success.codes "2xx" }
                }
            }
            "#,
        );
        assert!(diags.is_empty(), "{}", diags);
        let callout = callout.unwrap();

        let request = callout.request.unwrap();
        assert!(request.clear_payload);
        assert_eq!(request.variable.as_deref(), Some("weatherRequest"));
        let set = request.set.unwrap();
        assert_eq!(set.verb.as_deref(), Some("GET"));
        assert_eq!(set.query_params[0].name, "city");

        assert_eq!(callout.response.as_deref(), Some("weatherResponse"));
        assert_eq!(callout.timeout, Some(3000));
        let CalloutTarget::Http(conn) = callout.target else {
            panic!("expected http target");
        };
        assert_eq!(
            conn.url.as_deref(),
            Some("https://weather.example.com/v1/current")
        );
    }

    #[test]
    fn test_service_callout_local() {
        let (callout, diags) = decode_callout(
            r#"
            policy "service_callout" "chain" {
                local_target_connection { path "/inventory" }
            }
            "#,
        );
        assert!(diags.is_empty());
        let CalloutTarget::Local(local) = callout.unwrap().target else {
            panic!("expected local target");
        };
        assert_eq!(local.path.as_deref(), Some("/inventory"));
    }

    #[test]
    fn test_service_callout_target_is_exactly_one() {
        for kdl in [
            r#"policy "service_callout" "none" { response "r" }"#,
            r#"policy "service_callout" "both" {
                http_target_connection { url "http://a" }
                local_target_connection { path "/b" }
            }"#,
        ] {
            let (callout, diags) = decode_callout(kdl);
            assert!(callout.is_none());
            assert_eq!(diags.len(), 1);
            assert!(matches!(
                diags.iter().next(),
                Some(DecodeError::Exclusivity { .. })
            ));
        }
    }
}
