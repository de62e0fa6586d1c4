//! Raise Fault decoder.

use kdl::KdlDocument;
use proxyforge_core::policy::{FaultCopy, FaultRemove, FaultResponse, FaultSet, RaiseFault};

use super::message::decode_payload;
use crate::decoder::Decoder;
use crate::fragment::decode_headers;
use crate::tree::label;

pub fn decode_raise_fault(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<RaiseFault> {
    let fault_response = d.optional_block(body, "fault_response", "fault response", |d, _, block| {
        Some(decode_fault_response(d, block))
    });
    Some(RaiseFault {
        fault_response,
        ignore_unresolved_variables: d.flag(body, "ignore_unresolved_variables").unwrap_or(true),
    })
}

fn decode_fault_response(d: &mut Decoder<'_>, body: &KdlDocument) -> FaultResponse {
    FaultResponse {
        copy: d.optional_block(body, "copy", "copy", |d, node, block| {
            Some(FaultCopy {
                source: label(node, 0).map(str::to_string),
                headers: decode_headers(d, block),
                status_code: d.flag(block, "status_code").unwrap_or(false),
                reason_phrase: d.flag(block, "reason_phrase").unwrap_or(false),
            })
        }),
        remove: d.optional_block(body, "remove", "remove", |d, _, block| {
            Some(FaultRemove {
                headers: decode_headers(d, block),
            })
        }),
        set: d.optional_block(body, "set", "set", |d, _, block| {
            Some(FaultSet {
                headers: decode_headers(d, block),
                payload: decode_payload(d, block),
                status_code: d.integer(block, "status_code"),
                reason_phrase: d.string(block, "reason_phrase"),
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::decode;

    #[test]
    fn test_raise_fault() {
        let (fault, diags) = decode(
            r#"
            fault_response {
                copy "request" { header "X-Correlation-Id" {} }
                remove { header "Server" {} }
                set {
                    header "WWW-Authenticate" { value "Bearer" }
                    payload {
                        content_type "application/json"
                        value "{\"error\":\"unauthorized\"}"
                    }
                    status_code 401
                    reason_phrase "Unauthorized"
                }
            }
            ignore_unresolved_variables #false
            "#,
            decode_raise_fault,
        );
        assert!(diags.is_empty(), "{}", diags);
        let fault = fault.unwrap();
        assert!(!fault.ignore_unresolved_variables);

        let response = fault.fault_response.unwrap();
        assert_eq!(response.copy.unwrap().source.as_deref(), Some("request"));
        assert_eq!(response.remove.unwrap().headers[0].name, "Server");
        let set = response.set.unwrap();
        assert_eq!(set.status_code, Some(401));
        assert_eq!(set.reason_phrase.as_deref(), Some("Unauthorized"));
        assert_eq!(set.headers[0].value, "Bearer");
        assert_eq!(
            set.payload.unwrap().content_type.as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn test_ignore_unresolved_defaults_true() {
        let (fault, diags) = decode("fault_response {}", decode_raise_fault);
        assert!(diags.is_empty());
        let fault = fault.unwrap();
        assert!(fault.ignore_unresolved_variables);
        assert_eq!(fault.fault_response, Some(FaultResponse::default()));
    }
}
