//! Quota and Spike Arrest decoders.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{
    AsyncConfiguration, Quota, QuotaAllow, QuotaClass, QuotaClassAllow, SpikeArrest,
};

use crate::decoder::Decoder;
use crate::fragment::{optional_ref, optional_value_ref};
use crate::tree::first_child;

pub fn decode_quota(d: &mut Decoder<'_>, node: &KdlNode, body: &KdlDocument) -> Option<Quota> {
    if first_child(body, "allow").is_none() {
        d.required(node, "quota requires at least one allow block");
    }

    let allows = d.blocks(body, "allow", "allow", |d, _, block| {
        Some(QuotaAllow {
            count: d.integer(block, "count"),
            count_ref: d.string(block, "count_ref"),
            classes: d.blocks(block, "class", "class", |d, _, class| {
                Some(QuotaClass {
                    reference: d.string(class, "ref"),
                    allows: d.blocks(class, "allow", "allow", |d, _, allow| {
                        Some(QuotaClassAllow {
                            class: d.string(allow, "class"),
                            count: d.integer(allow, "count"),
                        })
                    }),
                })
            }),
        })
    });

    Some(Quota {
        quota_type: d.string(body, "type"),
        allows,
        interval: optional_value_ref(d, body, "interval"),
        time_unit: optional_value_ref(d, body, "time_unit"),
        start_time: d.string(body, "start_time"),
        distributed: d.flag(body, "distributed").unwrap_or(false),
        synchronous: d.flag(body, "synchronous").unwrap_or(false),
        asynchronous_configuration: d.optional_block(
            body,
            "asynchronous_configuration",
            "asynchronous configuration",
            |d, _, block| {
                Some(AsyncConfiguration {
                    sync_interval_in_seconds: d.integer(block, "sync_interval_in_seconds"),
                    sync_message_count: d.integer(block, "sync_message_count"),
                })
            },
        ),
        identifier: optional_ref(d, body, "identifier"),
        message_weight: optional_ref(d, body, "message_weight"),
    })
}

pub fn decode_spike_arrest(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<SpikeArrest> {
    Some(SpikeArrest {
        identifier: optional_ref(d, body, "identifier"),
        message_weight: optional_ref(d, body, "message_weight"),
        rate: optional_value_ref(d, body, "rate"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::testing::{decode, decode_node};

    #[test]
    fn test_quota() {
        let (quota, diags) = decode_node(
            r#"
            policy "quota" "per-minute" {
                type "calendar"
                allow {
                    count 2000
                    class {
                        ref "request.header.tier"
                        allow { class "gold"; count 5000 }
                        allow { class "silver"; count 1000 }
                    }
                }
                interval { ref "request.header.interval"; value 1 }
                time_unit { value "minute" }
                start_time "2017-2-18 10:30:00"
                distributed #true
                asynchronous_configuration {
                    sync_interval_in_seconds 20
                    sync_message_count 5
                }
                identifier { ref "client_id" }
            }
            "#,
            |d, node| decode_quota(d, node, node.children().unwrap()),
        );
        assert!(diags.is_empty(), "{}", diags);
        let quota = quota.unwrap();
        assert_eq!(quota.quota_type.as_deref(), Some("calendar"));
        assert_eq!(quota.allows[0].count, Some(2000));
        let class = &quota.allows[0].classes[0];
        assert_eq!(class.reference.as_deref(), Some("request.header.tier"));
        assert_eq!(class.allows[1].class.as_deref(), Some("silver"));
        assert_eq!(quota.interval.unwrap().value.as_deref(), Some("1"));
        assert_eq!(quota.time_unit.unwrap().value.as_deref(), Some("minute"));
        assert!(quota.distributed);
        assert!(!quota.synchronous);
        assert_eq!(
            quota.asynchronous_configuration.unwrap().sync_message_count,
            Some(5)
        );
        assert_eq!(quota.identifier.as_deref(), Some("client_id"));
        assert!(quota.message_weight.is_none());
    }

    #[test]
    fn test_quota_requires_allow() {
        let (_, diags) = decode_node(
            r#"policy "quota" "q" { time_unit { value "minute" } }"#,
            |d, node| decode_quota(d, node, node.children().unwrap()),
        );
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags.iter().next(),
            Some(DecodeError::RequiredField { .. })
        ));
    }

    #[test]
    fn test_spike_arrest() {
        let (spike, diags) = decode(
            r#"
            identifier { ref "request.header.client" }
            rate { value "30ps" }
            "#,
            decode_spike_arrest,
        );
        assert!(diags.is_empty());
        let spike = spike.unwrap();
        assert_eq!(spike.identifier.as_deref(), Some("request.header.client"));
        assert_eq!(spike.rate.unwrap().value.as_deref(), Some("30ps"));
    }
}
