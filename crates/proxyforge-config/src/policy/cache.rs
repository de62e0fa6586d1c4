//! Response Cache decoder.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{CacheKey, Expiry, ResponseCache};

use crate::decoder::Decoder;
use crate::fragment::{decode_value_ref, optional_value_ref};

pub fn decode_response_cache(d: &mut Decoder<'_>, body: &KdlDocument) -> Option<ResponseCache> {
    Some(ResponseCache {
        cache_type: d.string(body, "type"),
        cache_key: d.optional_block(body, "cache_key", "cache key", |d, _, block| {
            Some(CacheKey {
                prefix: d.string(block, "prefix"),
                fragments: d.blocks(block, "key_fragment", "key fragment", |d, _, fragment| {
                    Some(decode_value_ref(d, fragment))
                }),
            })
        }),
        scope: d.string(body, "scope"),
        expiry: d
            .optional_block(body, "expiry_settings", "expiry settings", decode_expiry)
            .flatten(),
        cache_resource: d.string(body, "cache_resource"),
        lookup_timeout: d.integer(body, "lookup_timeout"),
        exclude_error_response: d.flag(body, "exclude_error_response").unwrap_or(false),
        skip_cache_lookup: d.string(body, "skip_cache_lookup"),
        skip_cache_population: d.string(body, "skip_cache_population"),
        use_accept_header: d.flag(body, "use_accept_header").unwrap_or(false),
        use_response_cache_headers: d.flag(body, "use_response_cache_headers").unwrap_or(false),
    })
}

/// At most one of the three expiry forms; an empty block means no expiry.
fn decode_expiry(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<Option<Expiry>> {
    let time_of_day = optional_value_ref(d, body, "time_of_day").map(Expiry::TimeOfDay);
    let timeout = optional_value_ref(d, body, "timeout_in_sec").map(Expiry::TimeoutInSec);
    let date = optional_value_ref(d, body, "expiry_date").map(Expiry::ExpiryDate);

    let mut set: Vec<Expiry> = [time_of_day, timeout, date].into_iter().flatten().collect();
    if set.len() > 1 {
        d.exclusive(
            node,
            "expiry_settings must specify only one of time_of_day, timeout_in_sec, or expiry_date",
        );
        return None;
    }
    Some(set.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::testing::decode;

    #[test]
    fn test_response_cache() {
        let (cache, diags) = decode(
            r#"
            cache_key {
                prefix "users"
                key_fragment { ref "request.uri" }
                key_fragment { value "v2" }
            }
            scope "Exclusive"
            expiry_settings {
                timeout_in_sec { ref "flow.cache.ttl"; value 3600 }
            }
            lookup_timeout 2
            skip_cache_lookup "request.header.bypass-cache = \"true\""
            use_accept_header #true
            "#,
            decode_response_cache,
        );
        assert!(diags.is_empty(), "{}", diags);
        let cache = cache.unwrap();

        let key = cache.cache_key.unwrap();
        assert_eq!(key.prefix.as_deref(), Some("users"));
        assert_eq!(key.fragments.len(), 2);
        assert_eq!(key.fragments[0].reference.as_deref(), Some("request.uri"));
        assert_eq!(key.fragments[1].value.as_deref(), Some("v2"));

        let Some(Expiry::TimeoutInSec(timeout)) = cache.expiry else {
            panic!("expected timeout_in_sec expiry");
        };
        assert_eq!(timeout.value.as_deref(), Some("3600"));
        assert_eq!(cache.scope.as_deref(), Some("Exclusive"));
        assert_eq!(cache.lookup_timeout, Some(2));
        assert!(cache.use_accept_header);
        assert!(!cache.use_response_cache_headers);
    }

    #[test]
    fn test_expiry_forms_are_exclusive() {
        let (cache, diags) = decode(
            r#"
            expiry_settings {
                time_of_day { value "14:30:00" }
                expiry_date { value "12-31-2030" }
            }
            "#,
            decode_response_cache,
        );
        assert!(cache.unwrap().expiry.is_none());
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags.iter().next(),
            Some(DecodeError::Exclusivity { .. })
        ));
    }

    #[test]
    fn test_empty_expiry_settings() {
        let (cache, diags) = decode("expiry_settings {}", decode_response_cache);
        assert!(diags.is_empty());
        assert!(cache.unwrap().expiry.is_none());
    }
}
