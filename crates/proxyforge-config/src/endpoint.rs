//! Proxy and target endpoint decoders.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::endpoint::{
    HttpProxyConnection, HttpTargetConnection, LoadBalancer, LoadBalancerServer,
    LocalTargetConnection, ProxyEndpoint, RouteRule, RouteTarget, ScriptTarget, SslInfo,
    TargetConnection, TargetEndpoint,
};
use tracing::debug;

use crate::decoder::Decoder;
use crate::flow::{
    decode_default_fault_rule, decode_fault_rules, decode_flows, decode_post_client_flow,
    decode_post_flow, decode_pre_flow,
};
use crate::fragment::{decode_environment_variables, decode_properties};
use crate::tree::first_child;

/// Decode a `proxy_endpoint "<name>" { ... }` block.
pub fn decode_proxy_endpoint(d: &mut Decoder<'_>, node: &KdlNode) -> Option<ProxyEndpoint> {
    let mark = d.checkpoint();
    let (name, body) = d.named(node, "proxy endpoint")?;

    let endpoint = ProxyEndpoint {
        name: name.to_string(),
        pre_flow: decode_pre_flow(d, body),
        flows: decode_flows(d, body),
        post_flow: decode_post_flow(d, body),
        post_client_flow: decode_post_client_flow(d, body),
        fault_rules: decode_fault_rules(d, body),
        default_fault_rule: decode_default_fault_rule(d, body),
        http_proxy_connection: d.optional_block(
            body,
            "http_proxy_connection",
            "http proxy connection",
            decode_http_proxy_connection,
        ),
        route_rules: decode_route_rules(d, body),
    };

    let endpoint = d.complete(mark, endpoint)?;
    debug!(name = %endpoint.name, flows = endpoint.flows.len(), "decoded proxy endpoint");
    Some(endpoint)
}

fn decode_http_proxy_connection(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<HttpProxyConnection> {
    let base_path = d.required_string(node, body, "base_path", "http proxy connection");
    let virtual_hosts = d.strings(body, "virtual_host");
    let properties = decode_properties(d, body);
    Some(HttpProxyConnection {
        base_path: base_path?,
        virtual_hosts,
        properties,
    })
}

fn decode_route_rules(d: &mut Decoder<'_>, body: &KdlDocument) -> Vec<RouteRule> {
    d.named_blocks(body, "route_rule", "route rule", |d, name, node, block| {
        let condition = d.string(block, "condition");
        let target_endpoint = d.string(block, "target_endpoint");
        let url = d.string(block, "url");

        let target = match (target_endpoint, url) {
            (Some(_), Some(_)) => {
                d.exclusive(
                    node,
                    "route rule must specify either target_endpoint or url, not both",
                );
                return None;
            }
            (Some(endpoint), None) => Some(RouteTarget::TargetEndpoint(endpoint)),
            (None, Some(url)) => Some(RouteTarget::Url(url)),
            (None, None) => None,
        };

        Some(RouteRule {
            name: name.to_string(),
            condition,
            target,
        })
    })
}

/// Decode a `target_endpoint "<name>" { ... }` block.
pub fn decode_target_endpoint(d: &mut Decoder<'_>, node: &KdlNode) -> Option<TargetEndpoint> {
    let mark = d.checkpoint();
    let (name, body) = d.named(node, "target endpoint")?;

    let pre_flow = decode_pre_flow(d, body);
    let flows = decode_flows(d, body);
    let post_flow = decode_post_flow(d, body);
    let fault_rules = decode_fault_rules(d, body);
    let default_fault_rule = decode_default_fault_rule(d, body);
    let connection = decode_target_connection(d, node, body);
    let ssl_info = d.optional_block(body, "ssl_info", "ssl info", |d, _, block| {
        Some(decode_ssl_info(d, block))
    });

    let endpoint = TargetEndpoint {
        name: name.to_string(),
        pre_flow,
        flows,
        post_flow,
        fault_rules,
        default_fault_rule,
        connection,
        ssl_info,
    };

    let endpoint = d.complete(mark, endpoint)?;
    debug!(name = %endpoint.name, "decoded target endpoint");
    Some(endpoint)
}

const TARGET_CONNECTIONS: [&str; 3] = [
    "http_target_connection",
    "local_target_connection",
    "script_target",
];

/// At most one connection kind may be configured on a target endpoint.
fn decode_target_connection(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<TargetConnection> {
    let present: Vec<&str> = TARGET_CONNECTIONS
        .into_iter()
        .filter(|key| first_child(body, key).is_some())
        .collect();
    if present.len() > 1 {
        d.exclusive(
            node,
            format!(
                "target endpoint must specify only one of {}, found {}",
                TARGET_CONNECTIONS.join(", "),
                present.join(" and ")
            ),
        );
        return None;
    }

    match present.first().copied()? {
        "http_target_connection" => {
            decode_http_target_connection(d, body).map(TargetConnection::Http)
        }
        "local_target_connection" => {
            decode_local_target_connection(d, body).map(TargetConnection::Local)
        }
        _ => d
            .optional_block(body, "script_target", "script target", decode_script_target)
            .map(TargetConnection::Script),
    }
}

/// The `http_target_connection` block of `body`, if present.
pub fn decode_http_target_connection(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
) -> Option<HttpTargetConnection> {
    d.optional_block(
        body,
        "http_target_connection",
        "http target connection",
        |d, _, block| {
            Some(HttpTargetConnection {
                url: d.string(block, "url"),
                load_balancer: d.optional_block(
                    block,
                    "load_balancer",
                    "load balancer",
                    decode_load_balancer,
                ),
                properties: decode_properties(d, block),
            })
        },
    )
}

/// The `local_target_connection` block of `body`, if present.
pub fn decode_local_target_connection(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
) -> Option<LocalTargetConnection> {
    d.optional_block(
        body,
        "local_target_connection",
        "local target connection",
        |d, _, block| {
            Some(LocalTargetConnection {
                api_proxy: d.string(block, "api_proxy"),
                proxy_endpoint: d.string(block, "proxy_endpoint"),
                path: d.string(block, "path"),
            })
        },
    )
}

fn decode_load_balancer(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<LoadBalancer> {
    let algorithm = d.required_string(node, body, "algorithm", "load balancer");
    let servers = d.named_blocks(body, "server", "server", |d, name, _, block| {
        Some(LoadBalancerServer {
            name: name.to_string(),
            weight: d.integer(block, "weight"),
            is_fallback: d.flag(block, "is_fallback").unwrap_or(false),
        })
    });
    let max_failures = d.integer(body, "max_failures");
    let retry_enabled = d.flag(body, "retry_enabled").unwrap_or(false);

    Some(LoadBalancer {
        algorithm: algorithm?,
        servers,
        max_failures,
        retry_enabled,
    })
}

fn decode_script_target(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<ScriptTarget> {
    let resource_url = d.required_string(node, body, "resource_url", "script target");
    let environment_variables = decode_environment_variables(d, body);
    let arguments = d.strings(body, "arguments");
    Some(ScriptTarget {
        resource_url: resource_url?,
        environment_variables,
        arguments,
    })
}

fn decode_ssl_info(d: &mut Decoder<'_>, body: &KdlDocument) -> SslInfo {
    SslInfo {
        enabled: d.flag(body, "enabled").unwrap_or(false),
        client_auth_enabled: d.flag(body, "client_auth_enabled").unwrap_or(false),
        trust_store: d.string(body, "trust_store"),
        key_store: d.string(body, "key_store"),
        key_alias: d.string(body, "key_alias"),
        ciphers: d.strings(body, "ciphers"),
        protocols: d.strings(body, "protocols"),
    }
}
