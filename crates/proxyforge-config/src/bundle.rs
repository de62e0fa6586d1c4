//! Top-level assembly of a proxy bundle from a KDL document.

use std::path::Path;

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::{Bundle, Proxy};
use tracing::debug;

use crate::decoder::Decoder;
use crate::endpoint::{decode_proxy_endpoint, decode_target_endpoint};
use crate::error::{ConfigError, ConfigResult};
use crate::policy::decode_policy;
use crate::source::SourceFile;

/// Decode every top-level block of `doc` into a bundle.
///
/// Nothing short-circuits: the returned bundle holds every entity that decoded
/// cleanly and the decoder holds a diagnostic for every one that did not.
pub fn decode_config(d: &mut Decoder<'_>, doc: &KdlDocument) -> Bundle {
    let mut bundle = Bundle::new();
    let mut seen_proxy = false;

    for node in doc.nodes() {
        match node.name().value() {
            "proxy" if seen_proxy => d.exclusive(node, "only one proxy block is allowed"),
            "proxy" => {
                seen_proxy = true;
                bundle.proxy = decode_proxy(d, node);
            }
            "proxy_endpoint" => {
                if let Some(endpoint) = decode_proxy_endpoint(d, node) {
                    bundle.proxy_endpoints.push(endpoint);
                }
            }
            "target_endpoint" => {
                if let Some(endpoint) = decode_target_endpoint(d, node) {
                    bundle.target_endpoints.push(endpoint);
                }
            }
            "policy" => {
                if let Some(policy) = decode_policy(d, node) {
                    bundle.push_policy(policy);
                }
            }
            other => debug!(node = other, file = d.source().name(), "ignoring unknown block"),
        }
    }

    bundle
}

fn decode_proxy(d: &mut Decoder<'_>, node: &KdlNode) -> Option<Proxy> {
    let mark = d.checkpoint();
    let (name, body) = d.named(node, "proxy")?;
    let proxy = Proxy {
        name: name.to_string(),
        display_name: d.string(body, "display_name"),
        description: d.string(body, "description"),
    };
    d.complete(mark, proxy)
}

/// Parse and decode one configuration file held in memory.
pub fn parse_bundle(name: &str, text: &str) -> ConfigResult<Bundle> {
    let source = SourceFile::new(name, text);
    let doc: KdlDocument = source.text().parse().map_err(|err| ConfigError::Parse {
        file: name.to_string(),
        source: err,
    })?;

    let mut d = Decoder::new(&source);
    let bundle = decode_config(&mut d, &doc);
    let diagnostics = d.into_diagnostics();
    debug!(
        file = name,
        proxy_endpoints = bundle.proxy_endpoints.len(),
        target_endpoints = bundle.target_endpoints.len(),
        policies = bundle.policies.len(),
        diagnostics = diagnostics.len(),
        "decoded configuration"
    );
    diagnostics.into_result(bundle).map_err(ConfigError::from)
}

/// Read, parse and decode one configuration file.
pub fn parse_bundle_file(path: impl AsRef<Path>) -> ConfigResult<Bundle> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    parse_bundle(&path.display().to_string(), &text)
}
