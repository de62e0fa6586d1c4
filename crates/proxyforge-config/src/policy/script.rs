//! Script and JavaScript decoders.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{JavaScript, Script};

use crate::decoder::Decoder;
use crate::fragment::decode_properties;

pub fn decode_script(d: &mut Decoder<'_>, node: &KdlNode, body: &KdlDocument) -> Option<Script> {
    let resource_url = d.required_string(node, body, "resource_url", "script");
    let include_urls = d.strings(body, "include_url");
    let content = d.string(body, "content");
    Some(Script {
        resource_url: resource_url?,
        include_urls,
        content,
    })
}

pub fn decode_javascript(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<JavaScript> {
    let resource_url = d.required_string(node, body, "resource_url", "javascript");
    let include_urls = d.strings(body, "include_url");
    let time_limit = d.integer(body, "time_limit");
    let properties = decode_properties(d, body);
    let content = d.string(body, "content");
    Some(JavaScript {
        resource_url: resource_url?,
        include_urls,
        time_limit,
        properties,
        content,
    })
}
