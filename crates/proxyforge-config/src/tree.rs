//! Generic tree primitives over a parsed KDL document.
//!
//! A node name is the block kind, positional string arguments are the block's
//! labels, and the children block is its object value.

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};

/// Child nodes of `body` whose name is `key`, in declaration order.
pub fn children<'d>(body: &'d KdlDocument, key: &str) -> impl Iterator<Item = &'d KdlNode> {
    body.nodes().iter().filter(move |n| n.name().value() == key)
}

/// First child node of `body` named `key`.
pub fn first_child<'d>(body: &'d KdlDocument, key: &str) -> Option<&'d KdlNode> {
    children(body, key).next()
}

/// Positional (unnamed) entries of a node.
pub fn arguments(node: &KdlNode) -> impl Iterator<Item = &KdlEntry> {
    node.entries().iter().filter(|e| e.name().is_none())
}

/// The `index`-th label of a block, if it is a string.
pub fn label(node: &KdlNode, index: usize) -> Option<&str> {
    arguments(node).nth(index).and_then(|e| e.value().as_string())
}

/// Text of a scalar entry as it should appear in the bundle.
///
/// Numbers keep their source spelling so `1.50` stays `1.50`. Booleans render
/// as `true`/`false`. Null has no text.
pub fn literal_text(entry: &KdlEntry) -> Option<String> {
    match entry.value() {
        KdlValue::String(s) => Some(s.clone()),
        KdlValue::Bool(b) => Some(b.to_string()),
        KdlValue::Integer(_) | KdlValue::Float(_) => Some(
            entry
                .format()
                .map(|f| f.value_repr.trim().to_string())
                .filter(|repr| !repr.is_empty())
                .unwrap_or_else(|| entry.value().to_string()),
        ),
        _ => None,
    }
}
