//! Helpers for decoder unit tests.

use kdl::KdlDocument;

use crate::decoder::Decoder;
use crate::error::Diagnostics;
use crate::source::SourceFile;

/// Run `f` over a parsed fixture and return its output with every diagnostic recorded.
pub fn decode<T>(
    kdl: &str,
    f: impl FnOnce(&mut Decoder<'_>, &KdlDocument) -> T,
) -> (T, Diagnostics) {
    let source = SourceFile::new("test.kdl", kdl);
    let doc: KdlDocument = kdl.parse().expect("fixture should be valid KDL");
    let mut d = Decoder::new(&source);
    let out = f(&mut d, &doc);
    (out, d.into_diagnostics())
}

/// Run `f` on the first node of a fixture.
pub fn decode_node<T>(
    kdl: &str,
    f: impl FnOnce(&mut Decoder<'_>, &kdl::KdlNode) -> T,
) -> (T, Diagnostics) {
    decode(kdl, |d, doc| f(d, &doc.nodes()[0]))
}
