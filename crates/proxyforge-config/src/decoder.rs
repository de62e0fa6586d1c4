//! The decode context shared by every decoder.
//!
//! Decoders never stop at the first problem. Each one reports what it finds to
//! the [`Decoder`] and keeps going; an entity is only produced when nothing was
//! reported while decoding its subtree.

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};

use crate::error::{DecodeError, Diagnostics, Position};
use crate::source::SourceFile;
use crate::tree::{arguments, children, first_child, label, literal_text};

/// Marks the diagnostic count at the start of an entity's decode.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

pub struct Decoder<'s> {
    source: &'s SourceFile,
    diagnostics: Diagnostics,
}

impl<'s> Decoder<'s> {
    pub fn new(source: &'s SourceFile) -> Self {
        Self {
            source,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn source(&self) -> &SourceFile {
        self.source
    }

    pub fn position(&self, node: &KdlNode) -> Position {
        self.source.position(node.span().offset())
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub fn report(&mut self, error: DecodeError) {
        self.diagnostics.push(error);
    }

    pub fn shape(&mut self, node: &KdlNode, message: impl Into<String>) {
        let position = self.position(node);
        self.report(DecodeError::Shape {
            position,
            message: message.into(),
        });
    }

    pub fn required(&mut self, node: &KdlNode, message: impl Into<String>) {
        let position = self.position(node);
        self.report(DecodeError::RequiredField {
            position,
            message: message.into(),
        });
    }

    pub fn exclusive(&mut self, node: &KdlNode, message: impl Into<String>) {
        let position = self.position(node);
        self.report(DecodeError::Exclusivity {
            position,
            message: message.into(),
        });
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.diagnostics.len())
    }

    /// `Some(value)` only if nothing was reported since `checkpoint`.
    pub fn complete<T>(&self, checkpoint: Checkpoint, value: T) -> Option<T> {
        (self.diagnostics.len() == checkpoint.0).then_some(value)
    }

    /// The children block of `node`, or a shape diagnostic if it has none.
    pub fn object<'n>(&mut self, node: &'n KdlNode, what: &str) -> Option<&'n KdlDocument> {
        match node.children() {
            Some(body) => Some(body),
            None => {
                self.shape(node, format!("{what} is not an object"));
                None
            }
        }
    }

    /// A labelled block: the first label is its name and it must have a body.
    pub fn named<'n>(
        &mut self,
        node: &'n KdlNode,
        what: &str,
    ) -> Option<(&'n str, &'n KdlDocument)> {
        let name = match label(node, 0) {
            Some(name) if !name.is_empty() => name,
            _ => {
                self.required(node, format!("{what} requires a name"));
                return None;
            }
        };
        let body = self.object(node, what)?;
        Some((name, body))
    }

    /// Decode every `key` block of `body` as a named block.
    ///
    /// A block that fails is left out of the result; its siblings are still decoded.
    pub fn named_blocks<'n, T>(
        &mut self,
        body: &'n KdlDocument,
        key: &str,
        what: &str,
        mut decode: impl FnMut(&mut Self, &'n str, &'n KdlNode, &'n KdlDocument) -> Option<T>,
    ) -> Vec<T> {
        let mut out = Vec::new();
        for node in children(body, key) {
            let mark = self.checkpoint();
            let Some((name, block)) = self.named(node, what) else {
                continue;
            };
            if let Some(value) = decode(self, name, node, block) {
                if let Some(value) = self.complete(mark, value) {
                    out.push(value);
                }
            }
        }
        out
    }

    /// Decode every `key` block of `body` as an unlabelled block.
    pub fn blocks<'n, T>(
        &mut self,
        body: &'n KdlDocument,
        key: &str,
        what: &str,
        mut decode: impl FnMut(&mut Self, &'n KdlNode, &'n KdlDocument) -> Option<T>,
    ) -> Vec<T> {
        let mut out = Vec::new();
        for node in children(body, key) {
            let mark = self.checkpoint();
            let Some(block) = self.object(node, what) else {
                continue;
            };
            if let Some(value) = decode(self, node, block) {
                if let Some(value) = self.complete(mark, value) {
                    out.push(value);
                }
            }
        }
        out
    }

    /// Decode the `key` block of `body` if one is present.
    ///
    /// Only one occurrence is allowed; each extra one is reported.
    pub fn optional_block<'n, T>(
        &mut self,
        body: &'n KdlDocument,
        key: &str,
        what: &str,
        decode: impl FnOnce(&mut Self, &'n KdlNode, &'n KdlDocument) -> Option<T>,
    ) -> Option<T> {
        let mut occurrences = children(body, key);
        let node = occurrences.next()?;
        for extra in occurrences {
            self.exclusive(extra, format!("only one {what} block is allowed"));
        }

        let mark = self.checkpoint();
        let block = self.object(node, what)?;
        let value = decode(self, node, block)?;
        self.complete(mark, value)
    }

    /// The value entry of a scalar field.
    fn value<'n>(
        &mut self,
        body: &'n KdlDocument,
        key: &str,
    ) -> Option<(&'n KdlNode, &'n KdlEntry)> {
        let node = first_child(body, key)?;
        if node.children().is_some() {
            self.shape(node, format!("{key} must be a value, not a block"));
            return None;
        }
        match arguments(node).next() {
            Some(entry) => Some((node, entry)),
            None => {
                self.shape(node, format!("{key} requires a value"));
                None
            }
        }
    }

    /// An optional scalar field rendered as text.
    pub fn string(&mut self, body: &KdlDocument, key: &str) -> Option<String> {
        let (node, entry) = self.value(body, key)?;
        let text = literal_text(entry);
        if text.is_none() {
            self.shape(node, format!("{key} must not be null"));
        }
        text
    }

    /// A scalar field that must be present and non-empty.
    pub fn required_string(
        &mut self,
        owner: &KdlNode,
        body: &KdlDocument,
        key: &str,
        what: &str,
    ) -> Option<String> {
        let mark = self.checkpoint();
        match self.string(body, key) {
            Some(value) if !value.is_empty() => Some(value),
            _ => {
                if self.complete(mark, ()).is_some() {
                    let article = if key.starts_with(['a', 'e', 'i', 'o', 'u']) {
                        "an"
                    } else {
                        "a"
                    };
                    self.required(owner, format!("{what} requires {article} {key} value"));
                }
                None
            }
        }
    }

    pub fn flag(&mut self, body: &KdlDocument, key: &str) -> Option<bool> {
        let (node, entry) = self.value(body, key)?;
        match entry.value().as_bool() {
            Some(b) => Some(b),
            None => {
                self.shape(node, format!("{key} must be a boolean"));
                None
            }
        }
    }

    pub fn integer(&mut self, body: &KdlDocument, key: &str) -> Option<i64> {
        let (node, entry) = self.value(body, key)?;
        match entry.value() {
            KdlValue::Integer(i) => match i64::try_from(*i) {
                Ok(i) => Some(i),
                Err(_) => {
                    self.shape(node, format!("{key} is out of range"));
                    None
                }
            },
            _ => {
                self.shape(node, format!("{key} must be an integer"));
                None
            }
        }
    }

    /// All values of every `key` field, concatenated in declaration order.
    pub fn strings(&mut self, body: &KdlDocument, key: &str) -> Vec<String> {
        let mut out = Vec::new();
        for node in children(body, key) {
            if node.children().is_some() {
                self.shape(node, format!("{key} must be a list of values, not a block"));
                continue;
            }
            for entry in arguments(node) {
                match literal_text(entry) {
                    Some(text) => out.push(text),
                    None => self.shape(node, format!("{key} must not contain null")),
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::decode;

    #[test]
    fn test_scalar_fields() {
        let (out, diags) = decode(
            r#"
            base_path "/v1"
            time_limit 200
            enabled #false
            virtual_host "default" "secure"
            virtual_host "internal"
            "#,
            |d, doc| {
                (
                    d.string(doc, "base_path"),
                    d.integer(doc, "time_limit"),
                    d.flag(doc, "enabled"),
                    d.strings(doc, "virtual_host"),
                    d.string(doc, "missing"),
                )
            },
        );
        assert!(diags.is_empty());
        assert_eq!(out.0.as_deref(), Some("/v1"));
        assert_eq!(out.1, Some(200));
        assert_eq!(out.2, Some(false));
        assert_eq!(out.3, vec!["default", "secure", "internal"]);
        assert_eq!(out.4, None);
    }

    #[test]
    fn test_wrong_scalar_kind_is_shape_error() {
        let (_, diags) = decode(
            r#"
            enabled "yes"
            timeout "soon"
            url { value "x" }
            "#,
            |d, doc| {
                d.flag(doc, "enabled");
                d.integer(doc, "timeout");
                d.string(doc, "url");
            },
        );
        assert_eq!(diags.len(), 3);
        assert!(diags.iter().all(|e| matches!(e, DecodeError::Shape { .. })));
    }

    #[test]
    fn test_named_blocks_accumulate() {
        let (names, diags) = decode(
            r#"
            flow "first" {}
            flow {}
            flow "third"
            flow "fourth" {}
            "#,
            |d, doc| d.named_blocks(doc, "flow", "flow", |_, name, _, _| Some(name.to_string())),
        );
        assert_eq!(names, vec!["first", "fourth"]);
        let errors: Vec<_> = diags.iter().collect();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], DecodeError::RequiredField { .. }));
        assert!(errors[0].to_string().contains("flow requires a name"));
        assert_eq!(errors[0].position().line, 3);
        assert!(matches!(errors[1], DecodeError::Shape { .. }));
        assert!(errors[1].to_string().contains("flow is not an object"));
    }

    #[test]
    fn test_optional_block_rejects_duplicates() {
        let (out, diags) = decode(
            r#"
            request { a 1 }
            request { a 2 }
            "#,
            |d, doc| d.optional_block(doc, "request", "request", |d, _, body| d.integer(body, "a")),
        );
        assert_eq!(out, Some(1));
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags.iter().next(),
            Some(DecodeError::Exclusivity { .. })
        ));
    }

    #[test]
    fn test_required_string_reports_once() {
        let (out, diags) = decode(
            r#"
            owner {}
            "#,
            |d, doc| {
                let owner = &doc.nodes()[0];
                let body = owner.children().unwrap();
                d.required_string(owner, body, "resource_url", "script")
            },
        );
        assert_eq!(out, None);
        assert_eq!(diags.len(), 1);
        assert!(diags.to_string().contains("script requires a resource_url value"));
    }

    #[test]
    fn test_complete_drops_entity_with_errors() {
        let (out, _) = decode(r#"count "x""#, |d, doc| {
            let mark = d.checkpoint();
            let count = d.integer(doc, "count");
            d.complete(mark, count)
        });
        assert_eq!(out, None);
    }
}
