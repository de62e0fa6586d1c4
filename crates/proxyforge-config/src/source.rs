//! Source text and offset-to-position mapping.

use crate::error::Position;

/// A configuration file held in memory for the duration of a decode pass.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            text,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the first non-whitespace character at or after `offset`.
    pub fn position(&self, offset: usize) -> Position {
        let offset = self.skip_whitespace(offset.min(self.text.len()));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = self
            .text
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start)
            + 1;

        Position {
            file: self.name.clone(),
            line: line + 1,
            column,
        }
    }

    fn skip_whitespace(&self, offset: usize) -> usize {
        self.text
            .get(offset..)
            .and_then(|rest| rest.find(|c: char| !c.is_whitespace()))
            .map(|skip| offset + skip)
            .unwrap_or(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_first_line() {
        let source = SourceFile::new("a.kdl", "proxy \"x\" {}\n");
        let pos = source.position(0);
        assert_eq!((pos.line, pos.column), (1, 1));
        assert_eq!(pos.file, "a.kdl");
    }

    #[test]
    fn test_position_later_line() {
        let text = "proxy \"x\" {}\n\nproxy_endpoint \"y\" {}\n";
        let source = SourceFile::new("a.kdl", text);
        let offset = text.find("proxy_endpoint").unwrap();
        let pos = source.position(offset);
        assert_eq!((pos.line, pos.column), (3, 1));
    }

    #[test]
    fn test_position_skips_leading_whitespace() {
        let text = "a {\n    step \"x\" {}\n}\n";
        let source = SourceFile::new("a.kdl", text);
        let pos = source.position(text.find('\n').unwrap());
        assert_eq!((pos.line, pos.column), (2, 5));
    }

    #[test]
    fn test_position_counts_characters() {
        let text = "é step";
        let source = SourceFile::new("a.kdl", text);
        let pos = source.position(text.find("step").unwrap());
        assert_eq!((pos.line, pos.column), (1, 3));
    }
}
