//! Configuration decoding errors.

use std::fmt;
use thiserror::Error;

/// A location in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A positioned diagnostic produced while decoding a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A node is not the kind expected at this site (block vs value).
    #[error("{position}: {message}")]
    Shape { position: Position, message: String },

    /// A required name, key or value is absent, empty or not one of the allowed values.
    #[error("{position}: {message}")]
    RequiredField { position: Position, message: String },

    /// Mutually exclusive blocks were combined, or none of a required set was given.
    #[error("{position}: {message}")]
    Exclusivity { position: Position, message: String },

    /// A policy block names a type with no decoder.
    #[error("{position}: unknown policy type \"{kind}\" (expected one of {expected})")]
    UnknownKind {
        position: Position,
        kind: String,
        expected: String,
    },
}

impl DecodeError {
    pub fn position(&self) -> &Position {
        match self {
            DecodeError::Shape { position, .. }
            | DecodeError::RequiredField { position, .. }
            | DecodeError::Exclusivity { position, .. }
            | DecodeError::UnknownKind { position, .. } => position,
        }
    }
}

/// All diagnostics recorded during a decode pass, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<DecodeError>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: DecodeError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodeError> {
        self.0.iter()
    }

    /// `Ok(value)` when nothing was recorded, the diagnostics otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl IntoIterator for Diagnostics {
    type Item = DecodeError;
    type IntoIter = std::vec::IntoIter<DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DecodeError;
    type IntoIter = std::slice::Iter<'a, DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("KDL parse error in {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: kdl::KdlError,
    },

    #[error("{0}")]
    Decode(Diagnostics),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Diagnostics> for ConfigError {
    fn from(diagnostics: Diagnostics) -> Self {
        ConfigError::Decode(diagnostics)
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Position {
        Position {
            file: "proxy.kdl".to_string(),
            line,
            column,
        }
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::RequiredField {
            position: at(3, 5),
            message: "proxy requires a name".to_string(),
        };
        assert_eq!(err.to_string(), "proxy.kdl:3:5: proxy requires a name");
        assert_eq!(err.position().line, 3);
    }

    #[test]
    fn test_diagnostics_display_one_per_line() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(DecodeError::Shape {
            position: at(1, 1),
            message: "proxy endpoint is not an object".to_string(),
        });
        diagnostics.push(DecodeError::UnknownKind {
            position: at(9, 1),
            kind: "quotaa".to_string(),
            expected: "quota".to_string(),
        });

        let rendered = diagnostics.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "proxy.kdl:1:1: proxy endpoint is not an object");
        assert!(lines[1].contains("unknown policy type \"quotaa\""));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Diagnostics::new().into_result(7), Ok(7));

        let mut diagnostics = Diagnostics::new();
        diagnostics.push(DecodeError::Exclusivity {
            position: at(2, 1),
            message: "x".to_string(),
        });
        assert!(diagnostics.into_result(7).is_err());
    }
}
