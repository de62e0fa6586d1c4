//! KDL configuration decoding for proxyforge API proxy bundles.
//!
//! This crate handles:
//! - Parsing configuration files into KDL documents
//! - Mapping node offsets to file/line/column positions
//! - Decoding proxies, endpoints, flows and policies into the core types
//! - Collecting every diagnostic found in a pass rather than the first

pub mod bundle;
pub mod decoder;
pub mod endpoint;
pub mod error;
pub mod flow;
pub mod fragment;
pub mod policy;
pub mod source;
pub mod tree;

#[cfg(test)]
mod testing;

pub use bundle::{decode_config, parse_bundle, parse_bundle_file};
pub use decoder::Decoder;
pub use error::{ConfigError, ConfigResult, DecodeError, Diagnostics, Position};
pub use source::SourceFile;
