//! Error types for proxy bundles.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("no proxy definition found")]
    MissingProxy,

    #[error("no proxy endpoint definition found")]
    MissingProxyEndpoint,

    #[error("invalid resource url: {0} (expected scheme://path)")]
    InvalidResourceUrl(String),
}

pub type Result<T> = std::result::Result<T, BundleError>;
