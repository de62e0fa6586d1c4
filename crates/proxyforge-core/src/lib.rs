//! Core domain types for proxyforge API proxy bundles.
//!
//! This crate contains:
//! - The bundle aggregate and proxy descriptor
//! - Proxy and target endpoint definitions
//! - Flows, fault rules and steps
//! - Shared fragments (properties, headers, parameters)
//! - The closed set of policy kinds
//! - Embedded resources

pub mod bundle;
pub mod endpoint;
pub mod error;
pub mod flow;
pub mod fragment;
pub mod policy;
pub mod resource;

pub use bundle::{Bundle, Proxy};
pub use error::{BundleError, Result};
pub use policy::{Policy, PolicyKind, PolicyType};
pub use resource::Resource;
