//! Bundle build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::load_bundle;
use crate::writer::{BundleWriter, JsonBundleWriter};

/// Decode the inputs and write the bundle under `build_path`.
pub fn run(inputs: &[PathBuf], build_path: &Path, resources_path: &Path) -> Result<()> {
    let bundle = load_bundle(inputs)?;

    let writer = JsonBundleWriter::new(build_path, resources_path);
    writer
        .write(&bundle)
        .with_context(|| format!("Failed to write bundle to {}", writer.root().display()))?;

    info!(
        path = %writer.root().display(),
        proxy_endpoints = bundle.proxy_endpoints.len(),
        target_endpoints = bundle.target_endpoints.len(),
        policies = bundle.policies.len(),
        resources = bundle.resources.len(),
        "bundle written"
    );
    println!("Bundle written to {}", writer.root().display());
    Ok(())
}
