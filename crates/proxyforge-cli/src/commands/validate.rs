//! Configuration validation command.

use std::path::PathBuf;

use anyhow::Result;

use super::load_bundle;

pub fn run(inputs: &[PathBuf]) -> Result<()> {
    let bundle = load_bundle(inputs)?;

    let name = bundle.proxy.as_ref().map(|p| p.name.as_str()).unwrap_or_default();
    println!("Configuration is valid");
    println!("  Proxy: {}", name);
    println!("  Proxy endpoints: {}", bundle.proxy_endpoints.len());
    println!("  Target endpoints: {}", bundle.target_endpoints.len());
    println!("  Policies: {}", bundle.policies.len());
    println!("  Resources: {}", bundle.resources.len());
    Ok(())
}
