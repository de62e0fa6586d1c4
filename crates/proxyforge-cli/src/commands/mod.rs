//! CLI command implementations.

pub mod build;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use proxyforge_config::{ConfigError, Diagnostics, parse_bundle_file};
use proxyforge_core::Bundle;
use tracing::{debug, warn};

/// Decode every input file and merge the results into one validated bundle.
///
/// Diagnostics from all files are printed to stderr before failing, so a single
/// run reports every problem it can find.
pub fn load_bundle(inputs: &[PathBuf]) -> Result<Bundle> {
    let mut bundle = Bundle::new();
    let mut diagnostics = Diagnostics::new();

    for path in inputs {
        match parse_bundle_file(path) {
            Ok(decoded) => {
                if let (Some(current), Some(next)) = (&bundle.proxy, &decoded.proxy) {
                    warn!(
                        file = %path.display(),
                        previous = %current.name,
                        proxy = %next.name,
                        "proxy definition replaced by a later file"
                    );
                }
                debug!(file = %path.display(), "merging configuration");
                bundle.merge(decoded);
            }
            Err(ConfigError::Decode(errors)) => diagnostics.extend(errors),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to load config file: {}", path.display()));
            }
        }
    }

    if !diagnostics.is_empty() {
        eprintln!("{diagnostics}");
        bail!("{} configuration error(s) found", diagnostics.len());
    }

    bundle.validate().context("Invalid proxy bundle")?;
    Ok(bundle)
}
