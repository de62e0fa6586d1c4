//! Bundle output.
//!
//! A bundle is written under `<build>/apiproxy/`:
//!
//! ```text
//! apiproxy/
//!   <proxy>.json
//!   proxies/<name>.json
//!   targets/<name>.json
//!   policies/<name>.json
//!   resources/<scheme>/<path>
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use proxyforge_core::Bundle;
use proxyforge_core::resource::split_resource_url;
use serde::Serialize;
use tracing::debug;

/// Writes a validated bundle to its destination.
pub trait BundleWriter {
    fn write(&self, bundle: &Bundle) -> Result<()>;
}

/// Writes each entity as a pretty-printed JSON document.
pub struct JsonBundleWriter {
    root: PathBuf,
    resources_path: PathBuf,
}

impl JsonBundleWriter {
    pub fn new(build_path: impl AsRef<Path>, resources_path: impl Into<PathBuf>) -> Self {
        Self {
            root: build_path.as_ref().join("apiproxy"),
            resources_path: resources_path.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `value` to `<dir>/<name>.json`. Each path may be written once per bundle.
    fn write_json<T: Serialize>(
        &self,
        written: &mut HashSet<PathBuf>,
        dir: &str,
        name: &str,
        value: &T,
    ) -> Result<()> {
        if !is_plain_name(name) {
            bail!("name is not usable as a file name: {name:?}");
        }
        let dir = self.root.join(dir);
        let path = dir.join(format!("{name}.json"));
        if !written.insert(path.clone()) {
            bail!("duplicate name {name:?} in {}", dir.display());
        }

        fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote file");
        Ok(())
    }

    fn write_resource(&self, url: &str, content: &str) -> Result<()> {
        let Some((scheme, path)) = split_resource_url(url) else {
            bail!("invalid resource url: {url}");
        };
        let relative = Path::new(scheme).join(path);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            bail!("resource url escapes the resources directory: {url}");
        }

        let path = self.root.join("resources").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(url, path = %path.display(), "wrote resource");
        Ok(())
    }
}

impl BundleWriter for JsonBundleWriter {
    fn write(&self, bundle: &Bundle) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)
                .with_context(|| format!("Failed to clear {}", self.root.display()))?;
        }
        fs::create_dir_all(&self.root)?;

        let mut written = HashSet::new();
        if let Some(proxy) = &bundle.proxy {
            self.write_json(&mut written, "", &proxy.name, proxy)?;
        }
        for endpoint in &bundle.proxy_endpoints {
            self.write_json(&mut written, "proxies", &endpoint.name, endpoint)?;
        }
        for endpoint in &bundle.target_endpoints {
            self.write_json(&mut written, "targets", &endpoint.name, endpoint)?;
        }
        for policy in &bundle.policies {
            self.write_json(&mut written, "policies", &policy.name, policy)?;
        }

        if self.resources_path.is_dir() {
            copy_dir(&self.resources_path, &self.root.join("resources"))?;
        }
        for (url, content) in &bundle.resources {
            self.write_resource(url, content)?;
        }
        Ok(())
    }
}

/// `name` is a single ordinary path component.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(c)) if c == name)
        && components.next().is_none()
}

/// Recursively copy the contents of `from` into `to`.
fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}
