// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Build and dev entry points.
//!
//! Both run the whole pipeline against a fresh [`ModuleRegistry`]: build
//! writes the artifacts to disk, dev keeps them in memory and serves them.

use crate::bundle::{Bundle, BundleOptions, bundle};
use crate::error::{BundleError, Result};
use crate::html::DEFAULT_TEMPLATE;
use crate::registry::ModuleRegistry;
use crate::resolver::Resolver;
use crate::server::DevServer;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Settings for a build to disk
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Entry module, absolute or relative to the working directory
    pub entry: PathBuf,
    /// Directory the artifacts are written to; created if missing
    pub out_dir: PathBuf,
    /// HTML template; a minimal page is used when absent
    pub template: Option<PathBuf>,
    /// File name of the bundle script
    pub bundle_name: String,
    /// Extensions probed when resolving packages
    pub extensions: Vec<String>,
}

/// Settings for the development server
#[derive(Debug, Clone)]
pub struct DevConfig {
    /// Entry module
    pub entry: PathBuf,
    /// HTML template; a minimal page is used when absent
    pub template: Option<PathBuf>,
    /// Address to listen on
    pub addr: SocketAddr,
    /// File name of the bundle script
    pub bundle_name: String,
    /// Extensions probed when resolving packages
    pub extensions: Vec<String>,
}

/// Bundle `entry` in memory.
pub fn bundle_entry(
    entry: &Path,
    template: Option<&Path>,
    bundle_name: &str,
    extensions: &[String],
) -> Result<Bundle> {
    let started = Instant::now();
    let entry = entry.canonicalize().map_err(|err| BundleError::io(entry, err))?;
    let html_template = match template {
        Some(path) => std::fs::read_to_string(path).map_err(|err| BundleError::io(path, err))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let mut registry = ModuleRegistry::new(Resolver::new(extensions.to_vec()));
    let root = registry.build_graph(&entry)?;
    info!(entry = %entry.display(), modules = registry.len(), "module graph built");

    let options = BundleOptions {
        bundle_name: bundle_name.to_string(),
        html_template: Some(html_template),
    };
    let bundle = bundle(&mut registry, root, &options)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "build finished");
    Ok(bundle)
}

/// Bundle and write every artifact under `out_dir`. Nothing is written
/// unless the whole pipeline succeeds.
pub fn build(config: &BuildConfig) -> Result<Bundle> {
    let bundle = bundle_entry(
        &config.entry,
        config.template.as_deref(),
        &config.bundle_name,
        &config.extensions,
    )?;

    std::fs::create_dir_all(&config.out_dir).map_err(|err| BundleError::io(&config.out_dir, err))?;
    for artifact in &bundle.artifacts {
        let path = config.out_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.content).map_err(|err| BundleError::io(&path, err))?;
        info!(path = %path.display(), bytes = artifact.content.len(), "wrote artifact");
    }
    Ok(bundle)
}

/// Bundle once, then serve the artifacts until the process is stopped.
/// A build failure prevents the server from starting.
pub async fn dev(config: &DevConfig) -> Result<()> {
    let bundle = bundle_entry(
        &config.entry,
        config.template.as_deref(),
        &config.bundle_name,
        &config.extensions,
    )?;
    let server = DevServer::bind(config.addr, bundle.artifacts).await?;
    info!(url = %format!("http://{}/", server.local_addr()), "serving bundle");
    server.serve().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DEFAULT_EXTENSIONS;
    use std::fs;

    fn config(dir: &Path) -> BuildConfig {
        BuildConfig {
            entry: dir.join("src/main.js"),
            out_dir: dir.join("dist/nested"),
            template: None,
            bundle_name: "bundle.js".to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.js"), "import { x } from './x.js';\nconsole.log(x);").unwrap();
        fs::write(dir.path().join("src/x.js"), "export const x = 1;").unwrap();

        let bundle = build(&config(dir.path())).unwrap();
        assert_eq!(bundle.module_count, 2);

        let script = fs::read_to_string(dir.path().join("dist/nested/bundle.js")).unwrap();
        assert_eq!(script, bundle.artifact("bundle.js").unwrap().content);
        let html = fs::read_to_string(dir.path().join("dist/nested/index.html")).unwrap();
        assert!(html.contains("<script src=\"/bundle.js\"></script>\n</body>"), "{html}");
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.js"), "import './gone.js';").unwrap();

        let err = build(&config(dir.path())).unwrap_err();
        assert!(matches!(err, BundleError::Resolution { .. }));
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_template_is_used() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.js"), "").unwrap();
        fs::write(dir.path().join("page.html"), "<title>t</title><BODY></BODY>").unwrap();

        let mut config = config(dir.path());
        config.template = Some(dir.path().join("page.html"));
        let bundle = build(&config).unwrap();
        assert_eq!(
            bundle.artifact("index.html").unwrap().content,
            "<title>t</title><BODY><script src=\"/bundle.js\"></script>\n</BODY>"
        );
    }

    #[test]
    fn test_missing_entry_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = build(&config(dir.path())).unwrap_err();
        assert!(matches!(err, BundleError::Io { .. }));
    }
}
