// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration management for spacey-pack.
//!
//! Values are layered: defaults, then `spacey-pack.toml` in the project
//! directory, then `SPACEY_PACK_*` environment variables, then whatever the
//! command line sets through [`PackConfig::set`].

use crate::build::{BuildConfig, DevConfig};
use crate::bundle::DEFAULT_BUNDLE_NAME;
use crate::error::{BundleError, Result};
use crate::resolver::DEFAULT_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "spacey-pack.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "SPACEY_PACK_";

/// Configuration for spacey-pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PackConfig {
    /// Entry module
    pub entry: Option<PathBuf>,

    /// Output directory for `build`
    pub out_dir: PathBuf,

    /// HTML template
    pub template: Option<PathBuf>,

    /// Dev server host
    pub host: String,

    /// Dev server port
    pub port: u16,

    /// File name of the bundle script
    pub bundle_name: String,

    /// Extensions probed when resolving packages
    pub extensions: Vec<String>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            entry: None,
            out_dir: PathBuf::from("dist"),
            template: None,
            host: "127.0.0.1".to_string(),
            port: 8080,
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl PackConfig {
    /// Load configuration for the project in `dir`: defaults, the config
    /// file if it exists, then the environment.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            Self::load_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Load a TOML configuration file. Missing keys keep their defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| BundleError::io(path, err))?;
        let config = Self::from_toml(&content)
            .map_err(|err| BundleError::config(format!("{}: {}", path.display(), err)))?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Parse TOML configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|err| BundleError::config(err.to_string()))?;
        config.extensions = normalize_extensions(config.extensions.iter().map(String::as_str));
        config.validate()?;
        Ok(config)
    }

    /// Apply `SPACEY_PACK_*` variables from `vars`
    pub fn apply_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) -> Result<()> {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                let config_key = config_key.to_lowercase().replace('_', "-");
                self.set(&config_key, &value)?;
            }
        }
        Ok(())
    }

    /// Set one configuration value by its kebab-case key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "entry" => self.entry = Some(PathBuf::from(value)),
            "out-dir" => self.out_dir = PathBuf::from(value),
            "template" => self.template = Some(PathBuf::from(value)),
            "host" => self.host = value.to_string(),
            "port" => {
                self.port = value
                    .parse()
                    .map_err(|_| BundleError::config(format!("invalid port '{value}'")))?;
            }
            "bundle-name" => self.bundle_name = value.to_string(),
            "extensions" => self.extensions = normalize_extensions(value.split(',')),
            _ => return Err(BundleError::config(format!("unknown key '{key}'"))),
        }
        debug!(key, value, "configuration value set");
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.bundle_name.is_empty() || self.bundle_name.contains(['/', '\\']) {
            return Err(BundleError::config(format!(
                "bundle name '{}' must be a plain file name",
                self.bundle_name
            )));
        }
        Ok(())
    }

    /// The dev server address
    pub fn addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| BundleError::config(format!("invalid host '{}'", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    fn require_entry(&self) -> Result<PathBuf> {
        self.entry
            .clone()
            .ok_or_else(|| BundleError::config("no entry module given"))
    }

    /// Settings for `build`
    pub fn build_config(&self) -> Result<BuildConfig> {
        Ok(BuildConfig {
            entry: self.require_entry()?,
            out_dir: self.out_dir.clone(),
            template: self.template.clone(),
            bundle_name: self.bundle_name.clone(),
            extensions: self.extensions.clone(),
        })
    }

    /// Settings for `dev`
    pub fn dev_config(&self) -> Result<DevConfig> {
        Ok(DevConfig {
            entry: self.require_entry()?,
            template: self.template.clone(),
            addr: self.addr()?,
            bundle_name: self.bundle_name.clone(),
            extensions: self.extensions.clone(),
        })
    }
}

/// Trim, drop empties, and make sure each extension starts with a dot
fn normalize_extensions<'a>(extensions: impl Iterator<Item = &'a str>) -> Vec<String> {
    extensions
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackConfig::default();
        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.bundle_name, "bundle.js");
        assert_eq!(config.extensions, [".js", ".mjs", ".cjs", ".css"]);
        assert_eq!(config.addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = PackConfig::from_toml(
            "entry = \"src/index.js\"\nport = 3000\nextensions = [\"js\", \".css\"]\nout-dir = \"public\"",
        )
        .unwrap();
        assert_eq!(config.entry, Some(PathBuf::from("src/index.js")));
        assert_eq!(config.port, 3000);
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.extensions, [".js", ".css"]);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(PackConfig::from_toml("port = \"x\""), Err(BundleError::Config(_))));
        assert!(matches!(
            PackConfig::from_toml("bundle-name = \"js/out.js\""),
            Err(BundleError::Config(_))
        ));
    }

    #[test]
    fn test_environment_layer() {
        let mut config = PackConfig::default();
        config
            .apply_env([
                ("SPACEY_PACK_PORT".to_string(), "9000".to_string()),
                ("SPACEY_PACK_OUT_DIR".to_string(), "build".to_string()),
                ("SPACEY_PACK_EXTENSIONS".to_string(), "js, mjs".to_string()),
                ("UNRELATED".to_string(), "ignored".to_string()),
            ])
            .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.extensions, [".js", ".mjs"]);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = PackConfig::default();
        assert!(config.set("port", "70000").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("bundle-name", "").is_err());
    }

    #[test]
    fn test_conversions() {
        let mut config = PackConfig::default();
        assert!(matches!(config.build_config(), Err(BundleError::Config(_))));

        config.set("entry", "src/main.js").unwrap();
        config.set("host", "0.0.0.0").unwrap();
        config.set("port", "0").unwrap();
        let dev = config.dev_config().unwrap();
        assert_eq!(dev.entry, PathBuf::from("src/main.js"));
        assert_eq!(dev.addr, "0.0.0.0:0".parse().unwrap());

        let build = config.build_config().unwrap();
        assert_eq!(build.out_dir, PathBuf::from("dist"));

        config.set("host", "localhost").unwrap();
        assert!(config.addr().is_err());
    }

    #[test]
    fn test_load_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "bundle-name = \"app.js\"").unwrap();
        let config = PackConfig::load(dir.path()).unwrap();
        assert_eq!(config.bundle_name, "app.js");
    }
}
