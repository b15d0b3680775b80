// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CLI argument parsing for spacey-pack.

use clap::{Args, Parser, Subcommand};
use spacey_bundler::{PackConfig, Result};
use std::path::PathBuf;

/// spacey-pack - Bundles JavaScript modules for the browser
#[derive(Parser, Debug)]
#[command(name = "spacey-pack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./spacey-pack.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bundle the entry module and write the output directory
    #[command(alias = "b")]
    Build(BuildArgs),

    /// Bundle the entry module and serve it over HTTP
    #[command(alias = "serve")]
    Dev(DevArgs),
}

/// Options shared by both commands
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
    /// Entry module
    pub entry: Option<PathBuf>,

    /// HTML template to inject the bundle script into
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// File name of the bundle script
    #[arg(long)]
    pub bundle_name: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct DevArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Host to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl CommonArgs {
    fn apply(&self, config: &mut PackConfig) -> Result<()> {
        if let Some(entry) = &self.entry {
            config.entry = Some(entry.clone());
        }
        if let Some(template) = &self.template {
            config.template = Some(template.clone());
        }
        if let Some(bundle_name) = &self.bundle_name {
            config.set("bundle-name", bundle_name)?;
        }
        Ok(())
    }
}

impl BuildArgs {
    /// Command line values win over file and environment values
    pub fn apply(&self, config: &mut PackConfig) -> Result<()> {
        self.common.apply(config)?;
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        Ok(())
    }
}

impl DevArgs {
    /// Command line values win over file and environment values
    pub fn apply(&self, config: &mut PackConfig) -> Result<()> {
        self.common.apply(config)?;
        if let Some(host) = &self.host {
            config.set("host", host)?;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_args_override_config() {
        let cli = Cli::parse_from(["spacey-pack", "build", "src/app.js", "-o", "public", "--bundle-name", "app.js"]);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        let mut config = PackConfig::default();
        args.apply(&mut config).unwrap();
        assert_eq!(config.entry, Some(PathBuf::from("src/app.js")));
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.bundle_name, "app.js");
    }

    #[test]
    fn test_dev_args_keep_unset_values() {
        let cli = Cli::parse_from(["spacey-pack", "-v", "dev", "--port", "3000"]);
        assert!(cli.verbose);
        let Commands::Dev(args) = cli.command else {
            panic!("expected dev");
        };
        let mut config = PackConfig::default();
        config.entry = Some(PathBuf::from("index.js"));
        args.apply(&mut config).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.entry, Some(PathBuf::from("index.js")));
    }

    #[test]
    fn test_bundle_name_must_be_a_file_name() {
        for name in ["js/app.js", "js\\app.js"] {
            let cli = Cli::parse_from(["spacey-pack", "build", "--bundle-name", name]);
            let Commands::Build(args) = cli.command else {
                panic!("expected build");
            };
            let mut config = PackConfig::default();
            let err = args.apply(&mut config).unwrap_err();
            assert!(err.to_string().contains("must be a plain file name"), "{err}");
        }
    }
}
