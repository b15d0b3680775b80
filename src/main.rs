// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! spacey-pack - A JavaScript module bundler
//!
//! This is the main entry point for the spacey-pack binary.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use owo_colors::OwoColorize;
use spacey_bundler::PackConfig;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spacey_pack={level},spacey_bundler={level}")));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<PackConfig> {
    let mut config = match &cli.config {
        Some(path) => PackConfig::load_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot read the working directory")?;
            return Ok(PackConfig::load(&cwd)?);
        }
    };
    config.apply_env(std::env::vars())?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;
    debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::Build(args) => {
            args.apply(&mut config)?;
            let build_config = config.build_config()?;
            info!(entry = %build_config.entry.display(), "starting build");
            let bundle = spacey_bundler::build(&build_config)?;
            println!(
                "{} {} modules into {}",
                "Bundled".green().bold(),
                bundle.module_count,
                build_config.out_dir.display().cyan()
            );
        }
        Commands::Dev(args) => {
            args.apply(&mut config)?;
            let dev_config = config.dev_config()?;
            info!(entry = %dev_config.entry.display(), addr = %dev_config.addr, "starting dev server");
            spacey_bundler::dev(&dev_config).await?;
        }
    }
    Ok(())
}
