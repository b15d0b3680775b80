// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # spacey-bundler
//!
//! Bundles a graph of ES modules into one script for the browser.
//!
//! ## Pipeline
//!
//! 1. [`ModuleRegistry::build_graph`] walks `import` and `export ... from`
//!    specifiers from an entry file, resolving each through the [`Resolver`]
//!    and registering every file exactly once, cycles included.
//! 2. Each module is rewritten to the CommonJS-style `exports`/`require`
//!    interface. Stylesheets become a script that injects a `<style>` tag.
//! 3. [`bundle()`] wraps every module in a function keyed by its absolute
//!    path and appends a small loader. The loader caches a module's exports
//!    object before running its body, so cycles terminate.
//! 4. An `index.html` shell gets a `<script>` tag for the bundle.
//!
//! [`build()`] writes the artifacts to a directory; [`dev()`] serves them
//! from memory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spacey_bundler::{BuildConfig, DEFAULT_EXTENSIONS, build};
//!
//! let config = BuildConfig {
//!     entry: "src/index.js".into(),
//!     out_dir: "dist".into(),
//!     template: None,
//!     bundle_name: "bundle.js".to_string(),
//!     extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
//! };
//! let bundle = build(&config)?;
//! println!("bundled {} modules", bundle.module_count);
//! # Ok::<(), spacey_bundler::BundleError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod build;
pub mod bundle;
mod code;
pub mod config;
pub mod error;
pub mod html;
pub mod module;
pub mod registry;
pub mod resolver;
pub mod runtime;
pub mod server;
pub mod transform;

pub use build::{BuildConfig, DevConfig, build, bundle_entry, dev};
pub use bundle::{Artifact, Bundle, BundleOptions, DEFAULT_BUNDLE_NAME, bundle, collect_modules};
pub use config::PackConfig;
pub use error::{BundleError, Result};
pub use html::inject_scripts;
pub use module::{Module, ModuleIndex, ModuleKind};
pub use registry::ModuleRegistry;
pub use resolver::{DEFAULT_EXTENSIONS, Resolver};
pub use server::DevServer;
pub use transform::transform_module;
