// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the bundler

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for bundler operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Errors that abort a build. None of them are recovered locally: a
/// partially transformed module cannot run inside the generated loader.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The file extension has no entry in the module kind table
    #[error("Unsupported module kind for '{}' (expected .js, .mjs, .cjs or .css)", path.display())]
    UnsupportedModuleKind {
        /// The offending module path
        path: PathBuf,
    },

    /// An import specifier did not lead to an existing file
    #[error("Cannot resolve '{specifier}' imported from '{}'", importer.display())]
    Resolution {
        /// The specifier as written
        specifier: String,
        /// The importing module
        importer: PathBuf,
    },

    /// A script module is not valid JavaScript
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        /// The module path
        path: PathBuf,
        /// The syntax error
        source: spacey_syntax::Error,
    },

    /// A module did not have the shape the transformer expects
    #[error("Failed to transform '{}': {message}", path.display())]
    Transform {
        /// The module path
        path: PathBuf,
        /// What was missing
        message: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The dev server could not bind or accept
    #[error("Dev server error: {0}")]
    Server(String),
}

impl BundleError {
    /// Create an I/O error for `path`
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a transform error for `path`
    pub fn transform(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Transform {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
