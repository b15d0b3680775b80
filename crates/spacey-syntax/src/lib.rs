// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # spacey-syntax
//!
//! JavaScript module syntax for the spacey bundler.
//!
//! ## Overview
//!
//! This crate provides everything needed to rewrite ES modules:
//! - A lexer and recursive descent parser for the module goal
//! - An owned syntax tree with ESTree-style node names
//! - [`visit::Fold`] and [`visit::Visit`] traversals
//! - A precedence-aware printer that turns trees back into source
//!
//! ## Quick Start
//!
//! ```rust
//! let program = spacey_syntax::parse_module("export const answer = 6 * 7;").unwrap();
//! assert_eq!(spacey_syntax::print(&program), "export const answer = 6 * 7;\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod visit;

pub use ast::Program;
pub use codegen::Printer;
pub use parser::Parser;

/// Parses `source` as an ES module.
pub fn parse_module(source: &str) -> Result<Program, Error> {
    Parser::new(source).parse_module()
}

/// Prints a program as JavaScript source.
pub fn print(program: &Program) -> String {
    Printer::print_program(program)
}

/// Errors produced while reading JavaScript source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source is not a valid module
    SyntaxError {
        /// What went wrong
        message: String,
        /// 1-based line of the offending token
        line: usize,
        /// 1-based column of the offending token
        column: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SyntaxError {
                message,
                line,
                column,
            } => write!(f, "SyntaxError: {} ({}:{})", message, line, column),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_location() {
        let err = parse_module("let x = ;").unwrap_err();
        assert_eq!(err.to_string(), "SyntaxError: Unexpected token ';' (1:9)");
    }

    #[test]
    fn test_parse_and_print() {
        let program = parse_module("import a from './a.js'\nexport default a").unwrap();
        assert_eq!(print(&program), "import a from \"./a.js\";\nexport default a;\n");
    }
}
