// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parser for JavaScript modules.
//!
//! Transforms a stream of tokens into an Abstract Syntax Tree (AST).
//! Source is always parsed with the module goal, so code is strict and
//! `await` is reserved.
//!
//! ## Structure
//!
//! - `parser` - Parser state, token helpers and the module entry point
//! - `statements` - Statements, functions and classes
//! - `expressions` - Operators, literals, calls and arrow functions
//! - `patterns` - Destructuring targets
//! - `modules` - Import and export declarations
//!
//! ## Usage
//!
//! ```rust
//! use spacey_syntax::parser::Parser;
//!
//! let mut parser = Parser::new("import { add } from './math.js';\nexport const two = add(1, 1);");
//! let program = parser.parse_module().expect("Should parse");
//! assert_eq!(program.body.len(), 2);
//! ```

#[allow(clippy::module_inception)]
mod parser;

mod expressions;
mod modules;
mod patterns;
mod statements;

pub use parser::Parser;
