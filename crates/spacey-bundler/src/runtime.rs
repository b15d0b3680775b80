// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The loader runtime embedded in every bundle.
//!
//! ```text
//! (function(modules, entry) {
//!   ...require with an exports cache...
//!   require(entry);
//! })({ "<id>": function(exports, require) { ... }, ... }, "<entry id>");
//! ```
//!
//! A module's exports object enters the cache before its body runs, so a
//! circular `require` returns the partially filled object instead of
//! recursing. Module functions sit outside the loader's body, so each one
//! carries its own `"use strict"` and is called with `this` undefined, as
//! module code runs.

use crate::code::{CodeBuilder, string_literal};

/// One entry of the module map
#[derive(Debug, Clone, Copy)]
pub struct ModuleEntry<'a> {
    /// Absolute module id
    pub id: &'a str,
    /// Compiled loader body
    pub body: &'a str,
}

/// Generate the bundle script: the loader applied to the module map and
/// the entry id.
pub fn render_bundle(entries: &[ModuleEntry<'_>], entry: &str) -> String {
    let mut code = CodeBuilder::new();
    code.open("(function(modules, entry) {")
        .line("\"use strict\";")
        .line("const cache = Object.create(null);")
        .open("function require(id) {")
        .open("if (id in cache) {")
        .line("return cache[id];")
        .close("}")
        .line("const exports = {};")
        .line("cache[id] = exports;")
        .line("modules[id].call(undefined, exports, require);")
        .line("return cache[id];")
        .close("}")
        .line("require(entry);")
        .reopen("})({");

    for module in entries {
        code.open(format!("{}: function(exports, require) {{", string_literal(module.id)))
            .line("\"use strict\";")
            .raw(module.body)
            .close("},");
    }

    code.close(format!("}}, {});", string_literal(entry)));
    code.finish()
}
