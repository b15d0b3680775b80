// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interface transformation.
//!
//! Turns each module into the body of a `function(exports, require)` entry
//! of the module map. Script modules have their import/export syntax
//! rewritten against the loader protocol; style modules become code that
//! injects their text into the document.

mod scope;
mod script;
mod style;

pub use script::transform_script;
pub use style::{escape_template_text, transform_style};

use crate::error::{BundleError, Result};
use crate::module::{Module, ModuleKind};
use tracing::debug;

/// Compile `module`, storing the loader body in `module.compiled`.
///
/// For script modules the rewritten tree replaces `module.tree`.
pub fn transform_module(module: &mut Module) -> Result<()> {
    let compiled = match module.kind {
        ModuleKind::Script => {
            let tree = module
                .tree
                .take()
                .ok_or_else(|| BundleError::transform(&module.id, "script module has no syntax tree"))?;
            let tree = transform_script(&module.id, tree, &module.resolved)?;
            let text = spacey_syntax::print(&tree);
            module.tree = Some(tree);
            text
        }
        ModuleKind::Style => transform_style(&module.source),
    };

    debug!(module = %module.id.display(), bytes = compiled.len(), "transformed module");
    module.compiled = Some(compiled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_script_module_is_compiled_and_tree_replaced() {
        let tree = spacey_syntax::parse_module("export const a = 1;").unwrap();
        let mut module = Module::new(
            PathBuf::from("/p/a.js"),
            ModuleKind::Script,
            "export const a = 1;".to_string(),
            Some(tree),
        );
        transform_module(&mut module).unwrap();

        assert_eq!(module.compiled.as_deref(), Some("const a = 1;\nexports.a = a;\n"));
        let tree = module.tree.as_ref().unwrap();
        assert_eq!(spacey_syntax::print(tree), "const a = 1;\nexports.a = a;\n");
    }

    #[test]
    fn test_script_without_tree_fails() {
        let mut module = Module::new(PathBuf::from("/p/a.js"), ModuleKind::Script, String::new(), None);
        let err = transform_module(&mut module).unwrap_err();
        assert!(matches!(err, BundleError::Transform { .. }));
        assert!(module.compiled.is_none());
    }

    #[test]
    fn test_style_module_is_compiled() {
        let mut module = Module::new(
            PathBuf::from("/p/site.css"),
            ModuleKind::Style,
            "body { margin: 0; }".to_string(),
            None,
        );
        transform_module(&mut module).unwrap();
        let compiled = module.compiled.unwrap();
        assert!(compiled.contains("`body { margin: 0; }`"), "{compiled}");
    }
}
