// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Graph → artifacts.

use crate::error::{BundleError, Result};
use crate::html::{HTML_FILE_NAME, inject_scripts};
use crate::module::ModuleIndex;
use crate::registry::ModuleRegistry;
use crate::runtime::{ModuleEntry, render_bundle};
use crate::transform::transform_module;
use rustc_hash::FxHashSet;
use tracing::info;

/// Default file name of the bundle script
pub const DEFAULT_BUNDLE_NAME: &str = "bundle.js";

/// A named output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, relative to the output directory or server root
    pub file_name: String,
    /// File content
    pub content: String,
}

/// What to produce
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// File name of the bundle script
    pub bundle_name: String,
    /// HTML template; when present an `index.html` shell is produced too
    pub html_template: Option<String>,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            html_template: None,
        }
    }
}

/// The result of bundling one graph
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Bundle script first, then the HTML shell if one was requested
    pub artifacts: Vec<Artifact>,
    /// Number of modules in the module map
    pub module_count: usize,
}

impl Bundle {
    /// Look up an artifact by file name
    pub fn artifact(&self, file_name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.file_name == file_name)
    }
}

/// Modules reachable from `root` in depth-first preorder, each once.
///
/// Uses an explicit stack; a module is marked when popped, which visits
/// modules in the same order as the recursive walk.
pub fn collect_modules(registry: &ModuleRegistry, root: ModuleIndex) -> Vec<ModuleIndex> {
    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack = vec![root];

    while let Some(index) = stack.pop() {
        if !seen.insert(index) {
            continue;
        }
        order.push(index);
        stack.extend(registry.module(index).dependencies.iter().rev().copied());
    }
    order
}

/// Transform every module reachable from `root` and generate the artifacts.
/// Any failing module aborts the whole bundle.
pub fn bundle(registry: &mut ModuleRegistry, root: ModuleIndex, options: &BundleOptions) -> Result<Bundle> {
    let order = collect_modules(registry, root);
    for &index in &order {
        transform_module(registry.module_mut(index))?;
    }

    let ids: Vec<String> = order.iter().map(|&index| registry.module(index).id_string()).collect();
    let mut entries = Vec::with_capacity(order.len());
    for (&index, id) in order.iter().zip(&ids) {
        let module = registry.module(index);
        let body = module
            .compiled
            .as_deref()
            .ok_or_else(|| BundleError::transform(&module.id, "module was not compiled"))?;
        entries.push(ModuleEntry { id, body });
    }

    let entry_id = registry.module(root).id_string();
    let mut artifacts = vec![Artifact {
        file_name: options.bundle_name.clone(),
        content: render_bundle(&entries, &entry_id),
    }];
    if let Some(template) = &options.html_template {
        artifacts.push(Artifact {
            file_name: HTML_FILE_NAME.to_string(),
            content: inject_scripts(template, &[options.bundle_name.as_str()]),
        });
    }

    info!(
        entry = %entry_id,
        modules = order.len(),
        artifacts = artifacts.len(),
        "bundle generated"
    );
    Ok(Bundle {
        artifacts,
        module_count: order.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        for (name, content) in files {
            fs::write(root.join(name), content).unwrap();
        }
        (dir, root)
    }

    fn names(registry: &ModuleRegistry, order: &[ModuleIndex]) -> Vec<String> {
        order
            .iter()
            .map(|&index| {
                let id = &registry.module(index).id;
                id.file_name().unwrap().to_string_lossy().into_owned()
            })
            .collect()
    }

    #[test]
    fn test_preorder_matches_recursive_walk() {
        // main -> a, b; a -> c, b; b -> c; c -> a
        let (_dir, root) = project(&[
            ("main.js", "import './a.js';\nimport './b.js';"),
            ("a.js", "import './c.js';\nimport './b.js';"),
            ("b.js", "import './c.js';"),
            ("c.js", "import './a.js';"),
        ]);
        let mut registry = ModuleRegistry::default();
        let entry = registry.build_graph(&root.join("main.js")).unwrap();
        let order = collect_modules(&registry, entry);
        assert_eq!(names(&registry, &order), ["main.js", "a.js", "c.js", "b.js"]);
    }

    #[test]
    fn test_diamond_appears_once() {
        let (_dir, root) = project(&[
            ("main.js", "import { a } from './a.js';\nimport { b } from './b.js';\nconsole.log(a + b);"),
            ("a.js", "import { c } from './c.js';\nexport const a = c + 1;"),
            ("b.js", "import { c } from './c.js';\nexport const b = c + 2;"),
            ("c.js", "export const c = 'only once';"),
        ]);
        let mut registry = ModuleRegistry::default();
        let entry = registry.build_graph(&root.join("main.js")).unwrap();
        let bundle = bundle(&mut registry, entry, &BundleOptions::default()).unwrap();

        assert_eq!(bundle.module_count, 4);
        assert_eq!(bundle.artifacts.len(), 1);
        let script = &bundle.artifact("bundle.js").unwrap().content;
        assert_eq!(script.matches("\"only once\"").count(), 1);
        let c_key = format!("{}: function", crate::code::string_literal(&root.join("c.js").to_string_lossy()));
        assert_eq!(script.matches(&c_key).count(), 1);
    }

    #[test]
    fn test_html_shell_and_bundle_name() {
        let (_dir, root) = project(&[("main.js", "console.log(1);")]);
        let mut registry = ModuleRegistry::default();
        let entry = registry.build_graph(&root.join("main.js")).unwrap();
        let options = BundleOptions {
            bundle_name: "app.js".to_string(),
            html_template: Some("<body></body>".to_string()),
        };
        let bundle = bundle(&mut registry, entry, &options).unwrap();

        let names: Vec<_> = bundle.artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["app.js", "index.html"]);
        assert_eq!(
            bundle.artifact("index.html").unwrap().content,
            "<body><script src=\"/app.js\"></script>\n</body>"
        );
    }
}
