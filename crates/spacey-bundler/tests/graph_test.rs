// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Graph discovery and bundling through the public API

use spacey_bundler::{
    BundleError, BundleOptions, ModuleKind, ModuleRegistry, Resolver, bundle, collect_modules,
};
use std::fs;
use std::path::{Path, PathBuf};

fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    for (name, content) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    (dir, root)
}

fn relative(root: &Path, registry: &ModuleRegistry, order: &[spacey_bundler::ModuleIndex]) -> Vec<String> {
    order
        .iter()
        .map(|&index| {
            let id = &registry.module(index).id;
            id.strip_prefix(root).unwrap().to_string_lossy().into_owned()
        })
        .collect()
}

#[test]
fn test_mixed_graph() {
    let (_dir, root) = project(&[
        ("src/main.js", "import './styles/app.css';\nimport { view } from './ui/view.js';\nview();"),
        ("src/styles/app.css", "h1 { margin: 0; }"),
        (
            "src/ui/view.js",
            "import { h } from 'tiny-dom';\nimport '../styles/app.css';\nexport const view = () => h('h1');",
        ),
        ("node_modules/tiny-dom/package.json", "{ \"module\": \"esm/index.mjs\", \"main\": \"cjs/index.cjs\" }"),
        ("node_modules/tiny-dom/esm/index.mjs", "export function h(tag) { return tag; }"),
    ]);

    let mut registry = ModuleRegistry::default();
    let entry = registry.build_graph(&root.join("src/main.js")).unwrap();
    assert_eq!(registry.len(), 4);

    let order = collect_modules(&registry, entry);
    assert_eq!(
        relative(&root, &registry, &order),
        [
            "src/main.js",
            "src/styles/app.css",
            "src/ui/view.js",
            "node_modules/tiny-dom/esm/index.mjs"
        ]
    );

    let css = registry.index_of(&root.join("src/styles/app.css")).unwrap();
    assert_eq!(registry.module(css).kind, ModuleKind::Style);
    assert!(registry.module(css).tree.is_none());
}

#[test]
fn test_cycle_bundles_each_module_once() {
    let (_dir, root) = project(&[
        ("a.js", "import { b } from './b.js';\nexport const a = 1;"),
        ("b.js", "import { a } from './a.js';\nexport const b = 2;"),
    ]);

    let mut registry = ModuleRegistry::default();
    let entry = registry.build_graph(&root.join("a.js")).unwrap();
    let bundle = bundle(&mut registry, entry, &BundleOptions::default()).unwrap();

    assert_eq!(bundle.module_count, 2);
    let script = &bundle.artifact("bundle.js").unwrap().content;
    assert_eq!(script.matches(": function(exports, require) {").count(), 2);
    assert_eq!(script.matches("exports.a = a;").count(), 1);
}

#[test]
fn test_import_sites_agree_with_module_map() {
    let (_dir, root) = project(&[
        ("main.js", "import value from './lib/../lib/value.js';\nconsole.log(value);"),
        ("lib/value.js", "export default 42;"),
    ]);

    let mut registry = ModuleRegistry::default();
    let entry = registry.build_graph(&root.join("main.js")).unwrap();
    let bundle = bundle(&mut registry, entry, &BundleOptions::default()).unwrap();
    let script = &bundle.artifact("bundle.js").unwrap().content;

    let id = serde_json::to_string(&root.join("lib/value.js").to_string_lossy()).unwrap();
    assert!(script.contains(&format!("require({id})")), "{script}");
    assert!(script.contains(&format!("{id}: function(exports, require) {{")), "{script}");
}

#[test]
fn test_custom_extensions_limit_package_probing() {
    let (_dir, root) = project(&[
        ("main.js", "import 'pkg';"),
        ("node_modules/pkg/index.css", "p {}"),
    ]);

    let mut registry = ModuleRegistry::new(Resolver::new(vec![".js".to_string()]));
    let err = registry.build_graph(&root.join("main.js")).unwrap_err();
    assert!(matches!(err, BundleError::Resolution { ref specifier, .. } if specifier == "pkg"));

    let mut registry = ModuleRegistry::default();
    registry.build_graph(&root.join("main.js")).unwrap();
    assert_eq!(registry.len(), 2);
}
