// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Per-build module registry and graph discovery.
//!
//! A module is registered before its dependencies are scanned. A cycle
//! therefore finds the module already cached and discovery terminates.

use crate::error::{BundleError, Result};
use crate::module::{Module, ModuleIndex, ModuleKind};
use crate::resolver::Resolver;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Who asked for a module, for error reporting
#[derive(Debug, Clone, Copy)]
struct Request<'a> {
    importer: &'a Path,
    specifier: &'a str,
}

/// Owns every module of one build
#[derive(Debug)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
    by_id: FxHashMap<PathBuf, ModuleIndex>,
    resolver: Resolver,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new(resolver: Resolver) -> Self {
        Self {
            modules: Vec::new(),
            by_id: FxHashMap::default(),
            resolver,
        }
    }

    /// Discover the graph reachable from `entry`, which must be absolute.
    /// Returns the entry module's index.
    pub fn build_graph(&mut self, entry: &Path) -> Result<ModuleIndex> {
        let (root, created) = self.get_or_create(entry.to_path_buf(), None)?;
        let mut pending = if created { vec![root] } else { Vec::new() };

        while let Some(index) = pending.pop() {
            let importer = self.modules[index.0].id.clone();
            let specifiers: Vec<String> = self.modules[index.0]
                .import_specifiers()
                .into_iter()
                .map(str::to_string)
                .collect();

            let mut dependencies = Vec::with_capacity(specifiers.len());
            let mut resolved = FxHashMap::default();
            for specifier in specifiers {
                let id = self.resolver.resolve(&importer, &specifier)?;
                let request = Request {
                    importer: &importer,
                    specifier: &specifier,
                };
                let (dependency, created) = self.get_or_create(id.clone(), Some(request))?;
                if created {
                    pending.push(dependency);
                }
                if !dependencies.contains(&dependency) {
                    dependencies.push(dependency);
                }
                resolved.insert(specifier, id);
            }

            let module = &mut self.modules[index.0];
            module.dependencies = dependencies;
            module.resolved = resolved;
        }

        Ok(root)
    }

    /// Return the module for `id`, loading and registering it on first use.
    /// The flag is true when the module was created by this call.
    fn get_or_create(&mut self, id: PathBuf, request: Option<Request<'_>>) -> Result<(ModuleIndex, bool)> {
        if let Some(&index) = self.by_id.get(&id) {
            debug!(module = %id.display(), "module cache hit");
            return Ok((index, false));
        }

        let kind = ModuleKind::from_path(&id)?;
        let source = std::fs::read_to_string(&id).map_err(|err| match request {
            Some(request) if err.kind() == std::io::ErrorKind::NotFound => BundleError::Resolution {
                specifier: request.specifier.to_string(),
                importer: request.importer.to_path_buf(),
            },
            _ => BundleError::io(&id, err),
        })?;
        let tree = match kind {
            ModuleKind::Script => Some(
                spacey_syntax::parse_module(&source).map_err(|source| BundleError::Parse {
                    path: id.clone(),
                    source,
                })?,
            ),
            ModuleKind::Style => None,
        };

        let index = ModuleIndex(self.modules.len());
        debug!(module = %id.display(), ?kind, "registered module");
        self.by_id.insert(id.clone(), index);
        self.modules.push(Module::new(id, kind, source, tree));
        Ok((index, true))
    }

    /// The module at `index`
    pub fn module(&self, index: ModuleIndex) -> &Module {
        &self.modules[index.0]
    }

    /// Mutable access to the module at `index`
    pub fn module_mut(&mut self, index: ModuleIndex) -> &mut Module {
        &mut self.modules[index.0]
    }

    /// Look up a module by absolute id
    pub fn index_of(&self, id: &Path) -> Option<ModuleIndex> {
        self.by_id.get(id).copied()
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// True if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// All modules in registration order
    pub fn modules(&self) -> impl Iterator<Item = (ModuleIndex, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(index, module)| (ModuleIndex(index), module))
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(Resolver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

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

    fn dependency_ids(registry: &ModuleRegistry, index: ModuleIndex) -> Vec<PathBuf> {
        registry
            .module(index)
            .dependencies
            .iter()
            .map(|dep| registry.module(*dep).id.clone())
            .collect()
    }

    #[test]
    fn test_diamond_is_deduplicated() {
        let (_dir, root) = project(&[
            ("main.js", "import './a.js';\nimport './b.js';"),
            ("a.js", "import { c } from './c.js';"),
            ("b.js", "import { c } from './shared/../c.js';"),
            ("c.js", "export const c = 1;"),
        ]);
        let mut registry = ModuleRegistry::default();
        let entry = registry.build_graph(&root.join("main.js")).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(dependency_ids(&registry, entry), [root.join("a.js"), root.join("b.js")]);
        let a = registry.index_of(&root.join("a.js")).unwrap();
        let b = registry.index_of(&root.join("b.js")).unwrap();
        assert_eq!(registry.module(a).dependencies, registry.module(b).dependencies);
    }

    #[test]
    fn test_cycle_terminates() {
        let (_dir, root) = project(&[
            ("a.js", "import { b } from './b.js';\nexport const a = 1;"),
            ("b.js", "import { a } from './a.js';\nexport const b = 2;"),
        ]);
        let mut registry = ModuleRegistry::default();
        let a = registry.build_graph(&root.join("a.js")).unwrap();
        let b = registry.index_of(&root.join("b.js")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.module(a).dependencies, [b]);
        assert_eq!(registry.module(b).dependencies, [a]);
    }

    #[test]
    fn test_self_import() {
        let (_dir, root) = project(&[("a.js", "import * as self from './a.js';")]);
        let mut registry = ModuleRegistry::default();
        let a = registry.build_graph(&root.join("a.js")).unwrap();
        assert_eq!(registry.module(a).dependencies, [a]);
    }

    #[test]
    fn test_resolved_map_and_style_dependencies() {
        let (_dir, root) = project(&[
            ("main.js", "import './styles/site.css';\nexport * from './lib.js';"),
            ("lib.js", "export const x = 1;"),
            ("styles/site.css", "@import './other.css';\nbody { color: red; }"),
        ]);
        let mut registry = ModuleRegistry::default();
        let entry = registry.build_graph(&root.join("main.js")).unwrap();

        let main = registry.module(entry);
        assert_eq!(main.resolved["./styles/site.css"], root.join("styles/site.css"));
        assert_eq!(main.resolved["./lib.js"], root.join("lib.js"));

        let style = registry.index_of(&root.join("styles/site.css")).unwrap();
        assert_eq!(registry.module(style).kind, ModuleKind::Style);
        assert!(registry.module(style).dependencies.is_empty());
        assert!(registry.module(style).tree.is_none());
    }

    #[test]
    fn test_missing_file_names_the_importer() {
        let (_dir, root) = project(&[("main.js", "import x from './missing.js';")]);
        let mut registry = ModuleRegistry::default();
        let err = registry.build_graph(&root.join("main.js")).unwrap_err();
        match err {
            BundleError::Resolution { specifier, importer } => {
                assert_eq!(specifier, "./missing.js");
                assert_eq!(importer, root.join("main.js"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_and_parse_errors() {
        let (_dir, root) = project(&[
            ("main.js", "import data from './data.json';"),
            ("data.json", "{}"),
            ("broken.js", "export const = 1;"),
        ]);
        let mut registry = ModuleRegistry::default();
        let err = registry.build_graph(&root.join("main.js")).unwrap_err();
        assert!(matches!(err, BundleError::UnsupportedModuleKind { .. }));

        let mut registry = ModuleRegistry::default();
        let err = registry.build_graph(&root.join("broken.js")).unwrap_err();
        assert!(matches!(err, BundleError::Parse { .. }));
        assert!(err.to_string().contains("SyntaxError"), "{err}");
    }
}
