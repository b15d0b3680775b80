// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module records

use crate::error::{BundleError, Result};
use rustc_hash::FxHashMap;
use spacey_syntax::ast::{ExportNamedDeclaration, Program, Statement};
use std::path::{Path, PathBuf};

/// What a module file contains, which decides how it is transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// JavaScript with import/export syntax
    Script,
    /// A stylesheet injected into the document when evaluated
    Style,
}

/// Extension → kind registration table
const MODULE_KINDS: &[(&str, ModuleKind)] = &[
    ("js", ModuleKind::Script),
    ("mjs", ModuleKind::Script),
    ("cjs", ModuleKind::Script),
    ("css", ModuleKind::Style),
];

impl ModuleKind {
    /// Look up the kind for `path` by its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str());
        MODULE_KINDS
            .iter()
            .find(|(ext, _)| Some(*ext) == extension)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| BundleError::UnsupportedModuleKind {
                path: path.to_path_buf(),
            })
    }
}

/// Position of a module in its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleIndex(pub(crate) usize);

impl ModuleIndex {
    /// The raw arena position
    pub fn index(self) -> usize {
        self.0
    }
}

/// One file of the dependency graph
#[derive(Debug, Clone)]
pub struct Module {
    /// Absolute path; unique within a registry
    pub id: PathBuf,
    /// Script or style
    pub kind: ModuleKind,
    /// The text read from disk
    pub source: String,
    /// Syntax tree, present for script modules
    pub tree: Option<Program>,
    /// Direct dependencies in source order, without repeats
    pub dependencies: Vec<ModuleIndex>,
    /// Specifier as written → absolute id of the module it names
    pub resolved: FxHashMap<String, PathBuf>,
    /// The loader function body, set by the transformer
    pub compiled: Option<String>,
}

impl Module {
    /// Create a module that has not been scanned or transformed yet
    pub fn new(id: PathBuf, kind: ModuleKind, source: String, tree: Option<Program>) -> Self {
        Self {
            id,
            kind,
            source,
            tree,
            dependencies: Vec::new(),
            resolved: FxHashMap::default(),
            compiled: None,
        }
    }

    /// The id as it appears in the module map
    pub fn id_string(&self) -> String {
        self.id.to_string_lossy().into_owned()
    }

    /// Specifiers of every static import and re-export, in source order.
    /// Style modules never have any.
    pub fn import_specifiers(&self) -> Vec<&str> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        tree.body
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::Import(import) => Some(import.source.as_str()),
                Statement::ExportNamed(ExportNamedDeclaration {
                    source: Some(source),
                    ..
                }) => Some(source.as_str()),
                Statement::ExportAll(export) => Some(export.source.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table() {
        assert_eq!(ModuleKind::from_path(Path::new("/a/b.js")).unwrap(), ModuleKind::Script);
        assert_eq!(ModuleKind::from_path(Path::new("/a/b.mjs")).unwrap(), ModuleKind::Script);
        assert_eq!(ModuleKind::from_path(Path::new("/a/b.cjs")).unwrap(), ModuleKind::Script);
        assert_eq!(ModuleKind::from_path(Path::new("/a/b.css")).unwrap(), ModuleKind::Style);
    }

    #[test]
    fn test_unknown_extensions_fail() {
        for path in ["/a/b.ts", "/a/b", "/a/b.JS", "/a/b.json"] {
            let err = ModuleKind::from_path(Path::new(path)).unwrap_err();
            assert!(matches!(err, BundleError::UnsupportedModuleKind { .. }), "{path}");
        }
    }

    #[test]
    fn test_import_specifiers_in_source_order() {
        let tree = spacey_syntax::parse_module(
            "import './reset.css';\n\
             export { a } from './a.js';\n\
             const x = 1;\n\
             import b from './b.js';\n\
             export * from './c.js';\n\
             export { x };",
        )
        .unwrap();
        let module = Module::new(PathBuf::from("/m.js"), ModuleKind::Script, String::new(), Some(tree));
        assert_eq!(
            module.import_specifiers(),
            ["./reset.css", "./a.js", "./b.js", "./c.js"]
        );
    }

    #[test]
    fn test_style_modules_have_no_specifiers() {
        let module = Module::new(
            PathBuf::from("/s.css"),
            ModuleKind::Style,
            "@import './other.css';".to_string(),
            None,
        );
        assert!(module.import_specifiers().is_empty());
    }
}
