// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Import specifier resolution.
//!
//! Relative (`./x`, `../x`) and absolute (`/x`) specifiers are joined
//! lexically against the importing file's directory without touching the
//! file system. Anything else is a package specifier and is looked up in
//! the `node_modules` directories above the importer. A package's
//! `"exports"` field is consulted first, then `"module"`, `"main"` and
//! `index` files.

use crate::error::{BundleError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Extensions probed for package subpaths and entry points
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs", ".css"];

/// Conditions accepted in `"exports"` targets, in priority order
const EXPORT_CONDITIONS: &[&str] = &["browser", "import", "module", "default"];

/// The fields of `package.json` that select an entry point
#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    exports: Option<Value>,
    module: Option<String>,
    main: Option<String>,
}

/// Maps `(importer, specifier)` pairs to absolute module ids
#[derive(Debug, Clone)]
pub struct Resolver {
    /// File extensions to try, each with a leading dot
    extensions: Vec<String>,
}

impl Resolver {
    /// Create a resolver that probes the given extensions
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Resolve `specifier` as written in the module at `importer`
    pub fn resolve(&self, importer: &Path, specifier: &str) -> Result<PathBuf> {
        let base = importer.parent().unwrap_or(Path::new("/"));

        if is_path_specifier(specifier) {
            let resolved = join_lexical(base, specifier);
            debug!(specifier, resolved = %resolved.display(), "resolved path specifier");
            return Ok(resolved);
        }

        let resolved = self
            .resolve_package(base, specifier)
            .ok_or_else(|| BundleError::Resolution {
                specifier: specifier.to_string(),
                importer: importer.to_path_buf(),
            })?;
        let canonical = resolved
            .canonicalize()
            .map_err(|err| BundleError::io(&resolved, err))?;
        debug!(specifier, resolved = %canonical.display(), "resolved package specifier");
        Ok(canonical)
    }

    /// Walk up from `start`, looking in each `node_modules` directory
    fn resolve_package(&self, start: &Path, specifier: &str) -> Option<PathBuf> {
        let (package_name, subpath) = parse_package_specifier(specifier);

        for dir in start.ancestors() {
            let package_dir = dir.join("node_modules").join(package_name);
            if !package_dir.is_dir() {
                continue;
            }
            if let Some(hit) = self.resolve_exports(&package_dir, subpath) {
                return Some(hit);
            }
            let hit = match subpath {
                Some(sub) => self.resolve_file_or_directory(&package_dir.join(sub)),
                None => self.resolve_directory(&package_dir),
            };
            if hit.is_some() {
                return hit;
            }
        }
        None
    }

    /// The `"exports"` entry for `"."` or `"./<subpath>"`, when the
    /// manifest has one
    fn resolve_exports(&self, package_dir: &Path, subpath: Option<&str>) -> Option<PathBuf> {
        let manifest = read_package_json(&package_dir.join("package.json"));
        let key = subpath.map_or_else(|| ".".to_string(), |sub| format!("./{sub}"));
        let target = export_target(manifest.exports.as_ref()?, &key)?;
        if !target.starts_with("./") {
            return None;
        }
        self.resolve_file(&join_lexical(package_dir, target))
    }

    fn resolve_file_or_directory(&self, path: &Path) -> Option<PathBuf> {
        self.resolve_file(path)
            .or_else(|| path.is_dir().then(|| self.resolve_directory(path)).flatten())
    }

    /// The path itself, then the path with each extension appended
    fn resolve_file(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        self.extensions.iter().find_map(|ext| {
            let mut candidate = path.as_os_str().to_os_string();
            candidate.push(ext);
            let candidate = PathBuf::from(candidate);
            candidate.is_file().then_some(candidate)
        })
    }

    /// `package.json` "module", then "main", then `index` + extension
    fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
        let manifest = read_package_json(&dir.join("package.json"));
        for entry in [manifest.module, manifest.main].into_iter().flatten() {
            let entry_path = join_lexical(dir, &entry);
            if let Some(hit) = self.resolve_file(&entry_path) {
                return Some(hit);
            }
            if entry_path.is_dir() {
                if let Some(hit) = self.resolve_index(&entry_path) {
                    return Some(hit);
                }
            }
        }
        self.resolve_index(dir)
    }

    fn resolve_index(&self, dir: &Path) -> Option<PathBuf> {
        self.extensions.iter().find_map(|ext| {
            let candidate = dir.join(format!("index{}", ext));
            candidate.is_file().then_some(candidate)
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
    }
}

/// A missing or malformed manifest selects nothing
fn read_package_json(path: &Path) -> PackageJson {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

/// The target `exports` maps `key` to. A string or a conditions object
/// only describes the package root `"."`.
fn export_target<'a>(exports: &'a Value, key: &str) -> Option<&'a str> {
    match exports {
        Value::Object(map) if map.keys().any(|k| k.starts_with('.')) => condition_target(map.get(key)?),
        Value::String(_) | Value::Object(_) if key == "." => condition_target(exports),
        _ => None,
    }
}

fn condition_target(value: &Value) -> Option<&str> {
    match value {
        Value::String(target) => Some(target.as_str()),
        Value::Object(map) => EXPORT_CONDITIONS
            .iter()
            .find_map(|condition| map.get(*condition).and_then(condition_target)),
        Value::Array(targets) => targets.iter().find_map(condition_target),
        _ => None,
    }
}

/// True for specifiers resolved against the file system directly
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

/// Join `specifier` onto `base`, dropping `.` segments and letting `..`
/// remove the previous segment. An absolute specifier replaces `base`.
pub fn join_lexical(base: &Path, specifier: &str) -> PathBuf {
    let mut joined = PathBuf::new();
    for component in base.join(specifier).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !joined.pop() && !joined.has_root() {
                    joined.push(component);
                }
            }
            other => joined.push(other),
        }
    }
    joined
}

/// Split a package specifier into the package name and optional subpath
fn parse_package_specifier(specifier: &str) -> (&str, Option<&str>) {
    let name_end = if specifier.starts_with('@') {
        // @scope/name[/subpath]
        match specifier.find('/') {
            Some(scope_end) => specifier[scope_end + 1..]
                .find('/')
                .map(|offset| scope_end + 1 + offset),
            None => None,
        }
    } else {
        specifier.find('/')
    };

    match name_end {
        Some(end) => (&specifier[..end], Some(&specifier[end + 1..])),
        None => (specifier, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_relative_join() {
        let resolver = Resolver::default();
        let importer = Path::new("/p/a.js");
        assert_eq!(resolver.resolve(importer, "./b.js").unwrap(), PathBuf::from("/p/b.js"));
        assert_eq!(
            resolver.resolve(importer, "../lib/./c.js").unwrap(),
            PathBuf::from("/lib/c.js")
        );
        assert_eq!(
            resolver.resolve(Path::new("/p/q/a.js"), "./r/../s.css").unwrap(),
            PathBuf::from("/p/q/s.css")
        );
    }

    #[test]
    fn test_absolute_and_root_parent() {
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(Path::new("/p/a.js"), "/x/y.js").unwrap(),
            PathBuf::from("/x/y.js")
        );
        assert_eq!(join_lexical(Path::new("/"), "../../z.js"), PathBuf::from("/z.js"));
    }

    #[test]
    fn test_no_existence_check_for_paths() {
        let resolver = Resolver::default();
        let resolved = resolver.resolve(Path::new("/nowhere/a.js"), "./missing").unwrap();
        assert_eq!(resolved, PathBuf::from("/nowhere/missing"));
    }

    #[test]
    fn test_parse_package_specifier() {
        assert_eq!(parse_package_specifier("lodash"), ("lodash", None));
        assert_eq!(parse_package_specifier("lodash/fp/map"), ("lodash", Some("fp/map")));
        assert_eq!(parse_package_specifier("@scope/pkg"), ("@scope/pkg", None));
        assert_eq!(parse_package_specifier("@scope/pkg/sub.js"), ("@scope/pkg", Some("sub.js")));
    }

    #[test]
    fn test_package_entry_points() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let importer = root.join("src/deep/app.js");
        write_file(&importer, "");

        write_file(&root.join("node_modules/with-module/package.json"), r#"{"module": "esm/index.js", "main": "cjs.js"}"#);
        write_file(&root.join("node_modules/with-module/esm/index.js"), "");
        write_file(&root.join("node_modules/with-main/package.json"), r#"{"main": "lib/main"}"#);
        write_file(&root.join("node_modules/with-main/lib/main.js"), "");
        write_file(&root.join("node_modules/plain/index.mjs"), "");
        write_file(&root.join("src/node_modules/@scope/near/util.js"), "");

        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&importer, "with-module").unwrap(),
            root.join("node_modules/with-module/esm/index.js")
        );
        assert_eq!(
            resolver.resolve(&importer, "with-main").unwrap(),
            root.join("node_modules/with-main/lib/main.js")
        );
        assert_eq!(
            resolver.resolve(&importer, "plain").unwrap(),
            root.join("node_modules/plain/index.mjs")
        );
        assert_eq!(
            resolver.resolve(&importer, "@scope/near/util").unwrap(),
            root.join("src/node_modules/@scope/near/util.js")
        );
    }

    #[test]
    fn test_package_exports_field() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let importer = root.join("app.js");
        write_file(&importer, "");

        write_file(&root.join("node_modules/sugar/package.json"), r#"{"exports": "./dist/sugar.js", "main": "old.js"}"#);
        write_file(&root.join("node_modules/sugar/dist/sugar.js"), "");
        write_file(&root.join("node_modules/sugar/old.js"), "");
        write_file(
            &root.join("node_modules/split/package.json"),
            r#"{"exports": {".": {"require": "./cjs/index.cjs", "import": "./esm/index.mjs"}, "./extra": "./esm/extra.mjs"}, "main": "cjs/index.cjs"}"#,
        );
        write_file(&root.join("node_modules/split/cjs/index.cjs"), "");
        write_file(&root.join("node_modules/split/esm/index.mjs"), "");
        write_file(&root.join("node_modules/split/esm/extra.mjs"), "");
        write_file(&root.join("node_modules/split/lib/other.js"), "");
        write_file(&root.join("node_modules/sugared/package.json"), r#"{"exports": {"default": "./lib.js"}}"#);
        write_file(&root.join("node_modules/sugared/lib.js"), "");

        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&importer, "sugar").unwrap(),
            root.join("node_modules/sugar/dist/sugar.js")
        );
        assert_eq!(
            resolver.resolve(&importer, "split").unwrap(),
            root.join("node_modules/split/esm/index.mjs")
        );
        assert_eq!(
            resolver.resolve(&importer, "split/extra").unwrap(),
            root.join("node_modules/split/esm/extra.mjs")
        );
        assert_eq!(
            resolver.resolve(&importer, "split/lib/other").unwrap(),
            root.join("node_modules/split/lib/other.js")
        );
        assert_eq!(
            resolver.resolve(&importer, "sugared").unwrap(),
            root.join("node_modules/sugared/lib.js")
        );
    }

    #[test]
    fn test_missing_package_is_a_resolution_error() {
        let dir = tempfile::tempdir().unwrap();
        let importer = dir.path().join("app.js");
        let err = Resolver::default().resolve(&importer, "not-installed").unwrap_err();
        assert!(matches!(
            err,
            BundleError::Resolution { ref specifier, .. } if specifier == "not-installed"
        ));
    }
}
