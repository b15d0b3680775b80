// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Script modules: import/export syntax → loader protocol.
//!
//! Rewriting happens in two passes over an owned tree:
//!
//! 1. Module items are rewritten. Each imported module gets one
//!    `const _stem = require("<id>");` binding at its first import, and
//!    every export becomes an assignment onto `exports`. Imports and
//!    re-exports move to the top in source order, so dependencies finish
//!    evaluating before any statement of the importer runs. Assignments for
//!    `export { a, b }` lists run after the module body so they never read
//!    a binding before its declaration.
//! 2. [`ImportRewriter`] replaces each reference to an imported name with a
//!    property read on its loader binding, so reads observe the exporting
//!    module's current value.

use super::scope::{ImportBinding, ImportRewriter, property};
use crate::error::{BundleError, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use spacey_syntax::ast::*;
use spacey_syntax::visit::{Fold, Visit, pattern_names};
use std::path::{Path, PathBuf};

/// Names generated code relies on
const LOADER_NAMES: &[&str] = &["exports", "require"];

/// Rewrite the module at `path`. `resolved` maps every specifier in the
/// module to the absolute id of its target.
pub fn transform_script(
    path: &Path,
    program: Program,
    resolved: &FxHashMap<String, PathBuf>,
) -> Result<Program> {
    let mut used = UsedNames::default();
    used.visit_program(&program);

    let mut items = ModuleItems::new(path, resolved, used.0);
    let body = items.rewrite(program.body)?;

    let mut rewriter = ImportRewriter::new(&items.bindings);
    Ok(rewriter.fold_program(Program { body }))
}

/// Every identifier that appears in the module, for fresh-name allocation
#[derive(Default)]
struct UsedNames(FxHashSet<String>);

impl Visit for UsedNames {
    fn visit_identifier(&mut self, id: &Identifier) {
        self.0.insert(id.name.clone());
    }
}

struct ModuleItems<'a> {
    path: &'a Path,
    resolved: &'a FxHashMap<String, PathBuf>,
    taken: FxHashSet<String>,
    /// Modules already required, with their loader binding if one exists
    loaded: FxHashMap<PathBuf, Option<String>>,
    bindings: FxHashMap<String, ImportBinding>,
    /// Assignments that run after the module body
    trailing: Vec<Statement>,
    key_name: Option<String>,
}

impl<'a> ModuleItems<'a> {
    fn new(path: &'a Path, resolved: &'a FxHashMap<String, PathBuf>, mut taken: FxHashSet<String>) -> Self {
        taken.extend(LOADER_NAMES.iter().map(|name| name.to_string()));
        Self {
            path,
            resolved,
            taken,
            loaded: FxHashMap::default(),
            bindings: FxHashMap::default(),
            trailing: Vec::new(),
            key_name: None,
        }
    }

    fn rewrite(&mut self, body: Vec<Statement>) -> Result<Vec<Statement>> {
        let mut hoisted = Vec::new();
        let mut out = Vec::with_capacity(body.len());
        for stmt in body {
            match stmt {
                Statement::Import(import) => self.import(import, &mut hoisted)?,
                Statement::ExportNamed(export) if export.source.is_some() => {
                    self.reexport(export, &mut hoisted)?
                }
                Statement::ExportNamed(export) => self.export_named(export, &mut out)?,
                Statement::ExportDefault(export) => self.export_default(export, &mut out),
                Statement::ExportAll(export) => self.export_all(export, &mut hoisted)?,
                other => out.push(other),
            }
        }
        hoisted.append(&mut out);
        hoisted.append(&mut self.trailing);
        Ok(hoisted)
    }

    fn import(&mut self, import: ImportDeclaration, out: &mut Vec<Statement>) -> Result<()> {
        let id = self.resolve(&import.source)?;
        if import.specifiers.is_empty() {
            self.require(id, out);
            return Ok(());
        }

        let object = self.require_bound(id, &import.source, out);
        for specifier in import.specifiers {
            let (local, key) = match specifier {
                ImportSpecifier::Default(local) => (local, Some("default".to_string())),
                ImportSpecifier::Namespace(local) => (local, None),
                ImportSpecifier::Named { imported, local } => (local, Some(imported)),
            };
            self.bindings.insert(
                local.name,
                ImportBinding {
                    object: object.clone(),
                    key,
                },
            );
        }
        Ok(())
    }

    fn export_named(&mut self, export: ExportNamedDeclaration, out: &mut Vec<Statement>) -> Result<()> {
        if let Some(declaration) = export.declaration {
            let names = declared_export_names(&declaration).ok_or_else(|| {
                BundleError::transform(self.path, "export declaration does not declare a binding")
            })?;
            out.push(*declaration);
            for name in names {
                let value = Expression::ident(&name);
                out.push(export_assignment(&name, value));
            }
            return Ok(());
        }

        for specifier in export.specifiers {
            let value = Expression::ident(specifier.local);
            self.trailing.push(export_assignment(&specifier.exported, value));
        }
        Ok(())
    }

    /// `export { a as b } from "..."`
    fn reexport(&mut self, export: ExportNamedDeclaration, out: &mut Vec<Statement>) -> Result<()> {
        let Some(source) = export.source else {
            return Ok(());
        };
        let id = self.resolve(&source)?;
        if export.specifiers.is_empty() {
            self.require(id, out);
            return Ok(());
        }
        let object = self.require_bound(id, &source, out);
        for specifier in export.specifiers {
            let value = property(Expression::ident(&object), &specifier.local);
            out.push(export_assignment(&specifier.exported, value));
        }
        Ok(())
    }

    fn export_default(&mut self, export: ExportDefaultDeclaration, out: &mut Vec<Statement>) {
        let value = match export {
            ExportDefaultDeclaration::Function(func) => match func.id.as_ref().map(|id| id.name.clone()) {
                Some(name) => {
                    out.push(Statement::FunctionDeclaration(func));
                    Expression::ident(name)
                }
                None => Expression::Function(func),
            },
            ExportDefaultDeclaration::Class(class) => match class.id.as_ref().map(|id| id.name.clone()) {
                Some(name) => {
                    out.push(Statement::ClassDeclaration(class));
                    Expression::ident(name)
                }
                None => Expression::Class(class),
            },
            ExportDefaultDeclaration::Expression(expression) => expression,
        };
        out.push(export_assignment("default", value));
    }

    fn export_all(&mut self, export: ExportAllDeclaration, out: &mut Vec<Statement>) -> Result<()> {
        let id = self.resolve(&export.source)?;
        let object = self.require_bound(id, &export.source, out);
        if let Some(name) = export.exported {
            out.push(export_assignment(&name, Expression::ident(&object)));
            return Ok(());
        }

        let key = match &self.key_name {
            Some(key) => key.clone(),
            None => {
                let key = self.fresh_name("_key");
                self.key_name = Some(key.clone());
                key
            }
        };
        let source = format!(
            "for (const {key} of Object.keys({object})) {{\n\
             \x20 if ({key} !== \"default\" && !Object.prototype.hasOwnProperty.call(exports, {key})) {{\n\
             \x20   exports[{key}] = {object}[{key}];\n\
             \x20 }}\n\
             }}\n"
        );
        let program = spacey_syntax::parse_module(&source)
            .map_err(|err| BundleError::transform(self.path, err.to_string()))?;
        out.extend(program.body);
        Ok(())
    }

    fn resolve(&self, specifier: &str) -> Result<PathBuf> {
        self.resolved.get(specifier).cloned().ok_or_else(|| {
            BundleError::transform(self.path, format!("import '{specifier}' was never resolved"))
        })
    }

    /// Evaluate `id` without binding its exports
    fn require(&mut self, id: PathBuf, out: &mut Vec<Statement>) {
        if self.loaded.contains_key(&id) {
            return;
        }
        out.push(Statement::expression(require_call(&id)));
        self.loaded.insert(id, None);
    }

    /// The local bound to `id`'s exports, declaring it on first use
    fn require_bound(&mut self, id: PathBuf, specifier: &str, out: &mut Vec<Statement>) -> String {
        if let Some(Some(object)) = self.loaded.get(&id) {
            return object.clone();
        }
        let object = self.fresh_name(&binding_stem(specifier));
        out.push(Statement::constant(&object, require_call(&id)));
        self.loaded.insert(id, Some(object.clone()));
        object
    }

    /// `base`, or `base` with the smallest suffix from 2 up that no
    /// identifier in the module uses
    fn fresh_name(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}{suffix}");
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// `_stem` from the file stem of `specifier`, reduced to ASCII identifier
/// characters
fn binding_stem(specifier: &str) -> String {
    let stem = Path::new(specifier)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let cleaned: String = stem
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '$' { ch } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "_module".to_string()
    } else {
        format!("_{cleaned}")
    }
}

fn require_call(id: &Path) -> Expression {
    Expression::call(
        Expression::ident("require"),
        vec![Expression::string(id.to_string_lossy())],
    )
}

/// `exports.<name> = value;`
fn export_assignment(name: &str, value: Expression) -> Statement {
    Statement::expression(Expression::assign(
        property(Expression::ident("exports"), name),
        value,
    ))
}

/// Names bound by an exported declaration, in declaration order
fn declared_export_names(declaration: &Statement) -> Option<Vec<String>> {
    match declaration {
        Statement::VariableDeclaration(decl) => {
            let mut names = Vec::new();
            for declarator in &decl.declarations {
                pattern_names(&declarator.id, &mut names);
            }
            Some(names)
        }
        Statement::FunctionDeclaration(Function { id: Some(id), .. })
        | Statement::ClassDeclaration(Class { id: Some(id), .. }) => Some(vec![id.name.clone()]),
        _ => None,
    }
}
