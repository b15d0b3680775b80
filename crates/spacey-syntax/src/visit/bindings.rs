// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Binding collection for scope analysis.

use rustc_hash::FxHashSet;

use crate::ast::*;

/// Appends every name bound by `pattern` to `names`.
pub fn pattern_names(pattern: &Pattern, names: &mut Vec<String>) {
    match pattern {
        Pattern::Identifier(id) => names.push(id.name.clone()),
        Pattern::Object(object) => {
            for property in &object.properties {
                match property {
                    ObjectPatternProperty::Property { value, .. } => pattern_names(value, names),
                    ObjectPatternProperty::Rest(rest) => pattern_names(rest, names),
                }
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                pattern_names(element, names);
            }
        }
        Pattern::Assign(assign) => pattern_names(&assign.left, names),
        Pattern::Rest(argument) => pattern_names(argument, names),
        Pattern::Expression(_) => {}
    }
}

/// Names declared directly in a block: `let`, `const`, classes, functions
/// and, at module level, import bindings.
pub fn lexically_declared_names(body: &[Statement]) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for stmt in body {
        collect_lexical(stmt, &mut names);
    }
    names
}

fn collect_lexical(stmt: &Statement, names: &mut FxHashSet<String>) {
    match stmt {
        Statement::VariableDeclaration(decl) if decl.kind != VariableKind::Var => {
            let mut bound = Vec::new();
            for declarator in &decl.declarations {
                pattern_names(&declarator.id, &mut bound);
            }
            names.extend(bound);
        }
        Statement::FunctionDeclaration(Function { id: Some(id), .. })
        | Statement::ClassDeclaration(Class { id: Some(id), .. })
        | Statement::ExportDefault(ExportDefaultDeclaration::Function(Function {
            id: Some(id),
            ..
        }))
        | Statement::ExportDefault(ExportDefaultDeclaration::Class(Class {
            id: Some(id), ..
        })) => {
            names.insert(id.name.clone());
        }
        Statement::ExportNamed(ExportNamedDeclaration {
            declaration: Some(declaration),
            ..
        }) => collect_lexical(declaration, names),
        Statement::Import(import) => {
            for specifier in &import.specifiers {
                match specifier {
                    ImportSpecifier::Default(local)
                    | ImportSpecifier::Namespace(local)
                    | ImportSpecifier::Named { local, .. } => {
                        names.insert(local.name.clone());
                    }
                }
            }
        }
        _ => {}
    }
}

/// Every name declared in a function or module body: the lexical names of
/// the body plus `var` names hoisted out of nested blocks.
pub fn declared_names(body: &[Statement]) -> FxHashSet<String> {
    let mut names = lexically_declared_names(body);
    let mut hoisted = Vec::new();
    for stmt in body {
        collect_var(stmt, &mut hoisted);
    }
    names.extend(hoisted);
    names
}

fn collect_var_declaration(decl: &VariableDeclaration, names: &mut Vec<String>) {
    if decl.kind == VariableKind::Var {
        for declarator in &decl.declarations {
            pattern_names(&declarator.id, names);
        }
    }
}

/// `var` declarations reachable without crossing a function boundary.
fn collect_var(stmt: &Statement, names: &mut Vec<String>) {
    match stmt {
        Statement::VariableDeclaration(decl) => collect_var_declaration(decl, names),
        Statement::Block(block) => block.body.iter().for_each(|s| collect_var(s, names)),
        Statement::If(stmt) => {
            collect_var(&stmt.consequent, names);
            if let Some(alternate) = &stmt.alternate {
                collect_var(alternate, names);
            }
        }
        Statement::Switch(stmt) => {
            for case in &stmt.cases {
                case.consequent.iter().for_each(|s| collect_var(s, names));
            }
        }
        Statement::While(WhileStatement { body, .. })
        | Statement::DoWhile(DoWhileStatement { body, .. }) => collect_var(body, names),
        Statement::For(stmt) => {
            if let Some(ForInit::Declaration(decl)) = &stmt.init {
                collect_var_declaration(decl, names);
            }
            collect_var(&stmt.body, names);
        }
        Statement::ForIn(ForInStatement { left, body, .. })
        | Statement::ForOf(ForOfStatement { left, body, .. }) => {
            if let ForInLeft::Declaration(decl) = left {
                collect_var_declaration(decl, names);
            }
            collect_var(body, names);
        }
        Statement::Try(stmt) => {
            stmt.block.body.iter().for_each(|s| collect_var(s, names));
            if let Some(handler) = &stmt.handler {
                handler.body.body.iter().for_each(|s| collect_var(s, names));
            }
            if let Some(finalizer) = &stmt.finalizer {
                finalizer.body.iter().for_each(|s| collect_var(s, names));
            }
        }
        Statement::Labeled(stmt) => collect_var(&stmt.body, names),
        Statement::ExportNamed(ExportNamedDeclaration {
            declaration: Some(declaration),
            ..
        }) => collect_var(declaration, names),
        _ => {}
    }
}
