// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Scope-aware rewriting of imported names.

use rustc_hash::{FxHashMap, FxHashSet};
use spacey_syntax::ast::*;
use spacey_syntax::codegen::is_identifier_name;
use spacey_syntax::visit::{self, Fold, declared_names, lexically_declared_names, pattern_names};

/// Where reads of an imported local name go
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportBinding {
    /// The local holding the loader-call result
    pub object: String,
    /// Exported key, or `None` for a namespace import
    pub key: Option<String>,
}

impl ImportBinding {
    /// The expression that replaces a reference to the import
    pub(crate) fn read(&self) -> Expression {
        let object = Expression::ident(&self.object);
        match &self.key {
            Some(key) => property(object, key),
            None => object,
        }
    }
}

/// `object.key`, or `object["key"]` when `key` is not an identifier name
pub(crate) fn property(object: Expression, key: &str) -> Expression {
    if is_identifier_name(key) {
        Expression::member(object, key)
    } else {
        Expression::computed_member(object, Expression::string(key))
    }
}

/// Replaces references to imported names with property reads on the
/// loader-call result, leaving names alone where an inner declaration
/// shadows them.
pub(crate) struct ImportRewriter<'a> {
    bindings: &'a FxHashMap<String, ImportBinding>,
    scopes: Vec<FxHashSet<String>>,
}

impl<'a> ImportRewriter<'a> {
    pub(crate) fn new(bindings: &'a FxHashMap<String, ImportBinding>) -> Self {
        Self {
            bindings,
            scopes: Vec::new(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a ImportBinding> {
        if self.scopes.iter().any(|scope| scope.contains(name)) {
            return None;
        }
        self.bindings.get(name)
    }

    fn scoped<T>(&mut self, names: FxHashSet<String>, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(names);
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Calls through a keyed import would otherwise receive the exports
    /// object as `this`.
    fn is_keyed_import(&self, callee: &Expression) -> bool {
        matches!(
            callee,
            Expression::Identifier(id) if self.lookup(&id.name).is_some_and(|b| b.key.is_some())
        )
    }
}

fn names_of<'p>(patterns: impl IntoIterator<Item = &'p Pattern>) -> FxHashSet<String> {
    let mut names = Vec::new();
    for pattern in patterns {
        pattern_names(pattern, &mut names);
    }
    names.into_iter().collect()
}

/// Bindings a `let`/`const` loop head introduces for the loop
fn loop_head_names(decl: &VariableDeclaration) -> Option<FxHashSet<String>> {
    (decl.kind != VariableKind::Var).then(|| names_of(decl.declarations.iter().map(|d| &d.id)))
}

impl Fold for ImportRewriter<'_> {
    fn fold_expression(&mut self, expression: Expression) -> Expression {
        match expression {
            Expression::Identifier(id) => match self.lookup(&id.name) {
                Some(binding) => binding.read(),
                None => Expression::Identifier(id),
            },
            Expression::Call(call) if self.is_keyed_import(&call.callee) => {
                let callee = self.fold_expression(*call.callee);
                let callee = Expression::Sequence(SequenceExpression {
                    expressions: vec![Expression::Literal(Literal::Number(0.0)), callee],
                });
                Expression::Call(CallExpression {
                    callee: Box::new(callee),
                    arguments: call
                        .arguments
                        .into_iter()
                        .map(|argument| self.fold_expression(argument))
                        .collect(),
                    optional: call.optional,
                })
            }
            other => visit::walk_expression(self, other),
        }
    }

    fn fold_statement(&mut self, stmt: Statement) -> Statement {
        let names = match &stmt {
            Statement::For(ForStatement {
                init: Some(ForInit::Declaration(decl)),
                ..
            })
            | Statement::ForIn(ForInStatement {
                left: ForInLeft::Declaration(decl),
                ..
            })
            | Statement::ForOf(ForOfStatement {
                left: ForInLeft::Declaration(decl),
                ..
            }) => loop_head_names(decl),
            Statement::Switch(switch) => Some(
                switch
                    .cases
                    .iter()
                    .flat_map(|case| lexically_declared_names(&case.consequent))
                    .collect(),
            ),
            _ => None,
        };

        match names {
            Some(names) => self.scoped(names, |this| visit::walk_statement(this, stmt)),
            None => visit::walk_statement(self, stmt),
        }
    }

    fn fold_block(&mut self, body: Vec<Statement>) -> Vec<Statement> {
        let names = lexically_declared_names(&body);
        self.scoped(names, |this| this.fold_statements(body))
    }

    fn fold_function(&mut self, func: Function) -> Function {
        let mut names = names_of(&func.params);
        names.extend(declared_names(&func.body));
        if let Some(id) = &func.id {
            names.insert(id.name.clone());
        }
        self.scoped(names, |this| visit::walk_function(this, func))
    }

    fn fold_arrow(&mut self, arrow: ArrowFunctionExpression) -> ArrowFunctionExpression {
        let mut names = names_of(&arrow.params);
        if let ArrowBody::Block(body) = &arrow.body {
            names.extend(declared_names(body));
        }
        self.scoped(names, |this| visit::walk_arrow(this, arrow))
    }

    fn fold_class(&mut self, class: Class) -> Class {
        let names = class.id.iter().map(|id| id.name.clone()).collect();
        self.scoped(names, |this| visit::walk_class(this, class))
    }

    fn fold_catch_clause(&mut self, clause: CatchClause) -> CatchClause {
        let names = names_of(&clause.param);
        self.scoped(names, |this| visit::walk_catch_clause(this, clause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(source: &str) -> String {
        let mut bindings = FxHashMap::default();
        bindings.insert(
            "x".to_string(),
            ImportBinding {
                object: "_m".to_string(),
                key: Some("default".to_string()),
            },
        );
        bindings.insert(
            "ns".to_string(),
            ImportBinding {
                object: "_ns".to_string(),
                key: None,
            },
        );
        bindings.insert(
            "dash".to_string(),
            ImportBinding {
                object: "_m".to_string(),
                key: Some("a-b".to_string()),
            },
        );
        let program = spacey_syntax::parse_module(source).unwrap();
        let program = ImportRewriter::new(&bindings).fold_program(program);
        spacey_syntax::print(&program)
    }

    #[test]
    fn test_references_are_rewritten() {
        assert_eq!(rewrite("log(x.value, x + 1);"), "log(_m.default.value, _m.default + 1);\n");
        assert_eq!(rewrite("ns.f();"), "_ns.f();\n");
        assert_eq!(rewrite("y = dash;"), "y = _m[\"a-b\"];\n");
    }

    #[test]
    fn test_calls_do_not_bind_this() {
        assert_eq!(rewrite("x(1);"), "(0, _m.default)(1);\n");
        assert_eq!(rewrite("new x();"), "new _m.default();\n");
    }

    #[test]
    fn test_shorthand_properties_expand() {
        assert_eq!(rewrite("o = { x, y };"), "o = { x: _m.default, y };\n");
    }

    #[test]
    fn test_property_names_are_not_references() {
        assert_eq!(rewrite("o.x = { x: 1 }.x;"), "o.x = { x: 1 }.x;\n");
    }

    #[test]
    fn test_shadowing_scopes() {
        let output = rewrite(
            "function f(x) { return x; }\n\
             function g() { { let x = 1; use(x); } return x; }\n\
             function h() { if (a) { var x = 2; } return x; }\n\
             try { t(); } catch (x) { use(x); }\n\
             for (const x of list) use(x);\n\
             const k = (x) => x;\n\
             const m = () => x;\n\
             const C = class x { m() { return x; } };\n\
             switch (v) { case 1: let x = 3; use(x); }\n\
             use(x);",
        );
        assert_eq!(
            output,
            "function f(x) {\n  return x;\n}\n\
             function g() {\n  {\n    let x = 1;\n    use(x);\n  }\n  return _m.default;\n}\n\
             function h() {\n  if (a) {\n    var x = 2;\n  }\n  return x;\n}\n\
             try {\n  t();\n} catch (x) {\n  use(x);\n}\n\
             for (const x of list) {\n  use(x);\n}\n\
             const k = (x) => x;\n\
             const m = () => _m.default;\n\
             const C = class x {\n  m() {\n    return x;\n  }\n};\n\
             switch (v) {\n  case 1:\n    let x = 3;\n    use(x);\n}\n\
             use(_m.default);\n"
        );
    }

    #[test]
    fn test_parameter_defaults_see_imports() {
        assert_eq!(
            rewrite("function f(a = x) { return a; }"),
            "function f(a = _m.default) {\n  return a;\n}\n"
        );
    }
}
