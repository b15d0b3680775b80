// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Import and export declarations.
//!
//! ```text
//! import d from "m";            import * as ns from "m";
//! import d, { a, b as c } from "m";
//! import "m";
//! export const x = 1;           export function f() {}
//! export default expr;          export default function () {}
//! export { a, b as c };         export { a as b } from "m";
//! export * from "m";            export * as ns from "m";
//! ```

use super::Parser;
use crate::Error;
use crate::ast::*;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    pub(super) fn parse_import_declaration(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'import'

        if self.check(&TokenKind::String(String::new())) {
            let source = self.expect_string()?;
            self.consume_semicolon()?;
            return Ok(Statement::Import(ImportDeclaration {
                specifiers: Vec::new(),
                source,
            }));
        }

        let mut specifiers = Vec::new();
        let mut needs_more = true;

        if self.is_binding_identifier() {
            specifiers.push(ImportSpecifier::Default(self.expect_identifier()?));
            needs_more = self.eat(&TokenKind::Comma);
        }

        if needs_more {
            if self.eat(&TokenKind::Star) {
                self.expect_contextual("as")?;
                specifiers.push(ImportSpecifier::Namespace(self.expect_identifier()?));
            } else if self.check(&TokenKind::LeftBrace) {
                self.parse_named_imports(&mut specifiers)?;
            } else {
                return Err(self.unexpected());
            }
        }

        self.expect_contextual("from")?;
        let source = self.expect_string()?;
        self.consume_semicolon()?;

        Ok(Statement::Import(ImportDeclaration { specifiers, source }))
    }

    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> Result<(), Error> {
        self.expect(&TokenKind::LeftBrace)?;

        while !self.check(&TokenKind::RightBrace) {
            let is_plain_name = self.is_binding_identifier();
            let imported = self.parse_module_export_name()?;

            let local = if self.check_identifier("as") {
                self.advance();
                self.expect_identifier()?
            } else if is_plain_name {
                Identifier::new(imported.clone())
            } else {
                return Err(self.error(format!(
                    "'{}' must be renamed with 'as' when imported",
                    imported
                )));
            };
            specifiers.push(ImportSpecifier::Named { imported, local });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RightBrace)
    }

    /// An identifier name or a string literal, as allowed in import and
    /// export lists.
    fn parse_module_export_name(&mut self) -> Result<String, Error> {
        if self.check(&TokenKind::String(String::new())) {
            self.expect_string()
        } else {
            self.expect_identifier_name()
        }
    }

    pub(super) fn parse_export_declaration(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'export'

        match &self.current.kind {
            TokenKind::Star => {
                self.advance();
                let exported = if self.check_identifier("as") {
                    self.advance();
                    Some(self.parse_module_export_name()?)
                } else {
                    None
                };
                self.expect_contextual("from")?;
                let source = self.expect_string()?;
                self.consume_semicolon()?;
                Ok(Statement::ExportAll(ExportAllDeclaration { exported, source }))
            }
            TokenKind::Default => {
                self.advance();
                self.parse_export_default()
            }
            TokenKind::LeftBrace => self.parse_export_list(),
            TokenKind::Var
            | TokenKind::Let
            | TokenKind::Const
            | TokenKind::Function
            | TokenKind::Class => {
                let declaration = self.parse_statement()?;
                Ok(Statement::ExportNamed(ExportNamedDeclaration {
                    declaration: Some(Box::new(declaration)),
                    specifiers: Vec::new(),
                    source: None,
                }))
            }
            TokenKind::Async if self.async_function_ahead() => {
                let declaration = self.parse_statement()?;
                Ok(Statement::ExportNamed(ExportNamedDeclaration {
                    declaration: Some(Box::new(declaration)),
                    specifiers: Vec::new(),
                    source: None,
                }))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_export_default(&mut self) -> Result<Statement, Error> {
        let declaration = match &self.current.kind {
            TokenKind::Function => {
                ExportDefaultDeclaration::Function(self.parse_function(false, false)?)
            }
            TokenKind::Async if self.async_function_ahead() => {
                self.advance();
                ExportDefaultDeclaration::Function(self.parse_function(true, false)?)
            }
            TokenKind::Class => ExportDefaultDeclaration::Class(self.parse_class(false)?),
            _ => {
                let expression = self.allow_in(Self::parse_assignment)?;
                self.consume_semicolon()?;
                ExportDefaultDeclaration::Expression(expression)
            }
        };
        Ok(Statement::ExportDefault(declaration))
    }

    fn parse_export_list(&mut self) -> Result<Statement, Error> {
        self.expect(&TokenKind::LeftBrace)?;

        let mut specifiers = Vec::new();
        let mut reserved_local = None;
        while !self.check(&TokenKind::RightBrace) {
            if !self.is_binding_identifier() && reserved_local.is_none() {
                reserved_local = Some(self.current.clone());
            }
            let local = self.parse_module_export_name()?;
            let exported = if self.check_identifier("as") {
                self.advance();
                self.parse_module_export_name()?
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier { local, exported });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightBrace)?;

        let source = if self.check_identifier("from") {
            self.advance();
            Some(self.expect_string()?)
        } else {
            None
        };

        // Without `from`, every local must name a binding of this module.
        if source.is_none() {
            if let Some(token) = reserved_local {
                return Err(self.error_at(
                    token.span.start,
                    "Export lists without 'from' may only name local bindings",
                ));
            }
        }
        self.consume_semicolon()?;

        Ok(Statement::ExportNamed(ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> Program {
        Parser::new(src).parse_module().unwrap()
    }

    fn parse_err(src: &str) -> Error {
        Parser::new(src).parse_module().unwrap_err()
    }

    #[test]
    fn test_import_forms() {
        let program = parse_ok(
            "import a from './a.js';\n\
             import * as ns from './ns.js';\n\
             import b, { c, d as e, default as f } from './b.js';\n\
             import './side.css';",
        );
        assert_eq!(program.body.len(), 4);

        let Statement::Import(import) = &program.body[2] else {
            panic!("expected import");
        };
        assert_eq!(import.source, "./b.js");
        assert_eq!(
            import.specifiers,
            vec![
                ImportSpecifier::Default(Identifier::new("b")),
                ImportSpecifier::Named {
                    imported: "c".to_string(),
                    local: Identifier::new("c")
                },
                ImportSpecifier::Named {
                    imported: "d".to_string(),
                    local: Identifier::new("e")
                },
                ImportSpecifier::Named {
                    imported: "default".to_string(),
                    local: Identifier::new("f")
                },
            ]
        );

        let Statement::Import(side_effect) = &program.body[3] else {
            panic!("expected import");
        };
        assert!(side_effect.specifiers.is_empty());
        assert_eq!(side_effect.source, "./side.css");
    }

    #[test]
    fn test_import_default_without_rename_is_an_error() {
        parse_err("import { default } from './a.js';");
    }

    #[test]
    fn test_export_declarations() {
        let program = parse_ok(
            "export const x = 1, y = 2;\n\
             export function f() {}\n\
             export async function g() {}\n\
             export class C {}",
        );
        assert_eq!(program.body.len(), 4);
        for stmt in &program.body {
            assert!(matches!(
                stmt,
                Statement::ExportNamed(ExportNamedDeclaration { declaration: Some(_), .. })
            ));
        }
    }

    #[test]
    fn test_export_default_forms() {
        let program = parse_ok(
            "export default function () {}\n\
             export default class Named {}\n\
             export default 1 + 2;",
        );
        assert!(matches!(
            &program.body[0],
            Statement::ExportDefault(ExportDefaultDeclaration::Function(Function { id: None, .. }))
        ));
        assert!(matches!(
            &program.body[1],
            Statement::ExportDefault(ExportDefaultDeclaration::Class(Class { id: Some(_), .. }))
        ));
        assert!(matches!(
            &program.body[2],
            Statement::ExportDefault(ExportDefaultDeclaration::Expression(Expression::Binary(_)))
        ));
    }

    #[test]
    fn test_export_lists_and_reexports() {
        let program = parse_ok(
            "const a = 1, b = 2;\n\
             export { a, b as c };\n\
             export { default as d, x } from './m.js';\n\
             export * from './all.js';\n\
             export * as ns from './ns.js';",
        );
        let Statement::ExportNamed(list) = &program.body[1] else {
            panic!("expected export list");
        };
        assert_eq!(list.source, None);
        assert_eq!(list.specifiers[1].local, "b");
        assert_eq!(list.specifiers[1].exported, "c");

        let Statement::ExportNamed(reexport) = &program.body[2] else {
            panic!("expected re-export");
        };
        assert_eq!(reexport.source.as_deref(), Some("./m.js"));
        assert_eq!(reexport.specifiers[0].local, "default");

        assert!(matches!(
            &program.body[3],
            Statement::ExportAll(ExportAllDeclaration { exported: None, .. })
        ));
        assert!(matches!(
            &program.body[4],
            Statement::ExportAll(ExportAllDeclaration { exported: Some(name), .. }) if name == "ns"
        ));
    }

    #[test]
    fn test_export_keyword_local_requires_from() {
        parse_err("export { default };");
    }

    #[test]
    fn test_nested_import_is_an_error() {
        parse_err("function f() { import x from './x.js'; }");
    }

    #[test]
    fn test_dynamic_import_and_meta_are_expressions() {
        let program = parse_ok("import('./lazy.js').then(m => m.run());\nconsole.log(import.meta.url);");
        assert_eq!(program.body.len(), 2);
        assert!(matches!(program.body[0], Statement::Expression(_)));
    }
}
