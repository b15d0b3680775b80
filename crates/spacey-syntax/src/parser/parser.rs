// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The main parser implementation.

use crate::Error;
use crate::ast::*;
use crate::lexer::{Scanner, Token, TokenKind, keyword_text};

/// A recursive descent parser for JavaScript modules.
pub struct Parser<'a> {
    pub(super) scanner: Scanner<'a>,
    pub(super) current: Token,
    /// `in` is not a binary operator inside a `for (...;` head.
    pub(super) no_in: bool,
    pub(super) in_function: bool,
    pub(super) in_generator: bool,
    /// Inside a non-arrow function, method or class initializer.
    pub(super) new_target_allowed: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given source code.
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            no_in: false,
            in_function: false,
            in_generator: false,
            new_target_allowed: false,
        }
    }

    /// Parses the source code as a module.
    pub fn parse_module(&mut self) -> Result<Program, Error> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.parse_module_item()?);
        }

        Ok(Program { body })
    }

    /// Parses a single top-level item: an import, an export or a statement.
    fn parse_module_item(&mut self) -> Result<Statement, Error> {
        match &self.current.kind {
            TokenKind::Import if !self.import_starts_expression() => {
                self.parse_import_declaration()
            }
            TokenKind::Export => self.parse_export_declaration(),
            _ => self.parse_statement(),
        }
    }

    /// Returns true when the current `import` is `import(...)` or
    /// `import.meta` rather than a declaration.
    pub(super) fn import_starts_expression(&self) -> bool {
        matches!(self.peek().kind, TokenKind::LeftParen | TokenKind::Dot)
    }

    // Helper methods

    pub(super) fn advance(&mut self) {
        self.current = self.scanner.next_token();
    }

    /// Returns the token after `current` without consuming anything.
    pub(super) fn peek(&self) -> Token {
        self.scanner.clone().next_token()
    }

    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Checks for a contextual keyword such as `of`, `as` or `from`.
    pub(super) fn check_identifier(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(id) if id == name)
    }

    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<(), Error> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    pub(super) fn expect_contextual(&mut self, name: &str) -> Result<(), Error> {
        if self.check_identifier(name) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}' but found {}",
                name,
                self.describe_current()
            )))
        }
    }

    /// Parses a name that introduces a binding.
    pub(super) fn expect_identifier(&mut self) -> Result<Identifier, Error> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Async => "async".to_string(),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(Identifier { name })
    }

    pub(super) fn is_binding_identifier(&self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier(_) | TokenKind::Async)
    }

    /// Parses any identifier name, keywords included (`a.default`).
    pub(super) fn expect_identifier_name(&mut self) -> Result<String, Error> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            kind => match keyword_text(kind) {
                Some(text) => text.to_string(),
                None => return Err(self.unexpected()),
            },
        };
        self.advance();
        Ok(name)
    }

    pub(super) fn expect_string(&mut self) -> Result<String, Error> {
        if let TokenKind::String(value) = &self.current.kind {
            let value = value.clone();
            self.advance();
            Ok(value)
        } else {
            Err(self.error(format!(
                "Expected a string literal but found {}",
                self.describe_current()
            )))
        }
    }

    /// Consumes a statement terminator, applying automatic semicolon
    /// insertion before `}`, at the end of input and after a line break.
    pub(super) fn consume_semicolon(&mut self) -> Result<(), Error> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(());
        }
        if self.check(&TokenKind::RightBrace) || self.is_at_end() || self.current.newline_before {
            return Ok(());
        }
        Err(self.unexpected())
    }

    /// Runs `parse` with the `in` operator enabled, restoring the previous
    /// state afterwards.
    pub(super) fn allow_in<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = parse(self);
        self.no_in = saved;
        result
    }

    pub(super) fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    pub(super) fn unexpected(&self) -> Error {
        match &self.current.kind {
            TokenKind::Invalid(reason) => self.error(*reason),
            TokenKind::Eof => self.error("Unexpected end of input"),
            _ => self.error(format!("Unexpected token {}", self.describe_current())),
        }
    }

    pub(super) fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(self.current.span.start, message)
    }

    pub(super) fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        let (line, column) = self.location(offset);
        Error::SyntaxError {
            message: message.into(),
            line,
            column,
        }
    }

    fn describe_current(&self) -> String {
        if self.is_at_end() {
            return "end of input".to_string();
        }
        let span = self.current.span;
        match self.scanner.source().get(span.start..span.end) {
            Some(text) if !text.is_empty() => format!("'{}'", text),
            _ => format!("{:?}", self.current.kind),
        }
    }

    /// 1-based line and column of a byte offset.
    fn location(&self, offset: usize) -> (usize, usize) {
        let source = self.scanner.source();
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |index| index + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to parse and get first statement
    fn parse_stmt(src: &str) -> Statement {
        let mut parser = Parser::new(src);
        let program = parser.parse_module().unwrap();
        program.body.into_iter().next().unwrap()
    }

    // Helper to parse and check it succeeds
    fn parse_ok(src: &str) -> Program {
        let mut parser = Parser::new(src);
        parser.parse_module().unwrap()
    }

    // Helper to parse and check it fails
    fn parse_err(src: &str) -> Error {
        let mut parser = Parser::new(src);
        parser.parse_module().unwrap_err()
    }

    fn parse_expr(src: &str) -> Expression {
        match parse_stmt(src) {
            Statement::Expression(stmt) => stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_variable_declaration() {
        let program = parse_ok("let x = 42;");
        assert_eq!(program.body.len(), 1);
        assert!(matches!(
            &program.body[0],
            Statement::VariableDeclaration(decl) if decl.kind == VariableKind::Let
        ));
    }

    #[test]
    fn test_parse_destructuring_declaration() {
        let stmt = parse_stmt("const { a, b: [c, ...d], e = 1 } = obj;");
        let Statement::VariableDeclaration(decl) = stmt else {
            panic!("expected declaration");
        };
        let Pattern::Object(pattern) = &decl.declarations[0].id else {
            panic!("expected object pattern");
        };
        assert_eq!(pattern.properties.len(), 3);
        assert!(matches!(
            &pattern.properties[2],
            ObjectPatternProperty::Property { value: Pattern::Assign(_), shorthand: true, .. }
        ));
    }

    #[test]
    fn test_parse_function_declaration() {
        let stmt = parse_stmt("async function* gen(a, b = 2, ...rest) { yield a; }");
        let Statement::FunctionDeclaration(func) = stmt else {
            panic!("expected function");
        };
        assert!(func.is_async);
        assert!(func.is_generator);
        assert_eq!(func.params.len(), 3);
        assert!(matches!(func.params[2], Pattern::Rest(_)));
    }

    #[test]
    fn test_parse_class_declaration() {
        let stmt = parse_stmt(
            "class A extends B { #x = 1; static y; constructor() { super(); } get z() { return this.#x; } static { init(); } }",
        );
        let Statement::ClassDeclaration(class) = stmt else {
            panic!("expected class");
        };
        assert!(class.super_class.is_some());
        assert_eq!(class.body.len(), 5);
        assert!(matches!(
            &class.body[2],
            ClassMember::Method(method) if method.kind == MethodKind::Constructor
        ));
        assert!(matches!(
            &class.body[3],
            ClassMember::Method(method) if method.kind == MethodKind::Get
        ));
        assert!(matches!(class.body[4], ClassMember::StaticBlock(_)));
    }

    #[test]
    fn test_parse_control_flow() {
        parse_ok("if (a) b(); else { c(); }");
        parse_ok("while (x) x--;");
        parse_ok("do x++; while (x < 5)");
        parse_ok("for (let i = 0; i < 10; i++) {}");
        parse_ok("for (const k in obj) {}");
        parse_ok("for (const [k, v] of map) {}");
        parse_ok("for await (const chunk of stream) {}");
        parse_ok("switch (x) { case 1: a(); break; default: b(); }");
        parse_ok("try { a(); } catch { b(); } finally { c(); }");
        parse_ok("outer: for (;;) { break outer; }");
        parse_ok("function f() { return; }");
        parse_ok("throw new Error('x');");
        parse_ok("debugger;");
    }

    #[test]
    fn test_for_in_with_in_operator_inside_parens() {
        let stmt = parse_stmt("for (var i = ('a' in b); i < 1; i++) {}");
        assert!(matches!(stmt, Statement::For(_)));
    }

    #[test]
    fn test_parse_for_of_with_assignment_target() {
        let stmt = parse_stmt("for (obj.x of list) {}");
        let Statement::ForOf(for_of) = stmt else {
            panic!("expected for-of");
        };
        assert!(matches!(for_of.left, ForInLeft::Pattern(Pattern::Expression(_))));
    }

    #[test]
    fn test_automatic_semicolon_insertion() {
        let program = parse_ok("let a = 1\nlet b = 2\na\n++b");
        assert_eq!(program.body.len(), 4);
        assert!(matches!(
            &program.body[3],
            Statement::Expression(ExpressionStatement {
                expression: Expression::Update(UpdateExpression { prefix: true, .. })
            })
        ));
    }

    #[test]
    fn test_restricted_return() {
        let program = parse_ok("function f() { return\n42 }");
        let Statement::FunctionDeclaration(func) = &program.body[0] else {
            panic!("expected function");
        };
        assert_eq!(func.body.len(), 2);
        assert!(matches!(
            &func.body[0],
            Statement::Return(ReturnStatement { argument: None })
        ));
    }

    #[test]
    fn test_missing_semicolon_is_an_error() {
        let err = parse_err("let a = 1 let b = 2");
        assert!(matches!(err, Error::SyntaxError { line: 1, column: 11, .. }));
    }

    #[test]
    fn test_error_location() {
        let err = parse_err("let a = 1;\nlet b = ;");
        assert!(matches!(err, Error::SyntaxError { line: 2, column: 9, .. }));
    }

    #[test]
    fn test_return_outside_function_is_an_error() {
        parse_err("return 1;");
    }

    #[test]
    fn test_with_is_rejected() {
        parse_err("with (obj) { x; }");
    }

    #[test]
    fn test_parse_binary_precedence() {
        let expr = parse_expr("1 + 2 * 3;");
        let Expression::Binary(binary) = expr else {
            panic!("expected binary");
        };
        assert_eq!(binary.operator, BinaryOperator::Add);
        assert!(matches!(
            *binary.right,
            Expression::Binary(BinaryExpression { operator: BinaryOperator::Multiply, .. })
        ));
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let Expression::Binary(binary) = parse_expr("2 ** 3 ** 2;") else {
            panic!("expected binary");
        };
        assert!(matches!(*binary.left, Expression::Literal(Literal::Number(n)) if n == 2.0));
        assert!(matches!(*binary.right, Expression::Binary(_)));
    }

    #[test]
    fn test_parse_arrow_functions() {
        assert!(matches!(parse_expr("x => x * 2;"), Expression::Arrow(_)));
        assert!(matches!(parse_expr("(a, { b }) => a + b;"), Expression::Arrow(_)));
        assert!(matches!(parse_expr("() => ({});"), Expression::Arrow(_)));
        assert!(matches!(
            parse_expr("async (x) => await x;"),
            Expression::Arrow(ArrowFunctionExpression { is_async: true, .. })
        ));
        assert!(matches!(
            parse_expr("async x => x;"),
            Expression::Arrow(ArrowFunctionExpression { is_async: true, .. })
        ));
        assert!(matches!(parse_expr("(a + b) * c;"), Expression::Binary(_)));
    }

    #[test]
    fn test_async_as_identifier() {
        assert!(matches!(parse_expr("async(1);"), Expression::Call(_)));
    }

    #[test]
    fn test_parse_destructuring_assignment() {
        let Expression::Assignment(assign) = parse_expr("[a, b] = [b, a];") else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.left, Pattern::Array(_)));

        let Expression::Assignment(assign) = parse_expr("({ a, b = 2 } = obj);") else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.left, Pattern::Object(_)));
    }

    #[test]
    fn test_invalid_assignment_target() {
        parse_err("1 = 2;");
        parse_err("a + b = c;");
    }

    #[test]
    fn test_parse_object_literal_forms() {
        let Expression::Object(object) =
            parse_expr("({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, ...f, 'g-h': 3, async i() {}, *j() {} });")
        else {
            panic!("expected object");
        };
        assert_eq!(object.properties.len(), 9);
        assert!(matches!(
            &object.properties[0],
            ObjectMember::Property(Property { shorthand: true, .. })
        ));
        assert!(matches!(
            &object.properties[4],
            ObjectMember::Property(Property { kind: PropertyKind::Get, .. })
        ));
        assert!(matches!(&object.properties[5], ObjectMember::Spread(_)));
    }

    #[test]
    fn test_keyword_property_names() {
        parse_ok("obj.default; obj.class = 1; ({ default: 1, if: 2 });");
    }

    #[test]
    fn test_parse_optional_chain() {
        let Expression::Chain(inner) = parse_expr("a?.b.c?.(d);") else {
            panic!("expected chain");
        };
        assert!(matches!(*inner, Expression::Call(CallExpression { optional: true, .. })));
    }

    #[test]
    fn test_parse_templates() {
        let Expression::Template(template) = parse_expr("`a${b}c${d + `e${f}`}g`;") else {
            panic!("expected template");
        };
        assert_eq!(template.quasis.len(), 3);
        assert_eq!(template.expressions.len(), 2);
        assert_eq!(template.quasis[2].raw, "g");

        assert!(matches!(parse_expr("tag`x${y}`;"), Expression::TaggedTemplate(_)));
    }

    #[test]
    fn test_parse_regexp_literal() {
        let Expression::Call(call) = parse_expr("/ab+c/gi.test(s);") else {
            panic!("expected call");
        };
        let Expression::Member(member) = *call.callee else {
            panic!("expected member");
        };
        assert!(matches!(
            *member.object,
            Expression::Literal(Literal::RegExp { ref pattern, ref flags }) if pattern == "ab+c" && flags == "gi"
        ));
        assert!(matches!(parse_expr("a / b / c;"), Expression::Binary(_)));
    }

    #[test]
    fn test_parse_new_and_meta() {
        assert!(matches!(parse_expr("new Foo.Bar(1);"), Expression::New(_)));
        assert!(matches!(
            parse_expr("new Foo().bar;"),
            Expression::Member(MemberExpression { .. })
        ));
        assert!(matches!(parse_expr("import.meta.url;"), Expression::Member(_)));
        assert!(matches!(parse_expr("import('./lazy.js');"), Expression::ImportCall(_)));
        parse_ok("function F() { if (!new.target) throw 1; }");
        parse_ok("class A { constructor() { const f = () => new.target; } x = new.target; }");
    }

    #[test]
    fn test_new_target_outside_functions() {
        let err = parse_err("const t = new.target;");
        assert_eq!(err.to_string(), "SyntaxError: new.target expression is not allowed here (1:11)");
        parse_err("const f = () => new.target;");
        parse_err("const g = () => { return new.target; };");
        parse_ok("function h(a = new.target) { return a; }");
    }

    #[test]
    fn test_parse_unary_and_update() {
        parse_ok("typeof x; void 0; delete a.b; !a; ~a; -a; +a; ++a; a--;");
        parse_ok("async function f() { await g(); }");
        parse_ok("await ready;");
    }

    #[test]
    fn test_parse_conditional_and_sequence() {
        assert!(matches!(parse_expr("a ? b : c;"), Expression::Conditional(_)));
        assert!(matches!(parse_expr("a, b, c;"), Expression::Sequence(_)));
        assert!(matches!(parse_expr("a ?? b;"), Expression::Binary(_)));
        assert!(matches!(parse_expr("a ||= b;"), Expression::Assignment(_)));
    }

    #[test]
    fn test_unterminated_string_reports_reason() {
        let err = parse_err("let s = 'abc");
        assert!(err.to_string().contains("unterminated string literal"));
    }
}
