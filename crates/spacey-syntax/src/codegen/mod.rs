// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Source printer.
//!
//! Turns a tree back into JavaScript. Parentheses are derived from operator
//! precedence rather than remembered from the source, so trees built or
//! rewritten by hand print as code with the same meaning. Every nested
//! statement body is printed as a braced block.

use crate::ast::*;
use crate::lexer::{is_id_continue, is_id_start};

mod precedence {
    pub const SEQUENCE: u8 = 1;
    pub const ASSIGNMENT: u8 = 2;
    pub const CONDITIONAL: u8 = 3;
    pub const EXPONENT: u8 = 15;
    pub const UNARY: u8 = 16;
    pub const POSTFIX: u8 = 17;
    /// An optional chain must be parenthesized before `.x` or `()`
    /// continues it from outside.
    pub const CHAIN: u8 = 17;
    pub const CALL: u8 = 18;
    pub const PRIMARY: u8 = 19;
}

/// Prints syntax trees as JavaScript source.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    level: usize,
}

impl Printer {
    /// Creates an empty printer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints a whole module.
    pub fn print_program(program: &Program) -> String {
        let mut printer = Self::new();
        for stmt in &program.body {
            printer.print_statement(stmt);
        }
        printer.out
    }

    /// Prints a single expression.
    pub fn print_expression(expression: &Expression) -> String {
        let mut printer = Self::new();
        printer.expression(expression, precedence::SEQUENCE);
        printer.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn indent(&mut self) {
        for _ in 0..self.level {
            self.out.push_str("  ");
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    fn print_statement(&mut self, stmt: &Statement) {
        self.indent();
        self.statement_inline(stmt);
        self.out.push('\n');
    }

    fn statement_inline(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                self.variable_declaration(decl, false);
                self.write(";");
            }
            Statement::FunctionDeclaration(func) => self.function(func),
            Statement::ClassDeclaration(class) => self.class(class),
            Statement::Expression(stmt) => {
                self.expression_at_statement_start(&stmt.expression);
                self.write(";");
            }
            Statement::Block(block) => self.block(&block.body),
            Statement::If(stmt) => self.if_statement(stmt),
            Statement::Switch(stmt) => self.switch_statement(stmt),
            Statement::While(stmt) => {
                self.write("while (");
                self.expression(&stmt.test, precedence::SEQUENCE);
                self.write(") ");
                self.body(&stmt.body);
            }
            Statement::DoWhile(stmt) => {
                self.write("do ");
                self.body(&stmt.body);
                self.write(" while (");
                self.expression(&stmt.test, precedence::SEQUENCE);
                self.write(");");
            }
            Statement::For(stmt) => self.for_statement(stmt),
            Statement::ForIn(stmt) => {
                self.write("for (");
                self.for_in_left(&stmt.left);
                self.write(" in ");
                self.expression(&stmt.right, precedence::SEQUENCE);
                self.write(") ");
                self.body(&stmt.body);
            }
            Statement::ForOf(stmt) => {
                self.write(if stmt.is_await { "for await (" } else { "for (" });
                self.for_in_left(&stmt.left);
                self.write(" of ");
                self.expression(&stmt.right, precedence::ASSIGNMENT);
                self.write(") ");
                self.body(&stmt.body);
            }
            Statement::Return(stmt) => match &stmt.argument {
                Some(argument) => {
                    self.write("return ");
                    self.expression(argument, precedence::SEQUENCE);
                    self.write(";");
                }
                None => self.write("return;"),
            },
            Statement::Break => self.write("break;"),
            Statement::BreakLabel(label) => {
                self.write("break ");
                self.write(label);
                self.write(";");
            }
            Statement::Continue => self.write("continue;"),
            Statement::ContinueLabel(label) => {
                self.write("continue ");
                self.write(label);
                self.write(";");
            }
            Statement::Throw(stmt) => {
                self.write("throw ");
                self.expression(&stmt.argument, precedence::SEQUENCE);
                self.write(";");
            }
            Statement::Try(stmt) => self.try_statement(stmt),
            Statement::Labeled(stmt) => {
                self.write(&stmt.label.name);
                self.write(": ");
                self.statement_inline(&stmt.body);
            }
            Statement::Debugger => self.write("debugger;"),
            Statement::Empty => self.write(";"),
            Statement::Import(import) => self.import_declaration(import),
            Statement::ExportNamed(export) => self.export_named(export),
            Statement::ExportDefault(export) => self.export_default(export),
            Statement::ExportAll(export) => {
                self.write("export *");
                if let Some(name) = &export.exported {
                    self.write(" as ");
                    self.module_export_name(name);
                }
                self.write(" from ");
                self.string(&export.source);
                self.write(";");
            }
        }
    }

    fn block(&mut self, body: &[Statement]) {
        if body.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.level += 1;
        for stmt in body {
            self.print_statement(stmt);
        }
        self.level -= 1;
        self.indent();
        self.write("}");
    }

    /// Prints a nested statement body as a block.
    fn body(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(block) => self.block(&block.body),
            Statement::Empty => self.write("{}"),
            other => self.block(std::slice::from_ref(other)),
        }
    }

    fn if_statement(&mut self, stmt: &IfStatement) {
        self.write("if (");
        self.expression(&stmt.test, precedence::SEQUENCE);
        self.write(") ");
        self.body(&stmt.consequent);
        if let Some(alternate) = &stmt.alternate {
            self.write(" else ");
            match alternate.as_ref() {
                Statement::If(nested) => self.if_statement(nested),
                other => self.body(other),
            }
        }
    }

    fn switch_statement(&mut self, stmt: &SwitchStatement) {
        self.write("switch (");
        self.expression(&stmt.discriminant, precedence::SEQUENCE);
        self.write(") {\n");
        self.level += 1;
        for case in &stmt.cases {
            self.indent();
            match &case.test {
                Some(test) => {
                    self.write("case ");
                    self.expression(test, precedence::SEQUENCE);
                    self.write(":\n");
                }
                None => self.write("default:\n"),
            }
            self.level += 1;
            for stmt in &case.consequent {
                self.print_statement(stmt);
            }
            self.level -= 1;
        }
        self.level -= 1;
        self.indent();
        self.write("}");
    }

    fn for_statement(&mut self, stmt: &ForStatement) {
        self.write("for (");
        match &stmt.init {
            Some(ForInit::Declaration(decl)) => self.variable_declaration(decl, true),
            Some(ForInit::Expression(expression)) => self.expression_without_in(expression),
            None => {}
        }
        self.write(";");
        if let Some(test) = &stmt.test {
            self.write(" ");
            self.expression(test, precedence::SEQUENCE);
        }
        self.write(";");
        if let Some(update) = &stmt.update {
            self.write(" ");
            self.expression(update, precedence::SEQUENCE);
        }
        self.write(") ");
        self.body(&stmt.body);
    }

    fn for_in_left(&mut self, left: &ForInLeft) {
        match left {
            ForInLeft::Declaration(decl) => self.variable_declaration(decl, true),
            ForInLeft::Pattern(pattern) => self.pattern(pattern),
        }
    }

    /// Prints an expression inside a `for (...;` head, where a bare `in`
    /// operator would be misread as a for-in loop.
    fn expression_without_in(&mut self, expression: &Expression) {
        let start = self.out.len();
        self.expression(expression, precedence::SEQUENCE);
        if self.out[start..].contains(" in ") {
            self.out.insert(start, '(');
            self.out.push(')');
        }
    }

    fn try_statement(&mut self, stmt: &TryStatement) {
        self.write("try ");
        self.block(&stmt.block.body);
        if let Some(handler) = &stmt.handler {
            self.write(" catch ");
            if let Some(param) = &handler.param {
                self.write("(");
                self.pattern(param);
                self.write(") ");
            }
            self.block(&handler.body.body);
        }
        if let Some(finalizer) = &stmt.finalizer {
            self.write(" finally ");
            self.block(&finalizer.body);
        }
    }

    fn variable_declaration(&mut self, decl: &VariableDeclaration, in_for_head: bool) {
        self.write(decl.kind.as_str());
        self.write(" ");
        for (index, declarator) in decl.declarations.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.pattern(&declarator.id);
            if let Some(init) = &declarator.init {
                self.write(" = ");
                if in_for_head {
                    let start = self.out.len();
                    self.expression(init, precedence::ASSIGNMENT);
                    if self.out[start..].contains(" in ") {
                        self.out.insert(start, '(');
                        self.out.push(')');
                    }
                } else {
                    self.expression(init, precedence::ASSIGNMENT);
                }
            }
        }
    }

    fn function(&mut self, func: &Function) {
        if func.is_async {
            self.write("async ");
        }
        self.write("function");
        if func.is_generator {
            self.write("*");
        }
        if let Some(id) = &func.id {
            self.write(" ");
            self.write(&id.name);
        }
        self.params(&func.params);
        self.write(" ");
        self.block(&func.body);
    }

    fn params(&mut self, params: &[Pattern]) {
        self.write("(");
        for (index, param) in params.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.pattern(param);
        }
        self.write(")");
    }

    fn class(&mut self, class: &Class) {
        self.write("class");
        if let Some(id) = &class.id {
            self.write(" ");
            self.write(&id.name);
        }
        if let Some(super_class) = &class.super_class {
            self.write(" extends ");
            self.expression(super_class, precedence::CALL);
        }
        self.write(" ");
        if class.body.is_empty() {
            self.write("{}");
            return;
        }

        self.write("{\n");
        self.level += 1;
        for member in &class.body {
            self.indent();
            self.class_member(member);
            self.write("\n");
        }
        self.level -= 1;
        self.indent();
        self.write("}");
    }

    fn class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Method(method) => {
                if method.is_static {
                    self.write("static ");
                }
                match method.kind {
                    MethodKind::Get => self.write("get "),
                    MethodKind::Set => self.write("set "),
                    MethodKind::Constructor | MethodKind::Method => {}
                }
                self.method_tail(&method.key, &method.value);
            }
            ClassMember::Property(property) => {
                if property.is_static {
                    self.write("static ");
                }
                self.property_key(&property.key);
                if let Some(value) = &property.value {
                    self.write(" = ");
                    self.expression(value, precedence::ASSIGNMENT);
                }
                self.write(";");
            }
            ClassMember::StaticBlock(body) => {
                self.write("static ");
                self.block(body);
            }
        }
    }

    /// `[async ][*]key(params) { body }`
    fn method_tail(&mut self, key: &PropertyKey, func: &Function) {
        if func.is_async {
            self.write("async ");
        }
        if func.is_generator {
            self.write("*");
        }
        self.property_key(key);
        self.params(&func.params);
        self.write(" ");
        self.block(&func.body);
    }

    fn import_declaration(&mut self, import: &ImportDeclaration) {
        self.write("import ");
        if import.specifiers.is_empty() {
            self.string(&import.source);
            self.write(";");
            return;
        }

        let mut named = Vec::new();
        let mut wrote_clause = false;
        for specifier in &import.specifiers {
            match specifier {
                ImportSpecifier::Default(local) => {
                    self.write(&local.name);
                    wrote_clause = true;
                }
                ImportSpecifier::Namespace(local) => {
                    if wrote_clause {
                        self.write(", ");
                    }
                    self.write("* as ");
                    self.write(&local.name);
                    wrote_clause = true;
                }
                ImportSpecifier::Named { imported, local } => named.push((imported, local)),
            }
        }
        if !named.is_empty() {
            if wrote_clause {
                self.write(", ");
            }
            self.write("{ ");
            for (index, (imported, local)) in named.into_iter().enumerate() {
                if index > 0 {
                    self.write(", ");
                }
                self.module_export_name(imported);
                if *imported != local.name {
                    self.write(" as ");
                    self.write(&local.name);
                }
            }
            self.write(" }");
        }
        self.write(" from ");
        self.string(&import.source);
        self.write(";");
    }

    fn export_named(&mut self, export: &ExportNamedDeclaration) {
        self.write("export ");
        if let Some(declaration) = &export.declaration {
            self.statement_inline(declaration);
            return;
        }

        self.write("{");
        for (index, specifier) in export.specifiers.iter().enumerate() {
            self.write(if index > 0 { ", " } else { " " });
            self.module_export_name(&specifier.local);
            if specifier.local != specifier.exported {
                self.write(" as ");
                self.module_export_name(&specifier.exported);
            }
        }
        self.write(if export.specifiers.is_empty() { "}" } else { " }" });
        if let Some(source) = &export.source {
            self.write(" from ");
            self.string(source);
        }
        self.write(";");
    }

    fn export_default(&mut self, export: &ExportDefaultDeclaration) {
        self.write("export default ");
        match export {
            ExportDefaultDeclaration::Function(func) => self.function(func),
            ExportDefaultDeclaration::Class(class) => self.class(class),
            ExportDefaultDeclaration::Expression(expression) => {
                let start = self.out.len();
                self.expression(expression, precedence::ASSIGNMENT);
                self.wrap_ambiguous_start(start);
                self.write(";");
            }
        }
    }

    fn module_export_name(&mut self, name: &str) {
        if is_identifier_name(name) {
            self.write(name);
        } else {
            self.string(name);
        }
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    /// An expression statement may not begin with `{`, `function`, `class`
    /// or `async function`; such expressions are parenthesized.
    fn expression_at_statement_start(&mut self, expression: &Expression) {
        let start = self.out.len();
        self.expression(expression, precedence::SEQUENCE);
        self.wrap_ambiguous_start(start);
    }

    fn wrap_ambiguous_start(&mut self, start: usize) {
        let text = &self.out[start..];
        let ambiguous = text.starts_with('{')
            || starts_with_word(text, "function")
            || starts_with_word(text, "class")
            || (starts_with_word(text, "async")
                && starts_with_word(text["async".len()..].trim_start(), "function"));
        if ambiguous {
            self.out.insert(start, '(');
            self.out.push(')');
        }
    }

    fn expression(&mut self, expression: &Expression, min_precedence: u8) {
        let wrap = expression_precedence(expression) < min_precedence;
        if wrap {
            self.write("(");
        }
        self.expression_inner(expression);
        if wrap {
            self.write(")");
        }
    }

    fn expression_inner(&mut self, expression: &Expression) {
        match expression {
            Expression::Literal(literal) => self.literal(literal),
            Expression::Identifier(id) => self.write(&id.name),
            Expression::This => self.write("this"),
            Expression::Super => self.write("super"),
            Expression::Array(array) => {
                self.write("[");
                for (index, element) in array.elements.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.expression(element, precedence::ASSIGNMENT);
                    }
                }
                // A trailing hole needs its own comma.
                if matches!(array.elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::Object(object) => self.object(object),
            Expression::Binary(binary) => self.binary(binary),
            Expression::Unary(unary) => {
                self.write(unary.operator.as_str());
                let needs_space = match unary.operator {
                    UnaryOperator::Typeof | UnaryOperator::Void | UnaryOperator::Delete => true,
                    UnaryOperator::Minus => starts_with_sign(&unary.argument, '-'),
                    UnaryOperator::Plus => starts_with_sign(&unary.argument, '+'),
                    UnaryOperator::LogicalNot | UnaryOperator::BitwiseNot => false,
                };
                if needs_space {
                    self.write(" ");
                }
                self.expression(&unary.argument, precedence::UNARY);
            }
            Expression::Update(update) => {
                let operator = match update.operator {
                    UpdateOperator::Increment => "++",
                    UpdateOperator::Decrement => "--",
                };
                if update.prefix {
                    self.write(operator);
                    self.expression(&update.argument, precedence::UNARY);
                } else {
                    self.expression(&update.argument, precedence::CALL);
                    self.write(operator);
                }
            }
            Expression::Assignment(assign) => {
                self.pattern(&assign.left);
                self.write(" ");
                self.write(assign.operator.as_str());
                self.write(" ");
                self.expression(&assign.right, precedence::ASSIGNMENT);
            }
            Expression::Call(call) => {
                self.expression(&call.callee, precedence::CALL);
                if call.optional {
                    self.write("?.");
                }
                self.arguments(&call.arguments);
            }
            Expression::Member(member) => self.member(member),
            Expression::Chain(inner) => self.expression_inner(inner),
            Expression::Conditional(conditional) => {
                self.expression(&conditional.test, precedence::CONDITIONAL + 1);
                self.write(" ? ");
                self.expression(&conditional.consequent, precedence::ASSIGNMENT);
                self.write(" : ");
                self.expression(&conditional.alternate, precedence::ASSIGNMENT);
            }
            Expression::Function(func) => self.function(func),
            Expression::Arrow(arrow) => self.arrow(arrow),
            Expression::Class(class) => self.class(class),
            Expression::New(new) => {
                self.write("new ");
                if new_callee_needs_parens(&new.callee) {
                    self.write("(");
                    self.expression_inner(&new.callee);
                    self.write(")");
                } else {
                    self.expression(&new.callee, precedence::CALL);
                }
                self.arguments(&new.arguments);
            }
            Expression::Sequence(sequence) => {
                for (index, expression) in sequence.expressions.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    self.expression(expression, precedence::ASSIGNMENT);
                }
            }
            Expression::Spread(argument) => {
                self.write("...");
                self.expression(argument, precedence::ASSIGNMENT);
            }
            Expression::Template(template) => self.template(template),
            Expression::TaggedTemplate(tagged) => {
                self.expression(&tagged.tag, precedence::CALL);
                self.template(&tagged.quasi);
            }
            Expression::Yield(yield_expression) => {
                self.write(if yield_expression.delegate { "yield*" } else { "yield" });
                if let Some(argument) = &yield_expression.argument {
                    self.write(" ");
                    self.expression(argument, precedence::ASSIGNMENT);
                }
            }
            Expression::Await(argument) => {
                self.write("await ");
                self.expression(argument, precedence::UNARY);
            }
            Expression::MetaProperty(meta) => {
                self.write(&meta.meta);
                self.write(".");
                self.write(&meta.property);
            }
            Expression::ImportCall(source) => {
                self.write("import(");
                self.expression(source, precedence::ASSIGNMENT);
                self.write(")");
            }
        }
    }

    fn binary(&mut self, binary: &BinaryExpression) {
        let own = binary_precedence(binary.operator);
        let (left_min, right_min) = if binary.operator == BinaryOperator::Exponent {
            (own + 1, own)
        } else {
            (own, own + 1)
        };

        // `-a ** b` is a syntax error, and `??` does not mix with `||`/`&&`
        // without parentheses.
        let left_forced = (binary.operator == BinaryOperator::Exponent
            && matches!(
                *binary.left,
                Expression::Unary(_) | Expression::Await(_) | Expression::Update(_)
            ))
            || mixes_nullish(binary.operator, &binary.left);
        let right_forced = mixes_nullish(binary.operator, &binary.right);

        self.operand(&binary.left, left_min, left_forced);
        self.write(" ");
        self.write(binary.operator.as_str());
        self.write(" ");
        self.operand(&binary.right, right_min, right_forced);
    }

    fn operand(&mut self, expression: &Expression, min_precedence: u8, forced: bool) {
        if forced {
            self.write("(");
            self.expression_inner(expression);
            self.write(")");
        } else {
            self.expression(expression, min_precedence);
        }
    }

    fn member(&mut self, member: &MemberExpression) {
        let object_is_number = matches!(*member.object, Expression::Literal(Literal::Number(_)));
        if object_is_number {
            self.write("(");
            self.expression_inner(&member.object);
            self.write(")");
        } else {
            self.expression(&member.object, precedence::CALL);
        }

        match &member.property {
            MemberProperty::Identifier(id) => {
                self.write(if member.optional { "?." } else { "." });
                self.write(&id.name);
            }
            MemberProperty::Private(name) => {
                self.write(if member.optional { "?.#" } else { ".#" });
                self.write(name);
            }
            MemberProperty::Expression(property) => {
                if member.optional {
                    self.write("?.");
                }
                self.write("[");
                self.expression(property, precedence::SEQUENCE);
                self.write("]");
            }
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) {
        self.write("(");
        for (index, argument) in arguments.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.expression(argument, precedence::ASSIGNMENT);
        }
        self.write(")");
    }

    fn arrow(&mut self, arrow: &ArrowFunctionExpression) {
        if arrow.is_async {
            self.write("async ");
        }
        self.params(&arrow.params);
        self.write(" => ");
        match &arrow.body {
            ArrowBody::Block(body) => self.block(body),
            ArrowBody::Expression(body) => {
                let start = self.out.len();
                self.expression(body, precedence::ASSIGNMENT);
                if self.out[start..].starts_with('{') {
                    self.out.insert(start, '(');
                    self.out.push(')');
                }
            }
        }
    }

    fn object(&mut self, object: &ObjectExpression) {
        if object.properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (index, member) in object.properties.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            match member {
                ObjectMember::Spread(argument) => {
                    self.write("...");
                    self.expression(argument, precedence::ASSIGNMENT);
                }
                ObjectMember::Property(property) => self.property(property),
            }
        }
        self.write(" }");
    }

    fn property(&mut self, property: &Property) {
        match property.kind {
            PropertyKind::Init => {
                let is_shorthand = match (&property.key, &property.value) {
                    (PropertyKey::Identifier(key), Expression::Identifier(value)) => {
                        property.shorthand && key.name == value.name
                    }
                    _ => false,
                };
                if is_shorthand {
                    self.property_key(&property.key);
                } else {
                    self.property_key(&property.key);
                    self.write(": ");
                    self.expression(&property.value, precedence::ASSIGNMENT);
                }
            }
            PropertyKind::Method | PropertyKind::Get | PropertyKind::Set => {
                let Expression::Function(func) = &property.value else {
                    // A rewritten method value degrades to a plain property.
                    self.property_key(&property.key);
                    self.write(": ");
                    self.expression(&property.value, precedence::ASSIGNMENT);
                    return;
                };
                match property.kind {
                    PropertyKind::Get => self.write("get "),
                    PropertyKind::Set => self.write("set "),
                    _ => {}
                }
                self.method_tail(&property.key, func);
            }
        }
    }

    fn property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(id) => self.write(&id.name),
            PropertyKey::Literal(literal) => self.literal(literal),
            PropertyKey::Computed(expression) => {
                self.write("[");
                self.expression(expression, precedence::ASSIGNMENT);
                self.write("]");
            }
            PropertyKey::Private(name) => {
                self.write("#");
                self.write(name);
            }
        }
    }

    fn template(&mut self, template: &TemplateLiteral) {
        self.write("`");
        for (index, quasi) in template.quasis.iter().enumerate() {
            self.write(&quasi.raw);
            if let Some(expression) = template.expressions.get(index) {
                self.write("${");
                self.expression(expression, precedence::SEQUENCE);
                self.write("}");
            }
        }
        self.write("`");
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Number(value) => {
                let text = format_number(*value);
                self.write(&text);
            }
            Literal::String(value) => self.string(value),
            Literal::Boolean(value) => self.write(if *value { "true" } else { "false" }),
            Literal::Null => self.write("null"),
            Literal::BigInt(digits) => {
                self.write(digits);
                self.write("n");
            }
            Literal::RegExp { pattern, flags } => {
                self.write("/");
                self.write(pattern);
                self.write("/");
                self.write(flags);
            }
        }
    }

    fn string(&mut self, value: &str) {
        let quoted = quote_string(value);
        self.write(&quoted);
    }

    // -----------------------------------------------------------------------
    // Patterns
    // -----------------------------------------------------------------------

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(id) => self.write(&id.name),
            Pattern::Object(object) => {
                if object.properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (index, property) in object.properties.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    match property {
                        ObjectPatternProperty::Property { key, value, .. } => {
                            if pattern_is_shorthand(key, value) {
                                self.pattern(value);
                            } else {
                                self.property_key(key);
                                self.write(": ");
                                self.pattern(value);
                            }
                        }
                        ObjectPatternProperty::Rest(rest) => {
                            self.write("...");
                            self.pattern(rest);
                        }
                    }
                }
                self.write(" }");
            }
            Pattern::Array(array) => {
                self.write("[");
                for (index, element) in array.elements.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.pattern(element);
                    }
                }
                if matches!(array.elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Pattern::Assign(assign) => {
                self.pattern(&assign.left);
                self.write(" = ");
                self.expression(&assign.right, precedence::ASSIGNMENT);
            }
            Pattern::Rest(argument) => {
                self.write("...");
                self.pattern(argument);
            }
            Pattern::Expression(expression) => self.expression(expression, precedence::CALL),
        }
    }
}

fn expression_precedence(expression: &Expression) -> u8 {
    match expression {
        Expression::Sequence(_) => precedence::SEQUENCE,
        Expression::Assignment(_)
        | Expression::Arrow(_)
        | Expression::Yield(_)
        | Expression::Spread(_) => precedence::ASSIGNMENT,
        Expression::Conditional(_) => precedence::CONDITIONAL,
        Expression::Binary(binary) => binary_precedence(binary.operator),
        Expression::Unary(_) | Expression::Await(_) => precedence::UNARY,
        Expression::Update(update) if update.prefix => precedence::UNARY,
        Expression::Update(_) => precedence::POSTFIX,
        Expression::Chain(_) => precedence::CHAIN,
        Expression::Call(_)
        | Expression::Member(_)
        | Expression::New(_)
        | Expression::TaggedTemplate(_)
        | Expression::ImportCall(_)
        | Expression::MetaProperty(_) => precedence::CALL,
        Expression::Literal(_)
        | Expression::Identifier(_)
        | Expression::This
        | Expression::Super
        | Expression::Array(_)
        | Expression::Object(_)
        | Expression::Function(_)
        | Expression::Class(_)
        | Expression::Template(_) => precedence::PRIMARY,
    }
}

fn binary_precedence(operator: BinaryOperator) -> u8 {
    match operator {
        BinaryOperator::NullishCoalescing => 4,
        BinaryOperator::LogicalOr => 5,
        BinaryOperator::LogicalAnd => 6,
        BinaryOperator::BitwiseOr => 7,
        BinaryOperator::BitwiseXor => 8,
        BinaryOperator::BitwiseAnd => 9,
        BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::StrictEqual
        | BinaryOperator::StrictNotEqual => 10,
        BinaryOperator::LessThan
        | BinaryOperator::LessThanEqual
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterThanEqual
        | BinaryOperator::InstanceOf
        | BinaryOperator::In => 11,
        BinaryOperator::LeftShift
        | BinaryOperator::RightShift
        | BinaryOperator::UnsignedRightShift => 12,
        BinaryOperator::Add | BinaryOperator::Subtract => 13,
        BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 14,
        BinaryOperator::Exponent => precedence::EXPONENT,
    }
}

fn mixes_nullish(operator: BinaryOperator, operand: &Expression) -> bool {
    let Expression::Binary(inner) = operand else {
        return false;
    };
    let is_logical = |op| matches!(op, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr);
    (operator == BinaryOperator::NullishCoalescing && is_logical(inner.operator))
        || (is_logical(operator) && inner.operator == BinaryOperator::NullishCoalescing)
}

/// `new a.b()` is fine, but a call or optional chain inside the callee
/// would be taken as the constructor arguments.
fn new_callee_needs_parens(callee: &Expression) -> bool {
    match callee {
        Expression::Call(_) | Expression::Chain(_) | Expression::ImportCall(_) => true,
        Expression::Member(member) => new_callee_needs_parens(&member.object),
        Expression::TaggedTemplate(tagged) => new_callee_needs_parens(&tagged.tag),
        _ => false,
    }
}

fn starts_with_sign(expression: &Expression, sign: char) -> bool {
    match expression {
        Expression::Unary(unary) => match unary.operator {
            UnaryOperator::Minus => sign == '-',
            UnaryOperator::Plus => sign == '+',
            _ => false,
        },
        Expression::Update(update) if update.prefix => match update.operator {
            UpdateOperator::Decrement => sign == '-',
            UpdateOperator::Increment => sign == '+',
        },
        _ => false,
    }
}

fn pattern_is_shorthand(key: &PropertyKey, value: &Pattern) -> bool {
    let PropertyKey::Identifier(key) = key else {
        return false;
    };
    match value {
        Pattern::Identifier(id) => id.name == key.name,
        Pattern::Assign(assign) => {
            matches!(assign.left.as_ref(), Pattern::Identifier(id) if id.name == key.name)
        }
        _ => false,
    }
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word)
        .is_some_and(|rest| !rest.chars().next().is_some_and(is_id_continue))
}

/// Returns true if `name` can be written without quotes as an identifier
/// name (keywords included).
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_id_start) && chars.all(is_id_continue)
}

/// Formats a number in shortest round-trip decimal form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        // Overflows to Infinity without depending on the global binding.
        let text = if value > 0.0 { "2e308" } else { "-2e308" };
        text.to_string()
    } else {
        format!("{}", value)
    }
}

/// Quotes a string as a double-quoted JavaScript literal.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{b}' => quoted.push_str("\\v"),
            '\u{c}' => quoted.push_str("\\f"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            ch if (ch as u32) < 0x20 || ch == '\u{7f}' => {
                quoted.push_str(&format!("\\x{:02x}", ch as u32));
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn reprint(source: &str) -> String {
        let program = Parser::new(source).parse_module().unwrap();
        Printer::print_program(&program)
    }

    /// Printing is stable: printing the reparsed output gives the same text.
    fn assert_stable(source: &str) -> String {
        let first = reprint(source);
        let second = reprint(&first);
        assert_eq!(first, second, "unstable output for {source:?}");
        first
    }

    fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
        Expression::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[test]
    fn test_parenthesizes_by_precedence() {
        let sum = binary(BinaryOperator::Add, Expression::ident("a"), Expression::ident("b"));
        let product = binary(BinaryOperator::Multiply, sum, Expression::ident("c"));
        assert_eq!(Printer::print_expression(&product), "(a + b) * c");

        let nested = binary(
            BinaryOperator::Subtract,
            Expression::ident("a"),
            binary(BinaryOperator::Subtract, Expression::ident("b"), Expression::ident("c")),
        );
        assert_eq!(Printer::print_expression(&nested), "a - (b - c)");
    }

    #[test]
    fn test_member_of_sequence_is_parenthesized() {
        let sequence = Expression::Sequence(SequenceExpression {
            expressions: vec![Expression::ident("a"), Expression::ident("b")],
        });
        let call = Expression::call(Expression::member(sequence, "c"), vec![]);
        assert_eq!(Printer::print_expression(&call), "(a, b).c()");
    }

    #[test]
    fn test_nullish_mixing_keeps_parentheses() {
        assert_eq!(reprint("(a || b) ?? c;"), "(a || b) ?? c;\n");
        assert_eq!(reprint("a ?? (b && c);"), "a ?? (b && c);\n");
    }

    #[test]
    fn test_exponent_with_unary_operand() {
        assert_eq!(reprint("(-a) ** b;"), "(-a) ** b;\n");
        assert_eq!(reprint("a ** b ** c;"), "a ** b ** c;\n");
        assert_eq!(reprint("(a ** b) ** c;"), "(a ** b) ** c;\n");
    }

    #[test]
    fn test_statement_start_ambiguity() {
        assert_eq!(reprint("({ a } = b);"), "({ a } = b);\n");
        assert_eq!(reprint("(function () {})();"), "(function() {}());\n");
        assert_eq!(reprint("(class {}).name;"), "(class {}.name);\n");
        assert_eq!(reprint("f = () => ({ a: 1 });"), "f = () => ({ a: 1 });\n");
    }

    #[test]
    fn test_optional_chain_boundaries() {
        assert_eq!(reprint("(a?.b).c;"), "(a?.b).c;\n");
        assert_eq!(reprint("a?.b.c;"), "a?.b.c;\n");
        assert_eq!(reprint("a?.[0]?.(1);"), "a?.[0]?.(1);\n");
    }

    #[test]
    fn test_new_with_call_callee() {
        assert_eq!(reprint("new (f())();"), "new (f())();\n");
        assert_eq!(reprint("new a.b.C;"), "new a.b.C();\n");
    }

    #[test]
    fn test_unary_spacing() {
        assert_eq!(reprint("- -a;"), "- -a;\n");
        assert_eq!(reprint("-(--a);"), "- --a;\n");
        assert_eq!(reprint("a - -b;"), "a - -b;\n");
        assert_eq!(reprint("typeof x;"), "typeof x;\n");
    }

    #[test]
    fn test_strings_are_double_quoted_and_escaped() {
        assert_eq!(reprint(r#"'it\'s "quoted"\n';"#), "\"it's \\\"quoted\\\"\\n\";\n");
        assert_eq!(quote_string("\u{0}\u{1b}"), "\"\\x00\\x1b\"");
    }

    #[test]
    fn test_numbers_and_literals() {
        assert_eq!(reprint("x = 0x10 + 1.50 + .5 + 1e3;"), "x = 16 + 1.5 + 0.5 + 1000;\n");
        assert_eq!(reprint("(1).toString();"), "(1).toString();\n");
        assert_eq!(reprint("x = 10n;"), "x = 10n;\n");
        assert_eq!(reprint("x = /a[/]b/g;"), "x = /a[/]b/g;\n");
    }

    #[test]
    fn test_templates_keep_raw_text() {
        assert_eq!(reprint("x = `a\\n${b + 1}c`;"), "x = `a\\n${b + 1}c`;\n");
    }

    #[test]
    fn test_for_head_in_operator() {
        assert_eq!(
            reprint("for (var i = ('a' in o); i; ) {}"),
            "for (var i = (\"a\" in o); i;) {}\n"
        );
    }

    #[test]
    fn test_module_items() {
        let output = assert_stable(
            "import a, { b as c, d } from './x.js';\n\
             import * as ns from './ns.js';\n\
             import './side.js';\n\
             export { a as default, c };\n\
             export * as all from './all.js';\n\
             export default function () {}",
        );
        assert_eq!(
            output,
            "import a, { b as c, d } from \"./x.js\";\n\
             import * as ns from \"./ns.js\";\n\
             import \"./side.js\";\n\
             export { a as default, c };\n\
             export * as all from \"./all.js\";\n\
             export default function() {}\n"
        );
    }

    #[test]
    fn test_nested_statements_print_as_blocks() {
        let output = reprint("if (a) if (b) x(); else y();");
        assert_eq!(
            output,
            "if (a) {\n  if (b) {\n    x();\n  } else {\n    y();\n  }\n}\n"
        );
    }

    #[test]
    fn test_larger_program_is_stable() {
        assert_stable(
            "class A extends (B || C) {\n\
               static #count = 0;\n\
               constructor(x = 1, { y, z: [w] } = {}) { super(x); this.y = y ?? w; }\n\
               get count() { return A.#count; }\n\
               async *items() { for await (const item of this.source) yield item; }\n\
             }\n\
             label: for (let i = 0, j = 10; i < j; i++, j--) { if (i % 2) continue label; }\n\
             switch (x) { case 1: { break; } default: throw new Error(`bad ${x}`); }\n\
             try { risky(); } catch ({ message }) { log(message); } finally { done(); }\n\
             const f = async ({ a, ...rest }, [b, , c] = []) => await g(a, ...rest, b, c);\n\
             const o = { a, 'b-c': 1, [d]: 2, get e() { return 3; }, m() {}, ...spread };\n\
             do { n--; } while (n > 0);\n\
             x ||= y; x &&= z; x ??= w;\n\
             const v = a ? b : c ? d : e;\n\
             const tagged = String.raw`\\u{41}${1}`;",
        );
    }
}
