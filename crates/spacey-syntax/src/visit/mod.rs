// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Tree traversal.
//!
//! [`Fold`] consumes a tree and rebuilds it, giving each hook the chance to
//! replace a node. [`Visit`] walks a tree by reference. Both traits provide
//! default methods that delegate to the matching `walk_*` function, so an
//! implementation overrides only the hooks it cares about and calls the
//! `walk_*` function to recurse.
//!
//! ```
//! use spacey_syntax::ast::Expression;
//! use spacey_syntax::visit::{Fold, walk_expression};
//!
//! struct Rename;
//!
//! impl Fold for Rename {
//!     fn fold_expression(&mut self, expression: Expression) -> Expression {
//!         match expression {
//!             Expression::Identifier(id) if id.name == "a" => Expression::ident("b"),
//!             other => walk_expression(self, other),
//!         }
//!     }
//! }
//! ```

mod bindings;

pub use bindings::{declared_names, lexically_declared_names, pattern_names};

use crate::ast::*;

/// Rewrites a tree by value.
pub trait Fold {
    /// Folds a whole program.
    fn fold_program(&mut self, program: Program) -> Program {
        Program {
            body: self.fold_statements(program.body),
        }
    }

    /// Folds a statement list.
    fn fold_statements(&mut self, statements: Vec<Statement>) -> Vec<Statement> {
        statements
            .into_iter()
            .map(|stmt| self.fold_statement(stmt))
            .collect()
    }

    /// Folds the body of a `{ ... }` block, which opens a lexical scope.
    fn fold_block(&mut self, body: Vec<Statement>) -> Vec<Statement> {
        self.fold_statements(body)
    }

    /// Folds a statement.
    fn fold_statement(&mut self, stmt: Statement) -> Statement {
        walk_statement(self, stmt)
    }

    /// Folds an expression.
    fn fold_expression(&mut self, expression: Expression) -> Expression {
        walk_expression(self, expression)
    }

    /// Folds a binding or assignment target.
    fn fold_pattern(&mut self, pattern: Pattern) -> Pattern {
        walk_pattern(self, pattern)
    }

    /// Folds a variable declaration.
    fn fold_variable_declaration(&mut self, decl: VariableDeclaration) -> VariableDeclaration {
        walk_variable_declaration(self, decl)
    }

    /// Folds a function of any kind except arrows.
    fn fold_function(&mut self, func: Function) -> Function {
        walk_function(self, func)
    }

    /// Folds an arrow function.
    fn fold_arrow(&mut self, arrow: ArrowFunctionExpression) -> ArrowFunctionExpression {
        walk_arrow(self, arrow)
    }

    /// Folds a class.
    fn fold_class(&mut self, class: Class) -> Class {
        walk_class(self, class)
    }

    /// Folds a catch clause.
    fn fold_catch_clause(&mut self, clause: CatchClause) -> CatchClause {
        walk_catch_clause(self, clause)
    }

    /// Folds a property key. Only computed keys contain expressions.
    fn fold_property_key(&mut self, key: PropertyKey) -> PropertyKey {
        match key {
            PropertyKey::Computed(expression) => {
                PropertyKey::Computed(Box::new(self.fold_expression(*expression)))
            }
            other => other,
        }
    }
}

/// Folds the children of a statement.
pub fn walk_statement<F: Fold + ?Sized>(f: &mut F, stmt: Statement) -> Statement {
    match stmt {
        Statement::VariableDeclaration(decl) => {
            Statement::VariableDeclaration(f.fold_variable_declaration(decl))
        }
        Statement::FunctionDeclaration(func) => Statement::FunctionDeclaration(f.fold_function(func)),
        Statement::ClassDeclaration(class) => Statement::ClassDeclaration(f.fold_class(class)),
        Statement::Expression(stmt) => Statement::expression(f.fold_expression(stmt.expression)),
        Statement::Block(block) => Statement::Block(BlockStatement {
            body: f.fold_block(block.body),
        }),
        Statement::If(stmt) => Statement::If(IfStatement {
            test: f.fold_expression(stmt.test),
            consequent: Box::new(f.fold_statement(*stmt.consequent)),
            alternate: stmt.alternate.map(|alt| Box::new(f.fold_statement(*alt))),
        }),
        Statement::Switch(stmt) => Statement::Switch(SwitchStatement {
            discriminant: f.fold_expression(stmt.discriminant),
            cases: stmt
                .cases
                .into_iter()
                .map(|case| SwitchCase {
                    test: case.test.map(|test| f.fold_expression(test)),
                    consequent: f.fold_statements(case.consequent),
                })
                .collect(),
        }),
        Statement::While(stmt) => Statement::While(WhileStatement {
            test: f.fold_expression(stmt.test),
            body: Box::new(f.fold_statement(*stmt.body)),
        }),
        Statement::DoWhile(stmt) => Statement::DoWhile(DoWhileStatement {
            body: Box::new(f.fold_statement(*stmt.body)),
            test: f.fold_expression(stmt.test),
        }),
        Statement::For(stmt) => Statement::For(ForStatement {
            init: stmt.init.map(|init| match init {
                ForInit::Declaration(decl) => ForInit::Declaration(f.fold_variable_declaration(decl)),
                ForInit::Expression(expression) => ForInit::Expression(f.fold_expression(expression)),
            }),
            test: stmt.test.map(|test| f.fold_expression(test)),
            update: stmt.update.map(|update| f.fold_expression(update)),
            body: Box::new(f.fold_statement(*stmt.body)),
        }),
        Statement::ForIn(stmt) => Statement::ForIn(ForInStatement {
            left: fold_for_in_left(f, stmt.left),
            right: f.fold_expression(stmt.right),
            body: Box::new(f.fold_statement(*stmt.body)),
        }),
        Statement::ForOf(stmt) => Statement::ForOf(ForOfStatement {
            left: fold_for_in_left(f, stmt.left),
            right: f.fold_expression(stmt.right),
            body: Box::new(f.fold_statement(*stmt.body)),
            is_await: stmt.is_await,
        }),
        Statement::Return(stmt) => Statement::Return(ReturnStatement {
            argument: stmt.argument.map(|argument| f.fold_expression(argument)),
        }),
        Statement::Throw(stmt) => Statement::Throw(ThrowStatement {
            argument: f.fold_expression(stmt.argument),
        }),
        Statement::Try(stmt) => Statement::Try(TryStatement {
            block: BlockStatement {
                body: f.fold_block(stmt.block.body),
            },
            handler: stmt.handler.map(|handler| f.fold_catch_clause(handler)),
            finalizer: stmt.finalizer.map(|finalizer| BlockStatement {
                body: f.fold_block(finalizer.body),
            }),
        }),
        Statement::Labeled(stmt) => Statement::Labeled(LabeledStatement {
            label: stmt.label,
            body: Box::new(f.fold_statement(*stmt.body)),
        }),
        Statement::ExportNamed(export) => Statement::ExportNamed(ExportNamedDeclaration {
            declaration: export
                .declaration
                .map(|declaration| Box::new(f.fold_statement(*declaration))),
            specifiers: export.specifiers,
            source: export.source,
        }),
        Statement::ExportDefault(export) => Statement::ExportDefault(match export {
            ExportDefaultDeclaration::Function(func) => {
                ExportDefaultDeclaration::Function(f.fold_function(func))
            }
            ExportDefaultDeclaration::Class(class) => {
                ExportDefaultDeclaration::Class(f.fold_class(class))
            }
            ExportDefaultDeclaration::Expression(expression) => {
                ExportDefaultDeclaration::Expression(f.fold_expression(expression))
            }
        }),
        stmt @ (Statement::Break
        | Statement::BreakLabel(_)
        | Statement::Continue
        | Statement::ContinueLabel(_)
        | Statement::Debugger
        | Statement::Empty
        | Statement::Import(_)
        | Statement::ExportAll(_)) => stmt,
    }
}

fn fold_for_in_left<F: Fold + ?Sized>(f: &mut F, left: ForInLeft) -> ForInLeft {
    match left {
        ForInLeft::Declaration(decl) => ForInLeft::Declaration(f.fold_variable_declaration(decl)),
        ForInLeft::Pattern(pattern) => ForInLeft::Pattern(f.fold_pattern(pattern)),
    }
}

/// Folds the declarators of a variable declaration.
pub fn walk_variable_declaration<F: Fold + ?Sized>(
    f: &mut F,
    decl: VariableDeclaration,
) -> VariableDeclaration {
    VariableDeclaration {
        kind: decl.kind,
        declarations: decl
            .declarations
            .into_iter()
            .map(|declarator| VariableDeclarator {
                id: f.fold_pattern(declarator.id),
                init: declarator.init.map(|init| f.fold_expression(init)),
            })
            .collect(),
    }
}

/// Folds the parameters and body of a function.
pub fn walk_function<F: Fold + ?Sized>(f: &mut F, func: Function) -> Function {
    Function {
        id: func.id,
        params: func.params.into_iter().map(|param| f.fold_pattern(param)).collect(),
        body: f.fold_statements(func.body),
        is_async: func.is_async,
        is_generator: func.is_generator,
    }
}

/// Folds the parameters and body of an arrow function.
pub fn walk_arrow<F: Fold + ?Sized>(
    f: &mut F,
    arrow: ArrowFunctionExpression,
) -> ArrowFunctionExpression {
    ArrowFunctionExpression {
        params: arrow.params.into_iter().map(|param| f.fold_pattern(param)).collect(),
        body: match arrow.body {
            ArrowBody::Expression(body) => ArrowBody::Expression(Box::new(f.fold_expression(*body))),
            ArrowBody::Block(body) => ArrowBody::Block(f.fold_statements(body)),
        },
        is_async: arrow.is_async,
    }
}

/// Folds the heritage and members of a class.
pub fn walk_class<F: Fold + ?Sized>(f: &mut F, class: Class) -> Class {
    Class {
        id: class.id,
        super_class: class
            .super_class
            .map(|super_class| Box::new(f.fold_expression(*super_class))),
        body: class
            .body
            .into_iter()
            .map(|member| match member {
                ClassMember::Method(method) => ClassMember::Method(ClassMethod {
                    key: f.fold_property_key(method.key),
                    kind: method.kind,
                    is_static: method.is_static,
                    value: f.fold_function(method.value),
                }),
                ClassMember::Property(property) => ClassMember::Property(ClassProperty {
                    key: f.fold_property_key(property.key),
                    value: property.value.map(|value| f.fold_expression(value)),
                    is_static: property.is_static,
                }),
                ClassMember::StaticBlock(body) => ClassMember::StaticBlock(f.fold_block(body)),
            })
            .collect(),
    }
}

/// Folds the binding and body of a catch clause.
pub fn walk_catch_clause<F: Fold + ?Sized>(f: &mut F, clause: CatchClause) -> CatchClause {
    CatchClause {
        param: clause.param.map(|param| f.fold_pattern(param)),
        body: BlockStatement {
            body: f.fold_block(clause.body.body),
        },
    }
}

/// Folds the children of a pattern. Identifiers are left as they are.
pub fn walk_pattern<F: Fold + ?Sized>(f: &mut F, pattern: Pattern) -> Pattern {
    match pattern {
        Pattern::Identifier(id) => Pattern::Identifier(id),
        Pattern::Object(object) => Pattern::Object(ObjectPattern {
            properties: object
                .properties
                .into_iter()
                .map(|property| match property {
                    ObjectPatternProperty::Property {
                        key,
                        value,
                        shorthand,
                    } => ObjectPatternProperty::Property {
                        key: f.fold_property_key(key),
                        value: f.fold_pattern(value),
                        shorthand,
                    },
                    ObjectPatternProperty::Rest(rest) => {
                        ObjectPatternProperty::Rest(Box::new(f.fold_pattern(*rest)))
                    }
                })
                .collect(),
        }),
        Pattern::Array(array) => Pattern::Array(ArrayPattern {
            elements: array
                .elements
                .into_iter()
                .map(|element| element.map(|element| f.fold_pattern(element)))
                .collect(),
        }),
        Pattern::Assign(assign) => Pattern::Assign(AssignmentPattern {
            left: Box::new(f.fold_pattern(*assign.left)),
            right: Box::new(f.fold_expression(*assign.right)),
        }),
        Pattern::Rest(argument) => Pattern::Rest(Box::new(f.fold_pattern(*argument))),
        Pattern::Expression(expression) => {
            Pattern::Expression(Box::new(f.fold_expression(*expression)))
        }
    }
}

/// Folds the children of an expression.
pub fn walk_expression<F: Fold + ?Sized>(f: &mut F, expression: Expression) -> Expression {
    match expression {
        Expression::Array(array) => Expression::Array(ArrayExpression {
            elements: array
                .elements
                .into_iter()
                .map(|element| element.map(|element| f.fold_expression(element)))
                .collect(),
        }),
        Expression::Object(object) => Expression::Object(ObjectExpression {
            properties: object
                .properties
                .into_iter()
                .map(|member| match member {
                    ObjectMember::Property(property) => ObjectMember::Property(Property {
                        key: f.fold_property_key(property.key),
                        value: f.fold_expression(property.value),
                        kind: property.kind,
                        shorthand: property.shorthand,
                    }),
                    ObjectMember::Spread(argument) => {
                        ObjectMember::Spread(f.fold_expression(argument))
                    }
                })
                .collect(),
        }),
        Expression::Binary(binary) => Expression::Binary(BinaryExpression {
            operator: binary.operator,
            left: Box::new(f.fold_expression(*binary.left)),
            right: Box::new(f.fold_expression(*binary.right)),
        }),
        Expression::Unary(unary) => Expression::Unary(UnaryExpression {
            operator: unary.operator,
            argument: Box::new(f.fold_expression(*unary.argument)),
        }),
        Expression::Assignment(assign) => Expression::Assignment(AssignmentExpression {
            operator: assign.operator,
            left: f.fold_pattern(assign.left),
            right: Box::new(f.fold_expression(*assign.right)),
        }),
        Expression::Call(call) => Expression::Call(CallExpression {
            callee: Box::new(f.fold_expression(*call.callee)),
            arguments: fold_expressions(f, call.arguments),
            optional: call.optional,
        }),
        Expression::Member(member) => Expression::Member(MemberExpression {
            object: Box::new(f.fold_expression(*member.object)),
            property: match member.property {
                MemberProperty::Expression(property) => {
                    MemberProperty::Expression(Box::new(f.fold_expression(*property)))
                }
                other => other,
            },
            optional: member.optional,
        }),
        Expression::Chain(inner) => Expression::Chain(Box::new(f.fold_expression(*inner))),
        Expression::Conditional(conditional) => Expression::Conditional(ConditionalExpression {
            test: Box::new(f.fold_expression(*conditional.test)),
            consequent: Box::new(f.fold_expression(*conditional.consequent)),
            alternate: Box::new(f.fold_expression(*conditional.alternate)),
        }),
        Expression::Function(func) => Expression::Function(f.fold_function(func)),
        Expression::Arrow(arrow) => Expression::Arrow(f.fold_arrow(arrow)),
        Expression::Class(class) => Expression::Class(f.fold_class(class)),
        Expression::New(new) => Expression::New(NewExpression {
            callee: Box::new(f.fold_expression(*new.callee)),
            arguments: fold_expressions(f, new.arguments),
        }),
        Expression::Update(update) => Expression::Update(UpdateExpression {
            operator: update.operator,
            argument: Box::new(f.fold_expression(*update.argument)),
            prefix: update.prefix,
        }),
        Expression::Sequence(sequence) => Expression::Sequence(SequenceExpression {
            expressions: fold_expressions(f, sequence.expressions),
        }),
        Expression::Spread(argument) => Expression::Spread(Box::new(f.fold_expression(*argument))),
        Expression::Template(template) => Expression::Template(fold_template(f, template)),
        Expression::TaggedTemplate(tagged) => {
            Expression::TaggedTemplate(TaggedTemplateExpression {
                tag: Box::new(f.fold_expression(*tagged.tag)),
                quasi: fold_template(f, tagged.quasi),
            })
        }
        Expression::Yield(yield_expression) => Expression::Yield(YieldExpression {
            argument: yield_expression
                .argument
                .map(|argument| Box::new(f.fold_expression(*argument))),
            delegate: yield_expression.delegate,
        }),
        Expression::Await(argument) => Expression::Await(Box::new(f.fold_expression(*argument))),
        Expression::ImportCall(source) => {
            Expression::ImportCall(Box::new(f.fold_expression(*source)))
        }
        leaf @ (Expression::Literal(_)
        | Expression::Identifier(_)
        | Expression::This
        | Expression::Super
        | Expression::MetaProperty(_)) => leaf,
    }
}

fn fold_expressions<F: Fold + ?Sized>(f: &mut F, expressions: Vec<Expression>) -> Vec<Expression> {
    expressions
        .into_iter()
        .map(|expression| f.fold_expression(expression))
        .collect()
}

fn fold_template<F: Fold + ?Sized>(f: &mut F, template: TemplateLiteral) -> TemplateLiteral {
    TemplateLiteral {
        quasis: template.quasis,
        expressions: fold_expressions(f, template.expressions),
    }
}

/// Walks a tree by reference.
pub trait Visit {
    /// Visits a whole program.
    fn visit_program(&mut self, program: &Program) {
        for stmt in &program.body {
            self.visit_statement(stmt);
        }
    }

    /// Visits a statement.
    fn visit_statement(&mut self, stmt: &Statement) {
        visit_statement_children(self, stmt);
    }

    /// Visits an expression.
    fn visit_expression(&mut self, expression: &Expression) {
        visit_expression_children(self, expression);
    }

    /// Visits a pattern.
    fn visit_pattern(&mut self, pattern: &Pattern) {
        visit_pattern_children(self, pattern);
    }

    /// Visits a function.
    fn visit_function(&mut self, func: &Function) {
        if let Some(id) = &func.id {
            self.visit_identifier(id);
        }
        for param in &func.params {
            self.visit_pattern(param);
        }
        for stmt in &func.body {
            self.visit_statement(stmt);
        }
    }

    /// Visits a class.
    fn visit_class(&mut self, class: &Class) {
        visit_class_children(self, class);
    }

    /// Called for every identifier in a binding or reference position.
    fn visit_identifier(&mut self, _id: &Identifier) {}
}

/// Visits the children of a statement.
pub fn visit_statement_children<V: Visit + ?Sized>(v: &mut V, stmt: &Statement) {
    match stmt {
        Statement::VariableDeclaration(decl) => visit_declaration(v, decl),
        Statement::FunctionDeclaration(func) => v.visit_function(func),
        Statement::ClassDeclaration(class) => v.visit_class(class),
        Statement::Expression(stmt) => v.visit_expression(&stmt.expression),
        Statement::Block(block) => visit_statements(v, &block.body),
        Statement::If(stmt) => {
            v.visit_expression(&stmt.test);
            v.visit_statement(&stmt.consequent);
            if let Some(alternate) = &stmt.alternate {
                v.visit_statement(alternate);
            }
        }
        Statement::Switch(stmt) => {
            v.visit_expression(&stmt.discriminant);
            for case in &stmt.cases {
                if let Some(test) = &case.test {
                    v.visit_expression(test);
                }
                visit_statements(v, &case.consequent);
            }
        }
        Statement::While(stmt) => {
            v.visit_expression(&stmt.test);
            v.visit_statement(&stmt.body);
        }
        Statement::DoWhile(stmt) => {
            v.visit_statement(&stmt.body);
            v.visit_expression(&stmt.test);
        }
        Statement::For(stmt) => {
            match &stmt.init {
                Some(ForInit::Declaration(decl)) => visit_declaration(v, decl),
                Some(ForInit::Expression(expression)) => v.visit_expression(expression),
                None => {}
            }
            if let Some(test) = &stmt.test {
                v.visit_expression(test);
            }
            if let Some(update) = &stmt.update {
                v.visit_expression(update);
            }
            v.visit_statement(&stmt.body);
        }
        Statement::ForIn(ForInStatement { left, right, body })
        | Statement::ForOf(ForOfStatement {
            left, right, body, ..
        }) => {
            match left {
                ForInLeft::Declaration(decl) => visit_declaration(v, decl),
                ForInLeft::Pattern(pattern) => v.visit_pattern(pattern),
            }
            v.visit_expression(right);
            v.visit_statement(body);
        }
        Statement::Return(stmt) => {
            if let Some(argument) = &stmt.argument {
                v.visit_expression(argument);
            }
        }
        Statement::Throw(stmt) => v.visit_expression(&stmt.argument),
        Statement::Try(stmt) => {
            visit_statements(v, &stmt.block.body);
            if let Some(handler) = &stmt.handler {
                if let Some(param) = &handler.param {
                    v.visit_pattern(param);
                }
                visit_statements(v, &handler.body.body);
            }
            if let Some(finalizer) = &stmt.finalizer {
                visit_statements(v, &finalizer.body);
            }
        }
        Statement::Labeled(stmt) => v.visit_statement(&stmt.body),
        Statement::Import(import) => {
            for specifier in &import.specifiers {
                match specifier {
                    ImportSpecifier::Default(local)
                    | ImportSpecifier::Namespace(local)
                    | ImportSpecifier::Named { local, .. } => v.visit_identifier(local),
                }
            }
        }
        Statement::ExportNamed(export) => {
            if let Some(declaration) = &export.declaration {
                v.visit_statement(declaration);
            }
        }
        Statement::ExportDefault(export) => match export {
            ExportDefaultDeclaration::Function(func) => v.visit_function(func),
            ExportDefaultDeclaration::Class(class) => v.visit_class(class),
            ExportDefaultDeclaration::Expression(expression) => v.visit_expression(expression),
        },
        Statement::Break
        | Statement::BreakLabel(_)
        | Statement::Continue
        | Statement::ContinueLabel(_)
        | Statement::Debugger
        | Statement::Empty
        | Statement::ExportAll(_) => {}
    }
}

fn visit_statements<V: Visit + ?Sized>(v: &mut V, statements: &[Statement]) {
    for stmt in statements {
        v.visit_statement(stmt);
    }
}

fn visit_declaration<V: Visit + ?Sized>(v: &mut V, decl: &VariableDeclaration) {
    for declarator in &decl.declarations {
        v.visit_pattern(&declarator.id);
        if let Some(init) = &declarator.init {
            v.visit_expression(init);
        }
    }
}

fn visit_property_key<V: Visit + ?Sized>(v: &mut V, key: &PropertyKey) {
    if let PropertyKey::Computed(expression) = key {
        v.visit_expression(expression);
    }
}

/// Visits the id, heritage and members of a class.
pub fn visit_class_children<V: Visit + ?Sized>(v: &mut V, class: &Class) {
    if let Some(id) = &class.id {
        v.visit_identifier(id);
    }
    if let Some(super_class) = &class.super_class {
        v.visit_expression(super_class);
    }
    for member in &class.body {
        match member {
            ClassMember::Method(method) => {
                visit_property_key(v, &method.key);
                v.visit_function(&method.value);
            }
            ClassMember::Property(property) => {
                visit_property_key(v, &property.key);
                if let Some(value) = &property.value {
                    v.visit_expression(value);
                }
            }
            ClassMember::StaticBlock(body) => visit_statements(v, body),
        }
    }
}

/// Visits the children of a pattern.
pub fn visit_pattern_children<V: Visit + ?Sized>(v: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Identifier(id) => v.visit_identifier(id),
        Pattern::Object(object) => {
            for property in &object.properties {
                match property {
                    ObjectPatternProperty::Property { key, value, .. } => {
                        visit_property_key(v, key);
                        v.visit_pattern(value);
                    }
                    ObjectPatternProperty::Rest(rest) => v.visit_pattern(rest),
                }
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                v.visit_pattern(element);
            }
        }
        Pattern::Assign(assign) => {
            v.visit_pattern(&assign.left);
            v.visit_expression(&assign.right);
        }
        Pattern::Rest(argument) => v.visit_pattern(argument),
        Pattern::Expression(expression) => v.visit_expression(expression),
    }
}

/// Visits the children of an expression.
pub fn visit_expression_children<V: Visit + ?Sized>(v: &mut V, expression: &Expression) {
    match expression {
        Expression::Identifier(id) => v.visit_identifier(id),
        Expression::Array(array) => {
            for element in array.elements.iter().flatten() {
                v.visit_expression(element);
            }
        }
        Expression::Object(object) => {
            for member in &object.properties {
                match member {
                    ObjectMember::Property(property) => {
                        visit_property_key(v, &property.key);
                        v.visit_expression(&property.value);
                    }
                    ObjectMember::Spread(argument) => v.visit_expression(argument),
                }
            }
        }
        Expression::Binary(binary) => {
            v.visit_expression(&binary.left);
            v.visit_expression(&binary.right);
        }
        Expression::Unary(unary) => v.visit_expression(&unary.argument),
        Expression::Assignment(assign) => {
            v.visit_pattern(&assign.left);
            v.visit_expression(&assign.right);
        }
        Expression::Call(call) => {
            v.visit_expression(&call.callee);
            for argument in &call.arguments {
                v.visit_expression(argument);
            }
        }
        Expression::Member(member) => {
            v.visit_expression(&member.object);
            if let MemberProperty::Expression(property) = &member.property {
                v.visit_expression(property);
            }
        }
        Expression::Conditional(conditional) => {
            v.visit_expression(&conditional.test);
            v.visit_expression(&conditional.consequent);
            v.visit_expression(&conditional.alternate);
        }
        Expression::Function(func) => v.visit_function(func),
        Expression::Arrow(arrow) => {
            for param in &arrow.params {
                v.visit_pattern(param);
            }
            match &arrow.body {
                ArrowBody::Expression(body) => v.visit_expression(body),
                ArrowBody::Block(body) => visit_statements(v, body),
            }
        }
        Expression::Class(class) => v.visit_class(class),
        Expression::New(new) => {
            v.visit_expression(&new.callee);
            for argument in &new.arguments {
                v.visit_expression(argument);
            }
        }
        Expression::Update(update) => v.visit_expression(&update.argument),
        Expression::Sequence(sequence) => {
            for expression in &sequence.expressions {
                v.visit_expression(expression);
            }
        }
        Expression::Template(template) => {
            for expression in &template.expressions {
                v.visit_expression(expression);
            }
        }
        Expression::TaggedTemplate(tagged) => {
            v.visit_expression(&tagged.tag);
            for expression in &tagged.quasi.expressions {
                v.visit_expression(expression);
            }
        }
        Expression::Yield(yield_expression) => {
            if let Some(argument) = &yield_expression.argument {
                v.visit_expression(argument);
            }
        }
        Expression::Chain(inner)
        | Expression::Spread(inner)
        | Expression::Await(inner)
        | Expression::ImportCall(inner) => v.visit_expression(inner),
        Expression::Literal(_)
        | Expression::This
        | Expression::Super
        | Expression::MetaProperty(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Printer;
    use crate::parser::Parser;

    struct Rename {
        from: &'static str,
        to: &'static str,
    }

    impl Fold for Rename {
        fn fold_expression(&mut self, expression: Expression) -> Expression {
            match expression {
                Expression::Identifier(id) if id.name == self.from => Expression::ident(self.to),
                other => walk_expression(self, other),
            }
        }
    }

    #[derive(Default)]
    struct Names(Vec<String>);

    impl Visit for Names {
        fn visit_identifier(&mut self, id: &Identifier) {
            self.0.push(id.name.clone());
        }
    }

    #[test]
    fn test_fold_rewrites_references_only() {
        let program = Parser::new("const a = 1;\nf(a, { a: a }, x.a, () => a);")
            .parse_module()
            .unwrap();
        let folded = Rename { from: "a", to: "b" }.fold_program(program);
        assert_eq!(
            Printer::print_program(&folded),
            "const a = 1;\nf(b, { a: b }, x.a, () => b);\n"
        );
    }

    #[test]
    fn test_fold_reaches_nested_scopes() {
        let program = Parser::new(
            "class C extends a { [a]() { return a; } static { a; } }\n\
             try {} catch ({ [a]: e = a }) {}\n\
             for (const k of a) `${a}`;",
        )
        .parse_module()
        .unwrap();
        let folded = Rename { from: "a", to: "z" }.fold_program(program);
        let output = Printer::print_program(&folded);
        assert_eq!(output.matches('z').count(), 8, "{output}");
    }

    #[test]
    fn test_visit_sees_bindings_and_references() {
        let program = Parser::new(
            "import d, { e as f } from './m.js';\n\
             function g(h, [i] = j) { return h + k; }\n\
             class L { m() { n; } }",
        )
        .parse_module()
        .unwrap();
        let mut names = Names::default();
        names.visit_program(&program);
        assert_eq!(names.0, ["d", "f", "g", "h", "i", "j", "h", "k", "L", "n"]);
    }
}
