// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Statement and declaration parsing.
//!
//! | Statement | Method |
//! |-----------|--------|
//! | Variable | `parse_variable_statement` |
//! | Function | `parse_function` |
//! | Class | `parse_class` |
//! | If | `parse_if_statement` |
//! | Switch | `parse_switch_statement` |
//! | While / Do-While | `parse_while_statement`, `parse_do_while_statement` |
//! | For / For-In / For-Of | `parse_for_statement` |
//! | Return / Break / Continue / Throw | restricted productions, see below |
//! | Try | `parse_try_statement` |
//! | Labeled | `parse_labeled_statement` |
//!
//! `return`, `break`, `continue` and `throw` are restricted productions:
//! a line break directly after the keyword ends the statement (or, for
//! `throw`, is an error).

use super::Parser;
use crate::Error;
use crate::ast::*;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parses a single statement.
    pub fn parse_statement(&mut self) -> Result<Statement, Error> {
        match &self.current.kind {
            TokenKind::Var | TokenKind::Let | TokenKind::Const => self.parse_variable_statement(),
            TokenKind::Function => {
                let func = self.parse_function(false, true)?;
                Ok(Statement::FunctionDeclaration(func))
            }
            TokenKind::Async if self.async_function_ahead() => {
                self.advance();
                let func = self.parse_function(true, true)?;
                Ok(Statement::FunctionDeclaration(func))
            }
            TokenKind::Class => {
                let class = self.parse_class(true)?;
                Ok(Statement::ClassDeclaration(class))
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::With => Err(self.error("'with' is not allowed in module code")),
            TokenKind::Import if !self.import_starts_expression() => {
                Err(self.error("import declarations may only appear at the top level"))
            }
            TokenKind::Export => {
                Err(self.error("export declarations may only appear at the top level"))
            }
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Statement::Debugger)
            }
            TokenKind::LeftBrace => Ok(Statement::Block(self.parse_block()?)),
            TokenKind::Semicolon => {
                self.advance();
                Ok(Statement::Empty)
            }
            TokenKind::Identifier(_) if matches!(self.peek().kind, TokenKind::Colon) => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `async function` with no line break between the two words.
    pub(super) fn async_function_ahead(&self) -> bool {
        let next = self.peek();
        matches!(next.kind, TokenKind::Function) && !next.newline_before
    }

    fn parse_variable_statement(&mut self) -> Result<Statement, Error> {
        let declaration = self.parse_variable_declaration()?;
        self.consume_semicolon()?;
        Ok(Statement::VariableDeclaration(declaration))
    }

    /// Parses `var`/`let`/`const` and its declarators, without the
    /// terminating semicolon.
    pub(super) fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, Error> {
        let kind = match &self.current.kind {
            TokenKind::Var => VariableKind::Var,
            TokenKind::Let => VariableKind::Let,
            TokenKind::Const => VariableKind::Const,
            _ => return Err(self.unexpected()),
        };
        self.advance();

        let mut declarations = Vec::new();
        loop {
            let id = self.parse_binding_target()?;
            let init = if self.eat(&TokenKind::Equal) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarations.push(VariableDeclarator { id, init });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(VariableDeclaration { kind, declarations })
    }

    /// Parses a function after an optional `async`, starting at the
    /// `function` keyword.
    pub(super) fn parse_function(
        &mut self,
        is_async: bool,
        require_name: bool,
    ) -> Result<Function, Error> {
        self.expect(&TokenKind::Function)?;
        let is_generator = self.eat(&TokenKind::Star);

        let id = if self.is_binding_identifier() {
            Some(self.expect_identifier()?)
        } else if require_name {
            return Err(self.error("Function declarations require a name"));
        } else {
            None
        };

        let (params, body) = self.parse_params_and_body(is_generator)?;

        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    /// Parses `( params ) { body }` for methods and accessors.
    pub(super) fn parse_method_function(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> Result<Function, Error> {
        let (params, body) = self.parse_params_and_body(is_generator)?;
        Ok(Function {
            id: None,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    pub(super) fn parse_formal_parameters(
        &mut self,
        is_generator: bool,
    ) -> Result<Vec<Pattern>, Error> {
        let saved = std::mem::replace(&mut self.in_generator, is_generator);
        let result = self.allow_in(|parser| {
            parser.expect(&TokenKind::LeftParen)?;
            let mut params = Vec::new();
            while !parser.check(&TokenKind::RightParen) {
                if parser.eat(&TokenKind::Ellipsis) {
                    params.push(Pattern::Rest(Box::new(parser.parse_binding_target()?)));
                    break;
                }
                params.push(parser.parse_binding_element()?);
                if !parser.eat(&TokenKind::Comma) {
                    break;
                }
            }
            parser.expect(&TokenKind::RightParen)?;
            Ok(params)
        });
        self.in_generator = saved;
        result
    }

    /// Parameters and body of a non-arrow function. Parameter defaults may
    /// read `new.target` too.
    fn parse_params_and_body(&mut self, is_generator: bool) -> Result<(Vec<Pattern>, Vec<Statement>), Error> {
        let saved = std::mem::replace(&mut self.new_target_allowed, true);
        let params = self.parse_formal_parameters(is_generator);
        self.new_target_allowed = saved;
        Ok((params?, self.parse_function_body(is_generator)?))
    }

    /// Parses `{ statements }` as the body of a function.
    pub(super) fn parse_function_body(&mut self, is_generator: bool) -> Result<Vec<Statement>, Error> {
        self.parse_body(is_generator, true)
    }

    /// Function body parsing shared with arrows, which inherit `new.target`
    /// from the enclosing function.
    pub(super) fn parse_body(&mut self, is_generator: bool, new_target_allowed: bool) -> Result<Vec<Statement>, Error> {
        let saved = (self.in_function, self.in_generator, self.no_in, self.new_target_allowed);
        self.in_function = true;
        self.in_generator = is_generator;
        self.no_in = false;
        self.new_target_allowed = new_target_allowed;

        let result = self.parse_block().map(|block| block.body);

        (self.in_function, self.in_generator, self.no_in, self.new_target_allowed) = saved;
        result
    }

    /// Parses a class starting at the `class` keyword.
    pub(super) fn parse_class(&mut self, require_name: bool) -> Result<Class, Error> {
        self.expect(&TokenKind::Class)?;

        let id = if self.is_binding_identifier() {
            Some(self.expect_identifier()?)
        } else if require_name {
            return Err(self.error("Class declarations require a name"));
        } else {
            None
        };

        let super_class = if self.eat(&TokenKind::Extends) {
            Some(Box::new(self.parse_left_hand_side()?))
        } else {
            None
        };

        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            body.push(self.parse_class_member()?);
        }
        self.expect(&TokenKind::RightBrace)?;

        Ok(Class {
            id,
            super_class,
            body,
        })
    }

    /// True when the current contextual word (`static`, `async`, `get`,
    /// `set`) is a modifier rather than the member name itself.
    fn is_member_modifier(&self) -> bool {
        let next = self.peek();
        !matches!(
            next.kind,
            TokenKind::LeftParen
                | TokenKind::Equal
                | TokenKind::Semicolon
                | TokenKind::RightBrace
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Eof
        )
    }

    fn parse_class_member(&mut self) -> Result<ClassMember, Error> {
        let is_static = self.check(&TokenKind::Static) && self.is_member_modifier();
        if is_static {
            self.advance();
            if self.check(&TokenKind::LeftBrace) {
                let body = self.parse_function_body(false)?;
                return Ok(ClassMember::StaticBlock(body));
            }
        }

        let is_async = self.check(&TokenKind::Async)
            && self.is_member_modifier()
            && !self.peek().newline_before;
        if is_async {
            self.advance();
        }
        let is_generator = self.eat(&TokenKind::Star);

        let mut kind = MethodKind::Method;
        if !is_async && !is_generator && self.is_member_modifier() {
            if self.check_identifier("get") {
                self.advance();
                kind = MethodKind::Get;
            } else if self.check_identifier("set") {
                self.advance();
                kind = MethodKind::Set;
            }
        }

        let key = self.parse_property_key()?;

        if self.check(&TokenKind::LeftParen) {
            let is_constructor_name = match &key {
                PropertyKey::Identifier(id) => id.name == "constructor",
                PropertyKey::Literal(Literal::String(name)) => name == "constructor",
                _ => false,
            };
            if is_constructor_name && !is_static && kind == MethodKind::Method {
                kind = MethodKind::Constructor;
            }
            let value = self.parse_method_function(is_async, is_generator)?;
            return Ok(ClassMember::Method(ClassMethod {
                key,
                kind,
                is_static,
                value,
            }));
        }

        if is_async || is_generator || kind != MethodKind::Method {
            return Err(self.unexpected());
        }

        let value = if self.eat(&TokenKind::Equal) {
            let saved = (self.in_function, self.new_target_allowed);
            (self.in_function, self.new_target_allowed) = (true, true);
            let value = self.allow_in(Self::parse_assignment);
            (self.in_function, self.new_target_allowed) = saved;
            Some(value?)
        } else {
            None
        };
        self.consume_semicolon()?;

        Ok(ClassMember::Property(ClassProperty {
            key,
            value,
            is_static,
        }))
    }

    /// Parses a property name: identifier name, string, number, computed
    /// `[expr]` or private `#name`.
    pub(super) fn parse_property_key(&mut self) -> Result<PropertyKey, Error> {
        let key = match &self.current.kind {
            TokenKind::String(value) => PropertyKey::Literal(Literal::String(value.clone())),
            TokenKind::Number(value) => PropertyKey::Literal(Literal::Number(*value)),
            TokenKind::BigInt(value) => PropertyKey::Literal(Literal::BigInt(value.clone())),
            TokenKind::PrivateIdentifier(name) => PropertyKey::Private(name.clone()),
            TokenKind::LeftBracket => {
                self.advance();
                let expression = self.allow_in(Self::parse_assignment)?;
                self.expect(&TokenKind::RightBracket)?;
                return Ok(PropertyKey::Computed(Box::new(expression)));
            }
            _ => {
                let name = self.expect_identifier_name()?;
                return Ok(PropertyKey::Identifier(Identifier { name }));
            }
        };
        self.advance();
        Ok(key)
    }

    pub(super) fn parse_block(&mut self) -> Result<BlockStatement, Error> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(BlockStatement { body })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, Error> {
        let expression = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::Expression(ExpressionStatement { expression }))
    }

    fn parse_parenthesized_condition(&mut self) -> Result<Expression, Error> {
        self.expect(&TokenKind::LeftParen)?;
        let test = self.allow_in(Self::parse_expression)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(test)
    }

    fn parse_if_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'if'
        let test = self.parse_parenthesized_condition()?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_switch_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'switch'
        let discriminant = self.parse_parenthesized_condition()?;
        self.expect(&TokenKind::LeftBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.eat(&TokenKind::RightBrace) {
            let test = if self.eat(&TokenKind::Case) {
                Some(self.allow_in(Self::parse_expression)?)
            } else if self.check(&TokenKind::Default) {
                if seen_default {
                    return Err(self.error("More than one default clause in switch statement"));
                }
                seen_default = true;
                self.advance();
                None
            } else {
                return Err(self.unexpected());
            };
            self.expect(&TokenKind::Colon)?;

            let mut consequent = Vec::new();
            while !matches!(
                self.current.kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace | TokenKind::Eof
            ) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, consequent });
        }

        Ok(Statement::Switch(SwitchStatement {
            discriminant,
            cases,
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'while'
        let test = self.parse_parenthesized_condition()?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While(WhileStatement { test, body }))
    }

    fn parse_do_while_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'do'
        let body = Box::new(self.parse_statement()?);
        self.expect(&TokenKind::While)?;
        let test = self.parse_parenthesized_condition()?;
        // A semicolon after do-while is always optional.
        self.eat(&TokenKind::Semicolon);
        Ok(Statement::DoWhile(DoWhileStatement { body, test }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'for'
        let is_await = self.eat(&TokenKind::Await);
        self.expect(&TokenKind::LeftParen)?;

        let saved_no_in = std::mem::replace(&mut self.no_in, true);
        let head = self.parse_for_head_init();
        self.no_in = saved_no_in;
        let init = head?;

        if self.check(&TokenKind::In) || self.check_identifier("of") {
            let is_of = self.check_identifier("of");
            self.advance();

            let left = match init {
                Some(ForInit::Declaration(declaration)) => {
                    if declaration.declarations.len() != 1
                        || declaration.declarations[0].init.is_some()
                    {
                        return Err(self.error(
                            "for-in/for-of loop variable declaration may not have an initializer",
                        ));
                    }
                    ForInLeft::Declaration(declaration)
                }
                Some(ForInit::Expression(expression)) => {
                    ForInLeft::Pattern(self.to_assignment_pattern(expression)?)
                }
                None => return Err(self.unexpected()),
            };

            let right = if is_of {
                self.allow_in(Self::parse_assignment)?
            } else {
                self.allow_in(Self::parse_expression)?
            };
            self.expect(&TokenKind::RightParen)?;
            let body = Box::new(self.parse_statement()?);

            return Ok(if is_of {
                Statement::ForOf(ForOfStatement {
                    left,
                    right,
                    body,
                    is_await,
                })
            } else {
                Statement::ForIn(ForInStatement { left, right, body })
            });
        }

        if is_await {
            return Err(self.error("'for await' requires an 'of' loop"));
        }

        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Statement::For(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    fn parse_for_head_init(&mut self) -> Result<Option<ForInit>, Error> {
        match &self.current.kind {
            TokenKind::Semicolon => Ok(None),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => Ok(Some(ForInit::Declaration(
                self.parse_variable_declaration()?,
            ))),
            _ => Ok(Some(ForInit::Expression(self.parse_expression()?))),
        }
    }

    fn parse_return_statement(&mut self) -> Result<Statement, Error> {
        if !self.in_function {
            return Err(self.error("'return' outside of function"));
        }
        self.advance(); // consume 'return'

        let argument = if self.ends_restricted_production() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume_semicolon()?;
        Ok(Statement::Return(ReturnStatement { argument }))
    }

    fn parse_break_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'break'
        let label = self.parse_jump_label()?;
        Ok(label.map_or(Statement::Break, Statement::BreakLabel))
    }

    fn parse_continue_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'continue'
        let label = self.parse_jump_label()?;
        Ok(label.map_or(Statement::Continue, Statement::ContinueLabel))
    }

    fn parse_jump_label(&mut self) -> Result<Option<String>, Error> {
        let label = if !self.ends_restricted_production() && self.is_binding_identifier() {
            Some(self.expect_identifier()?.name)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(label)
    }

    /// A restricted production ends at `;`, `}`, end of input or a line break.
    fn ends_restricted_production(&self) -> bool {
        self.current.newline_before
            || matches!(
                self.current.kind,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
            )
    }

    fn parse_throw_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'throw'
        if self.current.newline_before {
            return Err(self.error("Illegal newline after throw"));
        }
        let argument = self.parse_expression()?;
        self.consume_semicolon()?;
        Ok(Statement::Throw(ThrowStatement { argument }))
    }

    fn parse_try_statement(&mut self) -> Result<Statement, Error> {
        self.advance(); // consume 'try'
        let block = self.parse_block()?;

        let handler = if self.eat(&TokenKind::Catch) {
            let param = if self.eat(&TokenKind::LeftParen) {
                let param = self.parse_binding_target()?;
                self.expect(&TokenKind::RightParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error("Missing catch or finally after try"));
        }

        Ok(Statement::Try(TryStatement {
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_labeled_statement(&mut self) -> Result<Statement, Error> {
        let label = self.expect_identifier()?;
        self.expect(&TokenKind::Colon)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::Labeled(LabeledStatement { label, body }))
    }
}
