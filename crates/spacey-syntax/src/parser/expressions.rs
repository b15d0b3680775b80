// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression parsing.
//!
//! ## Operator Precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `,` | Left |
//! | 2 | `=`, `+=`, `-=`, etc. | Right |
//! | 3 | `? :` | Right |
//! | 4 | `??` | Left |
//! | 5 | `\|\|` | Left |
//! | 6 | `&&` | Left |
//! | 7 | `\|` | Left |
//! | 8 | `^` | Left |
//! | 9 | `&` | Left |
//! | 10 | `==`, `!=`, `===`, `!==` | Left |
//! | 11 | `<`, `>`, `<=`, `>=`, `instanceof`, `in` | Left |
//! | 12 | `<<`, `>>`, `>>>` | Left |
//! | 13 | `+`, `-` | Left |
//! | 14 | `*`, `/`, `%` | Left |
//! | 15 | `**` | Right |
//! | 16 | `!`, `~`, `+`, `-`, `typeof`, `void`, `delete`, `await` | Right |
//! | 17 | `++`, `--` | N/A |
//! | 18 | `new`, `.`, `?.`, `[]`, `()` | Left |
//!
//! Binary operators are parsed by precedence climbing over levels 4 to 15.

use super::Parser;
use crate::Error;
use crate::ast::*;
use crate::lexer::{Scanner, TokenKind};

impl<'a> Parser<'a> {
    /// Parses a full expression, including the comma operator.
    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        let first = self.parse_assignment()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat(&TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Expression::Sequence(SequenceExpression { expressions }))
    }

    /// Parses an assignment expression (also arrows and `yield`).
    pub(super) fn parse_assignment(&mut self) -> Result<Expression, Error> {
        if let Some(is_async) = self.arrow_ahead() {
            return self.parse_arrow_function(is_async);
        }
        if self.in_generator && self.check(&TokenKind::Yield) {
            return self.parse_yield();
        }

        let left = self.parse_conditional()?;

        let Some(operator) = assignment_operator(&self.current.kind) else {
            return Ok(left);
        };

        let target = if operator == AssignmentOperator::Assign {
            self.to_assignment_pattern(left)?
        } else {
            match left {
                Expression::Identifier(id) => Pattern::Identifier(id),
                expr @ Expression::Member(_) => Pattern::Expression(Box::new(expr)),
                _ => return Err(self.error("Invalid left-hand side in assignment")),
            }
        };
        self.advance();
        let right = self.parse_assignment()?;

        Ok(Expression::Assignment(AssignmentExpression {
            operator,
            left: target,
            right: Box::new(right),
        }))
    }

    /// Decides whether an arrow function starts here, returning whether it
    /// is async.
    fn arrow_ahead(&self) -> Option<bool> {
        match &self.current.kind {
            TokenKind::Identifier(_) => {
                let next = self.peek();
                (next.kind == TokenKind::Arrow && !next.newline_before).then_some(false)
            }
            TokenKind::LeftParen => {
                let mut scanner = self.scanner.clone();
                arrow_after_parens(&mut scanner).then_some(false)
            }
            TokenKind::Async => {
                let mut scanner = self.scanner.clone();
                let next = scanner.next_token();
                if next.newline_before {
                    return None;
                }
                match next.kind {
                    // `async => ...` uses async as the parameter name
                    TokenKind::Arrow => Some(false),
                    TokenKind::Identifier(_) => {
                        let arrow = scanner.next_token();
                        (arrow.kind == TokenKind::Arrow && !arrow.newline_before).then_some(true)
                    }
                    TokenKind::LeftParen => arrow_after_parens(&mut scanner).then_some(true),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn parse_arrow_function(&mut self, is_async: bool) -> Result<Expression, Error> {
        if is_async {
            self.advance(); // consume 'async'
        }

        let params = if self.check(&TokenKind::LeftParen) {
            self.parse_formal_parameters(false)?
        } else {
            vec![Pattern::Identifier(self.expect_identifier()?)]
        };
        self.expect(&TokenKind::Arrow)?;

        let body = if self.check(&TokenKind::LeftBrace) {
            ArrowBody::Block(self.parse_body(false, self.new_target_allowed)?)
        } else {
            let saved = (self.in_function, self.in_generator);
            self.in_function = true;
            self.in_generator = false;
            let body = self.parse_assignment();
            (self.in_function, self.in_generator) = saved;
            ArrowBody::Expression(Box::new(body?))
        };

        Ok(Expression::Arrow(ArrowFunctionExpression {
            params,
            body,
            is_async,
        }))
    }

    fn parse_yield(&mut self) -> Result<Expression, Error> {
        self.advance(); // consume 'yield'

        let ends = self.current.newline_before
            || matches!(
                self.current.kind,
                TokenKind::RightParen
                    | TokenKind::RightBracket
                    | TokenKind::RightBrace
                    | TokenKind::Comma
                    | TokenKind::Semicolon
                    | TokenKind::Colon
                    | TokenKind::Eof
            )
            || (self.no_in && self.check(&TokenKind::In));
        if ends {
            return Ok(Expression::Yield(YieldExpression {
                argument: None,
                delegate: false,
            }));
        }

        let delegate = self.eat(&TokenKind::Star);
        let argument = self.parse_assignment()?;
        Ok(Expression::Yield(YieldExpression {
            argument: Some(Box::new(argument)),
            delegate,
        }))
    }

    fn parse_conditional(&mut self) -> Result<Expression, Error> {
        let test = self.parse_binary(0)?;
        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }

        let consequent = self.allow_in(Self::parse_assignment)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;

        Ok(Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    /// Precedence climbing over the binary and logical operators.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression, Error> {
        let mut left = self.parse_unary()?;

        loop {
            let Some((operator, precedence)) = self.binary_operator() else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let right = if operator == BinaryOperator::Exponent {
                self.parse_binary(precedence)?
            } else {
                self.parse_binary(precedence + 1)?
            };

            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn binary_operator(&self) -> Option<(BinaryOperator, u8)> {
        let entry = match &self.current.kind {
            TokenKind::QuestionQuestion => (BinaryOperator::NullishCoalescing, 1),
            TokenKind::PipePipe => (BinaryOperator::LogicalOr, 2),
            TokenKind::AmpersandAmpersand => (BinaryOperator::LogicalAnd, 3),
            TokenKind::Pipe => (BinaryOperator::BitwiseOr, 4),
            TokenKind::Caret => (BinaryOperator::BitwiseXor, 5),
            TokenKind::Ampersand => (BinaryOperator::BitwiseAnd, 6),
            TokenKind::EqualEqual => (BinaryOperator::Equal, 7),
            TokenKind::NotEqual => (BinaryOperator::NotEqual, 7),
            TokenKind::StrictEqual => (BinaryOperator::StrictEqual, 7),
            TokenKind::StrictNotEqual => (BinaryOperator::StrictNotEqual, 7),
            TokenKind::LessThan => (BinaryOperator::LessThan, 8),
            TokenKind::LessThanEqual => (BinaryOperator::LessThanEqual, 8),
            TokenKind::GreaterThan => (BinaryOperator::GreaterThan, 8),
            TokenKind::GreaterThanEqual => (BinaryOperator::GreaterThanEqual, 8),
            TokenKind::Instanceof => (BinaryOperator::InstanceOf, 8),
            TokenKind::In if !self.no_in => (BinaryOperator::In, 8),
            TokenKind::LeftShift => (BinaryOperator::LeftShift, 9),
            TokenKind::RightShift => (BinaryOperator::RightShift, 9),
            TokenKind::UnsignedRightShift => (BinaryOperator::UnsignedRightShift, 9),
            TokenKind::Plus => (BinaryOperator::Add, 10),
            TokenKind::Minus => (BinaryOperator::Subtract, 10),
            TokenKind::Star => (BinaryOperator::Multiply, 11),
            TokenKind::Slash => (BinaryOperator::Divide, 11),
            TokenKind::Percent => (BinaryOperator::Modulo, 11),
            TokenKind::StarStar => (BinaryOperator::Exponent, 12),
            _ => return None,
        };
        Some(entry)
    }

    fn parse_unary(&mut self) -> Result<Expression, Error> {
        let operator = match &self.current.kind {
            TokenKind::Bang => Some(UnaryOperator::LogicalNot),
            TokenKind::Tilde => Some(UnaryOperator::BitwiseNot),
            TokenKind::Minus => Some(UnaryOperator::Minus),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Typeof => Some(UnaryOperator::Typeof),
            TokenKind::Void => Some(UnaryOperator::Void),
            TokenKind::Delete => Some(UnaryOperator::Delete),
            _ => None,
        };
        if let Some(operator) = operator {
            self.advance();
            let argument = self.parse_unary()?;
            return Ok(Expression::Unary(UnaryExpression {
                operator,
                argument: Box::new(argument),
            }));
        }

        match &self.current.kind {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let operator = if self.check(&TokenKind::PlusPlus) {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                };
                self.advance();
                let argument = self.parse_unary()?;
                self.check_update_target(&argument)?;
                Ok(Expression::Update(UpdateExpression {
                    operator,
                    argument: Box::new(argument),
                    prefix: true,
                }))
            }
            TokenKind::Await => {
                self.advance();
                let argument = self.parse_unary()?;
                Ok(Expression::Await(Box::new(argument)))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expression, Error> {
        let expression = self.parse_left_hand_side()?;

        let operator = match &self.current.kind {
            TokenKind::PlusPlus if !self.current.newline_before => UpdateOperator::Increment,
            TokenKind::MinusMinus if !self.current.newline_before => UpdateOperator::Decrement,
            _ => return Ok(expression),
        };
        self.check_update_target(&expression)?;
        self.advance();

        Ok(Expression::Update(UpdateExpression {
            operator,
            argument: Box::new(expression),
            prefix: false,
        }))
    }

    fn check_update_target(&self, target: &Expression) -> Result<(), Error> {
        match target {
            Expression::Identifier(_) | Expression::Member(_) => Ok(()),
            _ => Err(self.error("Invalid left-hand side expression in update operation")),
        }
    }

    /// Parses member accesses, calls and optional chains.
    pub(super) fn parse_left_hand_side(&mut self) -> Result<Expression, Error> {
        let mut expression = if self.check(&TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary()?
        };
        let mut in_chain = false;

        loop {
            match &self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_member_name()?;
                    expression = Expression::Member(MemberExpression {
                        object: Box::new(expression),
                        property,
                        optional: false,
                    });
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    in_chain = true;
                    expression = match &self.current.kind {
                        TokenKind::LeftParen => Expression::Call(CallExpression {
                            callee: Box::new(expression),
                            arguments: self.parse_arguments()?,
                            optional: true,
                        }),
                        TokenKind::LeftBracket => {
                            let property = self.parse_computed_property()?;
                            Expression::Member(MemberExpression {
                                object: Box::new(expression),
                                property,
                                optional: true,
                            })
                        }
                        TokenKind::Template { .. } => {
                            return Err(self.error("Tagged template cannot be used in optional chain"));
                        }
                        _ => Expression::Member(MemberExpression {
                            object: Box::new(expression),
                            property: self.parse_member_name()?,
                            optional: true,
                        }),
                    };
                }
                TokenKind::LeftBracket => {
                    let property = self.parse_computed_property()?;
                    expression = Expression::Member(MemberExpression {
                        object: Box::new(expression),
                        property,
                        optional: false,
                    });
                }
                TokenKind::LeftParen => {
                    let arguments = self.parse_arguments()?;
                    expression = Expression::Call(CallExpression {
                        callee: Box::new(expression),
                        arguments,
                        optional: false,
                    });
                }
                TokenKind::Template { .. } => {
                    if in_chain {
                        return Err(self.error("Tagged template cannot be used in optional chain"));
                    }
                    let quasi = self.parse_template_literal(true)?;
                    expression = Expression::TaggedTemplate(TaggedTemplateExpression {
                        tag: Box::new(expression),
                        quasi,
                    });
                }
                _ => break,
            }
        }

        if in_chain {
            expression = Expression::Chain(Box::new(expression));
        }
        Ok(expression)
    }

    fn parse_member_name(&mut self) -> Result<MemberProperty, Error> {
        if let TokenKind::PrivateIdentifier(name) = &self.current.kind {
            let name = name.clone();
            self.advance();
            return Ok(MemberProperty::Private(name));
        }
        let name = self.expect_identifier_name()?;
        Ok(MemberProperty::Identifier(Identifier { name }))
    }

    fn parse_computed_property(&mut self) -> Result<MemberProperty, Error> {
        self.expect(&TokenKind::LeftBracket)?;
        let property = self.allow_in(Self::parse_expression)?;
        self.expect(&TokenKind::RightBracket)?;
        Ok(MemberProperty::Expression(Box::new(property)))
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, Error> {
        self.allow_in(|parser| {
            parser.expect(&TokenKind::LeftParen)?;
            let mut arguments = Vec::new();
            while !parser.check(&TokenKind::RightParen) {
                arguments.push(parser.parse_spread_or_assignment()?);
                if !parser.eat(&TokenKind::Comma) {
                    break;
                }
            }
            parser.expect(&TokenKind::RightParen)?;
            Ok(arguments)
        })
    }

    fn parse_spread_or_assignment(&mut self) -> Result<Expression, Error> {
        if self.eat(&TokenKind::Ellipsis) {
            let argument = self.parse_assignment()?;
            Ok(Expression::Spread(Box::new(argument)))
        } else {
            self.parse_assignment()
        }
    }

    fn parse_new_expression(&mut self) -> Result<Expression, Error> {
        let start = self.current.span.start;
        self.advance(); // consume 'new'

        if self.eat(&TokenKind::Dot) {
            if !self.new_target_allowed {
                return Err(self.error_at(start, "new.target expression is not allowed here"));
            }
            if !self.check_identifier("target") {
                return Err(self.unexpected());
            }
            self.advance();
            return Ok(Expression::MetaProperty(MetaProperty {
                meta: "new".to_string(),
                property: "target".to_string(),
            }));
        }

        let mut callee = if self.check(&TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary()?
        };

        // The callee takes member accesses but stops at the first call.
        loop {
            match &self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_member_name()?;
                    callee = Expression::Member(MemberExpression {
                        object: Box::new(callee),
                        property,
                        optional: false,
                    });
                }
                TokenKind::LeftBracket => {
                    let property = self.parse_computed_property()?;
                    callee = Expression::Member(MemberExpression {
                        object: Box::new(callee),
                        property,
                        optional: false,
                    });
                }
                TokenKind::Template { .. } => {
                    let quasi = self.parse_template_literal(true)?;
                    callee = Expression::TaggedTemplate(TaggedTemplateExpression {
                        tag: Box::new(callee),
                        quasi,
                    });
                }
                TokenKind::QuestionDot => {
                    return Err(self.error("Invalid optional chain from new expression"));
                }
                _ => break,
            }
        }

        let arguments = if self.check(&TokenKind::LeftParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Expression::New(NewExpression {
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_primary(&mut self) -> Result<Expression, Error> {
        let literal = match &self.current.kind {
            TokenKind::Number(n) => Some(Literal::Number(*n)),
            TokenKind::String(s) => Some(Literal::String(s.clone())),
            TokenKind::BigInt(digits) => Some(Literal::BigInt(digits.clone())),
            TokenKind::True => Some(Literal::Boolean(true)),
            TokenKind::False => Some(Literal::Boolean(false)),
            TokenKind::Null => Some(Literal::Null),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Ok(Expression::Literal(literal));
        }

        match &self.current.kind {
            TokenKind::Slash | TokenKind::SlashEqual => {
                self.current = self
                    .scanner
                    .rescan_regexp(self.current.span.start, self.current.newline_before);
                let TokenKind::RegExp { pattern, flags } = &self.current.kind else {
                    return Err(self.unexpected());
                };
                let literal = Literal::RegExp {
                    pattern: pattern.clone(),
                    flags: flags.clone(),
                };
                self.advance();
                Ok(Expression::Literal(literal))
            }
            TokenKind::Template { .. } => {
                let template = self.parse_template_literal(false)?;
                Ok(Expression::Template(template))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expression::Identifier(Identifier { name }))
            }
            TokenKind::Async => {
                if self.async_function_ahead() {
                    self.advance();
                    let func = self.parse_function(true, false)?;
                    return Ok(Expression::Function(func));
                }
                self.advance();
                Ok(Expression::Identifier(Identifier::new("async")))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expression::This)
            }
            TokenKind::Super => {
                self.advance();
                if !matches!(
                    self.current.kind,
                    TokenKind::LeftParen | TokenKind::Dot | TokenKind::LeftBracket
                ) {
                    return Err(self.error("'super' keyword unexpected here"));
                }
                Ok(Expression::Super)
            }
            TokenKind::LeftParen => {
                self.advance();
                let expression = self.allow_in(Self::parse_expression)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expression)
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::Function => {
                let func = self.parse_function(false, false)?;
                Ok(Expression::Function(func))
            }
            TokenKind::Class => {
                let class = self.parse_class(false)?;
                Ok(Expression::Class(class))
            }
            TokenKind::Import => self.parse_import_expression(),
            _ => Err(self.unexpected()),
        }
    }

    /// `import(source)` or `import.meta`.
    fn parse_import_expression(&mut self) -> Result<Expression, Error> {
        self.advance(); // consume 'import'

        if self.eat(&TokenKind::Dot) {
            if !self.check_identifier("meta") {
                return Err(self.unexpected());
            }
            self.advance();
            return Ok(Expression::MetaProperty(MetaProperty {
                meta: "import".to_string(),
                property: "meta".to_string(),
            }));
        }

        let source = self.allow_in(|parser| {
            parser.expect(&TokenKind::LeftParen)?;
            let source = parser.parse_assignment()?;
            parser.eat(&TokenKind::Comma);
            parser.expect(&TokenKind::RightParen)?;
            Ok(source)
        })?;
        Ok(Expression::ImportCall(Box::new(source)))
    }

    fn parse_array_literal(&mut self) -> Result<Expression, Error> {
        self.allow_in(|parser| {
            parser.expect(&TokenKind::LeftBracket)?;
            let mut elements = Vec::new();

            while !parser.check(&TokenKind::RightBracket) {
                if parser.eat(&TokenKind::Comma) {
                    elements.push(None);
                    continue;
                }
                elements.push(Some(parser.parse_spread_or_assignment()?));
                if !parser.check(&TokenKind::RightBracket) {
                    parser.expect(&TokenKind::Comma)?;
                }
            }

            parser.expect(&TokenKind::RightBracket)?;
            Ok(Expression::Array(ArrayExpression { elements }))
        })
    }

    fn parse_object_literal(&mut self) -> Result<Expression, Error> {
        self.allow_in(|parser| {
            parser.expect(&TokenKind::LeftBrace)?;
            let mut properties = Vec::new();

            while !parser.check(&TokenKind::RightBrace) {
                properties.push(parser.parse_object_member()?);
                if !parser.eat(&TokenKind::Comma) {
                    break;
                }
            }

            parser.expect(&TokenKind::RightBrace)?;
            Ok(Expression::Object(ObjectExpression { properties }))
        })
    }

    fn parse_object_member(&mut self) -> Result<ObjectMember, Error> {
        if self.eat(&TokenKind::Ellipsis) {
            return Ok(ObjectMember::Spread(self.parse_assignment()?));
        }

        let is_async = self.check(&TokenKind::Async)
            && self.is_property_modifier()
            && !self.peek().newline_before;
        if is_async {
            self.advance();
        }
        let is_generator = self.eat(&TokenKind::Star);

        let mut kind = PropertyKind::Init;
        if !is_async && !is_generator && self.is_property_modifier() {
            if self.check_identifier("get") {
                self.advance();
                kind = PropertyKind::Get;
            } else if self.check_identifier("set") {
                self.advance();
                kind = PropertyKind::Set;
            }
        }

        let shorthand_candidate = self.is_binding_identifier();
        let key = self.parse_property_key()?;

        if kind != PropertyKind::Init || is_async || is_generator || self.check(&TokenKind::LeftParen)
        {
            if kind == PropertyKind::Init {
                kind = PropertyKind::Method;
            }
            let value = self.parse_method_function(is_async, is_generator)?;
            return Ok(ObjectMember::Property(Property {
                key,
                value: Expression::Function(value),
                kind,
                shorthand: false,
            }));
        }

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(ObjectMember::Property(Property {
                key,
                value,
                kind,
                shorthand: false,
            }));
        }

        let PropertyKey::Identifier(id) = &key else {
            return Err(self.unexpected());
        };
        if !shorthand_candidate {
            return Err(self.unexpected());
        }

        // `{ a = 1 }` is only valid once the literal becomes a pattern.
        let value = if self.check(&TokenKind::Equal) {
            self.advance();
            let default = self.parse_assignment()?;
            Expression::Assignment(AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left: Pattern::Identifier(id.clone()),
                right: Box::new(default),
            })
        } else {
            Expression::Identifier(id.clone())
        };

        Ok(ObjectMember::Property(Property {
            key,
            value,
            kind,
            shorthand: true,
        }))
    }

    /// Like the class-member check: `get`, `set` and `async` only act as
    /// modifiers when a property name follows.
    fn is_property_modifier(&self) -> bool {
        !matches!(
            self.peek().kind,
            TokenKind::LeftParen
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::RightBrace
                | TokenKind::Equal
                | TokenKind::Eof
        )
    }

    /// Parses a template literal; the current token is its first chunk.
    pub(super) fn parse_template_literal(&mut self, tagged: bool) -> Result<TemplateLiteral, Error> {
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        loop {
            let TokenKind::Template { cooked, raw, tail } = &self.current.kind else {
                return Err(self.unexpected());
            };
            if cooked.is_none() && !tagged {
                return Err(self.error("Invalid escape sequence in template"));
            }
            let tail = *tail;
            quasis.push(TemplateElement {
                raw: raw.clone(),
                cooked: cooked.clone(),
            });

            if tail {
                self.advance();
                break;
            }

            self.advance();
            expressions.push(self.allow_in(Self::parse_expression)?);
            if !self.check(&TokenKind::RightBrace) {
                return Err(self.error("Expected '}' after template substitution"));
            }
            self.current = self
                .scanner
                .scan_template_continuation(self.current.span.start);
        }

        Ok(TemplateLiteral {
            quasis,
            expressions,
        })
    }
}

fn assignment_operator(kind: &TokenKind) -> Option<AssignmentOperator> {
    let operator = match kind {
        TokenKind::Equal => AssignmentOperator::Assign,
        TokenKind::PlusEqual => AssignmentOperator::AddAssign,
        TokenKind::MinusEqual => AssignmentOperator::SubtractAssign,
        TokenKind::StarEqual => AssignmentOperator::MultiplyAssign,
        TokenKind::SlashEqual => AssignmentOperator::DivideAssign,
        TokenKind::PercentEqual => AssignmentOperator::ModuloAssign,
        TokenKind::StarStarEqual => AssignmentOperator::ExponentAssign,
        TokenKind::LeftShiftEqual => AssignmentOperator::LeftShiftAssign,
        TokenKind::RightShiftEqual => AssignmentOperator::RightShiftAssign,
        TokenKind::UnsignedRightShiftEqual => AssignmentOperator::UnsignedRightShiftAssign,
        TokenKind::AmpersandEqual => AssignmentOperator::BitwiseAndAssign,
        TokenKind::PipeEqual => AssignmentOperator::BitwiseOrAssign,
        TokenKind::CaretEqual => AssignmentOperator::BitwiseXorAssign,
        TokenKind::AmpersandAmpersandEqual => AssignmentOperator::LogicalAndAssign,
        TokenKind::PipePipeEqual => AssignmentOperator::LogicalOrAssign,
        TokenKind::QuestionQuestionEqual => AssignmentOperator::NullishCoalescingAssign,
        _ => return None,
    };
    Some(operator)
}

/// Skips the rest of a parenthesized group whose `(` the scanner has
/// already passed, then reports whether `=>` follows on the same line.
fn arrow_after_parens(scanner: &mut Scanner<'_>) -> bool {
    let mut depth = 1usize;
    while depth > 0 {
        match scanner.next_token().kind {
            TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => depth += 1,
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => depth -= 1,
            TokenKind::Eof | TokenKind::Invalid(_) => return false,
            _ => {}
        }
    }
    let next = scanner.next_token();
    next.kind == TokenKind::Arrow && !next.newline_before
}
