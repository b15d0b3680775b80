// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Binding and assignment patterns.
//!
//! Declarations and parameters are parsed as patterns directly. Assignment
//! targets are parsed as expressions first (`[a, b] = ...` looks like an
//! array literal until the `=` arrives) and converted afterwards with
//! [`Parser::to_assignment_pattern`].

use super::Parser;
use crate::Error;
use crate::ast::*;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parses an identifier, object pattern or array pattern.
    pub(super) fn parse_binding_target(&mut self) -> Result<Pattern, Error> {
        match &self.current.kind {
            TokenKind::LeftBrace => self.parse_object_binding(),
            TokenKind::LeftBracket => self.parse_array_binding(),
            _ => Ok(Pattern::Identifier(self.expect_identifier()?)),
        }
    }

    /// Parses a binding target with an optional `= default`.
    pub(super) fn parse_binding_element(&mut self) -> Result<Pattern, Error> {
        let target = self.parse_binding_target()?;
        if !self.eat(&TokenKind::Equal) {
            return Ok(target);
        }
        let default = self.allow_in(Self::parse_assignment)?;
        Ok(Pattern::Assign(AssignmentPattern {
            left: Box::new(target),
            right: Box::new(default),
        }))
    }

    fn parse_object_binding(&mut self) -> Result<Pattern, Error> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut properties = Vec::new();

        while !self.check(&TokenKind::RightBrace) {
            if self.eat(&TokenKind::Ellipsis) {
                let rest = self.expect_identifier()?;
                properties.push(ObjectPatternProperty::Rest(Box::new(Pattern::Identifier(rest))));
                break;
            }

            let shorthand_candidate = self.is_binding_identifier();
            let key = self.parse_property_key()?;

            let property = if self.eat(&TokenKind::Colon) {
                ObjectPatternProperty::Property {
                    key,
                    value: self.parse_binding_element()?,
                    shorthand: false,
                }
            } else {
                let PropertyKey::Identifier(id) = &key else {
                    return Err(self.unexpected());
                };
                if !shorthand_candidate {
                    return Err(self.unexpected());
                }
                let mut value = Pattern::Identifier(id.clone());
                if self.eat(&TokenKind::Equal) {
                    let default = self.allow_in(Self::parse_assignment)?;
                    value = Pattern::Assign(AssignmentPattern {
                        left: Box::new(value),
                        right: Box::new(default),
                    });
                }
                ObjectPatternProperty::Property {
                    key,
                    value,
                    shorthand: true,
                }
            };
            properties.push(property);

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RightBrace)?;
        Ok(Pattern::Object(ObjectPattern { properties }))
    }

    fn parse_array_binding(&mut self) -> Result<Pattern, Error> {
        self.expect(&TokenKind::LeftBracket)?;
        let mut elements = Vec::new();

        while !self.check(&TokenKind::RightBracket) {
            if self.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.eat(&TokenKind::Ellipsis) {
                let rest = self.parse_binding_target()?;
                elements.push(Some(Pattern::Rest(Box::new(rest))));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.check(&TokenKind::RightBracket) {
                self.expect(&TokenKind::Comma)?;
            }
        }

        self.expect(&TokenKind::RightBracket)?;
        Ok(Pattern::Array(ArrayPattern { elements }))
    }

    /// Reinterprets an already-parsed expression as an assignment target.
    pub(super) fn to_assignment_pattern(&self, expression: Expression) -> Result<Pattern, Error> {
        match expression {
            Expression::Identifier(id) => Ok(Pattern::Identifier(id)),
            expr @ Expression::Member(_) => Ok(Pattern::Expression(Box::new(expr))),
            Expression::Array(array) => {
                let count = array.elements.len();
                let mut elements = Vec::with_capacity(count);
                for (index, element) in array.elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(Expression::Spread(argument)) => {
                            if index + 1 != count {
                                return Err(self.error("Rest element must be last element"));
                            }
                            Some(Pattern::Rest(Box::new(self.to_assignment_pattern(*argument)?)))
                        }
                        Some(element) => Some(self.to_assignment_pattern(element)?),
                    };
                    elements.push(pattern);
                }
                Ok(Pattern::Array(ArrayPattern { elements }))
            }
            Expression::Object(object) => {
                let mut properties = Vec::with_capacity(object.properties.len());
                for member in object.properties {
                    let property = match member {
                        ObjectMember::Spread(argument) => {
                            ObjectPatternProperty::Rest(Box::new(self.to_assignment_pattern(argument)?))
                        }
                        ObjectMember::Property(property) if property.kind == PropertyKind::Init => {
                            ObjectPatternProperty::Property {
                                key: property.key,
                                value: self.to_assignment_pattern(property.value)?,
                                shorthand: property.shorthand,
                            }
                        }
                        ObjectMember::Property(_) => {
                            return Err(self.error("Invalid destructuring assignment target"));
                        }
                    };
                    properties.push(property);
                }
                Ok(Pattern::Object(ObjectPattern { properties }))
            }
            Expression::Assignment(assign) if assign.operator == AssignmentOperator::Assign => {
                Ok(Pattern::Assign(AssignmentPattern {
                    left: Box::new(assign.left),
                    right: assign.right,
                }))
            }
            _ => Err(self.error("Invalid left-hand side in assignment")),
        }
    }
}
