/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the ESNAMES project.
 *
 * ESNAMES is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * The expression grammar, lowest precedence first:
 *
 *   assignment → conditional → logical_or → logical_and → equality
 *     → relational → additive → multiplicative → unary → call → primary
 *
 * Property names (after `.` and as object-literal keys) accept every
 * IdentifierName. A reserved word anywhere else in an expression is a
 * syntax error unless the grammar gives it a meaning (`typeof`, `in`,
 * `this`, `function`, `true`, ...).
 * ==========================================================================
 */

use crate::ast::{Expr, Literal};
use crate::error::ScriptError;
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;
use crate::value::number_to_string;

impl Parser {
    /// expression → assignment
    pub fn expression(&mut self) -> Result<Expr, ScriptError> {
        self.assignment()
    }

    /// assignment → conditional ( "=" assignment )?
    pub(crate) fn assignment(&mut self) -> Result<Expr, ScriptError> {
        self.nested(Self::assignment_body)
    }

    fn assignment_body(&mut self) -> Result<Expr, ScriptError> {
        let expr = self.conditional()?;

        if self.check_punct("=") {
            let eq = self.advance();
            let value = self.assignment()?;

            return match expr {
                Expr::Identifier { .. } | Expr::Member { .. } | Expr::Index { .. } => {
                    Ok(Expr::Assign {
                        target: Box::new(expr),
                        value: Box::new(value),
                        span: eq.span,
                    })
                }
                _ => Err(ScriptError::syntax_error("invalid assignment target", eq.span)),
            };
        }

        Ok(expr)
    }

    /// conditional → logical_or ( "?" assignment ":" assignment )?
    fn conditional(&mut self) -> Result<Expr, ScriptError> {
        let condition = self.logical_or()?;

        if self.match_punct("?") {
            let then_expr = self.assignment()?;
            self.consume_punct(":")?;
            let else_expr = self.assignment()?;

            return Ok(Expr::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            });
        }

        Ok(condition)
    }

    /// logical_or → logical_and ( "||" logical_and )*
    fn logical_or(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.logical_and()?;

        while self.match_punct("||") {
            let right = self.logical_and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator: "||".to_string(),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// logical_and → equality ( "&&" equality )*
    fn logical_and(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.equality()?;

        while self.match_punct("&&") {
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator: "&&".to_string(),
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    /// equality → relational ( ( "==" | "!=" | "===" | "!==" ) relational )*
    fn equality(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.relational()?;

        while ["==", "!=", "===", "!=="].iter().any(|op| self.check_punct(op)) {
            let op = self.advance();
            let right = self.relational()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: op.lexeme,
                right: Box::new(right),
                span: op.span,
            };
        }

        Ok(expr)
    }

    /// relational → additive ( ( "<" | ">" | "<=" | ">=" | "in" | "instanceof" ) additive )*
    fn relational(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.additive()?;

        while ["<", ">", "<=", ">="].iter().any(|op| self.check_punct(op))
            || self.check_reserved("in")
            || self.check_reserved("instanceof")
        {
            let op = self.advance();
            let right = self.additive()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: op.lexeme,
                right: Box::new(right),
                span: op.span,
            };
        }

        Ok(expr)
    }

    /// additive → multiplicative ( ( "+" | "-" ) multiplicative )*
    fn additive(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.multiplicative()?;

        while self.check_punct("+") || self.check_punct("-") {
            let op = self.advance();
            let right = self.multiplicative()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: op.lexeme,
                right: Box::new(right),
                span: op.span,
            };
        }

        Ok(expr)
    }

    /// multiplicative → unary ( ( "*" | "/" | "%" ) unary )*
    fn multiplicative(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.unary()?;

        while self.check_punct("*") || self.check_punct("/") || self.check_punct("%") {
            let op = self.advance();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator: op.lexeme,
                right: Box::new(right),
                span: op.span,
            };
        }

        Ok(expr)
    }

    /// unary → ( "!" | "-" | "+" | "typeof" | "void" | "delete" ) unary | call
    fn unary(&mut self) -> Result<Expr, ScriptError> {
        let is_unary = ["!", "-", "+"].iter().any(|op| self.check_punct(op))
            || ["typeof", "void", "delete"].iter().any(|w| self.check_reserved(w));

        if !is_unary {
            return self.call();
        }

        let op = self.advance();
        let operand = self.nested(Self::unary)?;

        if op.lexeme == "delete" && self.strict {
            if let Expr::Identifier { name, .. } = &operand {
                return Err(ScriptError::syntax_error(
                    format!("cannot delete unqualified identifier '{}' in strict mode", name),
                    op.span,
                ));
            }
        }

        Ok(Expr::Unary {
            operator: op.lexeme,
            operand: Box::new(operand),
            span: op.span,
        })
    }

    /// call → primary ( "(" arguments? ")" | "." IdentifierName | "[" expression "]" )*
    fn call(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.primary()?;

        loop {
            // function call: f(...)
            if self.check_punct("(") {
                let open = self.advance();
                let arguments = self.arguments()?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    arguments,
                    span: open.span,
                };
                continue;
            }

            // property access: obj.prop, obj.catch, obj.in
            if self.check_punct(".") {
                let dot = self.advance();
                let property = self.consume_property_name()?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                    span: dot.span,
                };
                continue;
            }

            // computed access: obj[expr]
            if self.check_punct("[") {
                let open = self.advance();
                let index = self.expression()?;
                self.consume_punct("]")?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span: open.span,
                };
                continue;
            }

            break;
        }

        Ok(expr)
    }

    /// Argument list after an already consumed `(`.
    fn arguments(&mut self) -> Result<Vec<Expr>, ScriptError> {
        let mut args = Vec::new();

        if !self.check_punct(")") {
            loop {
                args.push(self.assignment()?);

                if !self.match_punct(",") {
                    break;
                }
            }
        }

        self.consume_punct(")")?;
        Ok(args)
    }

    fn primary(&mut self) -> Result<Expr, ScriptError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Literal(Literal::Number(parse_number(&token.lexeme, token.span)?)))
            }

            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal(Literal::String(token.lexeme)))
            }

            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Identifier {
                    name: token.lexeme,
                    span: token.span,
                })
            }

            TokenKind::ReservedWord => match token.lexeme.as_str() {
                "true" => {
                    self.advance();
                    Ok(Expr::Literal(Literal::Bool(true)))
                }
                "false" => {
                    self.advance();
                    Ok(Expr::Literal(Literal::Bool(false)))
                }
                "null" => {
                    self.advance();
                    Ok(Expr::Literal(Literal::Null))
                }
                "this" => {
                    self.advance();
                    Ok(Expr::This)
                }
                "function" => {
                    self.advance();
                    let name = if self.check_punct("(") {
                        None
                    } else {
                        Some(self.consume_binding_identifier()?.0)
                    };
                    Ok(Expr::Function(self.function_rest(name, token.span)?))
                }
                _ => Err(self.unexpected(&token)),
            },

            TokenKind::Punctuator if token.lexeme == "(" => {
                self.advance();
                let expr = self.expression()?;
                self.consume_punct(")")?;
                Ok(expr)
            }

            TokenKind::Punctuator if token.lexeme == "{" => self.object_literal(),

            _ => Err(self.unexpected(&token)),
        }
    }

    /// Object literal: `{ in: 11, 'quoted key': 1, 2: true, }`
    ///
    /// Keys are IdentifierNames, so `in`, `class` and `catch` are ordinary
    /// keys here.
    fn object_literal(&mut self) -> Result<Expr, ScriptError> {
        self.consume_punct("{")?;

        let mut properties = Vec::new();

        while !self.check_punct("}") {
            let key_token = self.peek().clone();
            let key = match key_token.kind {
                TokenKind::Identifier | TokenKind::ReservedWord | TokenKind::String => {
                    self.advance();
                    key_token.lexeme
                }
                TokenKind::Number => {
                    self.advance();
                    number_to_string(parse_number(&key_token.lexeme, key_token.span)?)
                }
                _ => return Err(self.expected("property name")),
            };

            self.consume_punct(":")?;
            let value = self.assignment()?;
            properties.push((key, value));

            if !self.match_punct(",") {
                break;
            }
        }

        self.consume_punct("}")?;
        Ok(Expr::Object { properties })
    }
}

fn parse_number(lexeme: &str, span: crate::span::Span) -> Result<f64, ScriptError> {
    let invalid = || ScriptError::syntax_error(format!("invalid number literal '{}'", lexeme), span);

    if let Some(hex) = lexeme.strip_prefix("0x").or_else(|| lexeme.strip_prefix("0X")) {
        return hex.chars().try_fold(0f64, |acc, c| {
            c.to_digit(16).map(|d| acc * 16.0 + d as f64).ok_or_else(invalid)
        });
    }

    lexeme.parse::<f64>().map_err(|_| invalid())
}
