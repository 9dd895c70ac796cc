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
 * ==========================================================================
 */

/*!
 * Statement parser
 * ----------------
 *
 * Every place a statement introduces a binding (`var x`, `function f`,
 * `catch (e)`, and function parameters via `expressions.rs`) goes through
 * `consume_binding_identifier`, which is where reserved words are refused.
 */

use std::rc::Rc;

use log::debug;

use crate::ast::{FunctionNode, Param, Stmt, VarDeclarator};
use crate::error::ScriptError;
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// Dispatches on the first token of a statement.
    pub fn statement(&mut self) -> Result<Stmt, ScriptError> {
        self.nested(Self::statement_body)
    }

    fn statement_body(&mut self) -> Result<Stmt, ScriptError> {
        if self.check_punct("{") {
            return Ok(Stmt::Block(self.block()?));
        }

        if self.match_punct(";") {
            return Ok(Stmt::Empty);
        }

        if self.peek().kind == TokenKind::ReservedWord {
            match self.peek().lexeme.as_str() {
                "var" => return self.var_declaration(),
                "function" => return self.function_declaration(),
                "return" => return self.return_statement(),
                "if" => return self.if_statement(),
                "while" => return self.while_statement(),
                "try" => return self.try_statement(),
                "throw" => return self.throw_statement(),
                _ => {}
            }
        }

        let expr = self.expression()?;
        self.consume_semicolon()?;
        Ok(Stmt::Expression(expr))
    }

    /// `{ statement* }`
    pub fn block(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        self.consume_punct("{")?;

        let mut body = Vec::new();
        while !self.check_punct("}") {
            if self.is_at_end() {
                return Err(self.expected("'}'"));
            }
            body.push(self.statement()?);
        }

        self.consume_punct("}")?;
        Ok(body)
    }

    /// `var a = 1, b, c = a;`
    fn var_declaration(&mut self) -> Result<Stmt, ScriptError> {
        self.advance(); // var

        let mut declarations = Vec::new();
        loop {
            let (name, span) = self.consume_binding_identifier()?;
            let init = if self.match_punct("=") {
                Some(self.assignment()?)
            } else {
                None
            };

            declarations.push(VarDeclarator { name, init, span });

            if !self.match_punct(",") {
                break;
            }
        }

        self.consume_semicolon()?;
        Ok(Stmt::Var { declarations })
    }

    fn function_declaration(&mut self) -> Result<Stmt, ScriptError> {
        let keyword = self.advance(); // function
        let (name, _) = self.consume_binding_identifier()?;
        let node = self.function_rest(Some(name), keyword.span)?;
        Ok(Stmt::Function(node))
    }

    /// Parameter list and body of a function; the `function` keyword and
    /// optional name have already been consumed.
    pub(crate) fn function_rest(
        &mut self,
        name: Option<String>,
        span: crate::span::Span,
    ) -> Result<Rc<FunctionNode>, ScriptError> {
        self.consume_punct("(")?;

        let mut params: Vec<Param> = Vec::new();
        if !self.check_punct(")") {
            loop {
                let (param, param_span) = self.consume_binding_identifier()?;
                params.push(Param::new(param, param_span));

                if !self.match_punct(",") {
                    break;
                }
            }
        }
        self.consume_punct(")")?;

        self.consume_punct("{")?;

        let outer_strict = self.strict;
        let body_strict = outer_strict || self.has_use_strict_directive();

        if body_strict && !outer_strict {
            debug!("function {} opts into strict mode", name.as_deref().unwrap_or("<anonymous>"));

            if let Some(fname) = &name {
                self.check_binding_name(fname, span, true)?;
            }
            for param in &params {
                self.check_binding_name(&param.name, param.span, true)?;
            }
        }

        if body_strict {
            for (i, param) in params.iter().enumerate() {
                if params[..i].iter().any(|p| p.name == param.name) {
                    return Err(ScriptError::syntax_error(
                        format!("duplicate parameter name '{}' in strict mode", param.name),
                        param.span,
                    ));
                }
            }
        }

        self.strict = body_strict;
        self.function_depth += 1;

        let body = self.function_body();

        self.function_depth -= 1;
        self.strict = outer_strict;

        Ok(Rc::new(FunctionNode {
            name,
            params,
            body: body?,
            strict: body_strict,
            span,
        }))
    }

    /// Statements up to and including the closing `}` of a function body.
    fn function_body(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut body = Vec::new();
        while !self.check_punct("}") {
            if self.is_at_end() {
                return Err(self.expected("'}'"));
            }
            body.push(self.statement()?);
        }
        self.consume_punct("}")?;
        Ok(body)
    }

    fn return_statement(&mut self) -> Result<Stmt, ScriptError> {
        let keyword = self.advance(); // return

        if self.function_depth == 0 {
            return Err(ScriptError::syntax_error(
                "return statement outside of function",
                keyword.span,
            ));
        }

        let next = self.peek();
        let bare = next.is_punctuator(";")
            || next.is_punctuator("}")
            || next.kind == TokenKind::Eof
            || next.newline_before;

        let value = if bare { None } else { Some(self.expression()?) };

        self.consume_semicolon()?;
        Ok(Stmt::Return(value))
    }

    fn if_statement(&mut self) -> Result<Stmt, ScriptError> {
        self.advance(); // if
        self.consume_punct("(")?;
        let condition = self.expression()?;
        self.consume_punct(")")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_reserved("else") {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, ScriptError> {
        self.advance(); // while
        self.consume_punct("(")?;
        let condition = self.expression()?;
        self.consume_punct(")")?;

        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    fn try_statement(&mut self) -> Result<Stmt, ScriptError> {
        let keyword = self.advance(); // try
        let try_block = self.block()?;

        let mut catch_param = None;
        let mut catch_block = None;
        if self.match_reserved("catch") {
            self.consume_punct("(")?;
            let (name, span) = self.consume_binding_identifier()?;
            self.consume_punct(")")?;

            catch_param = Some(Param::new(name, span));
            catch_block = Some(self.block()?);
        }

        let finally_block = if self.match_reserved("finally") {
            Some(self.block()?)
        } else {
            None
        };

        if catch_block.is_none() && finally_block.is_none() {
            return Err(ScriptError::syntax_error(
                "missing catch or finally after try",
                keyword.span,
            ));
        }

        Ok(Stmt::Try {
            try_block,
            catch_param,
            catch_block,
            finally_block,
        })
    }

    fn throw_statement(&mut self) -> Result<Stmt, ScriptError> {
        let keyword = self.advance(); // throw

        if self.peek().newline_before {
            return Err(ScriptError::syntax_error("illegal newline after throw", keyword.span));
        }

        let value = self.expression()?;
        self.consume_semicolon()?;
        Ok(Stmt::Throw {
            value,
            span: keyword.span,
        })
    }
}
