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

use log::debug;

use crate::ast::{Expr, Program};
use crate::error::ScriptError;
use crate::lexer::token::{Token, TokenKind};

/// The recursive-descent parser.
///
/// Grammar logic lives in extension modules (`statements`, `expressions`,
/// `helpers`) through additional `impl Parser` blocks.
pub struct Parser {
    /// Complete list of tokens to be parsed, ending in `Eof`.
    pub tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    pub current: usize,

    /// The code being parsed is strict mode code.
    pub strict: bool,

    /// Number of function bodies enclosing the cursor.
    pub(crate) function_depth: usize,

    /// Statements and expressions currently being parsed inside each other.
    nesting: usize,
}

/// Parses a whole script.
///
/// `strict` forces strict mode even without a `"use strict"` directive.
///
/// ```text
/// Source → Lexer → Tokens → Parser → AST → Interpreter
/// ```
pub fn parse(tokens: Vec<Token>, strict: bool) -> Result<Program, ScriptError> {
    let mut parser = Parser::new(tokens, strict);
    parser.parse_program()
}

/// Parses a token stream holding exactly one expression.
///
/// Unlike a statement, a leading `{` here is an object literal, so
/// `{ in: 11 }` parses.
pub fn parse_expression(tokens: Vec<Token>) -> Result<Expr, ScriptError> {
    let mut parser = Parser::new(tokens, false);
    let expr = parser.expression()?;

    if !parser.is_at_end() {
        return Err(parser.unexpected(parser.peek()));
    }

    Ok(expr)
}

/// Deepest nesting of statements and expressions the parser accepts.
pub const MAX_NESTING: usize = 64;

impl Parser {
    /// Creates a parser over `tokens`.
    ///
    /// A stream that does not end in `Eof` (an empty one included) gets an
    /// `Eof` appended, so the cursor always has a token to look at.
    pub fn new(mut tokens: Vec<Token>, strict: bool) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let span = tokens.last().map(|t| t.span).unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span,
                newline_before: false,
                escaped: false,
            });
        }

        Self {
            tokens,
            current: 0,
            strict,
            function_depth: 0,
            nesting: 0,
        }
    }

    /// Runs `rule` one nesting level deeper, failing with a `SyntaxError`
    /// past `MAX_NESTING`.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        if self.nesting >= MAX_NESTING {
            return Err(ScriptError::syntax_error(
                "too many nested statements or expressions",
                self.peek().span,
            ));
        }

        self.nesting += 1;
        let result = rule(self);
        self.nesting -= 1;
        result
    }

    /// Parses statements until `Eof`.
    ///
    /// The first error aborts the whole parse; nothing is recovered.
    pub fn parse_program(&mut self) -> Result<Program, ScriptError> {
        if self.has_use_strict_directive() {
            debug!("program opts into strict mode");
            self.strict = true;
        }

        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.statement()?);
        }

        debug!("parsed {} top-level statements", body.len());

        Ok(Program {
            body,
            strict: self.strict,
        })
    }

    /// Looks for `"use strict"` among the string-literal statements at the
    /// cursor, without consuming anything.
    pub(crate) fn has_use_strict_directive(&self) -> bool {
        let mut i = self.current;

        while let Some(token) = self.tokens.get(i) {
            if token.kind != TokenKind::String {
                return false;
            }

            let next = match self.tokens.get(i + 1) {
                Some(next) => next,
                None => return false,
            };

            let ends_statement = next.is_punctuator(";")
                || next.is_punctuator("}")
                || next.kind == TokenKind::Eof
                || next.newline_before;
            if !ends_statement {
                return false;
            }

            // a directive is matched on its source text, so escapes disqualify it
            if token.lexeme == "use strict" && !token.escaped {
                return true;
            }

            i += if next.is_punctuator(";") { 2 } else { 1 };
        }

        false
    }
}
