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

use crate::error::ScriptError;
use crate::lexer::keywords::{is_valid_as_identifier_in, NamePosition};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::Parser;
use crate::span::Span;

impl Parser {
    /// The token under the cursor. At the end this is the `Eof` token.
    pub fn peek(&self) -> &Token {
        // `Parser::new` guarantees a trailing `Eof`
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.current.min(last)]
    }

    /// The token after the cursor, if any.
    pub fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    /// Advances one token forward. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let t = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        t
    }

    /// Returns the previously consumed token.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Returns true if the parser is at EOF.
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Checks if the current token is the punctuator `p`.
    pub fn check_punct(&self, p: &str) -> bool {
        self.peek().is_punctuator(p)
    }

    /// Matches a punctuator and consumes it.
    pub fn match_punct(&mut self, p: &str) -> bool {
        if self.check_punct(p) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a required punctuator.
    pub fn consume_punct(&mut self, p: &str) -> Result<Token, ScriptError> {
        if self.check_punct(p) {
            Ok(self.advance())
        } else {
            Err(self.expected(&format!("'{}'", p)))
        }
    }

    /// Checks for a reserved word without consuming it.
    pub fn check_reserved(&self, word: &str) -> bool {
        self.peek().is_reserved(word)
    }

    /// Matches a reserved word and consumes it if present.
    pub fn match_reserved(&mut self, word: &str) -> bool {
        if self.check_reserved(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a name in BindingIdentifier position.
    ///
    /// Reserved words are refused outright; strict-only words are refused
    /// when the surrounding code is strict.
    pub fn consume_binding_identifier(&mut self) -> Result<(String, Span), ScriptError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Identifier | TokenKind::ReservedWord => {
                self.check_binding_name(&token.lexeme, token.span, self.strict)?;
                self.advance();
                Ok((token.lexeme, token.span))
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// Re-runs the binding check for a name that was accepted earlier, e.g.
    /// parameters of a function whose body turns out to be strict.
    pub fn check_binding_name(&self, name: &str, span: Span, strict: bool) -> Result<(), ScriptError> {
        if is_valid_as_identifier_in(name, NamePosition::BindingIdentifier, strict) {
            Ok(())
        } else {
            Err(ScriptError::reserved_word(name, span))
        }
    }

    /// Consumes an IdentifierName after `.`; reserved words are fine here.
    pub fn consume_property_name(&mut self) -> Result<String, ScriptError> {
        if self.peek().is_identifier_name() {
            Ok(self.advance().lexeme)
        } else {
            Err(self.expected("property name"))
        }
    }

    /// Ends a statement, inserting a semicolon where the grammar allows it:
    /// before `}`, at end of input, or after a line break.
    pub fn consume_semicolon(&mut self) -> Result<(), ScriptError> {
        if self.match_punct(";") {
            return Ok(());
        }

        let next = self.peek();
        if next.is_punctuator("}") || next.kind == TokenKind::Eof || next.newline_before {
            return Ok(());
        }

        Err(self.expected("';'"))
    }

    /// `expected X but found Y` at the current token.
    pub fn expected(&self, what: &str) -> ScriptError {
        let token = self.peek();
        if token.kind == TokenKind::ReservedWord {
            return ScriptError::syntax_error(
                format!("expected {} but found reserved word '{}'", what, token.lexeme),
                token.span,
            );
        }
        ScriptError::syntax_error(format!("expected {} but found {}", what, describe(token)), token.span)
    }

    /// Error for a token that cannot start or continue the construct at hand.
    pub fn unexpected(&self, token: &Token) -> ScriptError {
        match token.kind {
            TokenKind::Eof => ScriptError::syntax_error("unexpected end of input", token.span),
            TokenKind::ReservedWord => ScriptError::reserved_word(&token.lexeme, token.span),
            _ => ScriptError::syntax_error(format!("unexpected token '{}'", token), token.span),
        }
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::String => format!("string \"{}\"", token.lexeme),
        _ => format!("'{}'", token.lexeme),
    }
}
