/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Defines the lexical token types produced by the lexer and
 *            consumed by the parser.
 *
 * Author:    Sam Wilcox
 *
 * License:
 * This file is part of the ESNAMES project.
 *
 * ESNAMES is dual-licensed under the terms of:
 *   - The MIT License
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

use serde::Serialize;
use std::fmt;

use crate::span::Span;

/// Represents the **category of a lexical token**.
///
/// The split between `Identifier` and `ReservedWord` is the whole point of
/// this crate: both are IdentifierNames, only the former may bind.
///
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// A numeric literal, decimal or `0x` hexadecimal.
    Number,

    /// A quoted string literal. The lexeme holds the **cooked** value
    /// (escapes already resolved, quotes stripped).
    String,

    /// An IdentifierName that is not a reserved word.
    ///
    /// Strict-only words (`let`, `static`, `yield`, ...) land here too; the
    /// parser decides whether strict mode forbids them.
    Identifier,

    /// An IdentifierName found in the reserved-word table.
    ///
    /// Examples: `in`, `class`, `try`, `typeof`, `instanceof`, `catch`.
    ReservedWord,

    /// Operators and punctuation: `{`, `}`, `.`, `===`, `&&`, ...
    Punctuator,

    /// End-of-file marker, always the final token.
    Eof,
}

/// A single classified unit of source code.
///
/// ```text
/// var  →  { kind: ReservedWord, lexeme: "var", span: 1:1 }
/// obj  →  { kind: Identifier,   lexeme: "obj", span: 1:5 }
/// 11   →  { kind: Number,       lexeme: "11",  span: 2:9 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,

    pub lexeme: String,

    pub span: Span,

    /// A line terminator sits between this token and the previous one.
    /// Drives automatic semicolon insertion.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub newline_before: bool,

    /// A string literal whose source text held an escape sequence or a
    /// line continuation, so `lexeme` differs from what was written.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub escaped: bool,
}

impl Token {
    /// True for both `Identifier` and `ReservedWord` tokens.
    pub fn is_identifier_name(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::ReservedWord)
    }

    pub fn is_punctuator(&self, p: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.lexeme == p
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.kind == TokenKind::ReservedWord && self.lexeme == word
    }
}

impl fmt::Display for Token {
    /// Prints only the lexeme, which is what users want to see in
    /// `unexpected token 'x'` messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}
