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

/// Reserved-word tables and the binding/property-name classifier.
pub mod keywords;

/// Scanner state machine.
#[allow(clippy::module_inception)]
pub mod lexer;

/// `Token` and `TokenKind`.
pub mod token;

pub use keywords::{classify, is_valid_as_identifier, Classification, NamePosition};
pub use token::{Token, TokenKind};

use crate::error::ScriptError;

/// Turns source text into a token stream ending in `TokenKind::Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    lexer::Lexer::new(source).scan_tokens()
}
