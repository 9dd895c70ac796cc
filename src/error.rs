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

use std::fmt;

use thiserror::Error;

use crate::lexer::keywords::is_strict_reserved_word;
use crate::span::Span;

/// The ECMAScript error constructor an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Plain `Error`, also used for uncaught non-error throws.
    Error,
    SyntaxError,
    TypeError,
    ReferenceError,
    /// Raised when the call stack limit is hit.
    RangeError,
}

impl ErrorKind {
    /// Stable error code shown in diagnostics.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Error => "E_THROWN",
            ErrorKind::SyntaxError => "E_SYNTAX",
            ErrorKind::TypeError => "E_TYPE",
            ErrorKind::ReferenceError => "E_REFERENCE",
            ErrorKind::RangeError => "E_RANGE",
        }
    }

    /// The constructor name, as seen by scripts (`e.name`).
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::RangeError => "RangeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct ScriptError {
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

impl ScriptError {
    /// Generic constructor
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            help: None,
        }
    }

    /// Grammar violation found while lexing or parsing
    pub fn syntax_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::SyntaxError, message, span)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::TypeError, message, span)
    }

    /// Reference error (undefined variable)
    pub fn reference_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ReferenceError, message, span)
    }

    /// A reserved word sitting where a binding identifier is required.
    ///
    /// Words reserved only in strict mode code get a help text saying so,
    /// since they bind fine elsewhere.
    pub fn reserved_word(word: &str, span: Span) -> Self {
        let help = if is_strict_reserved_word(word) {
            format!(
                "'{}' is reserved in strict mode code; outside strict mode it may name a variable, and it may always name a property (`obj.{}`)",
                word, word
            )
        } else {
            format!(
                "'{}' may name a property (`obj.{}`, `{{ {}: ... }}`) but not a variable, function or parameter",
                word, word, word
            )
        };

        Self::syntax_error(format!("unexpected reserved word '{}'", word), span).with_help(help)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Stable error code (E_SYNTAX, E_TYPE, ...)
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn is_syntax_error(&self) -> bool {
        self.kind == ErrorKind::SyntaxError
    }
}
