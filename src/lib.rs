/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * A small ECMAScript 5.1 front end and interpreter built around one rule:
 * reserved words are valid IdentifierNames (property keys, member names)
 * but never valid Identifiers (variable, function, parameter names).
 *
 *   var obj = { in: 11, class: "hello" };   // fine
 *   obj.catch();                             // fine
 *   var in = 1;                              // SyntaxError
 *
 * --------------------------------------------------------------------------
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

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod globals;
pub mod interpreter;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod span;
pub mod value;

use log::debug;

pub use error::{ErrorKind, ScriptError};
pub use interpreter::Interpreter;
pub use lexer::{classify, is_valid_as_identifier, tokenize, Classification, NamePosition};
pub use options::Options;
pub use span::Span;
pub use value::Value;

/// Lexes and parses a whole script.
///
/// # Parameters
/// - `source`: Script text
/// - `options`: `strict` forces strict mode; `echo` is ignored here
///
/// # Returns
/// The parsed `Program`, or the first `SyntaxError` found.
pub fn parse_source(source: &str, options: &Options) -> Result<ast::Program, ScriptError> {
    let tokens = tokenize(source)?;
    debug!("lexed {} tokens", tokens.len());
    parser::parse(tokens, options.strict)
}

/// Lexes and parses a single expression such as `{ in: 11 }`.
pub fn parse_expression(source: &str) -> Result<ast::Expr, ScriptError> {
    parser::parse_expression(tokenize(source)?)
}

/// Runs a script and returns the lines it printed.
///
/// # Parameters
/// - `source`: Script text
/// - `options`: Strictness, and whether `print` also writes to stdout
///
/// # Returns
/// One entry per `print` call, or the `ScriptError` for a syntax error or
/// an uncaught exception.
pub fn run_source(source: &str, options: &Options) -> Result<Vec<String>, ScriptError> {
    let program = parse_source(source, options)?;
    let mut interpreter = Interpreter::new(options);
    interpreter.run(&program)?;
    Ok(interpreter.output())
}

/// Runs a script and returns the value of its last expression statement.
///
/// # Returns
/// The completion value (`undefined` when no expression statement ran),
/// or the `ScriptError` that stopped the script.
pub fn eval_source(source: &str, options: &Options) -> Result<Value, ScriptError> {
    let program = parse_source(source, options)?;
    Interpreter::new(options).run(&program)
}
