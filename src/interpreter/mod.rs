/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * Interpreter Entry & Runtime Bootstrap
 * -------------------------------------
 * Creates the global environment, installs the built-ins and drives the
 * top-level statement loop. Evaluation itself is split across:
 *
 *  - statements.rs  → statement execution and hoisting
 *  - expressions.rs → expression evaluation
 *  - calls.rs       → function invocation
 *  - display.rs     → ToString and JSON conversion
 *  - helpers.rs     → truthiness, numeric conversion, equality
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

pub mod calls;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod helpers;
pub mod statements;

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::ast::{Program, Stmt};
use crate::error::{ErrorKind, ScriptError};
use crate::globals::install_globals;
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::Environment;
use crate::interpreter::expressions::eval_expr;
use crate::interpreter::statements::{exec_stmt, hoist_declarations, ExecSignal};
use crate::options::Options;
use crate::span::Span;
use crate::value::Value;

/// A script exception in flight: the thrown value and where it was thrown.
#[derive(Debug, Clone)]
pub struct Thrown {
    pub value: Value,
    pub span: Span,
}

impl Thrown {
    pub fn new(value: Value, span: Span) -> Self {
        Self { value, span }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Value::error(ErrorKind::TypeError, message), span)
    }

    pub fn reference_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Value::error(ErrorKind::ReferenceError, message), span)
    }

    /// Converts an exception that escaped every `try` into a `ScriptError`.
    ///
    /// Error values keep their kind and message; anything else is reported
    /// as a plain `Error`.
    pub fn into_script_error(self) -> ScriptError {
        match self.value {
            Value::Error { kind, message } => ScriptError::new(kind, message, self.span),
            other => ScriptError::new(
                ErrorKind::Error,
                format!("uncaught exception: {}", value_to_string(&other)),
                self.span,
            ),
        }
    }
}

/// One script runtime: a global scope plus the lines `print` produced.
///
/// Each instance is independent; nothing is shared between interpreters.
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    output: Rc<RefCell<Vec<String>>>,
}

impl Interpreter {
    pub fn new(options: &Options) -> Self {
        let globals = Environment::shared(None);
        let output = Rc::new(RefCell::new(Vec::new()));

        install_globals(&globals, output.clone(), options.echo);

        Self { globals, output }
    }

    /// Runs a parsed program to completion.
    ///
    /// Returns the value of the last top-level expression statement, the
    /// way an `eval` completion value works. Uncaught exceptions surface
    /// as `ScriptError`.
    pub fn run(&mut self, program: &Program) -> Result<Value, ScriptError> {
        self.globals.borrow_mut().strict = program.strict;
        if program.strict {
            debug!("running in strict mode");
        }

        hoist_declarations(&program.body, &self.globals);

        let mut completion = Value::Undefined;
        for stmt in &program.body {
            let outcome = match stmt {
                Stmt::Expression(expr) => eval_expr(expr, &self.globals).map(|value| {
                    completion = value;
                    ExecSignal::None
                }),
                other => exec_stmt(other, &self.globals),
            };

            match outcome.map_err(Thrown::into_script_error)? {
                ExecSignal::None => {}
                // the parser rejects top-level `return`
                ExecSignal::Return(value) => return Ok(value),
            }
        }

        debug!("program finished, {} line(s) printed", self.output.borrow().len());
        Ok(completion)
    }

    /// Everything `print` has emitted so far, one entry per call.
    pub fn output(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    /// Reads a global binding, mostly for tests and embedding.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}
