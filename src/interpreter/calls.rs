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

use std::cell::Cell;

use log::trace;

use crate::error::ErrorKind;
use crate::interpreter::environment::{Environment, FunctionDef};
use crate::interpreter::display::value_to_string;
use crate::interpreter::statements::{exec_block, hoist_declarations, ExecSignal};
use crate::interpreter::Thrown;
use crate::span::Span;
use crate::value::Value;

/// Script-level recursion limit.
pub const MAX_CALL_DEPTH: usize = 200;

/// Native stack a script may use, measured from its outermost call. Must
/// stay under the 2 MiB default of spawned threads in unoptimised builds.
pub const MAX_STACK_BYTES: usize = 1024 * 1024;

thread_local! {
    static CALL_DEPTH: Cell<usize> = Cell::new(0);
    static STACK_BASE: Cell<usize> = Cell::new(0);
}

/// Address of a local in the caller's frame; the difference between two
/// of these is the stack used in between.
#[inline(never)]
fn stack_position() -> usize {
    let marker = 0u8;
    std::ptr::addr_of!(marker) as usize
}

/// Invokes any callable value.
///
/// # Parameters
/// - `callee`: The function, native function or error constructor
/// - `this`: The receiver for method calls (`obj.catch()` binds `obj`),
///   `undefined` for plain calls
/// - `args`: Evaluated arguments
/// - `span`: Location used for errors raised by the call itself
///
/// # Returns
/// The call's result, or the exception it threw. Calling a value that is
/// not callable throws a `TypeError`.
pub fn call_value(callee: &Value, this: Value, args: Vec<Value>, span: Span) -> Result<Value, Thrown> {
    match callee {
        Value::Function(def) => call_user_function(def, this, args, span),

        Value::NativeFunction { func, .. } => func(args).map_err(|value| Thrown::new(value, span)),

        // `TypeError("msg")` builds an error value, with or without `new`
        Value::ErrorType(kind) => {
            let message = match args.first() {
                None | Some(Value::Undefined) => String::new(),
                Some(v) => value_to_string(v),
            };
            Ok(Value::error(*kind, message))
        }

        other => Err(Thrown::type_error(
            format!("{} is not a function", value_to_string(other)),
            span,
        )),
    }
}

/// Executes a script function in a fresh activation scope.
///
/// Missing arguments read as `undefined`; extra arguments are dropped.
/// Falling off the end of the body returns `undefined`.
///
/// # Returns
/// The returned value, or a `RangeError` once the call would exceed
/// `MAX_CALL_DEPTH` nested calls or `MAX_STACK_BYTES` of native stack.
pub fn call_user_function(
    def: &FunctionDef,
    this: Value,
    args: Vec<Value>,
    span: Span,
) -> Result<Value, Thrown> {
    let depth = CALL_DEPTH.with(|d| d.get());

    let here = stack_position();
    if depth == 0 {
        STACK_BASE.with(|b| b.set(here));
    }
    let stack_used = STACK_BASE.with(|b| b.get()).abs_diff(here);

    if depth >= MAX_CALL_DEPTH || stack_used > MAX_STACK_BYTES {
        return Err(Thrown::new(
            Value::error(ErrorKind::RangeError, "Maximum call stack size exceeded"),
            span,
        ));
    }

    trace!(
        "call {} with {} argument(s) at depth {}",
        def.node.name.as_deref().unwrap_or("<anonymous>"),
        args.len(),
        depth
    );

    let env = Environment::shared(Some(def.closure.clone()));
    {
        let mut scope = env.borrow_mut();
        scope.strict = def.node.strict;
        scope.define("this", this);

        let mut args = args.into_iter();
        for param in &def.node.params {
            scope.define(param.name.clone(), args.next().unwrap_or(Value::Undefined));
        }
    }

    hoist_declarations(&def.node.body, &env);

    CALL_DEPTH.with(|d| d.set(depth + 1));
    let outcome = exec_block(&def.node.body, &env);
    CALL_DEPTH.with(|d| d.set(depth));

    match outcome? {
        ExecSignal::Return(value) => Ok(value),
        ExecSignal::None => Ok(Value::Undefined),
    }
}
