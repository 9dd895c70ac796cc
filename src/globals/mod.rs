/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * Global Built-ins
 * ==========================================================================
 *
 * Installs everything a script can reach without declaring it:
 *
 *   - print(...)          → print.rs
 *   - JSON.stringify(...) → json.rs
 *   - Error, TypeError, SyntaxError, ReferenceError, RangeError → errors.rs
 *   - undefined, NaN, Infinity
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
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

pub mod errors;
pub mod json;
pub mod print;

use std::cell::RefCell;
use std::rc::Rc;

use crate::interpreter::environment::Environment;
use crate::value::Value;

/// Populates a fresh global scope.
///
/// `output` collects every line `print` emits; with `echo` set the lines
/// also go to stdout as they are produced.
pub fn install_globals(env: &Rc<RefCell<Environment>>, output: Rc<RefCell<Vec<String>>>, echo: bool) {
    let mut env = env.borrow_mut();

    // ---------------------------------------------------------------------
    // Value properties
    // ---------------------------------------------------------------------
    env.define("undefined", Value::Undefined);
    env.define("NaN", Value::Number(f64::NAN));
    env.define("Infinity", Value::Number(f64::INFINITY));

    // ---------------------------------------------------------------------
    // Functions and namespaces
    // ---------------------------------------------------------------------
    env.define("print", print::create_print_function(output, echo));
    env.define("JSON", json::create_global_json_object());

    for (name, ctor) in errors::create_error_constructors() {
        env.define(name, ctor);
    }
}
