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

use std::cell::RefCell;
use std::rc::Rc;

use crate::interpreter::display::value_to_string;
use crate::value::Value;

/// Builds the global `print(...args)`.
///
/// Arguments are converted with `ToString` and joined by a single space.
/// Each call records one line; `print()` records an empty one.
pub fn create_print_function(output: Rc<RefCell<Vec<String>>>, echo: bool) -> Value {
    Value::native("print", move |args| {
        let line = args
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(" ");

        if echo {
            println!("{}", line);
        }
        output.borrow_mut().push(line);

        Ok(Value::Undefined)
    })
}
