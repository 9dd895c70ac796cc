/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * Global JSON Object
 * ==========================================================================
 *
 * Provides `JSON.stringify(value[, replacer[, space]])`. The replacer
 * argument is accepted and ignored. `space` may be a number (capped at 10)
 * or a string (first 10 characters).
 *
 * Conversion to JSON lives in interpreter/display.rs and rendering is
 * done by serde_json.
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

use crate::error::ErrorKind;
use crate::interpreter::display::{render_json, value_to_json, JsonError};
use crate::value::Value;

/// Creates the global `JSON` namespace object.
pub fn create_global_json_object() -> Value {
    Value::object([("stringify", Value::native("stringify", json_stringify))])
}

/// Native `JSON.stringify`.
///
/// Values without a JSON form (`undefined`, functions) produce `undefined`.
/// A cyclic object throws a `TypeError`.
fn json_stringify(args: Vec<Value>) -> Result<Value, Value> {
    let value = args.first().cloned().unwrap_or(Value::Undefined);
    let indent = indent_from(args.get(2));

    match value_to_json(&value) {
        Ok(Some(json)) => Ok(Value::String(render_json(&json, &indent))),
        Ok(None) => Ok(Value::Undefined),
        Err(JsonError::Circular) => Err(Value::error(
            ErrorKind::TypeError,
            "Converting circular structure to JSON",
        )),
    }
}

fn indent_from(space: Option<&Value>) -> String {
    match space {
        Some(Value::Number(n)) if *n >= 1.0 => " ".repeat(n.min(10.0) as usize),
        Some(Value::String(s)) => s.chars().take(10).collect(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringifies_keyword_keys() {
        let obj = Value::object([
            ("in", Value::Number(11.0)),
            ("class", Value::String("hello".to_string())),
        ]);

        let out = json_stringify(vec![obj]).unwrap();
        assert_eq!(out, Value::String(r#"{"class":"hello","in":11}"#.to_string()));
    }

    #[test]
    fn numeric_space_indents() {
        let obj = Value::object([("try", Value::Bool(false))]);
        let out = json_stringify(vec![obj, Value::Null, Value::Number(2.0)]).unwrap();
        assert_eq!(out, Value::String("{\n  \"try\": false\n}".to_string()));
    }

    #[test]
    fn undefined_stringifies_to_undefined() {
        assert_eq!(json_stringify(vec![]), Ok(Value::Undefined));
    }

    #[test]
    fn cycles_throw_type_error() {
        let obj = Value::object(Vec::<(String, Value)>::new());
        obj.set_property("self", obj.clone());

        match json_stringify(vec![obj]) {
            Err(Value::Error { kind, .. }) => assert_eq!(kind, ErrorKind::TypeError),
            other => panic!("expected a TypeError, got {:?}", other),
        }
    }
}
