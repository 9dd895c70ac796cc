/*
 * =============================================================================
 * ESNAMES - IdentifierName is not Identifier
 * =============================================================================
 *
 *  Author:   Sam Wilcox
 *
 *  License:
 *  This file is part of the ESNAMES project.
 *
 *  ESNAMES is dual-licensed under the terms of:
 *    - The MIT License
 *    - The Apache License, Version 2.0
 *
 *  You may choose either license to govern your use of this software.
 *
 * -----------------------------------------------------------------------------
 *  Warranty Disclaimer:
 * -----------------------------------------------------------------------------
 *  Unless required by applicable law or agreed to in writing, this software is
 *  distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 *  either express or implied.
 *
 * =============================================================================
 */

use std::rc::Rc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value as JsonValue};

use crate::value::{number_to_string, ObjectRef, Value};

/// ============================================================================
/// value_to_string
/// ============================================================================
/// ECMAScript `ToString`, as used by `print()` and string concatenation.
///
/// Examples:
///   - Number(11)         → "11"
///   - Bool(false)        → "false"
///   - Object             → "[object Object]"
///   - Error(TypeError)   → "TypeError: message"
///   - Function           → "[function catch]"
/// ============================================================================
pub fn value_to_string(val: &Value) -> String {
    match val {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.clone(),

        Value::Object(_) => "[object Object]".to_string(),

        Value::Function(def) => match &def.node.name {
            Some(name) => format!("[function {}]", name),
            None => "[function]".to_string(),
        },

        Value::NativeFunction { name, .. } => format!("[function {}]", name),

        Value::Error { kind, message } if message.is_empty() => kind.name().to_string(),
        Value::Error { kind, message } => format!("{}: {}", kind, message),

        Value::ErrorType(kind) => format!("[function {}]", kind),
    }
}

/// Why `JSON.stringify` gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    Circular,
}

/// ============================================================================
/// value_to_json
/// ============================================================================
/// Converts a runtime `Value` into a `serde_json::Value`.
///
/// `None` means "no JSON representation": `undefined` and functions. Object
/// members with no representation are skipped, as `JSON.stringify` does.
/// Error values have no enumerable properties and serialize as `{}`.
/// ============================================================================
pub fn value_to_json(val: &Value) -> Result<Option<JsonValue>, JsonError> {
    let mut seen = Vec::new();
    to_json(val, &mut seen)
}

fn to_json(val: &Value, seen: &mut Vec<ObjectRef>) -> Result<Option<JsonValue>, JsonError> {
    let json = match val {
        Value::Undefined
        | Value::Function(_)
        | Value::NativeFunction { .. }
        | Value::ErrorType(_) => return Ok(None),

        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => JsonValue::String(s.clone()),

        Value::Error { .. } => JsonValue::Object(Map::new()),

        Value::Object(fields) => {
            if seen.iter().any(|s| Rc::ptr_eq(s, fields)) {
                return Err(JsonError::Circular);
            }
            seen.push(fields.clone());

            let mut map = Map::new();
            for (key, value) in fields.borrow().iter() {
                if let Some(json) = to_json(value, seen)? {
                    map.insert(key.clone(), json);
                }
            }

            seen.pop();
            JsonValue::Object(map)
        }
    };

    Ok(Some(json))
}

fn number_to_json(n: f64) -> JsonValue {
    if !n.is_finite() {
        return JsonValue::Null;
    }
    // whole numbers print without a trailing ".0"
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return JsonValue::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
}

/// Serializes already converted JSON, compact or indented by `indent`.
pub fn render_json(json: &JsonValue, indent: &str) -> String {
    if indent.is_empty() {
        return json.to_string();
    }

    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);

    match json.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(out).unwrap_or_default(),
        Err(_) => json.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn to_string_follows_ecmascript() {
        assert_eq!(value_to_string(&Value::Number(456.0)), "456");
        assert_eq!(value_to_string(&Value::Bool(false)), "false");
        assert_eq!(value_to_string(&Value::Undefined), "undefined");
        assert_eq!(
            value_to_string(&Value::object([("in", Value::Number(11.0))])),
            "[object Object]"
        );
        assert_eq!(
            value_to_string(&Value::error(ErrorKind::TypeError, "bad")),
            "TypeError: bad"
        );
    }

    #[test]
    fn json_keeps_keyword_keys_and_drops_functions() {
        let obj = Value::object([
            ("in", Value::Number(11.0)),
            ("try", Value::Bool(false)),
            ("catch", Value::native("f", |_| Ok(Value::Undefined))),
            ("half", Value::Number(0.5)),
        ]);

        let json = value_to_json(&obj).unwrap().unwrap();
        assert_eq!(render_json(&json, ""), r#"{"half":0.5,"in":11,"try":false}"#);
    }

    #[test]
    fn json_indentation() {
        let obj = Value::object([("class", Value::String("hello".to_string()))]);
        let json = value_to_json(&obj).unwrap().unwrap();
        assert_eq!(render_json(&json, "  "), "{\n  \"class\": \"hello\"\n}");
    }

    #[test]
    fn json_detects_cycles() {
        let obj = Value::object(Vec::<(String, Value)>::new());
        obj.set_property("self", obj.clone());
        assert_eq!(value_to_json(&obj), Err(JsonError::Circular));
    }

    #[test]
    fn undefined_has_no_json() {
        assert_eq!(value_to_json(&Value::Undefined), Ok(None));
        assert_eq!(value_to_json(&Value::Number(f64::NAN)), Ok(Some(JsonValue::Null)));
    }
}
