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

use crate::interpreter::display::value_to_string;
use crate::value::Value;

/// ECMAScript `ToBoolean`.
///
/// Falsy: `undefined`, `null`, `false`, `0`, `-0`, `NaN`, `""`.
/// Everything else, every object and function included, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// ECMAScript `ToNumber`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        _ => string_to_number(&value_to_string(value)),
    }
}

fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return hex.chars().try_fold(0f64, |acc, c| c.to_digit(16).map(|d| acc * 16.0 + d as f64))
            .unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust accepts "inf" and "nan"; ECMAScript does not.
        other if other.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        other => other.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// True when `value` is a primitive (not an object or function).
fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// `===`
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    a == b
}

/// `==`, with the ES5 coercions for the value types this engine has.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,

        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            to_number(a) == to_number(b)
        }

        (Value::Bool(_), _) => loose_equals(&Value::Number(to_number(a)), b),
        (_, Value::Bool(_)) => loose_equals(a, &Value::Number(to_number(b))),

        // object compared with a primitive goes through its string form
        (x, y) if is_primitive(x) != is_primitive(y) => {
            let (prim, obj) = if is_primitive(x) { (x, y) } else { (y, x) };
            loose_equals(prim, &Value::String(value_to_string(obj)))
        }

        _ => strict_equals(a, b),
    }
}
