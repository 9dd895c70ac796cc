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

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::ErrorKind;
use crate::interpreter::environment::FunctionDef;

/// Shared, mutable property map behind every plain object.
///
/// Keys are plain strings: `"in"`, `"class"` and `"catch"` need no special
/// treatment once they are past the parser.
pub type ObjectRef = Rc<RefCell<HashMap<String, Value>>>;

/// Host function: evaluated arguments in, a value or a thrown value out.
pub type NativeFn = Rc<dyn Fn(Vec<Value>) -> Result<Value, Value>>;

/// Runtime value representation.
///
/// Every expression ultimately evaluates to one of these.
#[derive(Clone)]
pub enum Value {
    // Primitive scalars
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),

    // Object literal / plain object
    Object(ObjectRef),

    // Script function closed over its defining environment
    Function(Rc<FunctionDef>),

    // Native host function, e.g. `print`
    NativeFunction { name: &'static str, func: NativeFn },

    // Instance of one of the built-in error types
    Error { kind: ErrorKind, message: String },

    // The built-in error constructors themselves (`TypeError`, ...)
    ErrorType(ErrorKind),
}

impl Value {
    /// Builds a fresh object from key/value pairs.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    pub fn native(name: &'static str, func: impl Fn(Vec<Value>) -> Result<Value, Value> + 'static) -> Value {
        Value::NativeFunction {
            name,
            func: Rc::new(func),
        }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Value {
        Value::Error {
            kind,
            message: message.into(),
        }
    }

    /// Generic get-property-by-name.
    ///
    /// Missing keys read as `undefined`. Reading through `undefined` or
    /// `null` is an interpreter-level `TypeError` and must be checked by the
    /// caller before getting here.
    pub fn get_property(&self, key: &str) -> Value {
        match self {
            Value::Object(fields) => fields.borrow().get(key).cloned().unwrap_or(Value::Undefined),

            Value::String(s) if key == "length" => Value::Number(s.chars().count() as f64),

            Value::Error { kind, message } => match key {
                "name" => Value::String(kind.name().to_string()),
                "message" => Value::String(message.clone()),
                _ => Value::Undefined,
            },

            Value::Function(def) if key == "name" => {
                Value::String(def.node.name.clone().unwrap_or_default())
            }
            Value::Function(def) if key == "length" => Value::Number(def.node.params.len() as f64),

            Value::NativeFunction { name, .. } if key == "name" => Value::String(name.to_string()),

            Value::ErrorType(kind) if key == "name" => Value::String(kind.name().to_string()),

            _ => Value::Undefined,
        }
    }

    /// Writes a property on an object. Returns false for non-objects.
    pub fn set_property(&self, key: &str, value: Value) -> bool {
        match self {
            Value::Object(fields) => {
                fields.borrow_mut().insert(key.to_string(), value);
                true
            }
            _ => false,
        }
    }

    pub fn has_property(&self, key: &str) -> bool {
        match self {
            Value::Object(fields) => fields.borrow().contains_key(key),
            Value::Error { .. } => matches!(key, "name" | "message"),
            _ => false,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_) | Value::NativeFunction { .. } | Value::ErrorType(_)
        )
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Result of the `typeof` operator.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) | Value::Error { .. } => "object",
            Value::Function(_) | Value::NativeFunction { .. } | Value::ErrorType(_) => "function",
        }
    }
}

/// Identity for objects and functions, value equality for everything else.
/// `NaN` is not equal to itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction { func: a, .. }, Value::NativeFunction { func: b, .. }) => {
                Rc::ptr_eq(a, b)
            }
            (
                Value::Error { kind: ka, message: ma },
                Value::Error { kind: kb, message: mb },
            ) => ka == kb && ma == mb,
            (Value::ErrorType(a), Value::ErrorType(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", number_to_string(*n)),
            Value::String(s) => write!(f, "String({:?})", s),

            Value::Object(fields) => {
                let fields = fields.borrow();
                let mut keys: Vec<&String> = fields.keys().collect();
                keys.sort();
                write!(f, "[Object {:?}]", keys)
            }

            Value::Function(def) => match &def.node.name {
                Some(name) => write!(f, "[Function {}]", name),
                None => write!(f, "[Function]"),
            },

            Value::NativeFunction { name, .. } => write!(f, "[NativeFunction {}]", name),

            Value::Error { kind, message } => write!(f, "{}({:?})", kind, message),

            Value::ErrorType(kind) => write!(f, "[ErrorType {}]", kind),
        }
    }
}

/// ECMAScript `Number::toString` for base 10.
///
/// ```text
/// 11.0   → "11"
/// 0.5    → "0.5"
/// -0.0   → "0"
/// 1e21   → "1e+21"
/// NaN    → "NaN"
/// ```
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    format!("{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbers_like_ecmascript() {
        assert_eq!(number_to_string(11.0), "11");
        assert_eq!(number_to_string(456.0), "456");
        assert_eq!(number_to_string(-2.5), "-2.5");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn keyword_spelled_keys_are_plain_keys() {
        let obj = Value::object([
            ("in", Value::Number(11.0)),
            ("class", Value::String("hello".to_string())),
        ]);

        assert_eq!(obj.get_property("in"), Value::Number(11.0));
        assert_eq!(obj.get_property("class"), Value::String("hello".to_string()));
        assert_eq!(obj.get_property("try"), Value::Undefined);

        assert!(obj.set_property("try", Value::Bool(false)));
        assert!(obj.has_property("try"));
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = Value::object([("x", Value::Null)]);
        let b = Value::object([("x", Value::Null)]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }

    #[test]
    fn callable_values() {
        let native = Value::native("noop", |_| Ok(Value::Undefined));
        assert!(native.is_callable());
        assert_eq!(native.type_of(), "function");
        assert!(Value::ErrorType(ErrorKind::TypeError).is_callable());
        assert!(!Value::object(Vec::<(String, Value)>::new()).is_callable());
    }
}
