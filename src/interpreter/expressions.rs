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
use std::rc::Rc;

use crate::ast::{Expr, FunctionNode, Literal};
use crate::error::ErrorKind;
use crate::interpreter::calls::call_value;
use crate::interpreter::display::value_to_string;
use crate::interpreter::environment::{Environment, FunctionDef};
use crate::interpreter::helpers::{is_truthy, loose_equals, strict_equals, to_number};
use crate::interpreter::Thrown;
use crate::span::Span;
use crate::value::Value;

type Env = Rc<RefCell<Environment>>;

/// Evaluates an expression to a value, or to the exception it raised.
pub fn eval_expr(expr: &Expr, env: &Env) -> Result<Value, Thrown> {
    match expr {
        Expr::Literal(literal) => Ok(match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }),

        Expr::Identifier { name, span } => lookup(name, *span, env),

        Expr::This => Ok(env.borrow().get("this").unwrap_or(Value::Undefined)),

        Expr::Assign { target, value, span } => assign(target, value, *span, env),

        Expr::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            if is_truthy(&eval_expr(condition, env)?) {
                eval_expr(then_expr, env)
            } else {
                eval_expr(else_expr, env)
            }
        }

        Expr::Logical { left, operator, right } => {
            let left = eval_expr(left, env)?;
            let short_circuit = match operator.as_str() {
                "&&" => !is_truthy(&left),
                _ => is_truthy(&left),
            };
            if short_circuit {
                Ok(left)
            } else {
                eval_expr(right, env)
            }
        }

        Expr::Binary {
            left,
            operator,
            right,
            span,
        } => {
            let left = eval_expr(left, env)?;
            let right = eval_expr(right, env)?;
            binary(operator, left, right, *span)
        }

        Expr::Unary {
            operator,
            operand,
            span,
        } => unary(operator, operand, *span, env),

        Expr::Call {
            callee,
            arguments,
            span,
        } => {
            // member calls bind `this` to the object the method came from
            let (this, function) = match &**callee {
                Expr::Member {
                    object,
                    property,
                    span,
                } => {
                    let object = eval_expr(object, env)?;
                    let function = get_property(&object, property, *span)?;
                    (object, function)
                }
                Expr::Index { object, index, span } => {
                    let object = eval_expr(object, env)?;
                    let key = value_to_string(&eval_expr(index, env)?);
                    let function = get_property(&object, &key, *span)?;
                    (object, function)
                }
                other => (Value::Undefined, eval_expr(other, env)?),
            };

            let mut args = Vec::with_capacity(arguments.len());
            for arg in arguments {
                args.push(eval_expr(arg, env)?);
            }

            if !function.is_callable() {
                return Err(Thrown::type_error(
                    format!("{} is not a function", callee.describe()),
                    *span,
                ));
            }

            call_value(&function, this, args, *span)
        }

        Expr::Member {
            object,
            property,
            span,
        } => {
            let object = eval_expr(object, env)?;
            get_property(&object, property, *span)
        }

        Expr::Index { object, index, span } => {
            let object = eval_expr(object, env)?;
            let key = value_to_string(&eval_expr(index, env)?);
            get_property(&object, &key, *span)
        }

        Expr::Object { properties } => {
            let mut fields = HashMap::with_capacity(properties.len());
            for (key, value) in properties {
                fields.insert(key.clone(), eval_expr(value, env)?);
            }
            Ok(Value::Object(Rc::new(RefCell::new(fields))))
        }

        Expr::Function(node) => Ok(make_closure(node, env)),
    }
}

/// Creates the runtime value for a function expression.
///
/// A named function expression can see its own name; it gets a private
/// scope holding that single binding.
fn make_closure(node: &Rc<FunctionNode>, env: &Env) -> Value {
    let closure = match &node.name {
        Some(_) => Environment::shared(Some(env.clone())),
        None => env.clone(),
    };

    let function = Value::Function(Rc::new(FunctionDef {
        node: node.clone(),
        closure: closure.clone(),
    }));

    if let Some(name) = &node.name {
        closure.borrow_mut().define(name.clone(), function.clone());
    }

    function
}

fn lookup(name: &str, span: Span, env: &Env) -> Result<Value, Thrown> {
    env.borrow()
        .get(name)
        .ok_or_else(|| Thrown::reference_error(format!("{} is not defined", name), span))
}

/// Reads `object[key]`, refusing to look through `undefined` and `null`.
fn get_property(object: &Value, key: &str, span: Span) -> Result<Value, Thrown> {
    if object.is_nullish() {
        return Err(Thrown::type_error(
            format!(
                "Cannot read property '{}' of {}",
                key,
                value_to_string(object)
            ),
            span,
        ));
    }
    Ok(object.get_property(key))
}

fn assign(target: &Expr, value: &Expr, span: Span, env: &Env) -> Result<Value, Thrown> {
    match target {
        Expr::Identifier { name, span } => {
            let value = eval_expr(value, env)?;

            if !env.borrow_mut().assign(name, value.clone()) {
                if env.borrow().strict {
                    return Err(Thrown::reference_error(
                        format!("{} is not defined", name),
                        *span,
                    ));
                }
                env.borrow_mut().define_global(name, value.clone());
            }

            Ok(value)
        }

        Expr::Member {
            object, property, ..
        } => {
            let object = eval_expr(object, env)?;
            let value = eval_expr(value, env)?;
            set_property(&object, property, value, span, env)
        }

        Expr::Index { object, index, .. } => {
            let object = eval_expr(object, env)?;
            let key = value_to_string(&eval_expr(index, env)?);
            let value = eval_expr(value, env)?;
            set_property(&object, &key, value, span, env)
        }

        // the parser only builds assignments to the three forms above
        _ => Err(Thrown::new(
            Value::error(ErrorKind::SyntaxError, "invalid assignment target"),
            span,
        )),
    }
}

fn set_property(object: &Value, key: &str, value: Value, span: Span, env: &Env) -> Result<Value, Thrown> {
    if object.is_nullish() {
        return Err(Thrown::type_error(
            format!("Cannot set property '{}' of {}", key, value_to_string(object)),
            span,
        ));
    }

    // primitives and functions silently drop writes outside strict mode
    if !object.set_property(key, value.clone()) && env.borrow().strict {
        return Err(Thrown::type_error(
            format!("Cannot create property '{}' on {}", key, object.type_of()),
            span,
        ));
    }

    Ok(value)
}

fn unary(operator: &str, operand: &Expr, span: Span, env: &Env) -> Result<Value, Thrown> {
    match operator {
        // typeof on an undeclared name is "undefined", not a ReferenceError
        "typeof" => {
            let value = match operand {
                Expr::Identifier { name, .. } => env.borrow().get(name).unwrap_or(Value::Undefined),
                other => eval_expr(other, env)?,
            };
            Ok(Value::String(value.type_of().to_string()))
        }

        "delete" => match operand {
            Expr::Member { object, property, .. } => {
                let object = eval_expr(object, env)?;
                Ok(Value::Bool(delete_property(&object, property)))
            }
            Expr::Index { object, index, .. } => {
                let object = eval_expr(object, env)?;
                let key = value_to_string(&eval_expr(index, env)?);
                Ok(Value::Bool(delete_property(&object, &key)))
            }
            // variables cannot be deleted
            Expr::Identifier { .. } => Ok(Value::Bool(false)),
            other => {
                eval_expr(other, env)?;
                Ok(Value::Bool(true))
            }
        },

        _ => {
            let value = eval_expr(operand, env)?;
            match operator {
                "!" => Ok(Value::Bool(!is_truthy(&value))),
                "-" => Ok(Value::Number(-to_number(&value))),
                "+" => Ok(Value::Number(to_number(&value))),
                "void" => Ok(Value::Undefined),
                _ => Err(Thrown::type_error(
                    format!("unsupported unary operator '{}'", operator),
                    span,
                )),
            }
        }
    }
}

fn delete_property(object: &Value, key: &str) -> bool {
    match object {
        Value::Object(fields) => {
            fields.borrow_mut().remove(key);
            true
        }
        _ => true,
    }
}

fn binary(operator: &str, left: Value, right: Value, span: Span) -> Result<Value, Thrown> {
    let value = match operator {
        "+" => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (l, r) if is_stringish(l) || is_stringish(r) => {
                Value::String(value_to_string(l) + &value_to_string(r))
            }
            (l, r) => Value::Number(to_number(l) + to_number(r)),
        },
        "-" => Value::Number(to_number(&left) - to_number(&right)),
        "*" => Value::Number(to_number(&left) * to_number(&right)),
        "/" => Value::Number(to_number(&left) / to_number(&right)),
        "%" => Value::Number(to_number(&left) % to_number(&right)),

        "<" | ">" | "<=" | ">=" => Value::Bool(compare(operator, &left, &right)),

        "==" => Value::Bool(loose_equals(&left, &right)),
        "!=" => Value::Bool(!loose_equals(&left, &right)),
        "===" => Value::Bool(strict_equals(&left, &right)),
        "!==" => Value::Bool(!strict_equals(&left, &right)),

        "in" => {
            if !matches!(right, Value::Object(_) | Value::Error { .. }) {
                return Err(Thrown::type_error(
                    format!(
                        "Cannot use 'in' operator to search for '{}' in {}",
                        value_to_string(&left),
                        value_to_string(&right)
                    ),
                    span,
                ));
            }
            Value::Bool(right.has_property(&value_to_string(&left)))
        }

        "instanceof" => match (&left, &right) {
            (Value::Error { kind, .. }, Value::ErrorType(target)) => {
                Value::Bool(*target == ErrorKind::Error || kind == target)
            }
            (_, r) if r.is_callable() => Value::Bool(false),
            _ => {
                return Err(Thrown::type_error(
                    "Right-hand side of 'instanceof' is not callable",
                    span,
                ))
            }
        },

        _ => {
            return Err(Thrown::type_error(
                format!("unsupported operator '{}'", operator),
                span,
            ))
        }
    };

    Ok(value)
}

/// Operands whose primitive form is a string: strings and every object.
fn is_stringish(value: &Value) -> bool {
    !matches!(
        value,
        Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_)
    )
}

fn compare(operator: &str, left: &Value, right: &Value) -> bool {
    if is_stringish(left) && is_stringish(right) {
        let (l, r) = (value_to_string(left), value_to_string(right));
        return match operator {
            "<" => l < r,
            ">" => l > r,
            "<=" => l <= r,
            _ => l >= r,
        };
    }

    let (l, r) = (to_number(left), to_number(right));
    match operator {
        "<" => l < r,
        ">" => l > r,
        "<=" => l <= r,
        _ => l >= r,
    }
}
