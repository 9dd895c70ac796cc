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

use std::rc::Rc;

use crate::ast::{Param, Stmt};
use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

/// A function declaration or function expression.
///
/// Shared behind `Rc` so closures created at run time point at the same
/// body instead of copying it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    /// `None` for anonymous function expressions.
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,

    /// The body runs as strict mode code, either inherited or through its
    /// own `"use strict"` directive.
    pub strict: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier { name: String, span: Span },
    This,

    /// `target = value`; `target` is an `Identifier`, `Member` or `Index`.
    Assign { target: Box<Expr>, value: Box<Expr>, span: Span },

    Conditional { condition: Box<Expr>, then_expr: Box<Expr>, else_expr: Box<Expr> },

    /// `&&` and `||`, kept apart from `Binary` for short-circuiting.
    Logical { left: Box<Expr>, operator: String, right: Box<Expr> },

    Binary { left: Box<Expr>, operator: String, right: Box<Expr>, span: Span },
    Unary { operator: String, operand: Box<Expr>, span: Span },
    Call { callee: Box<Expr>, arguments: Vec<Expr>, span: Span },

    /// `object.property`; `property` is any IdentifierName, reserved words
    /// included.
    Member { object: Box<Expr>, property: String, span: Span },

    /// `object[index]`
    Index { object: Box<Expr>, index: Box<Expr>, span: Span },

    /// `{ key: value, ... }`, keys already reduced to strings.
    Object { properties: Vec<(String, Expr)> },

    Function(Rc<FunctionNode>),
}

impl Expr {
    /// Short source-like rendering used in `x is not a function` messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Identifier { name, .. } => name.clone(),
            Expr::This => "this".to_string(),
            Expr::Member { object, property, .. } => {
                format!("{}.{}", object.describe(), property)
            }
            Expr::Index { object, .. } => format!("{}[...]", object.describe()),
            Expr::Call { callee, .. } => format!("{}(...)", callee.describe()),
            Expr::Literal(Literal::String(s)) => format!("\"{}\"", s),
            Expr::Literal(Literal::Number(n)) => n.to_string(),
            Expr::Literal(Literal::Bool(b)) => b.to_string(),
            Expr::Literal(Literal::Null) => "null".to_string(),
            Expr::Function(_) => "function".to_string(),
            _ => "expression".to_string(),
        }
    }
}
