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

use crate::ast::{Expr, FunctionNode, Param};
use crate::span::Span;

/// One `name = init` pair of a `var` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub name: String,
    pub init: Option<Expr>,
    pub span: Span,
}

/// All executable statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /* ----------------------------- */
    /* EXPRESSIONS                   */
    /* ----------------------------- */

    Expression(Expr),

    /* ----------------------------- */
    /* DECLARATIONS                  */
    /* ----------------------------- */

    Var {
        declarations: Vec<VarDeclarator>,
    },

    Function(Rc<FunctionNode>),

    Return(Option<Expr>),

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Block(Vec<Stmt>),

    Try {
        try_block: Vec<Stmt>,
        catch_param: Option<Param>,
        catch_block: Option<Vec<Stmt>>,
        finally_block: Option<Vec<Stmt>>,
    },

    Throw {
        value: Expr,
        span: Span,
    },

    Empty,
}
