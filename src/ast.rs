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

pub mod expr;
pub mod param;
pub mod stmt;

pub use expr::{Expr, FunctionNode, Literal};
pub use param::Param;
pub use stmt::{Stmt, VarDeclarator};

/// A parsed script.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,

    /// The script opened with a `"use strict"` directive.
    pub strict: bool,
}
