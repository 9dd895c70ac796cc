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

use crate::span::Span;

/// A single binding introduced by a function parameter list or a
/// `catch (e)` clause.
///
/// The parser only builds a `Param` after the name has passed the
/// binding-identifier check, so `name` is never a reserved word.
///
/// ```text
/// function greet(name, greeting) { ... }
///                ^^^^  ^^^^^^^^
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,

    /// Where the name was written, for diagnostics.
    pub span: Span,
}

impl Param {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
