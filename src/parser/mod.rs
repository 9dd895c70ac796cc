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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the `parse(tokens, strict)` and `parse_expression` entry points
#[allow(clippy::module_inception)]
pub mod parser;

/// Statement-level parsing:
/// - var / function declarations
/// - if / while / return / try / throw / blocks
pub mod statements;

/// Expression-level parsing:
/// - assignment → conditional → || → && → equality → relational → additive
///   → multiplicative → unary → call/member → primary
/// - object literals and function expressions
pub mod expressions;

/// Shared parser helpers:
/// - token matching and lookahead
/// - binding-identifier and property-name consumption
/// - automatic semicolon insertion
pub mod helpers;

pub use parser::{parse, parse_expression, Parser};

#[cfg(test)]
mod tests;
