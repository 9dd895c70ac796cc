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
use crate::value::Value;

const CONSTRUCTORS: [ErrorKind; 5] = [
    ErrorKind::Error,
    ErrorKind::TypeError,
    ErrorKind::SyntaxError,
    ErrorKind::ReferenceError,
    ErrorKind::RangeError,
];

/// The built-in error constructors, keyed by their global name.
///
/// Calling one (`TypeError("bad")`) is handled by the call machinery,
/// which turns an `ErrorType` callee into an error value.
pub fn create_error_constructors() -> Vec<(&'static str, Value)> {
    CONSTRUCTORS
        .iter()
        .map(|kind| (kind.name(), Value::ErrorType(*kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_constructor() {
        let ctors = create_error_constructors();
        assert_eq!(ctors.len(), 5);
        assert!(ctors
            .iter()
            .any(|(name, v)| *name == "TypeError" && *v == Value::ErrorType(ErrorKind::TypeError)));
    }
}
