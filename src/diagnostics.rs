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

use std::fmt::Write;

use crate::error::ScriptError;
use crate::span::Span;

/// Renders compiler-style diagnostics for `ScriptError`s.
///
/// The layout follows `rustc`, without color:
///
/// ```text
/// error[E_SYNTAX]: unexpected reserved word 'in'
///   --> bad.js:1:5
///     |
///   1 | var in = 1;
///     |     ^
///
/// help: 'in' may name a property (`obj.in`, `{ in: ... }`) but not a variable, function or parameter
/// ```
pub struct DiagnosticPrinter {
    /// Full source text of the file the error came from.
    source: String,

    /// Display name of that file.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats the diagnostic as a string, one trailing newline included.
    pub fn render(&self, error: &ScriptError) -> String {
        let Span { line, column } = error.span;

        // Lines are 1-indexed in diagnostics.
        let src_line = self.source.lines().nth(line.saturating_sub(1)).unwrap_or("");

        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "error[{}]: {}\n  --> {}:{}:{}",
            error.code(),
            error.message,
            self.file_name,
            line,
            column + 1
        );
        let _ = writeln!(out, "    |");
        let _ = writeln!(out, "{:>3} | {}", line, src_line);
        let _ = writeln!(out, "    | {}^", " ".repeat(column));

        if let Some(help) = &error.help {
            let _ = writeln!(out, "\nhelp: {}", help);
        }

        out
    }

    /// Prints the diagnostic to stderr.
    pub fn print(&self, error: &ScriptError) {
        eprint!("{}", self.render(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_at_the_reserved_word() {
        let source = "var ok = 1;\nvar in = 1;\n";
        let err = ScriptError::reserved_word("in", Span::new(2, 4));

        let rendered = DiagnosticPrinter::new("bad.js", source).render(&err);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "error[E_SYNTAX]: unexpected reserved word 'in'");
        assert_eq!(lines[1], "  --> bad.js:2:5");
        assert_eq!(lines[2], "    |");
        assert_eq!(lines[3], "  2 | var in = 1;");
        assert_eq!(lines[4], "    |     ^");

        // the caret sits under the first character of the word
        let code_start = lines[3].find("var").unwrap();
        assert_eq!(lines[4].find('^'), Some(code_start + 4));
        assert_eq!(lines[2].find('|'), lines[3].find('|'));
        assert!(lines[6].starts_with("help: 'in' may name a property"));
    }

    #[test]
    fn tolerates_out_of_range_lines() {
        let err = ScriptError::type_error("x is not a function", Span::new(40, 0));
        let rendered = DiagnosticPrinter::new("a.js", "x();").render(&err);
        assert!(rendered.contains(" 40 | \n"));
        assert!(!rendered.contains("help:"));
    }
}
