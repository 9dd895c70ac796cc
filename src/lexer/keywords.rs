/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * File:      keywords.rs
 * Purpose:   Reserved-word tables and the IdentifierName / Identifier
 *            classifier used by the lexer and the parser.
 *
 * Author:    Sam Wilcox
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

use std::sync::OnceLock;

use regex::Regex;

/// Every word that can never be a binding identifier.
pub const RESERVED_WORDS: &[&str] = &[
    // keywords
    "break", "case", "catch", "continue", "debugger", "default", "delete", "do", "else",
    "finally", "for", "function", "if", "in", "instanceof", "new", "return", "switch", "this",
    "throw", "try", "typeof", "var", "void", "while", "with",
    // future reserved
    "class", "const", "enum", "export", "extends", "import", "super",
    // literals
    "null", "true", "false",
];

/// Words reserved only inside strict mode code.
pub const STRICT_RESERVED_WORDS: &[&str] = &[
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
];

/// Which table a reserved word comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedWordKind {
    Keyword,
    FutureReserved,
    Literal,
    /// Reserved only in strict mode; an ordinary identifier otherwise.
    FutureStrict,
}

/// The grammatical slot a name is about to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePosition {
    /// `var x`, `function x`, `function (x)`, `catch (x)`.
    BindingIdentifier,
    /// `obj.x`, `{ x: ... }`.
    PropertyKeyOrMemberName,
}

/// Result of classifying a single lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_reserved_word: bool,
}

/// Looks a word up in the reserved tables.
///
/// Matching is exact: `Class` and `IN` are plain identifiers.
///
/// # Parameters
/// - `word`: An IdentifierName as written in the source
///
/// # Returns
/// - `Some(kind)` naming the table the word belongs to
/// - `None` for ordinary identifiers
pub fn reserved_word_kind(word: &str) -> Option<ReservedWordKind> {
    match word {
        "break" | "case" | "catch" | "continue" | "debugger" | "default" | "delete" | "do"
        | "else" | "finally" | "for" | "function" | "if" | "in" | "instanceof" | "new"
        | "return" | "switch" | "this" | "throw" | "try" | "typeof" | "var" | "void"
        | "while" | "with" => Some(ReservedWordKind::Keyword),

        "class" | "const" | "enum" | "export" | "extends" | "import" | "super" => {
            Some(ReservedWordKind::FutureReserved)
        }

        "null" | "true" | "false" => Some(ReservedWordKind::Literal),

        "implements" | "interface" | "let" | "package" | "private" | "protected" | "public"
        | "static" | "yield" => Some(ReservedWordKind::FutureStrict),

        _ => None,
    }
}

/// True for words that are reserved regardless of strictness.
///
/// The lexer uses this to decide between `TokenKind::ReservedWord` and
/// `TokenKind::Identifier`.
pub fn is_reserved_word(word: &str) -> bool {
    matches!(
        reserved_word_kind(word),
        Some(ReservedWordKind::Keyword | ReservedWordKind::FutureReserved | ReservedWordKind::Literal)
    )
}

/// True for words that only strict mode code reserves.
pub fn is_strict_reserved_word(word: &str) -> bool {
    reserved_word_kind(word) == Some(ReservedWordKind::FutureStrict)
}

/// Classifies a lexeme for the scanner.
///
/// # Returns
/// A `Classification` whose `is_reserved_word` is set for keywords, future
/// reserved words and the literals `null`, `true` and `false`. Strict-only
/// words are not flagged; that depends on the code being parsed.
pub fn classify(lexeme: &str) -> Classification {
    Classification {
        is_reserved_word: is_reserved_word(lexeme),
    }
}

/// Decides whether `lexeme` may occupy `position` in non-strict code.
///
/// Property keys and member names accept any IdentifierName, reserved or
/// not. Binding positions reject every reserved word.
///
/// # Parameters
/// - `lexeme`: An IdentifierName
/// - `position`: The grammatical slot it is about to fill
///
/// # Returns
/// - `true` if the name is allowed there
/// - `false` if the parser must raise a `SyntaxError`
///
/// # Example
/// ```text
/// is_valid_as_identifier("in", PropertyKeyOrMemberName) → true   // { in: 11 }
/// is_valid_as_identifier("in", BindingIdentifier)       → false  // var in
/// ```
pub fn is_valid_as_identifier(lexeme: &str, position: NamePosition) -> bool {
    is_valid_as_identifier_in(lexeme, position, false)
}

/// Same as [`is_valid_as_identifier`], with strict mode code additionally
/// refusing the strict-only words in binding position.
pub fn is_valid_as_identifier_in(lexeme: &str, position: NamePosition, strict: bool) -> bool {
    match position {
        NamePosition::PropertyKeyOrMemberName => true,
        NamePosition::BindingIdentifier => {
            !is_reserved_word(lexeme) && !(strict && is_strict_reserved_word(lexeme))
        }
    }
}

/// Characters that may open an IdentifierName: Unicode letters, letter
/// numbers, `$` and `_`.
const IDENTIFIER_START: &str = r"\p{L}\p{Nl}$_";

/// Characters allowed after the first: the start set plus combining marks,
/// decimal digits, connector punctuation, ZWNJ and ZWJ.
const IDENTIFIER_PART: &str = r"\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}$_\x{200C}\x{200D}";

struct IdentifierPatterns {
    name: Regex,
    start: Regex,
    part: Regex,
}

fn identifier_patterns() -> &'static IdentifierPatterns {
    static PATTERNS: OnceLock<IdentifierPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| IdentifierPatterns {
        name: Regex::new(&format!("^[{}][{}]*$", IDENTIFIER_START, IDENTIFIER_PART))
            .expect("identifier pattern is valid"),
        start: Regex::new(&format!("^[{}]$", IDENTIFIER_START)).expect("identifier start class is valid"),
        part: Regex::new(&format!("^[{}]$", IDENTIFIER_PART)).expect("identifier part class is valid"),
    })
}

fn matches_char(pattern: &Regex, ch: char) -> bool {
    let mut buf = [0u8; 4];
    pattern.is_match(ch.encode_utf8(&mut buf))
}

/// Lexical check only: does `lexeme` follow the identifier character rules?
///
/// Reserved words pass this check; they are IdentifierNames.
///
/// # Parameters
/// - `lexeme`: The candidate name
///
/// # Returns
/// `true` when the whole lexeme is one IdentifierName.
pub fn is_identifier_name(lexeme: &str) -> bool {
    identifier_patterns().name.is_match(lexeme)
}

/// First character of an IdentifierName. Same rule as
/// [`is_identifier_name`], with an ASCII fast path for the scanner.
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphabetic() || ch == '$' || ch == '_';
    }
    matches_char(&identifier_patterns().start, ch)
}

/// Any later character of an IdentifierName.
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphanumeric() || ch == '$' || ch == '_';
    }
    matches_char(&identifier_patterns().part, ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_are_valid_property_names() {
        for word in RESERVED_WORDS {
            assert!(
                is_valid_as_identifier(word, NamePosition::PropertyKeyOrMemberName),
                "{} should be accepted as a property name",
                word
            );
        }
    }

    #[test]
    fn reserved_words_are_invalid_bindings() {
        for word in RESERVED_WORDS {
            assert!(
                !is_valid_as_identifier(word, NamePosition::BindingIdentifier),
                "{} should be rejected as a binding",
                word
            );
            assert!(classify(word).is_reserved_word);
        }
    }

    #[test]
    fn ordinary_names_are_valid_everywhere() {
        for word in ["foo", "obj", "print", "get", "set", "of", "undefined", "NaN"] {
            assert!(!classify(word).is_reserved_word);
            assert!(is_valid_as_identifier(word, NamePosition::BindingIdentifier));
            assert!(is_valid_as_identifier(word, NamePosition::PropertyKeyOrMemberName));
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!classify("Class").is_reserved_word);
        assert!(!classify("IN").is_reserved_word);
        assert!(!classify("Typeof").is_reserved_word);
        assert!(classify("typeof").is_reserved_word);
    }

    #[test]
    fn strict_words_only_bind_outside_strict_mode() {
        for word in STRICT_RESERVED_WORDS {
            assert!(!is_reserved_word(word));
            assert!(is_valid_as_identifier_in(word, NamePosition::BindingIdentifier, false));
            assert!(!is_valid_as_identifier_in(word, NamePosition::BindingIdentifier, true));
            assert!(is_valid_as_identifier_in(word, NamePosition::PropertyKeyOrMemberName, true));
        }
    }

    #[test]
    fn tables_agree_with_lookup() {
        for word in RESERVED_WORDS {
            assert_ne!(reserved_word_kind(word), None);
            assert_ne!(reserved_word_kind(word), Some(ReservedWordKind::FutureStrict));
        }
        assert_eq!(reserved_word_kind("in"), Some(ReservedWordKind::Keyword));
        assert_eq!(reserved_word_kind("class"), Some(ReservedWordKind::FutureReserved));
        assert_eq!(reserved_word_kind("null"), Some(ReservedWordKind::Literal));
        assert_eq!(reserved_word_kind("yield"), Some(ReservedWordKind::FutureStrict));
    }

    #[test]
    fn reserved_words_are_identifier_names() {
        for word in RESERVED_WORDS.iter().chain(STRICT_RESERVED_WORDS) {
            assert!(is_identifier_name(word));
        }
        assert!(is_identifier_name("$scope"));
        assert!(is_identifier_name("_private1"));
        assert!(is_identifier_name("café"));
        assert!(!is_identifier_name("1abc"));
        assert!(!is_identifier_name("a-b"));
        assert!(!is_identifier_name(""));
    }

    #[test]
    fn scanner_and_name_check_share_one_rule() {
        let samples = [
            'a', 'Z', '$', '_', '0', '9', '-', ' ', 'é', 'λ', 'ǅ', 'Ⅻ', '٣', '‿',
            '\u{0301}', '\u{0345}', '\u{0903}', '\u{200c}', '\u{200d}', '\u{00aa}',
            '\u{2028}', '€',
        ];

        for ch in samples {
            assert_eq!(
                is_identifier_start(ch),
                is_identifier_name(&ch.to_string()),
                "start rule disagrees for {:?}",
                ch
            );
            assert_eq!(
                is_identifier_part(ch),
                is_identifier_name(&format!("a{}", ch)),
                "part rule disagrees for {:?}",
                ch
            );
        }
    }

    #[test]
    fn joiners_and_marks_only_continue_a_name() {
        assert!(is_identifier_part('\u{200c}'));
        assert!(!is_identifier_start('\u{200c}'));
        assert!(is_identifier_name("a\u{200d}b"));

        // COMBINING GREEK YPOGEGRAMMENI is alphabetic but a nonspacing mark
        assert!(!is_identifier_start('\u{0345}'));
        assert!(is_identifier_part('\u{0345}'));
    }
}
