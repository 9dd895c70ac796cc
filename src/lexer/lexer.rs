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

use log::trace;

use crate::error::ScriptError;
use crate::lexer::keywords::{is_identifier_part, is_identifier_start, is_reserved_word};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Punctuators, longest first so the scanner can take the first match.
const PUNCTUATORS: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "(", ")", "{", "}", "[", "]", ";", ",",
    ".", ":", "=", "+", "-", "*", "/", "%", "!", "<", ">", "?",
];

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,

    /// Start of the token being scanned.
    start: Span,

    /// A line terminator has been skipped since the last emitted token.
    newline_pending: bool,

    pub tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a lexer over `source` with the cursor at line 1, column 0.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 0,
            start: Span::new(1, 0),
            newline_pending: false,
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire source input.
    ///
    /// Whitespace and comments are dropped; the output always ends with a
    /// `TokenKind::Eof` marker. The first malformed construct aborts the
    /// scan with a `SyntaxError`.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScriptError> {
        loop {
            self.skip_trivia()?;
            if self.is_at_end() {
                break;
            }
            self.start = Span::new(self.line, self.column);
            self.scan_token()?;
        }

        self.start = Span::new(self.line, self.column);
        self.push(TokenKind::Eof, String::new());

        trace!("lexed {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), ScriptError> {
        let ch = self.advance();

        match ch {
            '"' | '\'' => self.string(ch),

            '0'..='9' => self.number(ch),

            '.' if self.peek().is_ascii_digit() => self.number(ch),

            c if is_identifier_start(c) => {
                self.identifier_name();
                Ok(())
            }

            _ => self.punctuator(ch),
        }
    }

    /// Skips whitespace, line terminators and both comment forms.
    fn skip_trivia(&mut self) -> Result<(), ScriptError> {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\u{000b}' | '\u{000c}' | '\u{00a0}' | '\u{feff}' => {
                    self.advance();
                }
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.advance();
                    self.newline_pending = true;
                }
                '/' if self.peek_next() == '/' => {
                    while !self.is_at_end() && !is_line_terminator(self.peek()) {
                        self.advance();
                    }
                }
                '/' if self.peek_next() == '*' => self.block_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn block_comment(&mut self) -> Result<(), ScriptError> {
        let opened = Span::new(self.line, self.column);
        self.advance();
        self.advance();

        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                return Ok(());
            }

            if is_line_terminator(self.advance()) {
                self.newline_pending = true;
            }
        }

        Err(ScriptError::syntax_error("unterminated block comment", opened))
    }

    fn identifier_name(&mut self) {
        let start = self.current - 1;

        while !self.is_at_end() && is_identifier_part(self.peek()) {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();

        let kind = if is_reserved_word(&text) {
            TokenKind::ReservedWord
        } else {
            TokenKind::Identifier
        };

        self.push(kind, text);
    }

    fn number(&mut self, first: char) -> Result<(), ScriptError> {
        let start = self.current - 1;

        if first == '0' && matches!(self.peek(), 'x' | 'X') {
            self.advance();
            let digits_start = self.current;
            while self.peek().is_ascii_hexdigit() {
                self.advance();
            }
            if self.current == digits_start {
                return Err(ScriptError::syntax_error("missing hexadecimal digits", self.start));
            }
        } else {
            if first != '.' {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
                if self.peek() == '.' {
                    self.advance();
                }
            }
            while self.peek().is_ascii_digit() {
                self.advance();
            }

            if matches!(self.peek(), 'e' | 'E') {
                let sign = matches!(self.peek_next(), '+' | '-');
                let digit_at = if sign { self.current + 2 } else { self.current + 1 };
                if self.chars.get(digit_at).map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                    if sign {
                        self.advance();
                    }
                    while self.peek().is_ascii_digit() {
                        self.advance();
                    }
                }
            }
        }

        if is_identifier_start(self.peek()) {
            return Err(ScriptError::syntax_error(
                "identifier starts immediately after numeric literal",
                Span::new(self.line, self.column),
            ));
        }

        let text: String = self.chars[start..self.current].iter().collect();
        self.push(TokenKind::Number, text);
        Ok(())
    }

    fn string(&mut self, delimiter: char) -> Result<(), ScriptError> {
        let mut value = String::new();
        let mut escaped = false;

        loop {
            if self.is_at_end() || is_line_terminator(self.peek()) {
                return Err(ScriptError::syntax_error("unterminated string literal", self.start));
            }

            let ch = self.advance();
            if ch == delimiter {
                break;
            }

            if ch != '\\' {
                value.push(ch);
                continue;
            }

            if self.is_at_end() {
                return Err(ScriptError::syntax_error("unterminated string literal", self.start));
            }

            escaped = true;
            match self.advance() {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                'b' => value.push('\u{0008}'),
                'f' => value.push('\u{000c}'),
                'v' => value.push('\u{000b}'),
                '0' if !self.peek().is_ascii_digit() => value.push('\0'),
                'x' => value.push(self.hex_escape(2)?),
                'u' => value.push(self.hex_escape(4)?),
                // line continuation
                '\r' => {
                    if self.peek() == '\n' {
                        self.advance();
                    }
                }
                c if is_line_terminator(c) => {}
                other => value.push(other),
            }
        }

        self.push(TokenKind::String, value);
        if let Some(token) = self.tokens.last_mut() {
            token.escaped = escaped;
        }
        Ok(())
    }

    fn hex_escape(&mut self, digits: usize) -> Result<char, ScriptError> {
        let at = Span::new(self.line, self.column);
        let mut code = 0u32;

        for _ in 0..digits {
            let digit = self
                .peek()
                .to_digit(16)
                .ok_or_else(|| ScriptError::syntax_error("malformed escape sequence", at))?;
            self.advance();
            code = code * 16 + digit;
        }

        // Lone surrogates cannot live in a Rust string.
        Ok(char::from_u32(code).unwrap_or('\u{fffd}'))
    }

    fn punctuator(&mut self, first: char) -> Result<(), ScriptError> {
        for p in PUNCTUATORS {
            let mut chars = p.chars();
            if chars.next() != Some(first) {
                continue;
            }

            let rest: Vec<char> = chars.collect();
            let matches_rest = rest
                .iter()
                .enumerate()
                .all(|(i, c)| self.chars.get(self.current + i) == Some(c));

            if matches_rest {
                for _ in 0..rest.len() {
                    self.advance();
                }
                self.push(TokenKind::Punctuator, p.to_string());
                return Ok(());
            }
        }

        Err(ScriptError::syntax_error(
            format!("unexpected character '{}'", first),
            self.start,
        ))
    }

    fn push(&mut self, kind: TokenKind, lexeme: String) {
        self.tokens.push(Token {
            kind,
            lexeme,
            span: self.start,
            newline_before: self.newline_pending,
            escaped: false,
        });
        self.newline_pending = false;
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;

        // CRLF counts once, on the '\n'.
        if is_line_terminator(ch) && !(ch == '\r' && self.peek() == '\n') {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        ch
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.lexeme))
            .collect()
    }

    #[test]
    fn reserved_words_get_their_own_kind() {
        let tokens = kinds("obj.catch typeof Class");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "obj".to_string()),
                (TokenKind::Punctuator, ".".to_string()),
                (TokenKind::ReservedWord, "catch".to_string()),
                (TokenKind::ReservedWord, "typeof".to_string()),
                (TokenKind::Identifier, "Class".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn strict_only_words_lex_as_identifiers() {
        let tokens = kinds("let yield");
        assert_eq!(tokens[0].0, TokenKind::Identifier);
        assert_eq!(tokens[1].0, TokenKind::Identifier);
    }

    #[test]
    fn longest_punctuator_wins() {
        let tokens = kinds("a === b !== c == d");
        let puncts: Vec<&str> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Punctuator)
            .map(|(_, l)| l.as_str())
            .collect();
        assert_eq!(puncts, vec!["===", "!==", "=="]);
    }

    #[test]
    fn strings_are_cooked() {
        let tokens = kinds(r#"'it\'s' "a\tb" "A\x42""#);
        assert_eq!(tokens[0], (TokenKind::String, "it's".to_string()));
        assert_eq!(tokens[1], (TokenKind::String, "a\tb".to_string()));
        assert_eq!(tokens[2], (TokenKind::String, "AB".to_string()));
    }

    #[test]
    fn escaped_strings_are_flagged() {
        let tokens = Lexer::new(r#"'use strict' 'use\x20strict' "a\
b""#)
            .scan_tokens()
            .unwrap();
        assert!(!tokens[0].escaped);
        assert!(tokens[1].escaped);
        assert_eq!(tokens[1].lexeme, "use strict");
        assert!(tokens[2].escaped);
        assert_eq!(tokens[2].lexeme, "ab");
    }

    #[test]
    fn numbers_in_several_forms() {
        let tokens = kinds("11 3.5 .25 1e3 0xff");
        let lexemes: Vec<&str> = tokens[..5].iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(lexemes, vec!["11", "3.5", ".25", "1e3", "0xff"]);
        assert!(tokens[..5].iter().all(|(k, _)| *k == TokenKind::Number));
    }

    #[test]
    fn comments_and_spans() {
        let tokens = Lexer::new("// header\n/* block\n */ var x")
            .scan_tokens()
            .unwrap();
        assert_eq!(tokens[0].lexeme, "var");
        assert_eq!(tokens[0].span, Span::new(3, 4));
        assert!(tokens[0].newline_before);
        assert_eq!(tokens[1].span, Span::new(3, 8));
        assert!(!tokens[1].newline_before);
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        let err = Lexer::new("var s = 'oops").scan_tokens().unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert_eq!(err.span, Span::new(1, 8));
    }

    #[test]
    fn unexpected_character_is_reported() {
        let err = Lexer::new("a # b").scan_tokens().unwrap_err();
        assert_eq!(err.message, "unexpected character '#'");
        assert_eq!(err.span, Span::new(1, 2));
    }

    #[test]
    fn unterminated_block_comment() {
        let err = Lexer::new("/* never closed").scan_tokens().unwrap_err();
        assert_eq!(err.message, "unterminated block comment");
    }
}
