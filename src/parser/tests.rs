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

use assert_matches::assert_matches;

use crate::ast::{Expr, Literal, Program, Stmt};
use crate::error::{ErrorKind, ScriptError};
use crate::lexer::tokenize;
use crate::parser::{parse, parse_expression};
use crate::span::Span;

fn parse_str(source: &str) -> Result<Program, ScriptError> {
    parse(tokenize(source)?, false)
}

fn parse_strict(source: &str) -> Result<Program, ScriptError> {
    parse(tokenize(source)?, true)
}

fn expr_str(source: &str) -> Result<Expr, ScriptError> {
    parse_expression(tokenize(source)?)
}

#[test]
fn object_literal_accepts_reserved_keys() {
    let expr = expr_str("{ in: 11, class: 'hello', try: false, typeof: 456, instanceof: 'world' }")
        .unwrap();

    let properties = match expr {
        Expr::Object { properties } => properties,
        other => panic!("expected object literal, got {:?}", other),
    };

    let keys: Vec<&str> = properties.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["in", "class", "try", "typeof", "instanceof"]);
    assert_eq!(properties[0].1, Expr::Literal(Literal::Number(11.0)));
}

#[test]
fn string_and_number_keys_are_normalised() {
    let expr = expr_str("{ 'a b': 1, 1.0: 2, 0x10: 3, }").unwrap();
    let keys: Vec<String> = match expr {
        Expr::Object { properties } => properties.into_iter().map(|(k, _)| k).collect(),
        other => panic!("expected object literal, got {:?}", other),
    };
    assert_eq!(keys, vec!["a b", "1", "16"]);
}

#[test]
fn member_access_accepts_reserved_names() {
    let expr = expr_str("obj.catch()").unwrap();
    assert_matches!(
        expr,
        Expr::Call { callee, arguments, .. } if arguments.is_empty()
            && matches!(&*callee, Expr::Member { property, .. } if property == "catch")
    );
}

#[test]
fn var_with_reserved_name_is_rejected() {
    let err = parse_str("var in = 1;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "unexpected reserved word 'in'");
    assert_eq!(err.span, Span::new(1, 4));
}

#[test]
fn every_binding_position_is_checked() {
    for source in [
        "var x, class = 1;",
        "function typeof() {}",
        "var f = function instanceof() {};",
        "function f(a, try) {}",
        "try {} catch (catch) {}",
    ] {
        let err = parse_str(source).unwrap_err();
        assert!(
            err.message.starts_with("unexpected reserved word"),
            "{} gave {}",
            source,
            err
        );
    }
}

#[test]
fn reserved_word_as_expression_is_rejected() {
    let err = parse_str("x = class;").unwrap_err();
    assert_eq!(err.message, "unexpected reserved word 'class'");

    let err = parse_str("in;").unwrap_err();
    assert!(err.is_syntax_error());
}

#[test]
fn assignment_to_reserved_member_is_fine() {
    let program = parse_str("var o = {}; o.class = 'x'; o['try'] = 1;").unwrap();
    assert_eq!(program.body.len(), 3);
    assert_matches!(
        &program.body[1],
        Stmt::Expression(Expr::Assign { target, .. })
            if matches!(&**target, Expr::Member { property, .. } if property == "class")
    );
}

#[test]
fn strict_words_depend_on_mode() {
    assert!(parse_str("var let = 1; function yield(static) {}").is_ok());

    let err = parse_strict("var let = 1;").unwrap_err();
    assert_eq!(err.message, "unexpected reserved word 'let'");

    let err = parse_str("'use strict';\nvar yield;").unwrap_err();
    assert_eq!(err.message, "unexpected reserved word 'yield'");
}

#[test]
fn function_directive_rechecks_its_own_names() {
    let err = parse_str("function f(interface) { 'use strict'; }").unwrap_err();
    assert_eq!(err.message, "unexpected reserved word 'interface'");

    let err = parse_str("function f(a, a) { 'use strict'; }").unwrap_err();
    assert!(err.message.contains("duplicate parameter"));

    // strictness does not leak out of the function
    assert!(parse_str("function f() { 'use strict'; }\nvar public = 1;").is_ok());
}

#[test]
fn use_strict_must_be_a_directive() {
    let program = parse_str("var a = 1; 'use strict'; var let = 2;").unwrap();
    assert!(!program.strict);

    let program = parse_str("'other'; 'use strict'\nvar a;").unwrap();
    assert!(program.strict);
}

#[test]
fn escaped_use_strict_is_not_a_directive() {
    let program = parse_str(r"'use\x20strict'; var let = 1;").unwrap();
    assert!(!program.strict);

    assert!(parse_str(r"function f() { 'use\u0020strict'; var static = 1; }").is_ok());
    assert!(parse_str(r"function f() { 'use strict'; var static = 1; }").is_err());
}

#[test]
fn semicolons_are_inserted_at_line_breaks() {
    let program = parse_str("var a = 1\nvar b = 2\nprint(a + b)").unwrap();
    assert_eq!(program.body.len(), 3);

    let err = parse_str("var a = 1 var b = 2").unwrap_err();
    assert!(err.message.starts_with("expected ';'"));
}

#[test]
fn return_outside_function() {
    let err = parse_str("return 1;").unwrap_err();
    assert_eq!(err.message, "return statement outside of function");
}

#[test]
fn try_requires_a_handler() {
    let err = parse_str("try { }").unwrap_err();
    assert_eq!(err.message, "missing catch or finally after try");
}

#[test]
fn precedence_of_relational_keywords() {
    let expr = expr_str("'in' in o && x instanceof TypeError").unwrap();
    assert_matches!(
        expr,
        Expr::Logical { left, operator, right }
            if operator == "&&"
                && matches!(&*left, Expr::Binary { operator, .. } if operator == "in")
                && matches!(&*right, Expr::Binary { operator, .. } if operator == "instanceof")
    );
}

#[test]
fn invalid_assignment_target() {
    let err = parse_str("1 = 2;").unwrap_err();
    assert_eq!(err.message, "invalid assignment target");
}

#[test]
fn trailing_tokens_after_expression() {
    let err = expr_str("{ in: 11 } }").unwrap_err();
    assert_eq!(err.message, "unexpected token '}'");
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let shallow = format!("var x = {}1{};", "(".repeat(30), ")".repeat(30));
    assert!(parse_str(&shallow).is_ok());

    let deep = format!("var x = {}1{};", "(".repeat(2000), ")".repeat(2000));
    let err = parse_str(&deep).unwrap_err();
    assert!(err.is_syntax_error());
    assert_eq!(err.message, "too many nested statements or expressions");

    let err = parse_str(&format!("{}x;", "!".repeat(2000))).unwrap_err();
    assert_eq!(err.message, "too many nested statements or expressions");

    let err = parse_str(&format!("{}{}", "{".repeat(2000), "}".repeat(2000))).unwrap_err();
    assert!(err.is_syntax_error());
}

#[test]
fn empty_token_stream_is_an_empty_program() {
    let program = parse(Vec::new(), false).unwrap();
    assert!(program.body.is_empty());

    let err = parse_expression(Vec::new()).unwrap_err();
    assert_eq!(err.message, "unexpected end of input");
}
