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

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use esnames::{eval_source, run_source, ErrorKind, Options, Value};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/identifier_names.js");

fn run(source: &str) -> Vec<String> {
    match run_source(source, &Options::default()) {
        Ok(lines) => lines,
        Err(err) => panic!("script failed: {}", err),
    }
}

fn expected_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn keyword_named_properties_fixture() {
    let source = fs::read_to_string(FIXTURE).unwrap();
    let expected = expected_lines(Path::new(&format!("{}.expected", FIXTURE)));

    assert_eq!(run(&source), expected);
}

#[test]
fn method_called_through_keyword_member_sees_its_object() {
    let lines = run(r#"
        var obj = {
            name: "obj",
            catch: function () { return this.name; },
            finally: function (x) { return x + 1; }
        };
        print(obj.catch(), obj.finally(41));
        print(typeof obj.catch);
    "#);

    assert_eq!(lines, vec!["obj 42", "function"]);
}

#[test]
fn keyword_members_can_be_assigned_and_deleted() {
    let lines = run(r#"
        var o = {};
        o.in = 1;
        o["typeof"] = "t";
        print("in" in o, o.typeof);
        delete o.in;
        print("in" in o, o.in);
    "#);

    assert_eq!(lines, vec!["true t", "false undefined"]);
}

#[test]
fn runtime_errors_are_catchable() {
    let lines = run(r#"
        var obj = {};
        try {
            obj.missing();
        } catch (e) {
            print(e.name + ": " + e.message);
            print(e instanceof TypeError, e instanceof Error, e instanceof ReferenceError);
        }
        try {
            nowhere;
        } catch (e) {
            print(e.name);
        } finally {
            print("finally");
        }
    "#);

    assert_eq!(
        lines,
        vec![
            "TypeError: obj.missing is not a function",
            "true true false",
            "ReferenceError",
            "finally",
        ]
    );
}

#[test]
fn thrown_values_reach_catch() {
    let lines = run(r#"
        function fail(msg) { throw TypeError(msg); }
        try { fail("bad class"); } catch (err) { print(err); }
        try { throw { in: 1 }; } catch (o) { print(o.in); }
    "#);

    assert_eq!(lines, vec!["TypeError: bad class", "1"]);
}

#[test]
fn uncaught_throw_becomes_script_error() {
    let err = run_source("var o = null;\no.class;", &Options::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(err.message, "Cannot read property 'class' of null");
    assert_eq!(err.span.line, 2);

    let err = run_source("throw 'boom';", &Options::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Error);
    assert_eq!(err.message, "uncaught exception: boom");
}

#[test]
fn json_stringify_keeps_keyword_keys() {
    let lines = run(r#"
        var obj = { in: 11, class: "hello", try: false, catch: function () {} };
        print(JSON.stringify(obj));
    "#);

    assert_eq!(lines, vec![r#"{"class":"hello","in":11,"try":false}"#]);
}

#[test]
fn var_and_function_hoisting() {
    let lines = run(r#"
        print(typeof later, early());
        var later = 1;
        function early() { return "hoisted"; }
    "#);

    assert_eq!(lines, vec!["undefined hoisted"]);
}

#[test]
fn closures_and_recursion() {
    let value = eval_source(
        r#"
        function counter() {
            var n = 0;
            return function () { n = n + 1; return n; };
        }
        var next = counter();
        next(); next();
        var fact = function f(k) { return k <= 1 ? 1 : k * f(k - 1); };
        next() + fact(5)
    "#,
        &Options::default(),
    )
    .unwrap();

    assert_eq!(value, Value::Number(123.0));
}

#[test]
fn runaway_recursion_is_a_range_error() {
    let err = run_source("function f() { return f(); } f();", &Options::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RangeError);
    assert_eq!(err.message, "Maximum call stack size exceeded");

    // the limit resets once the runaway call has unwound
    let lines = run(r#"
        try { (function f() { return f(); })(); } catch (e) { print(e.name); }
        function down(n) { return n === 0 ? "bottom" : down(n - 1); }
        print(down(15));
    "#);
    assert_eq!(lines, vec!["RangeError", "bottom"]);
}

#[test]
fn strict_mode_rejects_implicit_globals() {
    assert_eq!(run("x = 5; print(x);"), vec!["5"]);

    let err = run_source("'use strict';\nx = 5;", &Options::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ReferenceError);
    assert_eq!(err.message, "x is not defined");
}

#[test]
fn runs_a_script_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "var o = {{ return: 'r', if: 'i' }};").unwrap();
    writeln!(file, "print(o.return + o.if);").unwrap();

    let source = fs::read_to_string(file.path()).unwrap();
    assert_eq!(run(&source), vec!["ri"]);
}

#[test]
fn cli_runs_fixture_and_reports_syntax_errors() {
    let exe = env!("CARGO_BIN_EXE_esnames");

    let out = Command::new(exe).arg(FIXTURE).output().unwrap();
    assert!(out.status.success());
    let expected = fs::read_to_string(format!("{}.expected", FIXTURE)).unwrap();
    assert_eq!(String::from_utf8_lossy(&out.stdout), expected);

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.js");
    fs::write(&bad, "var in = 1;\n").unwrap();

    let out = Command::new(exe).arg(&bad).output().unwrap();
    assert_eq!(out.status.code(), Some(65));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error[E_SYNTAX]: unexpected reserved word 'in'"));

    let out = Command::new(exe).arg(dir.path().join("missing.js")).output().unwrap();
    assert_eq!(out.status.code(), Some(66));
}

fn write_script(dir: &tempfile::TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn cli_uncaught_runtime_error_exits_70() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "boom.js", "var o = null;\nprint(o.try);\n");

    let out = Command::new(env!("CARGO_BIN_EXE_esnames")).arg(&script).output().unwrap();
    assert_eq!(out.status.code(), Some(70));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error[E_TYPE]: Cannot read property 'try' of null"));
    assert!(stderr.contains("boom.js:2:"));
}

#[test]
fn cli_strict_flag_rejects_strict_words() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "let.js", "var let = 1;\nprint(let);\n");
    let exe = env!("CARGO_BIN_EXE_esnames");

    let out = Command::new(exe).arg(&script).output().unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "1\n");

    let out = Command::new(exe).arg("--strict").arg(&script).output().unwrap();
    assert_eq!(out.status.code(), Some(65));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unexpected reserved word 'let'"));
    assert!(stderr.contains("  1 | var let = 1;\n    |     ^\n"));
}

#[test]
fn cli_dumps_tokens_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "tokens.js", "obj.in\n");

    let out = Command::new(env!("CARGO_BIN_EXE_esnames"))
        .arg("--tokens")
        .arg(&script)
        .output()
        .unwrap();
    assert!(out.status.success());

    let tokens: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let tokens = tokens.as_array().unwrap();
    let kinds: Vec<(&str, &str)> = tokens
        .iter()
        .map(|t| (t["kind"].as_str().unwrap(), t["lexeme"].as_str().unwrap()))
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("Identifier", "obj"),
            ("Punctuator", "."),
            ("ReservedWord", "in"),
            ("Eof", ""),
        ]
    );
    assert_eq!(tokens[2]["span"]["column"], 4);
    assert_eq!(tokens[3]["newline_before"], true);
}

#[test]
fn cli_parse_only_does_not_run() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "parse.js", "print('ran');\nundefinedFunction();\n");

    let out = Command::new(env!("CARGO_BIN_EXE_esnames"))
        .arg("--parse-only")
        .arg(&script)
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "ok\n");
}

#[test]
fn cli_classifies_words() {
    let out = Command::new(env!("CARGO_BIN_EXE_esnames"))
        .args(["--classify", "in", "let", "Class"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let rows: Vec<Vec<&str>> = stdout.lines().map(|l| l.split_whitespace().collect()).collect();

    assert_eq!(
        rows,
        vec![
            vec!["in", "Keyword", "reserved=true", "binding=false", "property=true"],
            vec!["let", "FutureStrict", "reserved=false", "binding=true", "property=true"],
            vec!["Class", "Identifier", "reserved=false", "binding=true", "property=true"],
        ]
    );
}
