// sprig-core - String integration tests
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Integration tests for string, symbol and keyword functions.
//!
//! Tests for: str, format-str, format, split, symbol, keyword, read-string

mod common;

use common::{Form, Symbol, eval_str};
use sprig_core::builtins::format_directives;

#[test]
fn test_str_concatenates_plain() {
    assert_eval!("(str \"a\" 1 :k \"b\")", Form::text("a1:kb"));
    assert_eval!("(str)", Form::text(""));
    assert_eval!("(str (list \"x\" 2))", Form::text("(x 2)"));
}

#[test]
fn test_format_str_is_readable() {
    assert_eval!(
        "(format-str \"a\" 1 (list \"x\"))",
        Form::text("\"a\" 1 (\"x\")")
    );
}

#[test]
fn test_format_returns_null() {
    assert_eval!("(format \"~d~%\" 5)", Form::Nil);
    assert_eval_err!("(format \"~z\")");
    assert_eval_err!("(format 5)");
}

#[test]
fn test_format_directives() {
    let out = format_directives("~s has ~d items (~x, ~b)~%", &[
        Form::text("cart"),
        Form::int(10),
        Form::int(10),
        Form::int(10),
    ])
    .unwrap();
    assert_eq!(out, "cart has 10 items (#xa, #b1010)\n");
}

#[test]
fn test_split() {
    assert_eval!(
        "(split \"a b c\" \" \")",
        Form::list([Form::text("a"), Form::text("b"), Form::text("c")])
    );
    assert_eval!(
        "(split \"k=v\" \"=:\")",
        Form::list([Form::text("k"), Form::text("v")])
    );
    assert_eval_err!("(split \"abc\" \"\")");
}

#[test]
fn test_symbol() {
    assert_eval!("(symbol \"foo\")", Form::Symbol(Symbol::new("foo")));
    assert_eval!("(symbol? (symbol \"foo\"))", Form::True);
    assert_eval_err!("(symbol 1)");
}

#[test]
fn test_keyword() {
    assert_eval!("(keyword \"k\")", Form::keyword("k"));
    assert_eval!("(keyword :k)", Form::keyword("k"));
    assert_eval!("(= (keyword \"k\") :k)", Form::True);
    assert_eval!("(keyword? (keyword \"k\"))", Form::True);
    assert_eval!("(keyword? \"k\")", Form::False);
    assert_eval!("(string? :k)", Form::False);
    assert_eq!(eval_str("(keyword \"k\")").unwrap().to_string(), ":k");
}

#[test]
fn test_read_string() {
    let form = eval_str("(read-string \"(+ 1 2)\")").unwrap();
    assert_eq!(form.to_string(), "(+ 1 2)");
    assert_eval!("(eval (read-string \"(+ 1 2)\"))", Form::int(3));
    assert_eval!("(read-string \"\")", Form::Nil);
    assert_eval!("(read-string \"; only a comment\")", Form::Nil);
    assert_eval_err!("(read-string \"(1 2\")");
}

#[test]
fn test_string_escapes() {
    assert_eval!("(str \"a\\nb\")", Form::text("a\nb"));
    assert_eq!(
        eval_str("\"q\\\"uote\"").unwrap().to_string(),
        "\"q\\\"uote\""
    );
}
