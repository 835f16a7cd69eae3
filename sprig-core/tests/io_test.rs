// sprig-core - File and eval integration tests
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Integration tests for eval, eval-file, read-file and the source loaders.

mod common;

use std::fs;
use std::path::PathBuf;

use common::{Form, eval_str, eval_str_with_env, new_env};
use sprig_core::{eval_file, eval_source};

/// A fresh file under the system temp dir holding `contents`.
fn temp_source(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "sprig-io-test-{}-{}.lisp",
        std::process::id(),
        name
    ));
    fs::write(&path, contents).expect("temp file should be writable");
    path
}

#[test]
fn test_eval_uses_root_environment() {
    assert_eval!("(eval (list + 1 2))", Form::int(3));
    assert_eval!("(eval ''x)", Form::symbol("x"));
    // Definitions made through eval land in the root, not the caller's frame
    assert_eval!(
        "((lambda (y) (eval (list 'define 'z 9))) 1) z",
        Form::int(9)
    );
}

#[test]
fn test_eval_source_returns_last_value() {
    let env = new_env();
    assert_eq!(
        eval_source("(define a 1) (+ a 1)", &env).unwrap(),
        Form::int(2)
    );
    assert_eq!(eval_source("", &env).unwrap(), Form::Nil);
}

#[test]
fn test_read_file() {
    let path = temp_source("read", "hello\nworld");
    let src = format!("(read-file \"{}\")", path.display());
    assert_eq!(eval_str(&src).unwrap(), Form::text("hello\nworld"));
    let _ = fs::remove_file(path);
}

#[test]
fn test_read_file_missing() {
    assert_eval_err_contains!(
        "(read-file \"/definitely/not/here.lisp\")",
        "File \"/definitely/not/here.lisp\" was not found."
    );
}

#[test]
fn test_eval_file_defines_into_root() {
    let path = temp_source("eval", "(define from-file 41)\n(+ from-file 1)\n");
    let env = new_env();
    let src = format!("(eval-file \"{}\")", path.display());
    assert_eq!(eval_str_with_env(&src, &env).unwrap(), Form::int(42));
    assert_eq!(
        eval_str_with_env("from-file", &env).unwrap(),
        Form::int(41)
    );
    let _ = fs::remove_file(path);
}

#[test]
fn test_eval_file_api() {
    let path = temp_source("api", "(define twice (lambda (x) (* 2 x)))\n(twice 21)");
    let env = new_env();
    let result = eval_file(&path.display().to_string(), &env).unwrap();
    assert_eq!(result, Form::int(42));
    let _ = fs::remove_file(path);
}

#[test]
fn test_eval_file_reports_parse_errors() {
    let path = temp_source("bad", "(define broken (+ 1 2)");
    let env = new_env();
    assert!(eval_file(&path.display().to_string(), &env).is_err());
    let _ = fs::remove_file(path);
}
