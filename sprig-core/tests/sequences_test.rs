// sprig-core - Sequence integration tests
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Integration tests for list and vector functions.
//!
//! Tests for: list, vector, vec, cons, concat, nth, first, rest, empty?,
//! length, conj, seq, apply, map

mod common;

use common::{Error, Form, eval_raw, eval_str, new_env};

fn ints(ns: &[i64]) -> Form {
    Form::list(ns.iter().map(|&n| Form::int(n)))
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_list_and_vector() {
    assert_eval!("(list 1 2 3)", ints(&[1, 2, 3]));
    assert_eval!("(list)", Form::empty_list());
    let v = eval_str("(vector 1 2)").unwrap();
    assert!(matches!(v, Form::Vector(_, _)));
    assert_eq!(v.to_string(), "[1 2]");
}

#[test]
fn test_vec_converts_list() {
    let v = eval_str("(vec (list 1 2))").unwrap();
    assert_eq!(v.to_string(), "[1 2]");
}

#[test]
fn test_cons() {
    assert_eval!("(cons 1 (list 2 3))", ints(&[1, 2, 3]));
    assert_eval!("(cons 1 [2 3])", ints(&[1, 2, 3]));
    assert_eval!("(cons 1 null)", ints(&[1]));
    assert!(eval_str("(cons 1 [2])").unwrap().to_string().starts_with('('));
}

#[test]
fn test_concat() {
    assert_eval!("(concat (list 1) [2 3] (list))", ints(&[1, 2, 3]));
    assert_eval!("(concat)", Form::empty_list());
    assert_eval_err!("(concat 1 2)");
}

// =============================================================================
// Access
// =============================================================================

#[test]
fn test_nth() {
    assert_eval!("(nth (list 10 20 30) 1)", Form::int(20));
    assert_eval!("(nth [10 20 30] 2)", Form::int(30));
}

#[test]
fn test_nth_out_of_range() {
    let env = new_env();
    assert!(matches!(
        eval_raw("(nth (list 1 2) 2)", &env),
        Err(Error::IndexOutOfRange { index: 2, length: 2 })
    ));
    assert!(matches!(
        eval_raw("(nth (list 1 2) -1)", &env),
        Err(Error::IndexOutOfRange { index: -1, .. })
    ));
}

#[test]
fn test_first_and_rest() {
    assert_eval!("(first (list 1 2 3))", Form::int(1));
    assert_eval!("(first [])", Form::Nil);
    assert_eval!("(first null)", Form::Nil);
    assert_eval!("(rest (list 1 2 3))", ints(&[2, 3]));
    assert_eval!("(rest [1])", Form::empty_list());
    assert_eval!("(rest null)", Form::empty_list());
    assert!(matches!(eval_str("(rest [1 2])").unwrap(), Form::List(_, _)));
}

#[test]
fn test_empty_and_length() {
    assert_eval!("(empty? (list))", Form::True);
    assert_eval!("(empty? [1])", Form::False);
    assert_eval!("(length (list 1 2 3))", Form::int(3));
    assert_eval!("(length [])", Form::int(0));
    assert_eval!("(length null)", Form::int(0));
}

#[test]
fn test_conj() {
    assert_eval!("(conj (list 1 2) 3 4)", ints(&[4, 3, 1, 2]));
    assert_eq!(eval_str("(conj [1 2] 3 4)").unwrap().to_string(), "[1 2 3 4]");
    assert_eval_err!("(conj 1 2)");
}

#[test]
fn test_seq() {
    assert_eval!("(seq (list 1 2))", ints(&[1, 2]));
    assert_eval!("(seq [1 2])", ints(&[1, 2]));
    assert!(matches!(eval_str("(seq [1 2])").unwrap(), Form::List(_, _)));
    assert_eval!("(seq (list))", Form::Nil);
    assert_eval!("(seq null)", Form::Nil);
    assert_eval!("(seq \"\")", Form::Nil);
    assert_eval!(
        "(seq \"ab\")",
        Form::list([Form::text("a"), Form::text("b")])
    );
    assert_eval!("(seq 5)", Form::Nil);
}

// =============================================================================
// Higher order
// =============================================================================

#[test]
fn test_apply() {
    assert_eval!("(apply + (list 1 2))", Form::int(3));
    assert_eval!("(apply + 1 2 [3 4])", Form::int(10));
    assert_eval!("(apply list 1 2 [])", ints(&[1, 2]));
    assert_eval!("(apply (lambda (&rest xs) (length xs)) 1 [2 3])", Form::int(3));
    assert_eval_err!("(apply +)");
    assert_eval_err!("(apply + 1 2)");
}

#[test]
fn test_map() {
    assert_eval!(
        "(map (lambda (x) (* x x)) (list 1 2 3))",
        ints(&[1, 4, 9])
    );
    assert_eval!("(map (lambda (x) x) [])", Form::empty_list());
    assert!(matches!(
        eval_str("(map (lambda (x) x) [1])").unwrap(),
        Form::List(_, _)
    ));
}

#[test]
fn test_map_with_primitive() {
    assert_eval!(
        "(map list [1 2])",
        Form::list([ints(&[1]), ints(&[2])])
    );
}
