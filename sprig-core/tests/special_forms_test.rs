// sprig-core - Special form integration tests
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Integration tests for sprig special forms.
//!
//! Tests for: quote, define, let, begin, if, lambda, set!, and, dotimes,
//! countdown

mod common;

use common::{Error, Form, eval_raw, eval_str, eval_str_with_env, new_env};

// =============================================================================
// quote
// =============================================================================

#[test]
fn test_quote_returns_form_unevaluated() {
    let result = eval_str("(quote (undefined-fn 1 2))").unwrap();
    assert_eq!(result.to_string(), "(undefined-fn 1 2)");
}

#[test]
fn test_quote_reader_macro() {
    assert_eval!("'sym", Form::symbol("sym"));
    assert_eval!("'(1 2)", Form::list([Form::int(1), Form::int(2)]));
}

#[test]
fn test_quote_arity_is_strict() {
    assert_eval_err!("(quote)");
    assert_eval_err!("(quote a b)");
}

// =============================================================================
// define
// =============================================================================

#[test]
fn test_define_returns_value() {
    assert_eval!("(define x 10)", Form::int(10));
    assert_eval!("(define x 10) (+ x 1)", Form::int(11));
}

#[test]
fn test_duplicate_definition_in_one_frame() {
    let env = new_env();
    let err = eval_raw("(define x 1) (define x 2)", &env).unwrap_err();
    assert!(matches!(err, Error::DuplicateDefinition(ref s) if s.name() == "x"));
}

#[test]
fn test_shadowing_in_nested_frame() {
    assert_eval!(
        "(define x 1) (let ((x 2)) x)",
        Form::int(2)
    );
    assert_eval!(
        "(define x 1) ((lambda () (begin (define x 5) x)))",
        Form::int(5)
    );
    assert_eval!(
        "(define x 1) ((lambda () (define x 5))) x",
        Form::int(1)
    );
}

#[test]
fn test_define_requires_symbol() {
    assert_eval_err_contains!("(define 1 2)", "define");
}

// =============================================================================
// let
// =============================================================================

#[test]
fn test_let_sequential_bindings() {
    assert_eval!("(let ((a 1) (b (+ a 1))) (+ a b))", Form::int(3));
}

#[test]
fn test_let_flat_bindings() {
    assert_eval!("(let (a 1 b 2) (+ a b))", Form::int(3));
    assert_eval!("(let [a 1 b 2] (* a b))", Form::int(2));
}

#[test]
fn test_let_bindings_do_not_leak() {
    assert_eval_err!("(let ((a 1)) a) a");
}

#[test]
fn test_let_multiple_body_forms() {
    assert_eval!("(let ((a 1)) (define b 2) (+ a b))", Form::int(3));
}

#[test]
fn test_let_malformed() {
    assert_eval_err!("(let)");
    assert_eval_err!("(let ((a 1)))");
    assert_eval_err!("(let (a) a)");
    assert_eval_err!("(let ((1 2)) 1)");
}

// =============================================================================
// begin
// =============================================================================

#[test]
fn test_begin_returns_last() {
    assert_eval!("(begin 1 2 3)", Form::int(3));
    assert_eval!("(begin (define a 4) (+ a 1))", Form::int(5));
}

#[test]
fn test_empty_begin_is_null() {
    assert_eval!("(begin)", Form::Nil);
}

// =============================================================================
// if
// =============================================================================

#[test]
fn test_if_branches() {
    assert_eval!("(if #t 1 2)", Form::int(1));
    assert_eval!("(if #f 1 2)", Form::int(2));
    assert_eval!("(if null 1 2)", Form::int(2));
    assert_eval!("(if 0 1 2)", Form::int(1));
    assert_eval!("(if () 1 2)", Form::int(1));
    assert_eval!("(if #t 1)", Form::int(1));
}

#[test]
fn test_if_without_else_on_false_fails() {
    let env = new_env();
    assert!(matches!(
        eval_raw("(if #f 1)", &env),
        Err(Error::MissingElseBranch)
    ));
    assert!(matches!(
        eval_raw("(if null 1)", &env),
        Err(Error::MissingElseBranch)
    ));
}

// =============================================================================
// lambda
// =============================================================================

#[test]
fn test_lambda_application() {
    assert_eval!("((lambda (a b) (+ a b)) 2 3)", Form::int(5));
}

#[test]
fn test_lambda_captures_environment() {
    assert_eval!(
        "(define make-adder (lambda (n) (lambda (x) (+ x n))))
         (define add5 (make-adder 5))
         (add5 10)",
        Form::int(15)
    );
}

#[test]
fn test_lambda_missing_args_are_null() {
    assert_eval!("((lambda (a b) b) 1)", Form::Nil);
}

#[test]
fn test_lambda_surplus_args_are_ignored() {
    assert_eval!("((lambda (a) a) 1 2 3)", Form::int(1));
}

#[test]
fn test_lambda_rest_params() {
    assert_eval!(
        "((lambda (a &rest more) more) 1 2 3)",
        Form::list([Form::int(2), Form::int(3)])
    );
    assert_eval!("((lambda (&rest xs) xs))", Form::empty_list());
    // Parameters after the rest binder are never bound
    assert_eval_err!("((lambda (a &rest more ignored) ignored) 1 2)");
}

#[test]
fn test_lambda_rest_without_name() {
    assert_eval_err_contains!("(lambda (a &rest) a)", "&rest");
}

#[test]
fn test_lambda_body_not_evaluated_at_creation() {
    assert_eval!("(define f (lambda () (undefined))) 1", Form::int(1));
}

#[test]
fn test_lambda_multiple_body_forms() {
    assert_eval!("((lambda (x) (define y 2) (* x y)) 4)", Form::int(8));
}

// =============================================================================
// set!
// =============================================================================

#[test]
fn test_set_returns_first_value() {
    assert_eval!("(define x 1) (set! x 5)", Form::int(5));
    assert_eval!("(define x 1) (set! x 5) x", Form::int(5));
}

#[test]
fn test_set_evaluates_value_twice() {
    // The first evaluation yields the symbol y; the stored value is y's value
    assert_eval!(
        "(define y 42) (define x 1) (set! x (quote y))",
        Form::symbol("y")
    );
    assert_eval!(
        "(define y 42) (define x 1) (set! x (quote y)) x",
        Form::int(42)
    );
}

#[test]
fn test_set_writes_holding_frame() {
    assert_eval!(
        "(define counter 0)
         (define bump (lambda () (set! counter (+ counter 1))))
         (bump) (bump)
         counter",
        Form::int(2)
    );
}

#[test]
fn test_set_unbound_fails() {
    let env = new_env();
    assert!(matches!(
        eval_raw("(set! nope 1)", &env),
        Err(Error::UnboundSymbol(_))
    ));
}

// =============================================================================
// and
// =============================================================================

#[test]
fn test_and_returns_booleans() {
    assert_eval!("(and 1 2 3)", Form::True);
    assert_eval!("(and)", Form::True);
    assert_eval!("(and 1 #f 3)", Form::False);
    assert_eval!("(and null)", Form::True);
}

#[test]
fn test_and_short_circuits() {
    assert_eval!("(and #f (undefined))", Form::False);
}

// =============================================================================
// dotimes / countdown
// =============================================================================

#[test]
fn test_dotimes_runs_count_times() {
    assert_eval!(
        "(define total 0)
         (dotimes (i 5) (set! total (+ total i)))
         total",
        Form::int(10)
    );
}

#[test]
fn test_dotimes_returns_last_iteration() {
    assert_eval!("(dotimes (i 3) (* i 10))", Form::int(20));
    assert_eval!("(dotimes (i 0) i)", Form::Nil);
    assert_eval!("(dotimes (i -2) i)", Form::Nil);
}

#[test]
fn test_dotimes_count_is_evaluated() {
    assert_eval!("(define n 4) (dotimes (i n) i)", Form::int(3));
}

#[test]
fn test_dotimes_removes_variable() {
    let env = new_env();
    eval_str_with_env("(dotimes (i 2) i)", &env).unwrap();
    assert!(eval_str_with_env("i", &env).is_err());

    // Also after a failing body
    assert!(eval_str_with_env("(dotimes (j 2) (undefined))", &env).is_err());
    assert!(eval_str_with_env("j", &env).is_err());
}

#[test]
fn test_dotimes_malformed() {
    let env = new_env();
    for src in [
        "(dotimes i (+ 1 1))",
        "(dotimes (1 2) 3)",
        "(dotimes (i) 1)",
        "(dotimes (i \"x\") 1)",
    ] {
        assert!(
            matches!(eval_raw(src, &env), Err(Error::InvalidLoopForm { .. })),
            "{}",
            src
        );
    }
}

#[test]
fn test_countdown_never_runs_for_non_negative() {
    assert_eval!(
        "(define hits 0)
         (countdown (i 5) (set! hits (+ hits 1)))
         hits",
        Form::int(0)
    );
    assert_eval!("(countdown (i 0) i)", Form::Nil);
}

#[test]
fn test_countdown_negative_is_invalid() {
    let env = new_env();
    assert!(matches!(
        eval_raw("(countdown (i -1) i)", &env),
        Err(Error::InvalidLoopForm { form: "countdown" })
    ));
    assert!(eval_str_with_env("i", &env).is_err());
}

// =============================================================================
// Application
// =============================================================================

#[test]
fn test_empty_list_evaluates_to_itself() {
    assert_eval!("()", Form::empty_list());
}

#[test]
fn test_computed_head() {
    assert_eval!("((if #t + -) 5 3)", Form::int(8));
}

#[test]
fn test_not_callable() {
    let env = new_env();
    assert!(matches!(
        eval_raw("(\"text\" 1)", &env),
        Err(Error::NotCallable(_))
    ));
}

#[test]
fn test_map_literal_values_are_evaluated() {
    let result = eval_str("(define v 3) {:a v \"b\" (+ 1 1)}").unwrap();
    assert_eq!(result.to_string(), "{\"b\" 2 :a 3}");
}
