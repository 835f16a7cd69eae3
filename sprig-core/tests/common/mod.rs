// sprig-core - Common test utilities
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Shared test helpers for sprig integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh environment with builtins
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_str_with_prelude`] - Evaluate code with the prelude loaded
//! - [`eval_all`] - Evaluate every form, returning the last
//! - [`eval_raw`] - Like [`eval_all`] but keeps the typed error
//! - [`new_env`] - Create a new environment with builtins registered
//! - [`new_env_with_prelude`] - Create a new environment with the prelude
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error
//! - [`assert_eval_err_contains!`] - Assert the error message mentions a string

#[allow(unused_imports)]
pub use sprig_core::{Env, Error, eval, init_prelude, register_builtins};
#[allow(unused_imports)]
pub use sprig_parser::{Form, Keyword, Parser, Symbol};

/// Evaluate every form in `s` in a fresh environment with builtins.
///
/// # Returns
///
/// Returns the value of the last form, or an error message string.
#[must_use]
pub fn eval_str(s: &str) -> Result<Form, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate every form in `s` in the given environment.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<Form, String> {
    eval_all(s, env)
}

/// Evaluate every form in `s` with the prelude loaded.
#[must_use]
#[allow(dead_code)]
pub fn eval_str_with_prelude(s: &str) -> Result<Form, String> {
    let env = new_env_with_prelude();
    eval_all(s, &env)
}

/// Evaluate multiple expressions, returning the last result.
///
/// An input with no forms evaluates to `null`.
#[must_use]
pub fn eval_all(s: &str, env: &Env) -> Result<Form, String> {
    eval_raw(s, env).map_err(|e| e.to_string())
}

/// Evaluate multiple expressions, keeping the typed error.
#[allow(dead_code)]
pub fn eval_raw(s: &str, env: &Env) -> sprig_core::Result<Form> {
    let mut parser = Parser::new(s)?;
    let mut result = Form::Nil;
    while let Some(expr) = parser.parse()? {
        result = eval(&expr, env)?;
    }
    Ok(result)
}

/// Read a single form without evaluating it.
#[must_use]
#[allow(dead_code)]
pub fn read(s: &str) -> Form {
    Parser::parse_str(s)
        .expect("test input should parse")
        .expect("test input should contain a form")
}

/// Create a new environment with builtins registered.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env).expect("builtins should register into a fresh root");
    env
}

/// Create a new environment with builtins and the prelude.
///
/// # Panics
///
/// Panics if the prelude fails to load.
#[must_use]
#[allow(dead_code)]
pub fn new_env_with_prelude() -> Env {
    let env = new_env();
    init_prelude(&env).expect("Failed to load prelude");
    env
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", Form::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` fails with a message containing `needle`.
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $needle:expr) => {
        match $crate::common::eval_str($input) {
            Ok(value) => panic!("Expected error for '{}' but got {:?}", $input, value),
            Err(message) => assert!(
                message.contains($needle),
                "Error for '{}' was {:?}, expected it to mention {:?}",
                $input,
                message,
                $needle
            ),
        }
    };
}
