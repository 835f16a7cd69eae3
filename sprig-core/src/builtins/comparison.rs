// sprig-core - Comparison built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Comparison operations: =, <, <=, >, >=

use std::cmp::Ordering;

use sprig_parser::Form;

use crate::error::{Error, Result};

use super::expect_args;

/// Structural equality of two values.
pub(crate) fn builtin_eq(args: &[Form]) -> Result<Form> {
    expect_args("=", args, 2)?;
    Ok(Form::bool(args[0] == args[1]))
}

/// Compare two numbers of the same variant.
fn compare_numbers(name: &'static str, a: &Form, b: &Form) -> Result<Ordering> {
    match (a, b) {
        (Form::Integer(x), Form::Integer(y)) => Ok(x.cmp(y)),
        (Form::Float(x), Form::Float(y)) => x
            .partial_cmp(y)
            .ok_or_else(|| Error::EvalError(format!("{}: cannot compare NaN", name))),
        (Form::Integer(_) | Form::Float(_), Form::Integer(_) | Form::Float(_)) => {
            Err(Error::type_error_in(name, a.type_name(), b.type_name()))
        }
        (Form::Integer(_) | Form::Float(_), other) | (other, _) => {
            Err(Error::type_error_in(name, "number", other.type_name()))
        }
    }
}

fn compare_with(name: &'static str, args: &[Form], pred: fn(Ordering) -> bool) -> Result<Form> {
    expect_args(name, args, 2)?;
    compare_numbers(name, &args[0], &args[1]).map(|ord| Form::bool(pred(ord)))
}

pub(crate) fn builtin_lt(args: &[Form]) -> Result<Form> {
    compare_with("<", args, Ordering::is_lt)
}

pub(crate) fn builtin_le(args: &[Form]) -> Result<Form> {
    compare_with("<=", args, Ordering::is_le)
}

pub(crate) fn builtin_gt(args: &[Form]) -> Result<Form> {
    compare_with(">", args, Ordering::is_gt)
}

pub(crate) fn builtin_ge(args: &[Form]) -> Result<Form> {
    compare_with(">=", args, Ordering::is_ge)
}
