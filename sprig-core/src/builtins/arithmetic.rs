// sprig-core - Arithmetic built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Arithmetic operations: +, -, *, /, time-ms
//!
//! Integers are arbitrary precision and never overflow. Integers and
//! floats are never mixed: `(+ 1 2.0)` is a type error, as is any
//! non-number argument. Integer division truncates toward zero.

use std::time::{SystemTime, UNIX_EPOCH};

use num_traits::Zero;
use sprig_parser::Form;

use crate::error::{Error, Result};

use super::expect_args;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// Left fold of `op` over at least two arguments.
fn fold_numbers(name: &'static str, args: &[Form], op: Op) -> Result<Form> {
    let Some((first, rest)) = args.split_first().filter(|_| args.len() >= 2) else {
        return Err(Error::arity_at_least(name, 2, args.len()));
    };
    if !matches!(first, Form::Integer(_) | Form::Float(_)) {
        return Err(Error::type_error_in(name, "number", first.type_name()));
    }
    rest.iter()
        .try_fold(first.clone(), |acc, arg| combine(name, &acc, arg, op))
}

fn combine(name: &'static str, a: &Form, b: &Form, op: Op) -> Result<Form> {
    match (a, b) {
        (Form::Integer(x), Form::Integer(y)) => Ok(Form::Integer(match op {
            Op::Add => x + y,
            Op::Sub => x - y,
            Op::Mul => x * y,
            Op::Div => {
                if y.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                x / y
            }
        })),
        (Form::Float(x), Form::Float(y)) => Ok(Form::Float(match op {
            Op::Add => x + y,
            Op::Sub => x - y,
            Op::Mul => x * y,
            Op::Div => x / y,
        })),
        (Form::Integer(_) | Form::Float(_), Form::Integer(_) | Form::Float(_)) => {
            Err(Error::type_error_in(name, a.type_name(), b.type_name()))
        }
        (_, other) => Err(Error::type_error_in(name, "number", other.type_name())),
    }
}

pub(crate) fn builtin_add(args: &[Form]) -> Result<Form> {
    fold_numbers("+", args, Op::Add)
}

pub(crate) fn builtin_sub(args: &[Form]) -> Result<Form> {
    fold_numbers("-", args, Op::Sub)
}

pub(crate) fn builtin_mul(args: &[Form]) -> Result<Form> {
    fold_numbers("*", args, Op::Mul)
}

pub(crate) fn builtin_div(args: &[Form]) -> Result<Form> {
    fold_numbers("/", args, Op::Div)
}

/// Milliseconds since the Unix epoch.
pub(crate) fn builtin_time_ms(args: &[Form]) -> Result<Form> {
    expect_args("time-ms", args, 0)?;
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::EvalError(format!("time-ms: {}", e)))?;
    Ok(Form::Integer(elapsed.as_millis().into()))
}
