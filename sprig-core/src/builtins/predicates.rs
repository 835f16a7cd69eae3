// sprig-core - Type predicate built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Type predicates: null?, true?, false?, symbol?, string?, keyword?,
//! number?, integer?, float?, fn?, macro?, list?, vector?, map?,
//! sequential?, atom?

use sprig_parser::Form;

use crate::error::Result;

use super::expect_args;

fn test_one(name: &'static str, args: &[Form], pred: fn(&Form) -> bool) -> Result<Form> {
    expect_args(name, args, 1)?;
    Ok(Form::bool(pred(&args[0])))
}

pub(crate) fn builtin_null_p(args: &[Form]) -> Result<Form> {
    test_one("null?", args, |f| matches!(f, Form::Nil))
}

pub(crate) fn builtin_true_p(args: &[Form]) -> Result<Form> {
    test_one("true?", args, |f| matches!(f, Form::True))
}

pub(crate) fn builtin_false_p(args: &[Form]) -> Result<Form> {
    test_one("false?", args, |f| matches!(f, Form::False))
}

pub(crate) fn builtin_symbol_p(args: &[Form]) -> Result<Form> {
    test_one("symbol?", args, |f| matches!(f, Form::Symbol(_)))
}

pub(crate) fn builtin_string_p(args: &[Form]) -> Result<Form> {
    test_one("string?", args, |f| matches!(f, Form::Text(_)))
}

pub(crate) fn builtin_keyword_p(args: &[Form]) -> Result<Form> {
    test_one("keyword?", args, |f| matches!(f, Form::Keyword(_)))
}

pub(crate) fn builtin_number_p(args: &[Form]) -> Result<Form> {
    test_one("number?", args, |f| {
        matches!(f, Form::Integer(_) | Form::Float(_))
    })
}

pub(crate) fn builtin_integer_p(args: &[Form]) -> Result<Form> {
    test_one("integer?", args, |f| matches!(f, Form::Integer(_)))
}

pub(crate) fn builtin_float_p(args: &[Form]) -> Result<Form> {
    test_one("float?", args, |f| matches!(f, Form::Float(_)))
}

/// Macros are not functions for the purposes of `fn?`.
pub(crate) fn builtin_fn_p(args: &[Form]) -> Result<Form> {
    test_one("fn?", args, |f| matches!(f, Form::Function(_, _)))
}

pub(crate) fn builtin_macro_p(args: &[Form]) -> Result<Form> {
    test_one("macro?", args, |f| matches!(f, Form::Macro(_, _)))
}

pub(crate) fn builtin_list_p(args: &[Form]) -> Result<Form> {
    test_one("list?", args, |f| matches!(f, Form::List(_, _)))
}

pub(crate) fn builtin_vector_p(args: &[Form]) -> Result<Form> {
    test_one("vector?", args, |f| matches!(f, Form::Vector(_, _)))
}

pub(crate) fn builtin_map_p(args: &[Form]) -> Result<Form> {
    test_one("map?", args, |f| matches!(f, Form::Map(_, _)))
}

pub(crate) fn builtin_sequential_p(args: &[Form]) -> Result<Form> {
    test_one("sequential?", args, |f| f.as_seq().is_some())
}

pub(crate) fn builtin_atom_p(args: &[Form]) -> Result<Form> {
    test_one("atom?", args, |f| matches!(f, Form::Atom(_)))
}
