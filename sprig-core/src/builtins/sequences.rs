// sprig-core - Sequence built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Lists and vectors: list, vector, vec, cons, concat, nth, first, rest,
//! empty?, length, conj, seq
//!
//! Functions that read a sequence accept either a list or a vector, and
//! most read `null` as the empty list. Results are lists unless noted.

use num_traits::ToPrimitive;
use sprig_parser::{Form, Vector};

use crate::error::{Error, Result};

use super::{expect_args, expect_at_least, seq_arg, seq_or_nil_arg};

pub(crate) fn builtin_list(args: &[Form]) -> Result<Form> {
    Ok(Form::list(args.iter().cloned()))
}

pub(crate) fn builtin_vector(args: &[Form]) -> Result<Form> {
    Ok(Form::vector(args.iter().cloned()))
}

/// (vec seq): the elements of `seq` as a vector.
pub(crate) fn builtin_vec(args: &[Form]) -> Result<Form> {
    expect_args("vec", args, 1)?;
    Ok(Form::Vector(seq_or_nil_arg("vec", &args[0])?, None))
}

/// (cons x seq)
pub(crate) fn builtin_cons(args: &[Form]) -> Result<Form> {
    expect_args("cons", args, 2)?;
    let mut items = seq_or_nil_arg("cons", &args[1])?;
    items.push_front(args[0].clone());
    Ok(Form::List(items, None))
}

/// (concat seqs...)
pub(crate) fn builtin_concat(args: &[Form]) -> Result<Form> {
    let mut items = Vector::new();
    for arg in args {
        items.append(seq_or_nil_arg("concat", arg)?);
    }
    Ok(Form::List(items, None))
}

/// (nth seq index)
pub(crate) fn builtin_nth(args: &[Form]) -> Result<Form> {
    expect_args("nth", args, 2)?;
    let items = seq_arg("nth", &args[0])?;
    let Form::Integer(index) = &args[1] else {
        return Err(Error::type_error_in("nth", "integer", args[1].type_name()));
    };
    let out_of_range = || Error::IndexOutOfRange {
        index: index.to_i64().unwrap_or(i64::MAX),
        length: items.len(),
    };
    let i = index.to_usize().ok_or_else(out_of_range)?;
    items.get(i).cloned().ok_or_else(out_of_range)
}

/// (first seq): `null` for an empty sequence or `null`.
pub(crate) fn builtin_first(args: &[Form]) -> Result<Form> {
    expect_args("first", args, 1)?;
    let items = seq_or_nil_arg("first", &args[0])?;
    Ok(items.front().cloned().unwrap_or(Form::Nil))
}

/// (rest seq): everything after the first element, always a list.
pub(crate) fn builtin_rest(args: &[Form]) -> Result<Form> {
    expect_args("rest", args, 1)?;
    let items = seq_or_nil_arg("rest", &args[0])?;
    Ok(Form::List(items.skip(1.min(items.len())), None))
}

pub(crate) fn builtin_empty_p(args: &[Form]) -> Result<Form> {
    expect_args("empty?", args, 1)?;
    Ok(Form::bool(seq_or_nil_arg("empty?", &args[0])?.is_empty()))
}

pub(crate) fn builtin_length(args: &[Form]) -> Result<Form> {
    expect_args("length", args, 1)?;
    let len = seq_or_nil_arg("length", &args[0])?.len();
    Ok(Form::Integer(len.into()))
}

/// (conj coll xs...): a list gains each x at the front, in turn; a vector
/// gains them at the back.
pub(crate) fn builtin_conj(args: &[Form]) -> Result<Form> {
    expect_at_least("conj", args, 1)?;
    match &args[0] {
        Form::List(items, meta) => {
            let mut items = items.clone();
            for x in &args[1..] {
                items.push_front(x.clone());
            }
            Ok(Form::List(items, meta.clone()))
        }
        Form::Vector(items, meta) => {
            let mut items = items.clone();
            items.extend(args[1..].iter().cloned());
            Ok(Form::Vector(items, meta.clone()))
        }
        other => Err(Error::type_error_in("conj", "list", other.type_name())),
    }
}

/// (seq x): a non-empty list view of `x`, or `null`.
///
/// Strings become a list of one-character strings. Anything that is not
/// a sequence or string gives `null`.
pub(crate) fn builtin_seq(args: &[Form]) -> Result<Form> {
    expect_args("seq", args, 1)?;
    let items: Vector<Form> = match &args[0] {
        Form::List(items, _) | Form::Vector(items, _) => items.clone(),
        Form::Text(s) => s.chars().map(|c| Form::text(c.to_string())).collect(),
        _ => Vector::new(),
    };
    if items.is_empty() {
        Ok(Form::Nil)
    } else {
        Ok(Form::List(items, None))
    }
}
