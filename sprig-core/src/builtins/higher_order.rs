// sprig-core - Higher-order built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Higher-order functions: apply, map

use sprig_parser::Form;

use crate::error::{Error, Result};
use crate::eval::apply;

use super::{expect_args, seq_or_nil_arg};

/// (apply f args... seq): call `f` with the leading args followed by the
/// elements of `seq`.
pub(crate) fn builtin_apply(args: &[Form]) -> Result<Form> {
    let Some((last, init)) = args.split_last().filter(|_| args.len() >= 2) else {
        return Err(Error::arity_at_least("apply", 2, args.len()));
    };
    let tail = seq_or_nil_arg("apply", last)?;
    let mut call_args: Vec<Form> = init[1..].to_vec();
    call_args.extend(tail);
    apply(&init[0], &call_args)
}

/// (map f seq): a list of `f` applied to each element.
pub(crate) fn builtin_map(args: &[Form]) -> Result<Form> {
    expect_args("map", args, 2)?;
    let items = seq_or_nil_arg("map", &args[1])?;
    let mapped = items
        .iter()
        .map(|item| apply(&args[0], std::slice::from_ref(item)))
        .collect::<Result<_>>()?;
    Ok(Form::List(mapped, None))
}
