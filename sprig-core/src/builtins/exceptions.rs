// sprig-core - Exception built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

use sprig_parser::Form;

use crate::error::{Error, Result};

use super::expect_args;

/// (throw value): fail with `value` as the payload a `catch` clause sees.
pub(crate) fn builtin_throw(args: &[Form]) -> Result<Form> {
    expect_args("throw", args, 1)?;
    Err(Error::Thrown(args[0].clone()))
}
