// sprig-core - Metadata built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Metadata: with-meta, meta
//!
//! Lists, vectors, maps, functions and macros carry metadata. It never
//! affects equality, and attaching it builds a new value.

use sprig_parser::Form;

use crate::error::{Error, Result};

use super::expect_args;

/// (with-meta obj meta): a copy of `obj` carrying `meta`.
/// (with-meta obj): a copy with its metadata cleared.
pub(crate) fn builtin_with_meta(args: &[Form]) -> Result<Form> {
    if !(1..=2).contains(&args.len()) {
        return Err(Error::arity_range("with-meta", 1, 2, args.len()));
    }
    let meta = args.get(1).cloned().unwrap_or(Form::Nil);
    args[0].with_meta(meta).ok_or_else(|| {
        Error::type_error_in("with-meta", "collection or function", args[0].type_name())
    })
}

/// (meta obj): attached metadata, or `null`.
pub(crate) fn builtin_meta(args: &[Form]) -> Result<Form> {
    expect_args("meta", args, 1)?;
    Ok(args[0].meta())
}
