// sprig-core - Atom built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Atoms: single mutable cells shared by every copy of the value.

use sprig_parser::{Cell, Form};

use crate::error::{Error, Result};
use crate::eval::apply;

use super::{expect_args, expect_at_least};

fn atom_arg<'a>(name: &str, form: &'a Form) -> Result<&'a Cell> {
    match form {
        Form::Atom(cell) => Ok(cell),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

/// (atom x)
pub(crate) fn builtin_atom(args: &[Form]) -> Result<Form> {
    expect_args("atom", args, 1)?;
    Ok(Form::atom(args[0].clone()))
}

/// (deref a)
pub(crate) fn builtin_deref(args: &[Form]) -> Result<Form> {
    expect_args("deref", args, 1)?;
    Ok(atom_arg("deref", &args[0])?.get())
}

/// (reset! a v): store `v`, returning it.
pub(crate) fn builtin_reset(args: &[Form]) -> Result<Form> {
    expect_args("reset!", args, 2)?;
    Ok(atom_arg("reset!", &args[0])?.set(args[1].clone()))
}

/// (swap! a f args...): store `(f @a args...)`, returning it.
pub(crate) fn builtin_swap(args: &[Form]) -> Result<Form> {
    expect_at_least("swap!", args, 2)?;
    let cell = atom_arg("swap!", &args[0])?;

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(cell.get());
    call_args.extend_from_slice(&args[2..]);

    let new_val = apply(&args[1], &call_args)?;
    Ok(cell.set(new_val))
}
