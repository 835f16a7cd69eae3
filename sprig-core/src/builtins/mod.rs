// sprig-core - Built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Built-in functions for sprig.
//!
//! [`BUILTINS`] is a fixed table of primitives. [`register_builtins`]
//! copies it into a root environment, then adds `eval` and `eval-file`,
//! which need a handle on that root.

mod arithmetic;
mod atoms;
mod collections;
mod comparison;
mod exceptions;
mod higher_order;
mod io;
mod metadata;
mod predicates;
mod sequences;
mod strings;

use sprig_parser::{Form, Parser, Symbol, Vector};
use tracing::debug;

use crate::env::{Env, WeakEnv};
use crate::error::{Error, Result};
use crate::eval::{eval, make_native_fn};

pub use strings::format_directives;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub, builtin_time_ms};
use atoms::{builtin_atom, builtin_deref, builtin_reset, builtin_swap};
use collections::{
    builtin_assoc, builtin_contains_p, builtin_dissoc, builtin_get, builtin_hash_map,
    builtin_keys, builtin_vals,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use exceptions::builtin_throw;
use higher_order::{builtin_apply, builtin_map};
use io::{builtin_clear, builtin_exit, builtin_println, builtin_read_file, builtin_read_string};
use metadata::{builtin_meta, builtin_with_meta};
use predicates::{
    builtin_atom_p, builtin_false_p, builtin_float_p, builtin_fn_p, builtin_integer_p,
    builtin_keyword_p, builtin_list_p, builtin_macro_p, builtin_map_p, builtin_null_p,
    builtin_number_p, builtin_sequential_p, builtin_string_p, builtin_symbol_p, builtin_true_p,
    builtin_vector_p,
};
use sequences::{
    builtin_concat, builtin_conj, builtin_cons, builtin_empty_p, builtin_first, builtin_length,
    builtin_list, builtin_nth, builtin_rest, builtin_seq, builtin_vec, builtin_vector,
};
use strings::{
    builtin_format, builtin_format_str, builtin_keyword, builtin_split, builtin_str,
    builtin_symbol,
};

/// Signature shared by every table entry.
pub type BuiltinFn = fn(&[Form]) -> Result<Form>;

/// The primitive table, by name.
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    // Equality and comparison
    ("=", builtin_eq),
    ("<", builtin_lt),
    ("<=", builtin_le),
    (">", builtin_gt),
    (">=", builtin_ge),
    // Arithmetic
    ("+", builtin_add),
    ("-", builtin_sub),
    ("*", builtin_mul),
    ("/", builtin_div),
    ("time-ms", builtin_time_ms),
    // Type predicates
    ("null?", builtin_null_p),
    ("true?", builtin_true_p),
    ("false?", builtin_false_p),
    ("symbol?", builtin_symbol_p),
    ("string?", builtin_string_p),
    ("keyword?", builtin_keyword_p),
    ("number?", builtin_number_p),
    ("integer?", builtin_integer_p),
    ("float?", builtin_float_p),
    ("fn?", builtin_fn_p),
    ("macro?", builtin_macro_p),
    ("list?", builtin_list_p),
    ("vector?", builtin_vector_p),
    ("map?", builtin_map_p),
    ("sequential?", builtin_sequential_p),
    ("atom?", builtin_atom_p),
    // Exceptions
    ("throw", builtin_throw),
    // Strings and symbols
    ("symbol", builtin_symbol),
    ("keyword", builtin_keyword),
    ("str", builtin_str),
    ("format-str", builtin_format_str),
    ("format", builtin_format),
    ("split", builtin_split),
    // I/O and process
    ("println", builtin_println),
    ("read-string", builtin_read_string),
    ("read-file", builtin_read_file),
    ("clear", builtin_clear),
    ("exit", builtin_exit),
    ("e", builtin_exit),
    // Lists and vectors
    ("list", builtin_list),
    ("vector", builtin_vector),
    ("vec", builtin_vec),
    ("cons", builtin_cons),
    ("concat", builtin_concat),
    ("nth", builtin_nth),
    ("first", builtin_first),
    ("rest", builtin_rest),
    ("empty?", builtin_empty_p),
    ("length", builtin_length),
    ("conj", builtin_conj),
    ("seq", builtin_seq),
    // Maps
    ("hash-map", builtin_hash_map),
    ("assoc", builtin_assoc),
    ("dissoc", builtin_dissoc),
    ("get", builtin_get),
    ("contains?", builtin_contains_p),
    ("keys", builtin_keys),
    ("vals", builtin_vals),
    // Higher order
    ("apply", builtin_apply),
    ("map", builtin_map),
    // Metadata
    ("with-meta", builtin_with_meta),
    ("meta", builtin_meta),
    // Atoms
    ("atom", builtin_atom),
    ("deref", builtin_deref),
    ("reset!", builtin_reset),
    ("swap!", builtin_swap),
];

/// Register every builtin into `env`, which should be a fresh root.
pub fn register_builtins(env: &Env) -> Result<()> {
    for &(name, func) in BUILTINS {
        env.define_native(name, func)?;
    }
    register_root_fns(env)?;
    debug!(count = BUILTINS.len() + 2, "registered builtins");
    Ok(())
}

/// `eval` and `eval-file` evaluate in the root environment they were
/// registered into.
fn register_root_fns(env: &Env) -> Result<()> {
    let root = env.root().downgrade();
    let eval_fn = make_native_fn("eval", move |args| {
        expect_args("eval", args, 1)?;
        eval(&args[0], &upgrade_root(&root)?)
    });
    env.define(Symbol::new("eval"), Form::function(eval_fn))?;

    let root = env.root().downgrade();
    let eval_file_fn = make_native_fn("eval-file", move |args| {
        expect_args("eval-file", args, 1)?;
        let path = text_arg("eval-file", &args[0])?;
        eval_file(path, &upgrade_root(&root)?)
    });
    env.define(Symbol::new("eval-file"), Form::function(eval_file_fn))?;
    Ok(())
}

fn upgrade_root(root: &WeakEnv) -> Result<Env> {
    root.upgrade()
        .ok_or_else(|| Error::EvalError("root environment no longer exists".into()))
}

/// Read every form in the file at `path` and evaluate it in `env`,
/// returning the value of the last one.
pub fn eval_file(path: &str, env: &Env) -> Result<Form> {
    let source = io::read_source(path)?;
    eval_source(&source, env)
}

/// Evaluate every form in `source`, returning the value of the last one.
pub fn eval_source(source: &str, env: &Env) -> Result<Form> {
    let mut parser = Parser::new(source)?;
    let mut result = Form::Nil;
    while let Some(form) = parser.parse()? {
        result = eval(&form, env)?;
    }
    Ok(result)
}

/// Helper trait to define native functions more easily.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: BuiltinFn) -> Result<()>;
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: BuiltinFn) -> Result<()> {
        let native = make_native_fn(name, func);
        self.define(Symbol::new(name), Form::function(native))
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

pub(crate) fn expect_args(name: &str, args: &[Form], n: usize) -> Result<()> {
    if args.len() == n {
        Ok(())
    } else {
        Err(Error::arity_named(name, n, args.len()))
    }
}

pub(crate) fn expect_at_least(name: &str, args: &[Form], n: usize) -> Result<()> {
    if args.len() >= n {
        Ok(())
    } else {
        Err(Error::arity_at_least(name, n, args.len()))
    }
}

/// A list or vector argument.
pub(crate) fn seq_arg<'a>(name: &str, form: &'a Form) -> Result<&'a Vector<Form>> {
    form.as_seq()
        .ok_or_else(|| Error::type_error_in(name, "list", form.type_name()))
}

/// A list or vector argument, with `null` read as the empty list.
pub(crate) fn seq_or_nil_arg(name: &str, form: &Form) -> Result<Vector<Form>> {
    match form {
        Form::Nil => Ok(Vector::new()),
        other => seq_arg(name, other).cloned(),
    }
}

pub(crate) fn text_arg<'a>(name: &str, form: &'a Form) -> Result<&'a str> {
    match form {
        Form::Text(s) => Ok(s),
        other => Err(Error::type_error_in(name, "string", other.type_name())),
    }
}
