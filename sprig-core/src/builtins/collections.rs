// sprig-core - Map built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Maps: hash-map, assoc, dissoc, get, contains?, keys, vals
//!
//! Keys are strings or keywords. Every operation that changes a map
//! returns a new one.

use sprig_parser::{Form, MapKey, Meta, OrdMap};

use crate::error::{Error, Result};

use super::{expect_args, expect_at_least};

fn key_arg(name: &str, form: &Form) -> Result<MapKey> {
    MapKey::from_form(form)
        .ok_or_else(|| Error::type_error_in(name, "string or keyword", form.type_name()))
}

fn map_arg<'a>(name: &str, form: &'a Form) -> Result<(&'a OrdMap<MapKey, Form>, &'a Meta)> {
    match form {
        Form::Map(entries, meta) => Ok((entries, meta)),
        other => Err(Error::type_error_in(name, "map", other.type_name())),
    }
}

/// Insert alternating keys and values from `kvs`.
fn insert_pairs(
    name: &str,
    mut entries: OrdMap<MapKey, Form>,
    kvs: &[Form],
) -> Result<OrdMap<MapKey, Form>> {
    if kvs.len() % 2 != 0 {
        return Err(Error::EvalError(format!(
            "{}: expected an even number of keys and values, got {}",
            name,
            kvs.len()
        )));
    }
    for pair in kvs.chunks(2) {
        entries.insert(key_arg(name, &pair[0])?, pair[1].clone());
    }
    Ok(entries)
}

/// (hash-map k v ...)
pub(crate) fn builtin_hash_map(args: &[Form]) -> Result<Form> {
    Ok(Form::map(insert_pairs("hash-map", OrdMap::new(), args)?))
}

/// (assoc m k v ...)
pub(crate) fn builtin_assoc(args: &[Form]) -> Result<Form> {
    expect_at_least("assoc", args, 1)?;
    let (entries, meta) = map_arg("assoc", &args[0])?;
    let entries = insert_pairs("assoc", entries.clone(), &args[1..])?;
    Ok(Form::Map(entries, meta.clone()))
}

/// (dissoc m k ...)
pub(crate) fn builtin_dissoc(args: &[Form]) -> Result<Form> {
    expect_at_least("dissoc", args, 1)?;
    let (entries, meta) = map_arg("dissoc", &args[0])?;
    let mut entries = entries.clone();
    for key in &args[1..] {
        entries.remove(&key_arg("dissoc", key)?);
    }
    Ok(Form::Map(entries, meta.clone()))
}

/// (get m k): the value under `k`, or `null` when absent or when `m` is
/// `null`.
pub(crate) fn builtin_get(args: &[Form]) -> Result<Form> {
    expect_args("get", args, 2)?;
    if args[0].is_nil() {
        return Ok(Form::Nil);
    }
    let (entries, _) = map_arg("get", &args[0])?;
    let key = key_arg("get", &args[1])?;
    Ok(entries.get(&key).cloned().unwrap_or(Form::Nil))
}

/// (contains? m k)
pub(crate) fn builtin_contains_p(args: &[Form]) -> Result<Form> {
    expect_args("contains?", args, 2)?;
    let (entries, _) = map_arg("contains?", &args[0])?;
    let key = key_arg("contains?", &args[1])?;
    Ok(Form::bool(entries.contains_key(&key)))
}

pub(crate) fn builtin_keys(args: &[Form]) -> Result<Form> {
    expect_args("keys", args, 1)?;
    let (entries, _) = map_arg("keys", &args[0])?;
    Ok(Form::list(entries.keys().map(MapKey::to_form)))
}

pub(crate) fn builtin_vals(args: &[Form]) -> Result<Form> {
    expect_args("vals", args, 1)?;
    let (entries, _) = map_arg("vals", &args[0])?;
    Ok(Form::list(entries.values().cloned()))
}
