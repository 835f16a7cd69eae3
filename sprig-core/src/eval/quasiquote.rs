// sprig-core - Quasiquote expansion
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Quasiquote rewriting.
//!
//! A quasiquoted template is rewritten into ordinary code built from
//! `cons`, `concat`, `vec` and `quote`; evaluating that code rebuilds the
//! template with unquoted parts evaluated and spliced parts inlined.

use sprig_parser::{Form, Vector};

/// True for a two-element list `(name x)`. Vectors never match.
fn starts_with(form: &Form, name: &str) -> bool {
    match form {
        Form::List(items, _) => items.len() == 2 && form.is_call_to(name),
        _ => false,
    }
}

/// Rewrite a quasiquote template into code that builds it.
///
/// ```
/// use sprig_core::eval::quasiquote;
/// use sprig_parser::Parser;
///
/// let template = Parser::parse_str("(a ,b)").unwrap().unwrap();
/// assert_eq!(
///     quasiquote(&template).to_string(),
///     "(cons (quote a) (cons b ()))"
/// );
/// ```
pub fn quasiquote(form: &Form) -> Form {
    match form {
        Form::Vector(items, _) => Form::list([Form::symbol("vec"), quasiquote_loop(items)]),
        Form::List(items, _) if starts_with(form, "unquote") => items[1].clone(),
        Form::List(items, _) => quasiquote_loop(items),
        Form::Symbol(_) | Form::Map(_, _) => Form::list([Form::symbol("quote"), form.clone()]),
        other => other.clone(),
    }
}

/// Fold the elements right to left into nested `cons`/`concat` calls.
fn quasiquote_loop(items: &Vector<Form>) -> Form {
    items.iter().rev().fold(Form::empty_list(), |acc, elt| {
        if starts_with(elt, "unquote-splice") {
            let spliced = elt.as_seq().and_then(|s| s.get(1)).cloned().unwrap_or(Form::Nil);
            Form::list([Form::symbol("concat"), spliced, acc])
        } else {
            Form::list([Form::symbol("cons"), quasiquote(elt), acc])
        }
    })
}
