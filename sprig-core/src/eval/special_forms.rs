// sprig-core - Special forms
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Special forms other than `try`.
//!
//! Each form receives the whole list (head included) and returns a
//! [`Tail`]: either a finished value or the next `(ast, env)` pair for the
//! evaluation loop.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use sprig_parser::{Form, Symbol, Vector};
use tracing::trace;

use super::apply::make_closure;
use super::macros::{is_macro_call, macroexpand};
use super::{Tail, eval};
use crate::docs::DEFAULT_HELP;
use crate::env::Env;
use crate::error::{Error, Result};

// ============================================================================
// Shape helpers
// ============================================================================

pub(crate) fn expect_len(items: &Vector<Form>, len: usize, form: &'static str) -> Result<()> {
    if items.len() == len {
        Ok(())
    } else {
        Err(Error::syntax(
            form,
            format!("expected {} arguments, got {}", len - 1, items.len() - 1),
        ))
    }
}

fn symbol_at<'a>(items: &'a Vector<Form>, index: usize, form: &'static str) -> Result<&'a Symbol> {
    match items.get(index) {
        Some(Form::Symbol(sym)) => Ok(sym),
        Some(other) => Err(Error::syntax(
            form,
            format!("expected a symbol, got {}", other.type_name()),
        )),
        None => Err(Error::syntax(form, "missing symbol")),
    }
}

/// The body starting at `start`; several forms become one `begin`.
fn body_from(items: &Vector<Form>, start: usize) -> Form {
    if items.len() == start + 1 {
        items[start].clone()
    } else {
        let mut body = items.skip(start);
        body.push_front(Form::symbol("begin"));
        Form::List(body, None)
    }
}

// ============================================================================
// Binding forms
// ============================================================================

/// `(define sym expr)`
pub(crate) fn eval_define(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    expect_len(items, 3, "define")?;
    let name = symbol_at(items, 1, "define")?;
    let value = eval(&items[2], env)?;
    env.define(name.clone(), value.clone())?;
    Ok(Tail::Done(value))
}

/// `(let ((a 1) (b 2)) body...)` or `(let (a 1 b 2) body...)`
///
/// Each binding is visible to the ones after it.
pub(crate) fn eval_let(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    if items.len() < 3 {
        return Err(Error::syntax("let", "expected bindings and a body"));
    }
    let bindings = items[1]
        .as_seq()
        .ok_or_else(|| Error::syntax("let", "bindings must be a list"))?;

    let child = env.child();
    for (name, expr) in binding_pairs(bindings)? {
        let value = eval(&expr, &child)?;
        child.define(name, value)?;
    }
    Ok(Tail::Eval(body_from(items, 2), child))
}

fn binding_pairs(bindings: &Vector<Form>) -> Result<Vec<(Symbol, Form)>> {
    let nested = matches!(bindings.front(), Some(Form::List(_, _) | Form::Vector(_, _)));
    let raw: Vec<(Form, Form)> = if nested {
        bindings
            .iter()
            .map(|pair| match pair.as_seq() {
                Some(p) if p.len() == 2 => Ok((p[0].clone(), p[1].clone())),
                _ => Err(Error::syntax("let", "each binding must be (name expr)")),
            })
            .collect::<Result<_>>()?
    } else {
        if bindings.len() % 2 != 0 {
            return Err(Error::syntax("let", "bindings must come in pairs"));
        }
        let flat: Vec<Form> = bindings.iter().cloned().collect();
        flat.chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    };

    raw.into_iter()
        .map(|(name, expr)| match name {
            Form::Symbol(sym) => Ok((sym, expr)),
            other => Err(Error::syntax(
                "let",
                format!("binding name must be a symbol, got {}", other.type_name()),
            )),
        })
        .collect()
}

/// `(lambda (params...) body...)`
pub(crate) fn eval_lambda(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    if items.len() < 3 {
        return Err(Error::syntax("lambda", "expected parameters and a body"));
    }
    let params = parse_params(&items[1])?;
    let closure = make_closure(params, body_from(items, 2), env);
    Ok(Tail::Done(Form::function(closure)))
}

fn parse_params(form: &Form) -> Result<Vec<Symbol>> {
    let list = form
        .as_seq()
        .ok_or_else(|| Error::syntax("lambda", "parameters must be a list"))?;
    let params = list
        .iter()
        .map(|p| match p {
            Form::Symbol(sym) => Ok(sym.clone()),
            other => Err(Error::syntax(
                "lambda",
                format!("parameter must be a symbol, got {}", other.type_name()),
            )),
        })
        .collect::<Result<Vec<_>>>()?;
    if let Some(pos) = params.iter().position(Symbol::is_rest_marker)
        && pos + 1 >= params.len()
    {
        return Err(Error::syntax("lambda", "&rest must be followed by a name"));
    }
    Ok(params)
}

/// `(defmacro sym expr)`: bind the function `expr` evaluates to as a macro.
pub(crate) fn eval_defmacro(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    expect_len(items, 3, "defmacro")?;
    let name = symbol_at(items, 1, "defmacro")?;
    let mac = match eval(&items[2], env)? {
        Form::Function(f, meta) | Form::Macro(f, meta) => Form::Macro(f, meta),
        other => {
            return Err(Error::type_error_in(
                "defmacro",
                "function",
                other.type_name(),
            ));
        }
    };
    env.define(name.clone(), mac.clone())?;
    Ok(Tail::Done(mac))
}

/// `(set! sym expr)`
///
/// The value of `expr` is evaluated a second time and the result stored,
/// while the first value is returned.
pub(crate) fn eval_set(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    expect_len(items, 3, "set!")?;
    let name = symbol_at(items, 1, "set!")?;
    let value = eval(&items[2], env)?;
    if !env.contains(name) {
        return Err(Error::UnboundSymbol(name.clone()));
    }
    let stored = eval(&value, env)?;
    env.set(name, stored)?;
    Ok(Tail::Done(value))
}

// ============================================================================
// Control forms
// ============================================================================

/// `(quote x)`
pub(crate) fn eval_quote(items: &Vector<Form>) -> Result<Tail> {
    expect_len(items, 2, "quote")?;
    Ok(Tail::Done(items[1].clone()))
}

/// `(begin forms...)`
pub(crate) fn eval_begin(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    let Some(last) = items.back().filter(|_| items.len() > 1) else {
        return Ok(Tail::Done(Form::Nil));
    };
    for form in items.iter().skip(1).take(items.len() - 2) {
        eval(form, env)?;
    }
    Ok(Tail::Eval(last.clone(), env.clone()))
}

/// `(if cond then else)`; a false condition with no else is an error.
pub(crate) fn eval_if(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    if !(3..=4).contains(&items.len()) {
        return Err(Error::syntax("if", "expected a condition and one or two branches"));
    }
    if eval(&items[1], env)?.is_truthy() {
        Ok(Tail::Eval(items[2].clone(), env.clone()))
    } else {
        match items.get(3) {
            Some(alt) => Ok(Tail::Eval(alt.clone(), env.clone())),
            None => Err(Error::MissingElseBranch),
        }
    }
}

/// `(and forms...)`: `#f` on the first `#f`, otherwise `#t`.
pub(crate) fn eval_and(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    for form in items.iter().skip(1) {
        if matches!(eval(form, env)?, Form::False) {
            return Ok(Tail::Done(Form::False));
        }
    }
    Ok(Tail::Done(Form::True))
}

/// `(macro-expand form)`: the full expansion of a macro call, unevaluated.
pub(crate) fn eval_macro_expand(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    expect_len(items, 2, "macro-expand")?;
    let form = &items[1];
    if !is_macro_call(form, env) {
        return Err(Error::syntax(
            "macro-expand",
            format!("{} is not a macro call", form),
        ));
    }
    Ok(Tail::Done(macroexpand(form.clone(), env)?))
}

// ============================================================================
// Counted loops
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopKind {
    Dotimes,
    Countdown,
}

impl LoopKind {
    fn name(self) -> &'static str {
        match self {
            LoopKind::Dotimes => "dotimes",
            LoopKind::Countdown => "countdown",
        }
    }
}

/// `(dotimes (var count) body...)` and `(countdown (var count) body...)`
///
/// The counter lives in the current frame for the duration of the loop
/// and is removed afterwards, whether or not the body failed.
pub(crate) fn eval_counted_loop(items: &Vector<Form>, env: &Env, kind: LoopKind) -> Result<Tail> {
    let invalid = || Error::InvalidLoopForm { form: kind.name() };
    if items.len() < 3 {
        return Err(invalid());
    }
    let header = items[1]
        .as_seq()
        .filter(|h| h.len() == 2)
        .ok_or_else(invalid)?;
    let var = header[0].as_symbol().ok_or_else(invalid)?.clone();
    let count = match eval(&header[1], env)? {
        Form::Integer(n) => n,
        _ => return Err(invalid()),
    };
    // countdown runs while its counter is below zero and steps down, so a
    // negative count would never finish
    if kind == LoopKind::Countdown && count.is_negative() {
        return Err(invalid());
    }

    let body = body_from(items, 2);
    let start = match kind {
        LoopKind::Dotimes => BigInt::zero(),
        LoopKind::Countdown => count.clone(),
    };
    env.define(var.clone(), Form::Integer(start.clone()))?;

    let result = run_loop(&var, start, &count, &body, env, kind);
    env.remove_local(&var);
    result.map(Tail::Done)
}

fn run_loop(
    var: &Symbol,
    mut i: BigInt,
    count: &BigInt,
    body: &Form,
    env: &Env,
    kind: LoopKind,
) -> Result<Form> {
    let mut last = Form::Nil;
    match kind {
        LoopKind::Dotimes => {
            while &i < count {
                env.set_local(var, Form::Integer(i.clone()));
                last = eval(body, env)?;
                i += BigInt::one();
            }
        }
        LoopKind::Countdown => {
            while i.is_negative() {
                env.set_local(var, Form::Integer(i.clone()));
                last = eval(body, env)?;
                i -= BigInt::one();
            }
        }
    }
    trace!(form = kind.name(), "loop finished");
    Ok(last)
}

// ============================================================================
// Documentation
// ============================================================================

/// `(man sym)` / `(help sym)`, or `(help)` for the overview.
pub(crate) fn eval_man(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    match items.get(1) {
        None => println!("{}", DEFAULT_HELP),
        Some(Form::Symbol(name)) => {
            if let Some(text) = man_text(name, env) {
                println!("{}", text);
            }
        }
        Some(other) => {
            return Err(Error::syntax(
                "man",
                format!("expected a symbol, got {}", other.type_name()),
            ));
        }
    }
    Ok(Tail::Done(Form::Nil))
}

/// What `man` prints for `name`, or `None` when no pages are loaded.
pub fn man_text(name: &Symbol, env: &Env) -> Option<String> {
    if !env.contains(name) {
        return Some(format!("Function \"{}\" does not exist.", name));
    }
    env.docs().map(|docs| docs.describe(name.name()))
}
