// sprig-core - Evaluator for sprig expressions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! The evaluator.
//!
//! [`eval`] runs an explicit `(ast, env)` loop. Special forms in tail
//! position (`let`, `begin`, `if`, `quasiquote`, the `catch` handler) and
//! calls to closures replace the loop state instead of recursing, so a
//! closure that calls itself in tail position runs in constant native
//! stack. Everything else (argument evaluation, conditions, primitives
//! calling back into closures) recurses and counts against the depth
//! limit.

mod apply;
mod exceptions;
mod macros;
mod quasiquote;
mod special_forms;

use std::cell::Cell;

use sprig_parser::{Form, Function, OrdMap, Symbol, Vector};
use tracing::trace;

use crate::env::Env;
use crate::error::{Error, Result};

pub use apply::{NativeFnImpl, apply, apply_function, make_closure, make_native_fn};
pub use macros::{is_macro_call, macroexpand};
pub use quasiquote::quasiquote;
pub use special_forms::man_text;

use apply::{apply_primitive, closure_frame};
use exceptions::eval_try;
use special_forms::{
    LoopKind, eval_and, eval_begin, eval_counted_loop, eval_define, eval_defmacro, eval_if,
    eval_lambda, eval_let, eval_macro_expand, eval_man, eval_quote, eval_set, expect_len,
};

/// Default maximum nesting of non-tail evaluations. Sized for a thread
/// with [`crate::INTERPRETER_STACK_SIZE`] of stack.
const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum nesting of non-tail evaluations, returning the old limit.
///
/// The limit only turns runaway recursion into an error if the native
/// stack outlasts it; on a small stack use a proportionally small limit.
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval nesting.
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval nesting.
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard to manage eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            (current + 1, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::EvalError(format!(
                "Stack overflow: maximum recursion depth ({}) exceeded",
                max
            )))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// What a special form hands back to the evaluation loop.
pub(crate) enum Tail {
    /// Evaluation is finished with this value.
    Done(Form),
    /// Continue the loop with this form in this environment.
    Eval(Form, Env),
}

/// Evaluate a form in an environment.
pub fn eval(form: &Form, env: &Env) -> Result<Form> {
    let _guard = EvalDepthGuard::new()?;

    let mut ast = form.clone();
    let mut env = env.clone();

    loop {
        if !matches!(ast, Form::List(_, _)) {
            return eval_ast(&ast, &env);
        }

        ast = macroexpand(ast, &env)?;
        let items = match &ast {
            Form::List(items, _) => items.clone(),
            _ => return eval_ast(&ast, &env),
        };
        if items.is_empty() {
            return Ok(ast);
        }

        let step = match &items[0] {
            Form::Symbol(head) => eval_special_or_apply(head, &items, &env)?,
            _ => eval_application(&items, &env)?,
        };

        match step {
            Tail::Done(value) => return Ok(value),
            Tail::Eval(next, next_env) => {
                ast = next;
                env = next_env;
            }
        }
    }
}

/// Evaluate a form that is not a list.
fn eval_ast(ast: &Form, env: &Env) -> Result<Form> {
    match ast {
        Form::Symbol(sym) => env.lookup(sym),
        Form::List(items, meta) => Ok(Form::List(eval_each(items, env)?, meta.clone())),
        Form::Vector(items, meta) => Ok(Form::Vector(eval_each(items, env)?, meta.clone())),
        Form::Map(entries, meta) => {
            let evaluated = entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), eval(v, env)?)))
                .collect::<Result<OrdMap<_, _>>>()?;
            Ok(Form::Map(evaluated, meta.clone()))
        }
        other => Ok(other.clone()),
    }
}

fn eval_each(items: &Vector<Form>, env: &Env) -> Result<Vector<Form>> {
    items.iter().map(|item| eval(item, env)).collect()
}

fn eval_special_or_apply(head: &Symbol, items: &Vector<Form>, env: &Env) -> Result<Tail> {
    match head.name() {
        "define" => eval_define(items, env),
        "let" => eval_let(items, env),
        "begin" => eval_begin(items, env),
        "if" => eval_if(items, env),
        "lambda" => eval_lambda(items, env),
        "quote" => eval_quote(items),
        "quasiquote" => {
            expect_len(items, 2, "quasiquote")?;
            Ok(Tail::Eval(quasiquote(&items[1]), env.clone()))
        }
        "quasiquote-expand" => {
            expect_len(items, 2, "quasiquote-expand")?;
            Ok(Tail::Done(quasiquote(&items[1])))
        }
        "defmacro" => eval_defmacro(items, env),
        "macro-expand" => eval_macro_expand(items, env),
        "dotimes" => eval_counted_loop(items, env, LoopKind::Dotimes),
        "countdown" => eval_counted_loop(items, env, LoopKind::Countdown),
        "and" => eval_and(items, env),
        "set!" => eval_set(items, env),
        "try" => eval_try(items, env),
        "man" | "help" => eval_man(items, env),
        _ => eval_application(items, env),
    }
}

/// Evaluate every element, then apply the head to the rest.
///
/// A closure continues the loop with its body in a fresh frame; a
/// primitive runs to completion.
fn eval_application(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    let evaluated = items
        .iter()
        .map(|item| eval(item, env))
        .collect::<Result<Vec<_>>>()?;
    let Some((func, args)) = evaluated.split_first() else {
        return Ok(Tail::Done(Form::empty_list()));
    };

    match func {
        Form::Function(Function::Closure(closure), _)
        | Form::Macro(Function::Closure(closure), _) => {
            trace!(args = args.len(), "tail call into closure");
            let frame = closure_frame(closure, args)?;
            Ok(Tail::Eval(closure.body.clone(), frame))
        }
        Form::Function(Function::Primitive(prim), _)
        | Form::Macro(Function::Primitive(prim), _) => apply_primitive(prim, args).map(Tail::Done),
        other => Err(Error::NotCallable(other.to_string())),
    }
}
