// sprig-core - Function application
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Function application outside the evaluator's tail position.
//!
//! Primitives such as `apply`, `map` and `swap!`, and the macro expander,
//! call functions through here. A closure applied this way evaluates its
//! body to completion with an ordinary nested `eval`.

use std::any::Any;
use std::rc::Rc;

use sprig_parser::{Closure, Form, Function, Primitive};

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[Form]) -> Result<Form>;

/// Apply a callable value to already evaluated arguments.
pub fn apply(func: &Form, args: &[Form]) -> Result<Form> {
    match func {
        Form::Function(f, _) | Form::Macro(f, _) => apply_function(f, args),
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// Apply a function to arguments.
pub fn apply_function(func: &Function, args: &[Form]) -> Result<Form> {
    match func {
        Function::Primitive(p) => apply_primitive(p, args),
        Function::Closure(c) => {
            let env = closure_frame(c, args)?;
            eval(&c.body, &env)
        }
    }
}

/// Build the frame a closure body runs in.
pub(crate) fn closure_frame(closure: &Closure, args: &[Form]) -> Result<Env> {
    let captured = closure
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::EvalError("closure captured an invalid environment".into()))?;
    captured.with_bindings(&closure.params, args)
}

/// Apply a native function.
pub(crate) fn apply_primitive(func: &Primitive, args: &[Form]) -> Result<Form> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::EvalError(format!("builtin {} has an invalid type", func.name)))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[Form]) -> Result<Form> + 'static,
) -> Function {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    Function::primitive(name, func_any)
}

/// Create a closure capturing `env`.
pub fn make_closure(params: Vec<sprig_parser::Symbol>, body: Form, env: &Env) -> Function {
    let env_any: Rc<dyn Any> = Rc::new(env.clone());
    Function::closure(params, body, env_any)
}
