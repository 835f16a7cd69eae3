// sprig-core - Macro expansion
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Macro expansion.
//!
//! A form is a macro call when it is a non-empty list whose head symbol is
//! bound to a macro. Expansion applies the macro to the unevaluated tail of
//! the form and repeats until the result is no longer a macro call.

use sprig_parser::{Form, Function};
use tracing::trace;

use super::apply::apply_function;
use crate::env::Env;
use crate::error::Result;

/// The macro a form calls, together with its unevaluated arguments.
fn macro_call(form: &Form, env: &Env) -> Option<(Function, Vec<Form>)> {
    let Form::List(items, _) = form else {
        return None;
    };
    let Some(Form::Symbol(head)) = items.front() else {
        return None;
    };
    match env.get(head) {
        Some(Form::Macro(mac, _)) => Some((mac, items.iter().skip(1).cloned().collect())),
        _ => None,
    }
}

/// Check whether `form` is a macro call in `env`.
pub fn is_macro_call(form: &Form, env: &Env) -> bool {
    macro_call(form, env).is_some()
}

/// Expand `form` until it is no longer a macro call.
pub fn macroexpand(mut form: Form, env: &Env) -> Result<Form> {
    while let Some((mac, args)) = macro_call(&form, env) {
        trace!(form = %form, "expanding macro");
        form = apply_function(&mac, &args)?;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::eval;
    use sprig_parser::Parser;

    fn read(s: &str) -> Form {
        Parser::parse_str(s).unwrap().unwrap()
    }

    #[test]
    fn test_expands_to_fixed_point() {
        let env = Env::new();
        // (twice x) => (once x) => (quote x)
        eval(&read("(defmacro once (lambda (x) (list (quote quote) x)))"), &env).unwrap();
        eval(&read("(defmacro twice (lambda (x) (list (quote once) x)))"), &env).unwrap();
        let expanded = macroexpand(read("(twice (+ 1 2))"), &env).unwrap();
        assert_eq!(expanded.to_string(), "(quote (+ 1 2))");
    }

    #[test]
    fn test_non_macro_forms_are_untouched() {
        let env = Env::new();
        eval(&read("(define f (lambda (x) x))"), &env).unwrap();
        assert!(!is_macro_call(&read("(f 1)"), &env));
        assert!(!is_macro_call(&read("(undefined 1)"), &env));
        assert!(!is_macro_call(&read("()"), &env));
        assert!(!is_macro_call(&read("[once 1]"), &env));
        assert_eq!(macroexpand(read("(f 1)"), &env).unwrap().to_string(), "(f 1)");
    }
}
