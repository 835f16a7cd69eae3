// sprig-core - Exception handling
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! The `try`/`catch` special form. `throw` is an ordinary primitive.

use sprig_parser::{Form, Symbol, Vector};
use tracing::debug;

use super::{Tail, eval};
use crate::env::Env;
use crate::error::{Error, Result};

/// (try protected (catch e handler))
///
/// On failure the handler runs in a child frame with `e` bound to the
/// error's payload: the thrown value for `throw`, otherwise the message
/// as a string. Without a catch clause the failure propagates. A malformed
/// catch clause is only reported when the protected form fails.
pub(crate) fn eval_try(items: &Vector<Form>, env: &Env) -> Result<Tail> {
    if !(2..=3).contains(&items.len()) {
        return Err(Error::syntax(
            "try",
            "expected a protected form and an optional catch clause",
        ));
    }

    match eval(&items[1], env) {
        Ok(value) => Ok(Tail::Done(value)),
        // The clause is only read once something has failed
        Err(err) => match items.get(2).map(parse_catch).transpose()? {
            Some((binding, handler)) => {
                debug!(error = %err, "caught error");
                let frame = env.child();
                frame.define(binding, err.payload())?;
                Ok(Tail::Eval(handler, frame))
            }
            None => Err(err),
        },
    }
}

/// (catch binding handler)
fn parse_catch(clause: &Form) -> Result<(Symbol, Form)> {
    let Form::List(items, _) = clause else {
        return Err(Error::syntax("try", "expected a (catch e handler) clause"));
    };
    if !clause.is_call_to("catch") || items.len() != 3 {
        return Err(Error::syntax("try", "expected a (catch e handler) clause"));
    }
    match &items[1] {
        Form::Symbol(binding) => Ok((binding.clone(), items[2].clone())),
        other => Err(Error::syntax(
            "try",
            format!("catch binding must be a symbol, got {}", other.type_name()),
        )),
    }
}
