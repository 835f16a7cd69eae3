// sprig-core - Evaluator and runtime for the sprig Lisp
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! # sprig-core
//!
//! Evaluator and runtime for sprig, a small Lisp with closures, macros
//! and quasiquotation. Provides a tree-walking interpreter for [`Form`]
//! values with proper tail calls.
//!
//! A complete root environment is built in three steps:
//!
//! ```
//! use sprig_core::{Env, eval_source, init_prelude, register_builtins};
//! use sprig_parser::Form;
//!
//! let env = Env::new();
//! register_builtins(&env).unwrap();
//! init_prelude(&env).unwrap();
//! assert_eq!(eval_source("(inc 41)", &env).unwrap(), Form::int(42));
//! ```

pub mod builtins;
pub mod docs;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::{eval_file, eval_source, register_builtins};
pub use docs::{DocStore, ManPage};
pub use env::{Env, WeakEnv, live_frames};
pub use error::{AritySpec, Error, Result};
pub use eval::{
    apply, eval, get_eval_depth, get_max_eval_depth, macroexpand, make_native_fn, man_text,
    quasiquote, set_max_eval_depth,
};

// Re-export parser types for convenience
pub use sprig_parser::{Form, Keyword, ParseError, Parser, Symbol};

use tracing::debug;

/// Native stack a thread needs for the default evaluation depth limit.
///
/// Each nested evaluation uses several kilobytes of native stack, more in
/// debug builds, so the default limit is only reached before the stack
/// runs out on a thread at least this large. Callers evaluating on a
/// smaller stack (the main thread, test threads) should lower the limit
/// with [`set_max_eval_depth`] first.
pub const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Prelude source, written in sprig itself.
pub const PRELUDE: &str = include_str!("../../sprig-std/core.lisp");

/// Evaluate the embedded prelude into `env`. Call this after
/// [`register_builtins`].
pub fn init_prelude(env: &Env) -> Result<()> {
    let mut parser = Parser::new(PRELUDE)?;
    let mut count = 0usize;
    while let Some(form) = parser.parse()? {
        eval::eval(&form, env)?;
        count += 1;
    }
    debug!(forms = count, "loaded prelude");
    Ok(())
}

/// A root environment with builtins, and the prelude when `prelude` is set.
pub fn standard_env(prelude: bool) -> Result<Env> {
    let env = Env::new();
    register_builtins(&env)?;
    if prelude {
        init_prelude(&env)?;
    }
    Ok(env)
}
