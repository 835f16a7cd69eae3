// sprig-core - Error types for the sprig evaluator
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Error types for sprig evaluation.

use std::fmt;

use sprig_parser::{Form, ParseError, Symbol, pr_str};
use thiserror::Error;

/// Result type for sprig evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
///
/// Every variant can be caught by `try`. A `Thrown` error hands its payload
/// to the catch clause unchanged; any other error hands over its message.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed token or unbalanced form
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Lookup or mutation of a name bound nowhere in the chain
    #[error("Symbol '{0}' was looked up in the environment, but it does not exist.")]
    UnboundSymbol(Symbol),
    /// Second definition of a name in one frame
    #[error("Symbol '{0}' already exists in the environment.")]
    DuplicateDefinition(Symbol),
    /// Operation applied to the wrong variant
    #[error("{}", type_mismatch_message(.context, .expected, .got))]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    #[error("Index {index} out of range for sequence of length {length}")]
    IndexOutOfRange { index: i64, length: usize },
    #[error("Typecheck failed. For function call head, got {0} when expecting a function.")]
    NotCallable(String),
    #[error("'if' condition was false and no else branch was given")]
    MissingElseBranch,
    #[error("{form}: invalid symbol or iterator used")]
    InvalidLoopForm { form: &'static str },
    #[error("{}", arity_message(.name, .expected, .got))]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Special form used with the wrong shape
    #[error("Invalid '{form}' syntax: {message}")]
    InvalidSyntax { form: &'static str, message: String },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    EvalError(String),
    /// User-thrown value (via throw)
    #[error("{}", pr_str(.0, false))]
    Thrown(Form),
}

/// Expected arity of a call.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

fn type_mismatch_message(context: &Option<String>, expected: &str, got: &str) -> String {
    match context {
        Some(ctx) => format!("{}: expected {}, got {}", ctx, expected, got),
        None => format!("Type error: expected {}, got {}", expected, got),
    }
}

fn arity_message(name: &Option<String>, expected: &AritySpec, got: &usize) -> String {
    match name {
        Some(name) => format!(
            "Wrong number of arguments to '{}': expected {}, got {}",
            name, expected, got
        ),
        None => format!(
            "Wrong number of arguments: expected {}, got {}",
            expected, got
        ),
    }
}

impl Error {
    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for a bounded range with function name.
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeMismatch {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// The value a `catch` clause binds for this error.
    pub fn payload(&self) -> Form {
        match self {
            Error::Thrown(value) => value.clone(),
            other => Form::text(other.to_string()),
        }
    }
}
