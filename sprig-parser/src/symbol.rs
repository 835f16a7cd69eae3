// sprig-parser - Symbol type
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Symbols name bindings in an environment.

use std::fmt;
use std::rc::Rc;

/// A bare identifier such as `x`, `set!` or `&rest`.
///
/// Two symbols are equal when their names are equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// The marker that binds the remaining arguments of a call as a list.
    pub const REST_MARKER: &'static str = "&rest";

    pub fn new(name: &str) -> Self {
        Symbol(Rc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True for the `&rest` parameter marker.
    pub fn is_rest_marker(&self) -> bool {
        self.name() == Self::REST_MARKER
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}
