// sprig-parser - Keyword type
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Keywords are self-evaluating names written with a leading colon.
//!
//! A keyword is its own value variant rather than a tagged string, so
//! `(= :a "a")` is false and `string?` never reports a keyword.

use std::fmt;
use std::rc::Rc;

/// A keyword such as `:name`. The stored name excludes the colon.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword(Rc<str>);

impl Keyword {
    pub fn new(name: &str) -> Self {
        Keyword(Rc::from(name))
    }

    /// The name without the leading colon.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword(:{})", self.0)
    }
}
