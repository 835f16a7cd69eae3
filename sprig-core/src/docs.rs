// sprig-core - Documentation pages for man/help
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Documentation pages consulted by `man` and `help`.
//!
//! Pages are read from a JSON file of the form
//!
//! ```json
//! { "pages": [ { "name": "cons", "args": ["x", "lst"],
//!                "desc": "Prepend x to lst.", "returns": ["list", "A new list."] } ] }
//! ```
//!
//! A missing file is not an error: the interpreter simply has no pages.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

/// One documented function.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManPage {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub desc: String,
    /// Return type followed by a description of the returned value
    #[serde(default)]
    pub returns: Vec<String>,
}

/// All loaded documentation pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocStore {
    pages: Vec<ManPage>,
}

impl DocStore {
    /// Parse a store from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Load pages from `path`.
    ///
    /// Returns `None` when the file does not exist or cannot be parsed;
    /// a parse failure is logged, a missing file is not.
    pub fn load(path: &Path) -> Option<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no documentation file");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read documentation file");
                return None;
            }
        };
        match Self::from_json(&text) {
            Ok(store) => {
                debug!(path = %path.display(), pages = store.pages.len(), "loaded documentation");
                Some(store)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed documentation file");
                None
            }
        }
    }

    pub fn page(&self, name: &str) -> Option<&ManPage> {
        self.pages.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Render the page for `name`, or a note that none exists.
    pub fn describe(&self, name: &str) -> String {
        match self.page(name) {
            Some(page) => page.render(),
            None => format!("No man page for {}", name),
        }
    }
}

impl ManPage {
    fn render(&self) -> String {
        let ret_type = self.returns.first().map(String::as_str).unwrap_or("");
        let ret_desc = self.returns.get(1).map(String::as_str).unwrap_or("");
        format!(
            "Signature: (defun {} (function {} {}))\n\n{}\n\nReturns: {}",
            self.name,
            self.args.join(" "),
            ret_type,
            self.desc,
            ret_desc
        )
    }
}

/// Text printed by `(help)` with no argument.
pub const DEFAULT_HELP: &str = "\
This is a small Lisp interpreter. It evaluates expressions
such as (+ 1 2) or (define a 25).

A few built-ins:
(+ <a> <b> ...) - Add numbers of the same kind.
(list <values...>) - Build a list. (list) is the empty list.
(define <name> <value>) - Bind a name in the current scope.
(defmacro <name> <function>) - Bind a macro.
(let ((<name> <value>) ...) <body>) - Bind names visible in body.
(if <cond> <then> <else>) - Choose a branch. The else branch is required
    whenever the condition is false.
(lambda (<params...>) <body>) - Make a function. (lambda (a &rest more) ...)
    collects extra arguments into a list.

For details on one function, if a page exists, try (man <function-name>).

Types:
integer - e.g. 10, #x1F, 0x1f, #b101. Arbitrary precision.
float - e.g. 2.25. Never mixed with integers in arithmetic.
string - Characters in double quotes.
keyword - e.g. :name. Evaluates to itself.
list - e.g. (1 2 3). vector - e.g. [1 2 3]. map - e.g. {\"a\" 1 :b 2}.
symbol - A name, bound with define, let or lambda.

Constants:
#t - true
#f - false
null - no value";

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{ "pages": [
        { "name": "cons", "args": ["x", "lst"], "desc": "Prepend x to lst.",
          "returns": ["list", "A new list."] }
    ] }"#;

    #[test]
    fn test_from_json() {
        let store = DocStore::from_json(SAMPLE).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.page("cons").unwrap().args, vec!["x", "lst"]);
    }

    #[test]
    fn test_describe() {
        let store = DocStore::from_json(SAMPLE).unwrap();
        assert_eq!(
            store.describe("cons"),
            "Signature: (defun cons (function x lst list))\n\nPrepend x to lst.\n\nReturns: A new list."
        );
        assert_eq!(store.describe("car"), "No man page for car");
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(DocStore::load(Path::new("/nonexistent/sprig-docs.json")).is_none());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(DocStore::from_json("{ \"pages\": 3 }").is_err());
    }
}
