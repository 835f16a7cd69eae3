// sprig-parser - Printer for sprig values
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Render forms back to text.
//!
//! Readable output (the REPL echo, `format-str`) quotes and escapes strings
//! so it can be read back. Plain output (`str`, `println`) writes strings
//! raw.

use std::fmt::{self, Write};

use im::Vector;

use crate::value::{Form, Function, MapKey};

/// Render `form`, quoting strings when `readably` is set.
pub fn pr_str(form: &Form, readably: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_form(&mut out, form, readably);
    out
}

/// Render each form and join them with `sep`.
pub fn join(forms: &[Form], sep: &str, readably: bool) -> String {
    forms
        .iter()
        .map(|f| pr_str(f, readably))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Quote and escape a string the way the reader expects it.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Format a float so it always reads back as a float.
pub fn format_float(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

fn write_form<W: Write>(out: &mut W, form: &Form, readably: bool) -> fmt::Result {
    match form {
        Form::Nil => out.write_str("null"),
        Form::True => out.write_str("#t"),
        Form::False => out.write_str("#f"),
        Form::Symbol(s) => write!(out, "{}", s),
        Form::Integer(n) => write!(out, "{}", n),
        Form::Float(n) => out.write_str(&format_float(*n)),
        Form::Text(s) if readably => out.write_str(&escape_str(s)),
        Form::Text(s) => out.write_str(s),
        Form::Keyword(k) => write!(out, "{}", k),
        Form::List(items, _) => write_seq(out, items, "(", ")", readably),
        Form::Vector(items, _) => write_seq(out, items, "[", "]", readably),
        Form::Map(entries, _) => {
            out.write_char('{')?;
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    out.write_char(' ')?;
                }
                match k {
                    MapKey::Text(s) if readably => out.write_str(&escape_str(s))?,
                    MapKey::Text(s) => out.write_str(s)?,
                    MapKey::Keyword(kw) => write!(out, "{}", kw)?,
                }
                out.write_char(' ')?;
                write_form(out, v, readably)?;
            }
            out.write_char('}')
        }
        Form::Atom(cell) => {
            out.write_str("(atom ")?;
            write_form(out, &cell.get(), readably)?;
            out.write_char(')')
        }
        Form::Function(f, _) => write_function(out, f, "function", readably),
        Form::Macro(f, _) => write_function(out, f, "macro", readably),
    }
}

fn write_seq<W: Write>(
    out: &mut W,
    items: &Vector<Form>,
    open: &str,
    close: &str,
    readably: bool,
) -> fmt::Result {
    out.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write_form(out, item, readably)?;
    }
    out.write_str(close)
}

fn write_function<W: Write>(out: &mut W, f: &Function, kind: &str, readably: bool) -> fmt::Result {
    match f {
        Function::Primitive(p) => write!(out, "#<builtin {}>", p.name),
        Function::Closure(c) => {
            write!(out, "#<{} (", kind)?;
            for (i, p) in c.params.iter().enumerate() {
                if i > 0 {
                    out.write_char(' ')?;
                }
                write!(out, "{}", p)?;
            }
            out.write_str(") ")?;
            write_form(out, &c.body, readably)?;
            out.write_char('>')
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_form(f, self, true)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_form(f, self, true)
    }
}
