// sprig-core - String built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Strings and names: symbol, keyword, str, format-str, format, split

use std::fmt::Write as _;

use sprig_parser::printer::{format_float, join, pr_str};
use sprig_parser::{Form, Keyword, Symbol};

use crate::error::{Error, Result};

use super::{expect_args, expect_at_least, text_arg};

/// (symbol "name")
pub(crate) fn builtin_symbol(args: &[Form]) -> Result<Form> {
    expect_args("symbol", args, 1)?;
    Ok(Form::Symbol(Symbol::new(text_arg("symbol", &args[0])?)))
}

/// (keyword "name"); a keyword argument is returned as is.
pub(crate) fn builtin_keyword(args: &[Form]) -> Result<Form> {
    expect_args("keyword", args, 1)?;
    match &args[0] {
        Form::Keyword(_) => Ok(args[0].clone()),
        Form::Text(s) => Ok(Form::Keyword(Keyword::new(s))),
        other => Err(Error::type_error_in("keyword", "string", other.type_name())),
    }
}

/// (str xs...): plain renderings concatenated.
pub(crate) fn builtin_str(args: &[Form]) -> Result<Form> {
    Ok(Form::text(join(args, "", false)))
}

/// (format-str xs...): readable renderings joined by spaces.
pub(crate) fn builtin_format_str(args: &[Form]) -> Result<Form> {
    Ok(Form::text(join(args, " ", true)))
}

/// (format template args...): print the expanded template.
pub(crate) fn builtin_format(args: &[Form]) -> Result<Form> {
    expect_at_least("format", args, 1)?;
    let template = text_arg("format", &args[0])?;
    print!("{}", format_directives(template, &args[1..])?);
    Ok(Form::Nil)
}

/// Expand `~` directives in `template`, consuming `args` in order.
///
/// | Directive | Output |
/// |-----------|--------|
/// | `~~` | a literal `~` |
/// | `~%` | newline |
/// | `~t` | tab |
/// | `~s` | a string argument, unquoted |
/// | `~d` | an integer argument in decimal |
/// | `~b` | an integer argument as `#b...` |
/// | `~x` | an integer argument as `#x...` |
/// | `~f` | a float argument |
///
/// Directive letters are case-insensitive.
pub fn format_directives(template: &str, args: &[Form]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        let Some(directive) = chars.next() else {
            return Err(Error::EvalError(
                "format: template ends in the middle of a directive".into(),
            ));
        };
        let lower = directive.to_ascii_lowercase();
        match lower {
            '~' => out.push('~'),
            '%' => out.push('\n'),
            't' => out.push('\t'),
            's' | 'd' | 'b' | 'x' | 'f' => {
                let arg = args.next().ok_or_else(|| {
                    Error::EvalError(format!("format: no argument left for ~{}", directive))
                })?;
                write_directive(&mut out, lower, arg)?;
            }
            _ => {
                return Err(Error::EvalError(format!(
                    "format: invalid format directive ~{}",
                    directive
                )));
            }
        }
    }
    Ok(out)
}

fn write_directive(out: &mut String, directive: char, arg: &Form) -> Result<()> {
    // Writing into a String never fails
    let _ = match (directive, arg) {
        ('s', Form::Text(s)) => write!(out, "{}", s),
        ('s', Form::Keyword(_) | Form::Symbol(_)) => write!(out, "{}", pr_str(arg, false)),
        ('d', Form::Integer(n)) => write!(out, "{}", n),
        ('b', Form::Integer(n)) => write!(out, "#b{}", n.to_str_radix(2)),
        ('x', Form::Integer(n)) => write!(out, "#x{}", n.to_str_radix(16)),
        ('f', Form::Float(n)) => write!(out, "{}", format_float(*n)),
        ('s', other) => return Err(Error::type_error_in("format ~s", "string", other.type_name())),
        ('f', other) => return Err(Error::type_error_in("format ~f", "float", other.type_name())),
        (_, other) => {
            return Err(Error::type_error_in(
                format!("format ~{}", directive),
                "integer",
                other.type_name(),
            ));
        }
    };
    Ok(())
}

/// (split text delimiter): pieces of `text` around the first character of
/// `delimiter`.
pub(crate) fn builtin_split(args: &[Form]) -> Result<Form> {
    expect_args("split", args, 2)?;
    let text = text_arg("split", &args[0])?;
    let delimiter = text_arg("split", &args[1])?;
    let Some(sep) = delimiter.chars().next() else {
        return Err(Error::EvalError("split: delimiter must not be empty".into()));
    };
    Ok(Form::list(text.split(sep).map(Form::text)))
}
