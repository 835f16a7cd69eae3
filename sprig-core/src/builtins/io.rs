// sprig-core - I/O built-in functions
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! I/O and process control: println, read-string, read-file, clear, exit

use std::fs;
use std::io::{self, Write};

use sprig_parser::printer::join;
use sprig_parser::{Form, Parser};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::{expect_args, text_arg};

/// (println xs...): plain renderings joined by spaces, then a newline.
pub(crate) fn builtin_println(args: &[Form]) -> Result<Form> {
    println!("{}", join(args, " ", false));
    Ok(Form::Nil)
}

/// (read-string text): the first form in `text`, unevaluated, or `null`
/// if there is none.
pub(crate) fn builtin_read_string(args: &[Form]) -> Result<Form> {
    expect_args("read-string", args, 1)?;
    let source = text_arg("read-string", &args[0])?;
    Ok(Parser::parse_str(source)?.unwrap_or(Form::Nil))
}

/// (read-file path): the whole file as a string.
pub(crate) fn builtin_read_file(args: &[Form]) -> Result<Form> {
    expect_args("read-file", args, 1)?;
    let path = text_arg("read-file", &args[0])?;
    Ok(Form::text(read_source(path)?))
}

pub(crate) fn read_source(path: &str) -> Result<String> {
    debug!(path, "reading file");
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::Io(format!("File \"{}\" was not found.", path)),
        _ => Error::Io(format!("Could not read \"{}\": {}", path, e)),
    })
}

/// (clear): clear the terminal.
pub(crate) fn builtin_clear(args: &[Form]) -> Result<Form> {
    expect_args("clear", args, 0)?;
    let mut stdout = io::stdout();
    write!(stdout, "\x1b[2J\x1b[H")
        .and_then(|()| stdout.flush())
        .map_err(|e| Error::Io(format!("clear: {}", e)))?;
    Ok(Form::Nil)
}

/// (exit) / (e): end the process. Called with arguments it does nothing.
pub(crate) fn builtin_exit(args: &[Form]) -> Result<Form> {
    if args.is_empty() {
        info!("exit requested");
        let _ = io::stdout().flush();
        std::process::exit(0);
    }
    Ok(Form::Nil)
}
