// sprig - Interactive read-eval-print loop
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! The interactive loop.
//!
//! Input is read a line at a time. A line that leaves a form open is held
//! and joined with the following lines until the form closes. Once the
//! buffered text holds only complete forms, each form is evaluated in
//! turn and every non-null result is printed readably. A failure is
//! reported together with the input that caused it, and the loop carries
//! on.

use std::io::{self, BufRead, Write};

use sprig_core::{Env, Error, eval};
use sprig_parser::{Form, Parser};
use tracing::trace;

/// Prompt shown while a form is still open.
pub const CONTINUATION_PROMPT: &str = "...> ";

pub struct Repl<'a> {
    env: &'a Env,
    prompt: String,
}

impl<'a> Repl<'a> {
    pub fn new(env: &'a Env, prompt: impl Into<String>) -> Self {
        Repl {
            env,
            prompt: prompt.into(),
        }
    }

    /// Run until `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> io::Result<()> {
        let mut buffer = String::new();
        let mut line = String::new();

        loop {
            let prompt = if buffer.is_empty() {
                self.prompt.as_str()
            } else {
                CONTINUATION_PROMPT
            };
            write!(out, "{}", prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            if buffer.is_empty() && line.trim().is_empty() {
                continue;
            }
            buffer.push_str(&line);

            match Parser::parse_all_str(&buffer) {
                Err(e) if e.is_incomplete() => {
                    trace!("form still open, reading another line");
                    continue;
                }
                Err(e) => report(&mut out, &Error::from(e), &buffer)?,
                Ok(forms) => self.eval_forms(&forms, &buffer, &mut out)?,
            }
            buffer.clear();
        }
    }

    /// Evaluate `forms` in order, stopping at the first failure.
    fn eval_forms<W: Write>(&self, forms: &[Form], source: &str, out: &mut W) -> io::Result<()> {
        for form in forms {
            match eval(form, self.env) {
                Ok(Form::Nil) => {}
                Ok(value) => writeln!(out, "{}", value)?,
                Err(e) => return report(out, &e, source),
            }
        }
        Ok(())
    }
}

fn report<W: Write>(out: &mut W, err: &Error, source: &str) -> io::Result<()> {
    writeln!(out, "{}\nForm:\n{}", err, source.trim_end())
}
