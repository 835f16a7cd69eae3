// sprig - Command line and environment configuration
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Settings for the `sprig` binary.
//!
//! Flags are read from the command line, and a few defaults may be
//! overridden through environment variables. Flags take precedence.

use std::path::PathBuf;

/// Environment variable naming the documentation file.
pub const DOCS_VAR: &str = "SPRIG_DOCS";
/// Environment variable overriding the REPL prompt.
pub const PROMPT_VAR: &str = "SPRIG_PROMPT";
/// Environment variable holding the log filter.
pub const LOG_VAR: &str = "SPRIG_LOG";

pub const DEFAULT_DOCS: &str = "docs.json";
pub const DEFAULT_PROMPT: &str = "lisp> ";

pub const USAGE: &str = "\
Usage: sprig [OPTIONS] [FILE]...

Evaluates each FILE in order, or starts an interactive session when no
files are given.

Options:
  --no-prelude      Do not load the prelude
  --docs <PATH>     Documentation file for man/help (default: docs.json)
  --prompt <TEXT>   REPL prompt (default: \"lisp> \")
  -v, --version     Print version information
  -h, --help        Print this help

Environment:
  SPRIG_DOCS        Documentation file, when --docs is not given
  SPRIG_PROMPT      REPL prompt, when --prompt is not given
  SPRIG_LOG         Log filter, e.g. debug or sprig_core=trace (default: warn)";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Help,
    Run(Config),
}

/// Settings for an interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prelude: bool,
    pub docs: PathBuf,
    pub prompt: String,
    /// Source files to evaluate; empty means start the REPL
    pub files: Vec<String>,
}

impl Config {
    /// Defaults, with environment overrides looked up through `var`.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            prelude: true,
            docs: var(DOCS_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS)),
            prompt: var(PROMPT_VAR).unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            files: Vec::new(),
        }
    }
}

/// Parse the process arguments and environment.
pub fn from_env() -> Result<Command, String> {
    parse_args(std::env::args().skip(1), |name| std::env::var(name).ok())
}

/// Parse `args` (without the program name), reading environment
/// variables through `var`.
pub fn parse_args(
    args: impl IntoIterator<Item = String>,
    var: impl Fn(&str) -> Option<String>,
) -> Result<Command, String> {
    let mut config = Config::from_vars(var);
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--no-prelude" => config.prelude = false,
            "--docs" => {
                let path = args.next().ok_or("--docs requires a path")?;
                config.docs = PathBuf::from(path);
            }
            "--prompt" => {
                config.prompt = args.next().ok_or("--prompt requires a value")?;
            }
            "--" => {
                config.files.extend(args.by_ref());
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{}'", flag));
            }
            _ => config.files.push(arg),
        }
    }
    Ok(Command::Run(config))
}
