// sprig - A small Lisp with closures, macros and a REPL
// Copyright (c) 2025 The sprig developers. MIT licensed.

mod config;
mod repl;

use std::io;
use std::process;
use std::thread;

use sprig_core::{DocStore, Env, INTERPRETER_STACK_SIZE, eval_file, standard_env};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use config::{Command, Config, LOG_VAR, USAGE};
use repl::Repl;

fn main() {
    let command = match config::from_env() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("sprig: {}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };

    let config = match command {
        Command::Version => {
            println!("sprig {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Command::Help => {
            println!("{}", USAGE);
            return;
        }
        Command::Run(config) => config,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let handle = thread::Builder::new()
        .name("interpreter".to_string())
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(move || run(config));

    let code = match handle.map(|h| h.join()) {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => {
            error!("interpreter thread panicked");
            101
        }
        Err(e) => {
            eprintln!("sprig: could not start interpreter thread: {}", e);
            1
        }
    };
    process::exit(code);
}

/// Set up the environment and either evaluate the given files or start
/// the REPL. Returns the process exit code.
fn run(config: Config) -> i32 {
    let env = match standard_env(config.prelude) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Failed to load prelude: {}", e);
            return 1;
        }
    };

    if let Some(docs) = DocStore::load(&config.docs) {
        env.set_docs(docs);
    }

    if config.files.is_empty() {
        run_repl(&env, &config.prompt)
    } else {
        run_files(&config.files, &env)
    }
}

fn run_files(files: &[String], env: &Env) -> i32 {
    for path in files {
        debug!(path, "evaluating file");
        if let Err(e) = eval_file(path, env) {
            eprintln!("{}", e);
            return 1;
        }
    }
    0
}

fn run_repl(env: &Env, prompt: &str) -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match Repl::new(env, prompt).run(stdin.lock(), stdout.lock()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Read error: {}", e);
            1
        }
    }
}
