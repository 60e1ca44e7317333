//! arith CLI
//!
//! Reads one expression from stdin, runs the selected evaluation mode,
//! and prints the textual result:
//!
//! ```text
//! echo '_let x = 3 _in x + 1' | arithc          # direct interpretation
//! echo '_let x = 3 _in x + 1' | arithc --opt    # partial evaluation
//! echo '_let x = 3 _in x + 1' | arithc --step   # trampolined interpretation
//! ```
//!
//! Parse and evaluation errors go to stderr with exit code 1. Set
//! `RUST_LOG=debug` for step-count diagnostics.

use std::io::Read;

use arith_eval::Environment;

#[derive(Clone, Copy, Debug)]
enum EvalMode {
    /// Direct recursive interpretation (default).
    Interpret,
    /// Constant-fold and print the optimized expression.
    Optimize,
    /// Continuation-machine interpretation.
    Step,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mode = match args.get(1).map(String::as_str) {
        None => EvalMode::Interpret,
        Some("--opt" | "-opt") => EvalMode::Optimize,
        Some("--step" | "-step") => EvalMode::Step,
        Some(flag) => {
            eprintln!("bad flag: {flag}");
            eprintln!();
            eprintln!("Usage: arithc [--opt | --step] < expression");
            eprintln!();
            eprintln!("Modes:");
            eprintln!("  (none)    parse and interpret directly");
            eprintln!("  --opt     parse, optimize, print the expression");
            eprintln!("  --step    parse and interpret by steps");
            std::process::exit(1);
        }
    };
    tracing::debug!(?mode, "selected evaluation mode");

    let mut source = String::new();
    if let Err(error) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    let expr = match arith_parse::parse(&source) {
        Ok(expr) => expr,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    let rendered = match mode {
        EvalMode::Interpret => {
            arith_eval::interpret(&expr, &Environment::Empty).map(|value| value.to_string())
        }
        EvalMode::Optimize => arith_eval::optimize(&expr).map(|expr| expr.to_string()),
        EvalMode::Step => arith_eval::interpret_by_steps(expr).map(|value| value.to_string()),
    };

    match rendered {
        Ok(text) => println!("{text}"),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}
