//! # subc
//!
//! subc is an interpreter for SubC, a small C-flavored teaching language.
//! A program is lexed, parsed, checked for semantic errors and then executed
//! by a tree-walking evaluator that writes `print` output to any
//! [`std::io::Write`] sink.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Program,
    config::InterpreterConfig,
    error::Error,
    interpreter::checker::CheckedProgram,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser, validated by the checker and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines item, statement and expression types for all language
///   constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Prints trees back to canonical source text.
pub mod ast;
/// Settings for a run of the interpreter, such as the call depth limit.
pub mod config;
/// Provides unified error types for every stage of the pipeline.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, checking or evaluating code. Each carries the source position
/// it refers to.
///
/// # Responsibilities
/// - Defines one error type per stage (lexer, parser, checker, evaluator).
/// - Unifies them in [`Error`](error::Error) with a process exit code per
///   stage.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, checking, evaluation and
/// value representations to provide a complete runtime for SubC programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, checker, evaluator.
/// - Provides the per-stage entry points.
pub mod interpreter;
/// General utilities shared across stages.
pub mod util;

pub use interpreter::{
    checker::check,
    evaluator::core::run,
    lexer::tokenize,
    parser::parse,
};

/// Lexes and parses a complete source file.
///
/// # Errors
/// Returns the first lexical or syntax error.
///
/// ## Example
/// ```
/// use subc::parse_source;
///
/// let program = parse_source("Program demo; int g = 1; int main() { return g; }").unwrap();
///
/// assert_eq!(program.name, "demo");
/// assert_eq!(program.globals().count(), 1);
/// assert!(parse_source("Program demo; int main() { return 1 }").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

/// Lexes, parses and checks a complete source file.
///
/// # Errors
/// Returns the first lexical or syntax error, or every semantic error.
///
/// ## Example
/// ```
/// use subc::{check_source, error::Error};
///
/// assert!(check_source("Program p; int main() { return 0; }").is_ok());
///
/// let err = check_source("Program p; int f() { } int main() { return f(1); }").unwrap_err();
/// let Error::Semantic(errors) = err else { panic!("expected semantic errors") };
/// assert_eq!(errors.len(), 2);
/// ```
pub fn check_source(source: &str) -> Result<CheckedProgram, Error> {
    let program = parse_source(source)?;
    Ok(check(program)?)
}

/// Runs a complete source file, writing its `print` output to `out`.
///
/// This is the whole pipeline: lex, parse, check, then evaluate from
/// `main`. Nothing runs unless the earlier stages succeed.
///
/// # Errors
/// Returns the error of the first stage that fails, wrapped in [`Error`].
///
/// # Examples
/// ```
/// use subc::{config::InterpreterConfig, run_source};
///
/// let source = r#"
///     Program hello;
///     int main() {
///         for (int i = 0; i < 3; i = i + 1) {
///             print("%d ", i);
///         }
///     }
/// "#;
///
/// let mut out = Vec::new();
/// run_source(source, &mut out, &InterpreterConfig::default()).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0 1 2 ");
/// ```
pub fn run_source<W: Write + Send>(source: &str,
                                   out: &mut W,
                                   config: &InterpreterConfig)
                                   -> Result<(), Error> {
    let checked = check_source(source)?;
    run(&checked, out, config)?;
    Ok(())
}
