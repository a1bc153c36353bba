//! # lyric
//!
//! lyric is an interpreter for a natural-language-styled esoteric programming
//! language in the tradition of Rockstar. Programs read like song lyrics:
//! multi-word variable names, numbers spelled out as word lengths, and
//! keywords that only mean something in the right place.

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

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{
    error::Error,
    interpreter::{
        session::Interpreter,
        value::host::{HostValue, render},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` type and the closed set of statement and
/// value forms it can take. The AST is built by the parser and traversed by
/// the evaluator.
///
/// # Responsibilities
/// - Defines node kinds for all language constructs.
/// - Attaches source ranges to nodes for error reporting.
/// - Defines operators and their precedence ranks.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating a program. Every error carries the source range it refers to.
///
/// # Responsibilities
/// - Defines error enums for parse and runtime failures.
/// - Renders messages with the offending line.
/// - Unifies both behind a single `Error` for callers of the whole pipeline.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations, and exposes the `Interpreter` session type.
pub mod interpreter;
/// General utilities for safe numeric conversion and number formatting.
pub mod util;

/// Runs a program and returns everything it said, one entry per `say`.
///
/// Each `listen` reads the next entry of `inputs` as a string; once they run
/// out, `listen` reads null.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use lyric::get_output;
///
/// let output = get_output("listen to your heart\nsay your heart with \"!\"", &["hello"]).unwrap();
/// assert_eq!(output, vec!["hello!"]);
///
/// // Reading a variable nobody assigned.
/// assert!(get_output("say my dreams", &[]).is_err());
/// ```
pub fn get_output(source: &str, inputs: &[&str]) -> Result<Vec<String>, Error> {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let mut inputs = inputs.iter().map(|line| (*line).to_string()).collect::<VecDeque<_>>();

    let mut interpreter =
        Interpreter::new(source).with_input(move || inputs.pop_front().map(HostValue::String))
                                .with_output(move |value| {
                                    sink.borrow_mut().push(render(value.as_ref()));
                                });
    interpreter.run()?;

    Ok(lines.take())
}
