/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// lexemes that do not fit the construct being parsed, misplaced keywords,
/// malformed number literals, sub-expressions of the wrong kind and input that
/// ends in the middle of an expression.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unassigned
/// locations, values unfit for an operation, invalid indices, misplaced
/// control flow, arity mismatches and the loop ceiling.
pub mod runtime_error;

use thiserror::Error;

pub use parse_error::ParseError;
pub use runtime_error::{Operation, RuntimeError};

/// Any error the interpreter can report.
///
/// Both phases abort on their first error; this type lets callers handle
/// the two taxonomies through a single `?`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The program could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
