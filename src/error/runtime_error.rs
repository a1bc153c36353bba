use std::fmt;

use thiserror::Error;

use crate::interpreter::lexer::position::Range;

/// The kind of operation a value turned out to be unfit for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `and`, `or`, `nor`, `not`.
    Boolean,
    /// Arithmetic.
    Equation,
    /// Ordering comparisons.
    Comparison,
    /// String conversions: split and friends.
    String,
    /// Stack operations and join.
    Array,
    /// Calling something.
    Call,
    /// Indexing.
    Index,
    /// `cast`.
    Cast,
    /// `turn`.
    Rounding,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean logic",
            Self::Equation => "arithmetic",
            Self::Comparison => "comparison",
            Self::String => "string operation",
            Self::Array => "array operation",
            Self::Call => "call",
            Self::Index => "indexing",
            Self::Cast => "cast",
            Self::Rounding => "rounding",
        };
        write!(f, "{name}")
    }
}

/// Represents all errors that can occur during evaluation.
///
/// Every variant carries the range of the node that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Read of a location that holds nothing, or a pronoun with no referent.
    #[error("Error on line {}: '{location}' has not been assigned.", .range.start.line)]
    Unassigned {
        /// The location, as written.
        location: String,
        /// Where it was used.
        range:    Range,
    },
    /// A value the attempted operation cannot work with.
    #[error("Error on line {}: {value} is not fit for {operation}.", .range.start.line)]
    UnfitValue {
        /// What was attempted.
        operation: Operation,
        /// The offending value, rendered for diagnostics.
        value:     String,
        /// Where it happened.
        range:     Range,
    },
    /// An index that does not address anything in the indexed value.
    #[error("Error on line {}: Invalid index {index}.", .range.start.line)]
    InvalidIndex {
        /// The offending index, rendered for diagnostics.
        index: String,
        /// Where it was used.
        range: Range,
    },
    /// A number that cannot be represented where it is needed.
    #[error("Error on line {}: {value} is out of range.", .range.start.line)]
    NumberOutOfRange {
        /// The number, rendered for diagnostics.
        value: String,
        /// Where it was used.
        range: Range,
    },
    /// `break`, `continue` or `return` with nothing to catch it.
    #[error("Error on line {}: '{signal}' outside of any loop or function.", .range.start.line)]
    StrayControlFlow {
        /// The control-flow statement.
        signal: &'static str,
        /// Where it was raised.
        range:  Range,
    },
    /// A function called with the wrong number of arguments.
    #[error("Error on line {}: '{function}' takes {expected} argument(s), but {found} were given.",
            .range.start.line)]
    ArgumentCount {
        /// The called function.
        function: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found:    usize,
        /// Where the call happened.
        range:    Range,
    },
    /// A loop ran into the configured iteration ceiling.
    #[error("Error on line {}: Loop exceeded {limit} iterations.", .range.start.line)]
    LoopCeiling {
        /// The configured ceiling.
        limit: usize,
        /// The loop.
        range: Range,
    },
}

impl RuntimeError {
    /// The source range of the error.
    #[must_use]
    pub const fn range(&self) -> Range {
        match self {
            Self::Unassigned { range, .. }
            | Self::UnfitValue { range, .. }
            | Self::InvalidIndex { range, .. }
            | Self::NumberOutOfRange { range, .. }
            | Self::StrayControlFlow { range, .. }
            | Self::ArgumentCount { range, .. }
            | Self::LoopCeiling { range, .. } => *range,
        }
    }
}
