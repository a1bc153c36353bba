use thiserror::Error;

use crate::interpreter::lexer::position::Range;

/// Represents all errors that can occur while parsing.
///
/// Every variant carries the range of the offending source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A lexeme the active builder has no use for.
    #[error("Error on line {}: Unexpected {lexeme} while parsing {builder}.", .range.start.line)]
    UnexpectedLexeme {
        /// The offending lexeme, as rendered for diagnostics.
        lexeme:  String,
        /// The builder that rejected it.
        builder: &'static str,
        /// Where the lexeme sits.
        range:   Range,
    },
    /// A keyword or name in a position that does not accept it.
    #[error("Error on line {}: Unexpected '{found}', expected {expected}.", .range.start.line)]
    UnexpectedIdentifier {
        /// The word that was found.
        found:    String,
        /// What would have been accepted.
        expected: String,
        /// Where the word sits.
        range:    Range,
    },
    /// Something scanned like a number but does not convert to one.
    #[error("Error on line {}: '{literal}' is not a valid number.", .range.start.line)]
    InvalidNumber {
        /// The raw literal.
        literal: String,
        /// Where the literal sits.
        range:   Range,
    },
    /// A finished sub-expression of the wrong kind for its context, such as a
    /// literal where a location is required.
    #[error("Error on line {}: Expected {expected}, but found {found}.", .range.start.line)]
    UnexpectedExpressionKind {
        /// What the context requires.
        expected: &'static str,
        /// What was built.
        found:    &'static str,
        /// Where the expression sits.
        range:    Range,
    },
    /// The input ended while an expression was still incomplete.
    #[error("Error on line {}: Unfinished {builder} at end of input.", .range.start.line)]
    UnfinishedExpression {
        /// The builder that was still waiting.
        builder: &'static str,
        /// Where the input ended.
        range:   Range,
    },
}

impl ParseError {
    /// The source range of the error.
    #[must_use]
    pub const fn range(&self) -> Range {
        match self {
            Self::UnexpectedLexeme { range, .. }
            | Self::UnexpectedIdentifier { range, .. }
            | Self::InvalidNumber { range, .. }
            | Self::UnexpectedExpressionKind { range, .. }
            | Self::UnfinishedExpression { range, .. } => *range,
        }
    }
}
