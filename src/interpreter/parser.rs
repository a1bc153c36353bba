/// Core parsing types and the top-level driver.
///
/// Defines the `Step` protocol shared by every builder, the error helpers and
/// the `Parser` iterator that turns lexemes into top-level statements.
pub mod core;

/// Keyword sets.
///
/// Every keyword is matched case-insensitively against the closed sets
/// defined here.
pub mod keywords;

/// Value expressions.
///
/// Builds literals, variables, pronouns, indexing, calls, pops and operator
/// chains with precedence climbing.
pub mod value;

/// Lists of values for call arguments and pushes.
pub mod list;

/// Poetic number and constant literals.
pub mod poetic;

/// Statements.
///
/// One builder per line, dispatched on the first word.
pub mod statement;

/// Blocks.
///
/// Collects the bodies of conditionals, loops and functions until an empty
/// line closes them.
pub mod block;
