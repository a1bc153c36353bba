/// Core evaluation logic and context management.
///
/// Contains the `Context` that walks the tree, the control-flow signals that
/// unwind it, the evaluation settings and the statement dispatch.
pub mod core;

/// Scope frames.
///
/// Nested variable tables linked to their parents, with the pronoun referent
/// of each frame.
pub mod scope;

/// Reading and writing locations: variables, pronouns and indexes.
pub mod location;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons and the
/// short-circuiting boolean connectives.
pub mod binary;

/// Conditionals, loops and functions.
pub mod control;

/// Stack, string and number mutations: push, pop, split, join, cast and
/// rounding.
pub mod mutation;
