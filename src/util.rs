/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, and the single
/// number formatter used wherever a number becomes text.
///
/// All fallible functions return a `Result` that carries a caller-supplied
/// error, so the lexer, parser and evaluator can each report failures in their
/// own error taxonomy.
pub mod num;
