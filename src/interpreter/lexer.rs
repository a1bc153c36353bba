/// Source positions and ranges.
///
/// Every lexeme and AST node carries a [`position::Range`] so diagnostics can
/// point at the offending text. Ranges never influence evaluation.
pub mod position;

/// The lexeme type handed from the lexer to the parser.
pub mod lexeme;

/// The `logos` token automaton and its scanning callbacks.
///
/// Comments, strings and numbers do not fit regular patterns, so the automaton
/// only recognises how they start and hands the rest to hand-written scans.
pub mod raw;

/// The lexer proper.
///
/// Wraps the raw automaton, assigns line/column ranges, merges whitespace runs
/// and guarantees that the stream ends with a newline lexeme.
pub mod core;

/// Contraction folding.
///
/// Merges apostrophe fragments such as `'s` or `'t` into the preceding word,
/// producing the stream the parser consumes.
pub mod contractor;

use crate::interpreter::lexer::{contractor::Contractor, core::Lexer, lexeme::Lexeme};

/// Lexes `source` and folds contractions, producing the parser's input.
///
/// # Example
/// ```
/// use lyric::interpreter::lexer::{lex, lexeme::LexemeKind};
///
/// let lexemes: Vec<_> = lex("Tommy's here").collect();
/// assert_eq!(lexemes[0].kind, LexemeKind::Identifier);
/// assert_eq!(lexemes[0].literal, "Tommy's");
/// ```
pub fn lex(source: &str) -> impl Iterator<Item = Lexeme> + '_ {
    Contractor::new(Lexer::new(source))
}
