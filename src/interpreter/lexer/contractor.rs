use log::trace;

use crate::interpreter::lexer::lexeme::{Lexeme, LexemeKind};

/// Contractions that still mean something on their own.
const COPULAR_CONTRACTIONS: [&str; 2] = ["'s", "'re"];

/// Folds apostrophe contractions into the identifier in front of them.
///
/// The contractor keeps exactly one lexeme of lookback. A contraction that
/// follows an identifier is merged into it; `'s` and `'re` with nothing to
/// attach to become identifiers of their own; any other stray contraction is
/// demoted to whitespace. All other lexemes pass through untouched.
///
/// # Example
/// ```
/// use lyric::interpreter::lexer::{contractor::Contractor, core::Lexer};
///
/// let words: Vec<_> = Contractor::new(Lexer::new("ain't")).map(|l| l.literal)
///                                                         .collect();
/// assert_eq!(words, vec!["ain't".to_string(), String::new()]);
/// ```
pub struct Contractor<I> {
    lexemes: I,
    pending: Option<Lexeme>,
}

impl<I> Contractor<I> where I: Iterator<Item = Lexeme>
{
    /// Wraps a raw lexeme stream.
    pub const fn new(lexemes: I) -> Self {
        Self { lexemes,
               pending: None }
    }
}

/// Appends `contraction` to `word`, keeping the raw text and the full range.
fn merge(word: Lexeme, contraction: &Lexeme) -> Lexeme {
    let pretty = format!("{}{}", word.source(), contraction.source());
    let literal = format!("{}{}", word.literal, contraction.literal);
    let range = word.range.to(contraction.range);

    trace!("folded contraction into {pretty:?}");
    Lexeme::new(LexemeKind::Identifier, literal, range).with_pretty(pretty)
}

/// Reinterprets a contraction that has no identifier to attach to.
fn degrade(contraction: Lexeme) -> Lexeme {
    let copular = COPULAR_CONTRACTIONS.iter()
                                      .any(|c| contraction.literal.eq_ignore_ascii_case(c));
    let kind = if copular {
        LexemeKind::Identifier
    } else {
        LexemeKind::Whitespace
    };

    Lexeme { kind, ..contraction }
}

impl<I> Iterator for Contractor<I> where I: Iterator<Item = Lexeme>
{
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        loop {
            let Some(lexeme) = self.lexemes.next() else {
                return self.pending.take();
            };

            let incoming = if lexeme.kind == LexemeKind::Contraction {
                match self.pending.take() {
                    Some(word) if word.kind == LexemeKind::Identifier => {
                        self.pending = Some(merge(word, &lexeme));
                        continue;
                    },
                    previous => {
                        self.pending = previous;
                        degrade(lexeme)
                    },
                }
            } else {
                lexeme
            };

            if let Some(previous) = self.pending.replace(incoming) {
                return Some(previous);
            }
        }
    }
}
