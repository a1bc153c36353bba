use log::trace;
use logos::Logos;

use crate::interpreter::lexer::{
    lexeme::{Lexeme, LexemeKind},
    position::{Position, Range},
    raw::RawToken,
};

/// A raw token paired with the source slice it covers.
type Piece<'src> = (Result<RawToken, ()>, &'src str);

/// Turns source text into a contiguous stream of [`Lexeme`]s.
///
/// The lexer never fails: anything it does not recognise becomes whitespace.
/// Consecutive whitespace-class pieces are merged into one lexeme, and if the
/// source does not end with a line terminator a synthetic end-of-input
/// newline is emitted exactly once.
///
/// # Example
/// ```
/// use lyric::interpreter::lexer::{core::Lexer, lexeme::LexemeKind};
///
/// let kinds: Vec<_> = Lexer::new("say 5").map(|l| l.kind).collect();
/// assert_eq!(kinds,
///            vec![LexemeKind::Identifier,
///                 LexemeKind::Whitespace,
///                 LexemeKind::Number,
///                 LexemeKind::Newline { eof: true }]);
/// ```
pub struct Lexer<'src> {
    tokens:       logos::Lexer<'src, RawToken>,
    pending:      Option<Piece<'src>>,
    position:     Position,
    last_newline: bool,
    finished:     bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { tokens:       RawToken::lexer(source),
               pending:      None,
               position:     Position::ORIGIN,
               last_newline: false,
               finished:     false, }
    }

    fn next_piece(&mut self) -> Option<Piece<'src>> {
        if let Some(piece) = self.pending.take() {
            return Some(piece);
        }
        let token = self.tokens.next()?;
        Some((token, self.tokens.slice()))
    }

    /// Collects a maximal run of whitespace-class pieces starting with
    /// `first`.
    fn whitespace_run(&mut self, first: &str) -> String {
        let mut text = first.to_string();
        while let Some(piece) = self.next_piece() {
            if is_whitespace_class(&piece.0) {
                text.push_str(piece.1);
            } else {
                self.pending = Some(piece);
                break;
            }
        }
        text
    }

    fn emit(&mut self, kind: LexemeKind, raw: &str, literal: Option<String>) -> Lexeme {
        let start = self.position;
        self.position = start.advance(raw);
        let range = Range::new(start, self.position);

        let lexeme = match literal {
            Some(decoded) => Lexeme::new(kind, decoded, range).with_pretty(raw),
            None => Lexeme::new(kind, raw, range),
        };

        self.last_newline = lexeme.is_newline();
        trace!("lexeme {lexeme} at {range}");
        lexeme
    }
}

fn is_whitespace_class(token: &Result<RawToken, ()>) -> bool {
    matches!(token, Ok(RawToken::Whitespace) | Err(()))
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        let Some((token, raw)) = self.next_piece() else {
            if self.finished {
                return None;
            }
            self.finished = true;
            if self.last_newline {
                return None;
            }
            return Some(self.emit(LexemeKind::Newline { eof: true }, "", None));
        };

        let lexeme = match token {
            Ok(RawToken::Whitespace) | Err(()) => {
                let text = self.whitespace_run(raw);
                self.emit(LexemeKind::Whitespace, &text, None)
            },
            Ok(RawToken::String(decoded)) => self.emit(LexemeKind::String, raw, Some(decoded)),
            Ok(RawToken::Comment) => self.emit(LexemeKind::Comment, raw, None),
            Ok(RawToken::Contraction) => self.emit(LexemeKind::Contraction, raw, None),
            Ok(RawToken::Identifier) => self.emit(LexemeKind::Identifier, raw, None),
            Ok(RawToken::Number) => self.emit(LexemeKind::Number, raw, None),
            Ok(RawToken::Newline) => self.emit(LexemeKind::Newline { eof: false }, raw, None),
            Ok(RawToken::Delimiter) => self.emit(LexemeKind::Delimiter, raw, None),
        };

        Some(lexeme)
    }
}
