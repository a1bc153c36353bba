use std::fmt;

use crate::interpreter::lexer::position::Range;

/// The kind of a [`Lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    /// A line terminator. `eof` marks the synthetic terminator appended when
    /// the source does not end with one.
    Newline {
        /// `true` for the synthetic end-of-input terminator.
        eof: bool,
    },
    /// `,` or `&`.
    Delimiter,
    /// An apostrophe followed by letters, such as `'s` or `'t`.
    Contraction,
    /// A run of blanks, unknown characters or stray signs and dots.
    Whitespace,
    /// A parenthesised comment, nested parentheses included.
    Comment,
    /// A double-quoted string. The literal holds the decoded text.
    String,
    /// A run of letters.
    Identifier,
    /// Something that scanned like a number. Conversion happens in the parser.
    Number,
}

impl LexemeKind {
    /// A short human-readable name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Newline { eof: false } => "newline",
            Self::Newline { eof: true } => "end of input",
            Self::Delimiter => "delimiter",
            Self::Contraction => "contraction",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Number => "number",
        }
    }
}

/// One unit of source text with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// What the lexeme is.
    pub kind:    LexemeKind,
    /// The literal text. Decoded content for strings, raw source otherwise.
    pub literal: String,
    /// Alternative rendering of the raw source, when it differs from the
    /// literal (strings) or was assembled from several pieces (contractions).
    pub pretty:  Option<String>,
    /// Where the lexeme sits in the source.
    pub range:   Range,
}

impl Lexeme {
    /// Creates a lexeme whose raw source text is its literal.
    #[must_use]
    pub fn new(kind: LexemeKind, literal: impl Into<String>, range: Range) -> Self {
        Self { kind,
               literal: literal.into(),
               pretty: None,
               range }
    }

    /// Attaches a pretty rendering.
    #[must_use]
    pub fn with_pretty(mut self, pretty: impl Into<String>) -> Self {
        self.pretty = Some(pretty.into());
        self
    }

    /// The text as it appeared in the source.
    #[must_use]
    pub fn source(&self) -> &str {
        self.pretty.as_deref().unwrap_or(&self.literal)
    }

    /// Returns `true` for whitespace and comments, which most builders skip.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self.kind, LexemeKind::Whitespace | LexemeKind::Comment)
    }

    /// Returns `true` for both real and synthetic line terminators.
    #[must_use]
    pub const fn is_newline(&self) -> bool {
        matches!(self.kind, LexemeKind::Newline { .. })
    }

    /// The lower-cased literal of an identifier, or `None` for any other kind.
    #[must_use]
    pub fn word(&self) -> Option<String> {
        (self.kind == LexemeKind::Identifier).then(|| self.literal.to_lowercase())
    }

    /// Returns `true` if this is an identifier starting with an upper-case
    /// letter.
    #[must_use]
    pub fn is_capitalized(&self) -> bool {
        self.kind == LexemeKind::Identifier
        && self.literal.chars().next().is_some_and(char::is_uppercase)
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexemeKind::Newline { .. } => write!(f, "{}", self.kind.name()),
            _ => write!(f, "{} {:?}", self.kind.name(), self.source()),
        }
    }
}
