use std::fmt;

/// A point in the source text.
///
/// Lines start at 1, columns start at 0 and count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// One-based line number.
    pub line:   usize,
    /// Zero-based character offset within the line.
    pub column: usize,
}

impl Position {
    /// The position of the first character of any source.
    pub const ORIGIN: Self = Self { line:   1,
                                    column: 0, };

    /// Returns the position reached after reading `text` starting here.
    ///
    /// A `\n` moves to the start of the next line; every other character,
    /// including a lone `\r`, advances the column by one.
    ///
    /// # Example
    /// ```
    /// use lyric::interpreter::lexer::position::Position;
    ///
    /// let end = Position::ORIGIN.advance("ab\ncd");
    /// assert_eq!(end, Position { line: 2, column: 2 });
    /// ```
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        text.chars().fold(self, |position, c| {
                        if c == '\n' {
                            Self { line:   position.line + 1,
                                   column: 0, }
                        } else {
                            Self { column: position.column + 1,
                                   ..position }
                        }
                    })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open span of source text, `start..end`.
///
/// Ranges exist for diagnostics only; nothing in the interpreter branches on
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// First position covered by the span.
    pub start: Position,
    /// First position after the span.
    pub end:   Position,
}

impl Range {
    /// Creates a range from its two ends.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Composes two ranges: the start of `self` to the end of `other`.
    ///
    /// # Example
    /// ```
    /// use lyric::interpreter::lexer::position::{Position, Range};
    ///
    /// let a = Range::new(Position { line: 1, column: 0 }, Position { line: 1, column: 3 });
    /// let b = Range::new(Position { line: 1, column: 4 }, Position { line: 1, column: 9 });
    /// assert_eq!(a.to(b), Range::new(a.start, b.end));
    /// ```
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self { start: self.start,
               end:   other.end, }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
