use crate::{
    ast::{Node, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::{
            lexeme::{Lexeme, LexemeKind},
            position::Range,
        },
        parser::{
            core::{ParseResult, Step, unexpected},
            keywords,
        },
    },
};

#[derive(Debug, Clone)]
enum State {
    /// Nothing significant seen yet.
    Leading,
    /// A number or string literal; only the end of the line may follow.
    Literal(Node),
    /// A constant keyword; the rest of the line is ignored.
    Constant(Node),
    /// Word lengths being read as digits.
    Digits(Digits),
}

#[derive(Debug, Clone, Default)]
struct Digits {
    integer:  String,
    fraction: String,
    /// Letters counted for the word being read, if any.
    pending:  Option<usize>,
    /// Set once the decimal point has been passed.
    dotted:   bool,
    range:    Option<Range>,
}

impl Digits {
    fn flush(&mut self) {
        let Some(letters) = self.pending.take() else {
            return;
        };
        let digit = char::from(b'0' + u8::try_from(letters % 10).unwrap_or(0));
        if self.dotted {
            self.fraction.push(digit);
        } else {
            self.integer.push(digit);
        }
    }

    fn cover(&mut self, range: Range) {
        self.range = Some(self.range.map_or(range, |r| r.to(range)));
    }

    fn push(&mut self, lexeme: &Lexeme) {
        match lexeme.kind {
            LexemeKind::Identifier => {
                *self.pending.get_or_insert(0) += letters(lexeme);
                self.cover(lexeme.range);
            },
            LexemeKind::Whitespace if !self.dotted && lexeme.literal.starts_with('.') => {
                self.flush();
                self.dotted = true;
            },
            _ => self.flush(),
        }
    }

    fn finish(mut self, end: Range) -> ParseResult<Node> {
        self.flush();
        let range = self.range.unwrap_or(end);

        if self.integer.is_empty() && self.fraction.is_empty() {
            return Err(ParseError::UnfinishedExpression { builder: "poetic literal",
                                                          range });
        }

        let integer = if self.integer.is_empty() { "0" } else { &self.integer };
        let text = if self.fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{}", self.fraction)
        };

        let value = text.parse::<f64>()
                        .map_err(|_| ParseError::InvalidNumber { literal: text.clone(),
                                                                 range })?;
        Ok(Node::new(NodeKind::Number(value), range))
    }
}

/// Counts the letters of a word, ignoring apostrophes.
fn letters(lexeme: &Lexeme) -> usize {
    lexeme.literal.chars().filter(|c| c.is_alphabetic()).count()
}

/// Reads the literal after a copula in a poetic assignment.
///
/// A leading number or string is taken as is, and a leading constant keyword
/// yields that constant, whatever else is on the line. Anything else is a poetic number: every word
/// contributes one digit, its letter count modulo ten, and a word ending in a
/// full stop starts the fractional part. The literal ends with the line,
/// whose terminator is consumed.
///
/// # Example
/// ```
/// use lyric::{
///     ast::NodeKind,
///     interpreter::{lexer::lex, parser::{core::Step, poetic::PoeticBuilder}},
/// };
///
/// let mut builder = PoeticBuilder::new();
/// for lexeme in lex("a lean mean wrecking machine") {
///     match builder.push(lexeme).unwrap() {
///         Step::Next(next) => builder = next,
///         Step::Done(node) | Step::Yield(node, _) => {
///             assert_eq!(node.kind, NodeKind::Number(14487.0));
///             return;
///         },
///     }
/// }
/// panic!("literal never finished");
/// ```
#[derive(Debug, Clone)]
pub struct PoeticBuilder {
    state: State,
}

impl Default for PoeticBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoeticBuilder {
    /// Creates a builder positioned right after the copula.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: State::Leading }
    }

    const fn with(state: State) -> Step<Self> {
        Step::Next(Self { state })
    }

    /// Feeds one lexeme of the literal.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the line ends before any literal, or if
    /// something follows a number or string literal.
    pub fn push(self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        match self.state {
            State::Leading => match lexeme.kind {
                LexemeKind::Whitespace | LexemeKind::Comment => Ok(Self::with(State::Leading)),
                LexemeKind::Newline { .. } => {
                    Err(ParseError::UnfinishedExpression { builder: "poetic literal",
                                                           range:   lexeme.range, })
                },
                LexemeKind::Number => {
                    let value =
                        lexeme.literal
                              .parse::<f64>()
                              .map_err(|_| ParseError::InvalidNumber { literal: lexeme.literal
                                                                                      .clone(),
                                                                       range:   lexeme.range, })?;
                    Ok(Self::with(State::Literal(Node::new(NodeKind::Number(value),
                                                           lexeme.range))))
                },
                LexemeKind::String => {
                    let node = Node::new(NodeKind::String(lexeme.literal), lexeme.range);
                    Ok(Self::with(State::Literal(node)))
                },
                _ => {
                    if let Some(word) = lexeme.word()
                       && let Some(kind) = keywords::constant(&word)
                    {
                        return Ok(Self::with(State::Constant(Node::new(kind, lexeme.range))));
                    }
                    Self { state: State::Digits(Digits::default()) }.push(lexeme)
                },
            },
            State::Literal(node) => match lexeme.kind {
                LexemeKind::Whitespace | LexemeKind::Comment => Ok(Self::with(State::Literal(node))),
                LexemeKind::Newline { .. } => Ok(Step::Done(node)),
                _ => Err(unexpected(&lexeme, "poetic literal")),
            },
            State::Constant(node) => {
                if lexeme.is_newline() {
                    return Ok(Step::Done(node));
                }
                Ok(Self::with(State::Constant(node)))
            },
            State::Digits(mut digits) => {
                if lexeme.is_newline() {
                    return digits.finish(lexeme.range).map(Step::Done);
                }
                digits.push(&lexeme);
                Ok(Self::with(State::Digits(digits)))
            },
        }
    }
}
