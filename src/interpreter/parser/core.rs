use std::collections::VecDeque;

use log::debug;

use crate::{
    ast::{Node, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::{
            lex,
            lexeme::{Lexeme, LexemeKind},
            position::{Position, Range},
        },
        parser::block::Line,
    },
};

/// Result type used by the parser.
///
/// All parsing functions return either a value of type `T` or a `ParseError`
/// describing the failure.
pub type ParseResult<T> = Result<T, ParseError>;

/// What a builder did with a lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<B> {
    /// The lexeme was absorbed; continue with this builder.
    Next(B),
    /// The builder finished, consuming the lexeme.
    Done(Node),
    /// The builder finished before the lexeme, which goes back to the parent.
    Yield(Node, Lexeme),
}

impl<B> Step<B> {
    /// Transforms the builder of a `Step::Next`, passing finished nodes
    /// through.
    pub fn map<C>(self, f: impl FnOnce(B) -> C) -> Step<C> {
        match self {
            Self::Next(builder) => Step::Next(f(builder)),
            Self::Done(node) => Step::Done(node),
            Self::Yield(node, lexeme) => Step::Yield(node, lexeme),
        }
    }
}

/// Builds the error for a lexeme that `builder` has no use for.
#[must_use]
pub fn unexpected(lexeme: &Lexeme, builder: &'static str) -> ParseError {
    ParseError::UnexpectedLexeme { lexeme: lexeme.to_string(),
                                   builder,
                                   range: lexeme.range }
}

/// Builds the error for a lexeme found where a specific word was expected.
#[must_use]
pub fn unexpected_word(lexeme: &Lexeme, expected: &str) -> ParseError {
    let found = match lexeme.kind {
        LexemeKind::Identifier => lexeme.literal.clone(),
        kind => kind.name().to_string(),
    };
    ParseError::UnexpectedIdentifier { found,
                                       expected: expected.to_string(),
                                       range: lexeme.range }
}

/// Contracted copulas that are split off the word they were folded into.
const COPULA_SUFFIXES: [&str; 2] = ["'s", "'re"];

/// Splits `Tommy's` into `Tommy` and `'s`.
fn split_copula(lexeme: &Lexeme) -> Option<(Lexeme, Lexeme)> {
    if lexeme.kind != LexemeKind::Identifier {
        return None;
    }

    let literal = &lexeme.literal;
    COPULA_SUFFIXES.iter().find_map(|suffix| {
                              let at = literal.len().checked_sub(suffix.len())?;
                              if at == 0 || !literal.get(at..)?.eq_ignore_ascii_case(suffix) {
                                  return None;
                              }
                              let (stem, copula) = literal.split_at(at);
                              let middle: Position = lexeme.range.start.advance(stem);
                              let stem = Lexeme::new(LexemeKind::Identifier,
                                                     stem,
                                                     Range::new(lexeme.range.start, middle));
                              let copula = Lexeme::new(LexemeKind::Identifier,
                                                       copula,
                                                       Range::new(middle, lexeme.range.end));
                              Some((stem, copula))
                          })
}

/// Turns a lexeme stream into top-level statements.
///
/// The parser is an iterator: each item is one complete top-level statement,
/// with compound statements carrying their whole body. Empty lines between
/// statements are skipped. After the first error the iterator ends.
///
/// # Example
/// ```
/// use lyric::{
///     ast::NodeKind,
///     interpreter::{lexer::lex, parser::core::Parser},
/// };
///
/// let nodes: Vec<_> = Parser::new(lex("put 1 into x\n\nsay x")).collect::<Result<_, _>>()
///                                                                .unwrap();
/// assert_eq!(nodes.len(), 2);
/// assert!(matches!(nodes[0].kind, NodeKind::Assign { .. }));
/// assert!(matches!(nodes[1].kind, NodeKind::Output(_)));
/// ```
pub struct Parser<I> {
    lexemes:  I,
    pending:  VecDeque<Lexeme>,
    line:     Line,
    end:      Range,
    finished: bool,
}

impl<I> Parser<I> where I: Iterator<Item = Lexeme>
{
    /// Creates a parser over a contracted lexeme stream.
    pub fn new(lexemes: I) -> Self {
        Self { lexemes,
               pending: VecDeque::new(),
               line: Line::default(),
               end: Range::default(),
               finished: false }
    }

    fn next_lexeme(&mut self) -> Option<Lexeme> {
        if let Some(lexeme) = self.pending.pop_front() {
            return Some(lexeme);
        }
        let lexeme = self.lexemes.next()?;
        match split_copula(&lexeme) {
            Some((stem, copula)) => {
                self.pending.push_back(copula);
                Some(stem)
            },
            None => Some(lexeme),
        }
    }

    /// Filters what reaches the top level.
    fn emit(node: Node) -> Option<ParseResult<Node>> {
        match node.kind {
            NodeKind::NoOp => None,
            NodeKind::Else => Some(Err(ParseError::UnexpectedExpressionKind { expected: "statement",
                                                                               found:    "else",
                                                                               range:    node.range, })),
            _ => {
                debug!("parsed {} at {}", node.kind.name(), node.range);
                Some(Ok(node))
            },
        }
    }

    fn fail(&mut self, error: ParseError) -> Option<ParseResult<Node>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl<I> Iterator for Parser<I> where I: Iterator<Item = Lexeme>
{
    type Item = ParseResult<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let Some(lexeme) = self.next_lexeme() else {
                self.finished = true;
                let line = std::mem::take(&mut self.line);
                return match line.finish(self.end) {
                    Ok(node) => node.and_then(Self::emit),
                    Err(error) => Some(Err(error)),
                };
            };

            self.end = lexeme.range;
            let line = std::mem::take(&mut self.line);

            let node = match line.push(lexeme) {
                Ok(Step::Next(line)) => {
                    self.line = line;
                    continue;
                },
                Ok(Step::Done(node)) => node,
                Ok(Step::Yield(node, lexeme)) => {
                    self.pending.push_front(lexeme);
                    node
                },
                Err(error) => return self.fail(error),
            };

            match Self::emit(node) {
                Some(Err(error)) => return self.fail(error),
                Some(ok) => return Some(ok),
                None => {},
            }
        }
        None
    }
}

/// Parses a whole program.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
///
/// # Example
/// ```
/// use lyric::interpreter::parser::core::parse;
///
/// assert!(parse("Tommy was a lean mean wrecking machine").is_ok());
/// assert!(parse("put 1 into").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Vec<Node>> {
    Parser::new(lex(source)).collect()
}
