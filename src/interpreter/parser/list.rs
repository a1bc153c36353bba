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
            value::{Mode, ValueBuilder},
        },
    },
};

/// Builds a list of values for call arguments and pushes.
///
/// Items are separated by `,` or `&`. Once a delimiter has been seen, `and`
/// also separates items, and `, and` counts as a single separator. Before
/// that, `and` is the boolean operator of the current item. The finished list
/// is always a [`NodeKind::List`], even for a single item.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    items:     Vec<Node>,
    current:   ValueBuilder,
    delimited: bool,
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListBuilder {
    /// Creates an empty list builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { items:     Vec::new(),
               current:   ValueBuilder::new(Mode::Value),
               delimited: false, }
    }

    /// Returns `true` if the list could end here.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current.is_complete()
    }

    /// Returns `true` if `lexeme` would separate items rather than continue
    /// the current one.
    #[must_use]
    pub fn claims(&self, lexeme: &Lexeme) -> bool {
        if lexeme.kind == LexemeKind::Delimiter {
            return true;
        }
        self.delimited
        && lexeme.word().as_deref() == Some("and")
        && (self.current.is_complete() || self.current.is_empty())
    }

    /// Feeds one lexeme to the list.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if a separator arrives before an item is
    /// complete, or if the current item rejects the lexeme.
    pub fn push(mut self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        if lexeme.is_trivia() {
            return Ok(Step::Next(self));
        }

        let is_and = lexeme.word().as_deref() == Some("and");

        if lexeme.kind == LexemeKind::Delimiter || (is_and && self.claims(&lexeme)) {
            if self.current.is_complete() {
                let item = std::mem::replace(&mut self.current, ValueBuilder::new(Mode::Value));
                self.items.push(item.finish(lexeme.range)?);
                self.delimited = true;
                return Ok(Step::Next(self));
            }
            if is_and && self.current.is_empty() && !self.items.is_empty() {
                return Ok(Step::Next(self));
            }
            return Err(unexpected(&lexeme, "list"));
        }

        let Self { mut items,
                   current,
                   delimited, } = self;

        match current.push(lexeme)? {
            Step::Next(current) => Ok(Step::Next(Self { items,
                                                        current,
                                                        delimited })),
            Step::Done(node) => {
                items.push(node);
                Ok(Step::Done(Self::build(items)))
            },
            Step::Yield(node, lexeme) => {
                items.push(node);
                Ok(Step::Yield(Self::build(items), lexeme))
            },
        }
    }

    /// Completes the list.
    ///
    /// # Errors
    /// Returns [`ParseError::UnfinishedExpression`] if the list ends with a
    /// separator or an incomplete item.
    pub fn finish(self, end: Range) -> ParseResult<Node> {
        let Self { mut items, current, .. } = self;
        if current.is_empty() && !items.is_empty() {
            return Err(ParseError::UnfinishedExpression { builder: "list",
                                                          range:   end, });
        }
        items.push(current.finish(end)?);
        Ok(Self::build(items))
    }

    fn build(items: Vec<Node>) -> Node {
        let range = match (items.first(), items.last()) {
            (Some(first), Some(last)) => first.range.to(last.range),
            _ => Range::default(),
        };
        Node::new(NodeKind::List(items), range)
    }
}
