use crate::{
    ast::{Node, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::{lexeme::Lexeme, position::Range},
        parser::{
            core::{ParseResult, Step},
            statement::StatementBuilder,
        },
    },
};

/// Whatever is being built at the current line: a single statement, or a
/// block that is still open.
#[derive(Debug, Clone)]
pub enum Line {
    /// A statement on the current line.
    Statement(StatementBuilder),
    /// An open block; lines go to its body until it closes.
    Block(Box<BlockBuilder>),
}

impl Default for Line {
    fn default() -> Self {
        Self::Statement(StatementBuilder::new())
    }
}

impl Line {
    /// Feeds one lexeme.
    ///
    /// Returns `Step::Done` with a complete statement, or with a compound
    /// statement once its block has closed. Statements that open a block turn
    /// the line into that block.
    ///
    /// # Errors
    /// Propagates any error from the statement or block being built.
    pub fn push(self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        match self {
            Self::Statement(statement) => match statement.push(lexeme)? {
                Step::Next(statement) => Ok(Step::Next(Self::Statement(statement))),
                Step::Done(node) if opens_block(&node) => {
                    Ok(Step::Next(Self::Block(Box::new(BlockBuilder::open(node)))))
                },
                Step::Yield(node, lexeme) if opens_block(&node) => {
                    Self::Block(Box::new(BlockBuilder::open(node))).push(lexeme)
                },
                Step::Done(node) => Ok(Step::Done(node)),
                Step::Yield(node, lexeme) => Ok(Step::Yield(node, lexeme)),
            },
            Self::Block(block) => Ok(block.push(lexeme)?.map(|b| Self::Block(Box::new(b)))),
        }
    }

    /// Completes the line at the end of the input, closing every open block.
    ///
    /// # Errors
    /// Returns [`ParseError::UnfinishedExpression`] if a statement is cut off.
    pub fn finish(self, end: Range) -> ParseResult<Option<Node>> {
        match self {
            Self::Statement(statement) => statement.finish(end),
            Self::Block(block) => block.finish(end).map(Some),
        }
    }
}

/// Returns `true` for the statements that take a body.
fn opens_block(node: &Node) -> bool {
    matches!(node.kind,
             NodeKind::Conditional { .. } | NodeKind::Loop { .. } | NodeKind::Function { .. })
}

/// Collects the body of a conditional, loop or function.
///
/// The block starts from the header node produced by the statement builder
/// and appends every following statement to its body. An `else` marker
/// switches a conditional to its second block; an empty line closes the
/// block, and the end of the input closes all open blocks at once.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    header:    Node,
    body:      Vec<Node>,
    otherwise: Option<Vec<Node>>,
    current:   Line,
}

impl BlockBuilder {
    /// Opens a block for `header`.
    #[must_use]
    pub fn open(header: Node) -> Self {
        Self { header,
               body: Vec::new(),
               otherwise: None,
               current: Line::default() }
    }

    /// Feeds one lexeme to the innermost open statement.
    ///
    /// # Errors
    /// Returns a [`ParseError`] for a misplaced `else`, and propagates errors
    /// from the statements in the body.
    pub fn push(mut self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        let current = std::mem::take(&mut self.current);
        match current.push(lexeme)? {
            Step::Next(current) => {
                self.current = current;
                Ok(Step::Next(self))
            },
            Step::Done(node) => self.accept(node),
            Step::Yield(node, lexeme) => match self.accept(node)? {
                Step::Next(block) => block.push(lexeme),
                Step::Done(node) => Ok(Step::Yield(node, lexeme)),
                step @ Step::Yield(..) => Ok(step),
            },
        }
    }

    fn accept(mut self, node: Node) -> ParseResult<Step<Self>> {
        match node.kind {
            NodeKind::NoOp => Ok(Step::Done(self.build())),
            NodeKind::Else => {
                let is_conditional = matches!(self.header.kind, NodeKind::Conditional { .. });
                if !is_conditional || self.otherwise.is_some() {
                    return Err(ParseError::UnexpectedExpressionKind { expected: "statement",
                                                                      found:    "else",
                                                                      range:    node.range, });
                }
                self.otherwise = Some(Vec::new());
                Ok(Step::Next(self))
            },
            _ => {
                match &mut self.otherwise {
                    Some(otherwise) => otherwise.push(node),
                    None => self.body.push(node),
                }
                Ok(Step::Next(self))
            },
        }
    }

    /// Closes the block and every block nested in it.
    ///
    /// # Errors
    /// Returns [`ParseError::UnfinishedExpression`] if a statement is cut off.
    pub fn finish(mut self, end: Range) -> ParseResult<Node> {
        let current = std::mem::take(&mut self.current);
        if let Some(node) = current.finish(end)? {
            self = match self.accept(node)? {
                Step::Next(block) => block,
                Step::Done(node) | Step::Yield(node, _) => return Ok(node),
            };
        }
        Ok(self.build())
    }

    /// Moves the collected statements into the header.
    fn build(self) -> Node {
        let Self { mut header,
                   body,
                   otherwise,
                   .. } = self;

        let last = otherwise.as_ref()
                            .and_then(|o| o.last())
                            .or_else(|| body.last())
                            .map(|n| n.range);
        if let Some(last) = last {
            header.range = header.range.to(last);
        }

        match &mut header.kind {
            NodeKind::Conditional { then_block,
                                    else_block,
                                    .. } => {
                *then_block = body;
                *else_block = otherwise.unwrap_or_default();
            },
            NodeKind::Loop { body: slot, .. } | NodeKind::Function { body: slot, .. } => {
                *slot = body;
            },
            _ => {},
        }

        header
    }
}
