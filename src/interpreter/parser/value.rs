use crate::{
    ast::{BinaryOperator, Node, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::{
            lexeme::{Lexeme, LexemeKind},
            position::Range,
        },
        parser::{
            core::{ParseResult, Step, unexpected, unexpected_word},
            keywords,
            list::ListBuilder,
        },
    },
};

/// Rank of the unary `not`.
const NOT_RANK: u8 = 5;
/// Rank of calls, indexing and pops, the tightest-binding constructs.
const POSTFIX_RANK: u8 = 6;

/// What a [`ValueBuilder`] is allowed to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Any expression.
    Value,
    /// A variable, pronoun or index. Only `at` is accepted after the operand,
    /// so words such as `with`, `into` and `be` end the location.
    Location,
    /// A single operand used as an index key. Only `at` follows it.
    Key,
}

impl Mode {
    const fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Location => "location",
            Self::Key => "key",
        }
    }
}

/// How far a comparison that started with a copula has been refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    /// Just saw the copula; `not`, a comparative or `as` may follow.
    Copula,
    /// Saw a comparative; waiting for `than`.
    Than,
    /// Saw `as`; waiting for `high`, `low` and the like.
    As,
    /// Saw `as high`; waiting for the second `as`.
    SecondAs,
    /// The operator is settled.
    Done,
}

/// The part of a composite expression that is already known.
#[derive(Debug, Clone)]
enum Shell {
    Not(Range),
    Pop(Range),
    Binary {
        op:   BinaryOperator,
        tail: Tail,
        left: Box<Node>,
    },
    Index(Box<Node>),
    Call(Box<Node>),
}

/// The part of a composite expression still being built.
#[derive(Debug, Clone)]
enum Child {
    Value(Box<ValueBuilder>),
    List(Box<ListBuilder>),
}

#[derive(Debug, Clone)]
enum State {
    Empty,
    Article(Lexeme),
    Proper { name: String, range: Range },
    Operand(Node),
    Composite { shell: Shell, child: Child },
}

/// An operator recognised after a complete operand.
#[derive(Debug, Clone, Copy)]
enum Operator {
    Binary(BinaryOperator, Tail),
    Index,
    Call,
}

impl Operator {
    const fn rank(self) -> u8 {
        match self {
            Self::Binary(op, _) => op.rank(),
            Self::Index | Self::Call => POSTFIX_RANK,
        }
    }
}

/// The outcome of [`ValueBuilder::feed`].
#[derive(Debug, Clone)]
pub enum Fed {
    /// The expression can still grow.
    Pending(ValueBuilder),
    /// The expression ended before the returned lexeme.
    Finished(Node, Lexeme),
}

/// Builds one value expression from a stream of lexemes.
///
/// The builder keeps the expression as a chain of composites, each holding the
/// part already known (the shell) and a sub-builder for the rest (the child).
/// An incoming operator whose rank is at most the rank of a complete builder
/// folds the whole builder into its left operand; otherwise it is handed down
/// to the child. A lexeme that cannot continue the expression is yielded back
/// together with the finished node.
///
/// # Example
/// ```
/// use lyric::{
///     ast::{BinaryOperator, NodeKind},
///     interpreter::{
///         lexer::lex,
///         parser::{core::Step, value::{Mode, ValueBuilder}},
///     },
/// };
///
/// let mut builder = ValueBuilder::new(Mode::Value);
/// let mut result = None;
/// for lexeme in lex("1 plus 2 times 3") {
///     match builder.push(lexeme).unwrap() {
///         Step::Next(next) => builder = next,
///         Step::Done(node) | Step::Yield(node, _) => {
///             result = Some(node);
///             break;
///         },
///     }
/// }
///
/// let NodeKind::Binary { op, right, .. } = result.unwrap().kind else { panic!() };
/// assert_eq!(op, BinaryOperator::Add);
/// assert!(matches!(right.kind, NodeKind::Binary { op: BinaryOperator::Mul, .. }));
/// ```
#[derive(Debug, Clone)]
pub struct ValueBuilder {
    mode:  Mode,
    state: State,
}

impl ValueBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self { mode,
               state: State::Empty }
    }

    const fn operand(mode: Mode, node: Node) -> Self {
        Self { mode,
               state: State::Operand(node) }
    }

    /// Returns `true` if nothing has been pushed yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// Returns `true` if the lexemes pushed so far form a whole expression.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match &self.state {
            State::Empty | State::Article(_) => false,
            State::Proper { .. } | State::Operand(_) => true,
            State::Composite { shell, child } => {
                let settled = !matches!(shell, Shell::Binary { tail, .. } if *tail != Tail::Done);
                settled && child.is_complete()
            },
        }
    }

    /// Returns `true` if the builder holds a complete location, which is what
    /// poetic assignments attach to.
    #[must_use]
    pub fn is_location(&self) -> bool {
        match &self.state {
            State::Proper { .. } => true,
            State::Operand(node) => node.is_location(),
            State::Composite { shell: Shell::Index(_),
                               child, } => child.is_complete(),
            _ => false,
        }
    }

    /// Returns `true` if the builder holds a plain variable name, which is
    /// what function declarations attach to.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self.state,
                 State::Proper { .. } | State::Operand(Node { kind: NodeKind::Variable(_),
                                                              .. }))
    }

    /// The binding strength of the outermost construct.
    fn rank(&self) -> u8 {
        match &self.state {
            State::Composite { shell, .. } => match shell {
                Shell::Not(_) => NOT_RANK,
                Shell::Binary { op, .. } => op.rank(),
                Shell::Pop(_) | Shell::Index(_) | Shell::Call(_) => POSTFIX_RANK,
            },
            _ => u8::MAX,
        }
    }

    /// Feeds one lexeme to the builder.
    ///
    /// # Returns
    /// - `Step::Next` with the updated builder while the expression can still
    ///   grow.
    /// - `Step::Yield` with the finished node and the lexeme that ended it.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the lexeme cannot appear at this point.
    pub fn push(self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        if lexeme.is_trivia() {
            return Ok(Step::Next(self));
        }

        let mode = self.mode;
        match self.state {
            State::Empty => Self::start(mode, lexeme).map(Step::Next),
            State::Article(article) => {
                let Some(word) = lexeme.word() else {
                    return Err(unexpected(&lexeme, "common variable"));
                };
                let name = format!("{} {word}", article.literal.to_lowercase());
                let node = Node::new(NodeKind::Variable(name), article.range.to(lexeme.range));
                Ok(Step::Next(Self::operand(mode, node)))
            },
            State::Proper { mut name, range } => {
                let extends = lexeme.is_capitalized()
                              && lexeme.word().is_some_and(|word| !keywords::is_reserved(&word));
                if extends {
                    name.push(' ');
                    name.push_str(&lexeme.literal);
                    let range = range.to(lexeme.range);
                    return Ok(Step::Next(Self { mode,
                                                state: State::Proper { name, range } }));
                }
                let node = Node::new(NodeKind::Variable(normalize(&name)), range);
                Self::operand(mode, node).push(lexeme)
            },
            State::Operand(node) => Self::after_operand(mode, node, lexeme),
            State::Composite { shell, child } => Self::continue_composite(mode, shell, child, lexeme),
        }
    }

    /// Starts an expression with its first significant lexeme.
    fn start(mode: Mode, lexeme: Lexeme) -> ParseResult<Self> {
        let range = lexeme.range;
        let literal = |kind: NodeKind| {
            if mode == Mode::Location {
                return Err(ParseError::UnexpectedExpressionKind { expected: "location",
                                                                  found: kind.name(),
                                                                  range });
            }
            Ok(Self::operand(mode, Node::new(kind, range)))
        };

        match lexeme.kind {
            LexemeKind::Number => literal(NodeKind::Number(parse_number(&lexeme)?)),
            LexemeKind::String => literal(NodeKind::String(lexeme.literal)),
            LexemeKind::Identifier => {
                let word = lexeme.literal.to_lowercase();

                if keywords::is_article(&word) {
                    return Ok(Self { mode,
                                     state: State::Article(lexeme) });
                }
                if keywords::is_pronoun(&word) {
                    return Ok(Self::operand(mode, Node::new(NodeKind::Pronoun(word), range)));
                }
                if let Some(kind) = keywords::constant(&word) {
                    return literal(kind);
                }
                if mode == Mode::Value && word == "not" {
                    return Ok(Self::composite(mode,
                                              Shell::Not(range),
                                              Child::value(Mode::Value)));
                }
                if mode == Mode::Value && (word == "roll" || word == "pop") {
                    return Ok(Self::composite(mode,
                                              Shell::Pop(range),
                                              Child::value(Mode::Location)));
                }
                if keywords::is_reserved(&word) {
                    return Err(unexpected_word(&lexeme, "a value"));
                }
                if lexeme.is_capitalized() {
                    return Ok(Self { mode,
                                     state: State::Proper { name: lexeme.literal,
                                                            range } });
                }
                Ok(Self::operand(mode, Node::new(NodeKind::Variable(word), range)))
            },
            _ => Err(unexpected(&lexeme, mode.name())),
        }
    }

    const fn composite(mode: Mode, shell: Shell, child: Child) -> Self {
        Self { mode,
               state: State::Composite { shell, child } }
    }

    /// Handles the lexeme after a complete operand: either an operator that
    /// opens a composite, or the end of the expression.
    fn after_operand(mode: Mode, node: Node, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        let Some(operator) = operator(&lexeme, mode) else {
            return Ok(Step::Yield(node, lexeme));
        };

        let (shell, child) = match operator {
            Operator::Binary(op, tail) => (Shell::Binary { op,
                                                           tail,
                                                           left: Box::new(node) },
                                           Child::value(Mode::Value)),
            Operator::Index => (Shell::Index(Box::new(node)), Child::value(Mode::Key)),
            Operator::Call => {
                if !matches!(node.kind, NodeKind::Variable(_)) {
                    return Err(ParseError::UnexpectedExpressionKind { expected: "function name",
                                                                      found:    node.kind.name(),
                                                                      range:    node.range, });
                }
                (Shell::Call(Box::new(node)), Child::List(Box::new(ListBuilder::new())))
            },
        };

        Ok(Step::Next(Self::composite(mode, shell, child)))
    }

    fn continue_composite(mode: Mode,
                          shell: Shell,
                          child: Child,
                          lexeme: Lexeme)
                          -> ParseResult<Step<Self>> {
        let shell = match shell {
            Shell::Binary { op, tail, left } if tail != Tail::Done => {
                match refine(op, tail, &lexeme)? {
                    Some((op, tail)) => {
                        let shell = Shell::Binary { op, tail, left };
                        return Ok(Step::Next(Self::composite(mode, shell, child)));
                    },
                    None => Shell::Binary { op,
                                            tail: Tail::Done,
                                            left },
                }
            },
            shell => shell,
        };

        let builder = Self::composite(mode, shell, child);

        if let Some(operator) = operator(&lexeme, mode)
           && builder.is_complete()
           && operator.rank() <= builder.rank()
           && !builder.claims(&lexeme)
        {
            let node = builder.finish(lexeme.range)?;
            return Self::after_operand(mode, node, lexeme);
        }

        let State::Composite { shell, child } = builder.state else {
            return Err(unexpected(&lexeme, mode.name()));
        };

        match child.push(lexeme)? {
            Step::Next(child) => Ok(Step::Next(Self::composite(mode, shell, child))),
            Step::Done(node) => Ok(Step::Next(Self::operand(mode, shell.close(node)?))),
            Step::Yield(node, lexeme) => Self::operand(mode, shell.close(node)?).push(lexeme),
        }
    }

    /// Returns `true` if a call's argument list wants `lexeme` for itself.
    fn claims(&self, lexeme: &Lexeme) -> bool {
        match &self.state {
            State::Composite { child: Child::List(list),
                               .. } => list.claims(lexeme),
            _ => false,
        }
    }

    /// Feeds one lexeme, for parents that only care whether the expression
    /// has ended.
    ///
    /// # Errors
    /// Propagates any error from [`ValueBuilder::push`].
    pub fn feed(self, lexeme: Lexeme) -> ParseResult<Fed> {
        let mode = self.mode;
        Ok(match self.push(lexeme)? {
            Step::Next(builder) => Fed::Pending(builder),
            Step::Done(node) => Fed::Pending(Self::operand(mode, node)),
            Step::Yield(node, lexeme) => Fed::Finished(node, lexeme),
        })
    }

    /// Completes the expression.
    ///
    /// # Parameters
    /// - `end`: Where the input stopped, used for error reporting.
    ///
    /// # Errors
    /// Returns [`ParseError::UnfinishedExpression`] if the expression is
    /// incomplete.
    pub fn finish(self, end: Range) -> ParseResult<Node> {
        match self.state {
            State::Empty => Err(ParseError::UnfinishedExpression { builder: self.mode.name(),
                                                                   range:   end, }),
            State::Article(article) => {
                Err(ParseError::UnfinishedExpression { builder: "common variable",
                                                       range:   article.range.to(end), })
            },
            State::Proper { name, range } => {
                Ok(Node::new(NodeKind::Variable(normalize(&name)), range))
            },
            State::Operand(node) => Ok(node),
            State::Composite { shell, child } => {
                if let Shell::Binary { tail, left, .. } = &shell
                   && !matches!(tail, Tail::Done | Tail::Copula)
                {
                    return Err(ParseError::UnfinishedExpression { builder: "comparison",
                                                                  range:   left.range.to(end), });
                }
                shell.close(child.finish(end)?)
            },
        }
    }
}

impl Shell {
    /// Combines the known part with the finished child.
    fn close(self, child: Node) -> ParseResult<Node> {
        let node = match self {
            Self::Not(start) => {
                let range = start.to(child.range);
                Node::new(NodeKind::Not(Box::new(child)), range)
            },
            Self::Pop(start) => {
                let range = start.to(child.range);
                Node::new(NodeKind::Pop(Box::new(child)), range)
            },
            Self::Binary { op, left, .. } => {
                let range = left.range.to(child.range);
                Node::new(NodeKind::Binary { op,
                                             left,
                                             right: Box::new(child) },
                          range)
            },
            Self::Index(target) => {
                let range = target.range.to(child.range);
                Node::new(NodeKind::Index { target,
                                            index: Box::new(child) },
                          range)
            },
            Self::Call(callee) => {
                let range = callee.range.to(child.range);
                let arguments = match child.kind {
                    NodeKind::List(arguments) => arguments,
                    other => {
                        return Err(ParseError::UnexpectedExpressionKind { expected: "argument list",
                                                                          found:    other.name(),
                                                                          range:    child.range, });
                    },
                };
                Node::new(NodeKind::Call { callee, arguments }, range)
            },
        };
        Ok(node)
    }
}

impl Child {
    fn value(mode: Mode) -> Self {
        Self::Value(Box::new(ValueBuilder::new(mode)))
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Value(builder) => builder.is_complete(),
            Self::List(list) => list.is_complete(),
        }
    }

    fn push(self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        Ok(match self {
            Self::Value(builder) => builder.push(lexeme)?.map(|b| Self::Value(Box::new(b))),
            Self::List(list) => list.push(lexeme)?.map(|l| Self::List(Box::new(l))),
        })
    }

    fn finish(self, end: Range) -> ParseResult<Node> {
        match self {
            Self::Value(builder) => builder.finish(end),
            Self::List(list) => list.finish(end),
        }
    }
}

/// Recognises an operator keyword allowed in `mode`.
fn operator(lexeme: &Lexeme, mode: Mode) -> Option<Operator> {
    let word = lexeme.word()?;
    if word == "at" {
        return Some(Operator::Index);
    }
    if mode != Mode::Value {
        return None;
    }
    if word == "taking" {
        return Some(Operator::Call);
    }
    if let Some(op) = keywords::connective(&word) {
        return Some(Operator::Binary(op, Tail::Done));
    }
    if keywords::is_copula(&word) {
        return Some(Operator::Binary(BinaryOperator::Equal, Tail::Copula));
    }
    if keywords::is_negated_copula(&word) {
        return Some(Operator::Binary(BinaryOperator::NotEqual, Tail::Done));
    }
    None
}

/// Advances a comparison that is still being spelled out.
///
/// Returns `None` when the lexeme does not belong to the comparison, which
/// settles it as plain equality.
fn refine(op: BinaryOperator,
          tail: Tail,
          lexeme: &Lexeme)
          -> ParseResult<Option<(BinaryOperator, Tail)>> {
    let word = lexeme.word();
    let word = word.as_deref();

    match tail {
        Tail::Copula => Ok(match word {
            Some("not") => Some((BinaryOperator::NotEqual, Tail::Done)),
            Some("as") => Some((op, Tail::As)),
            Some(w) => keywords::strict_comparison(w).map(|op| (op, Tail::Than)),
            None => None,
        }),
        Tail::Than => match word {
            Some("than") => Ok(Some((op, Tail::Done))),
            _ => Err(unexpected_word(lexeme, "'than'")),
        },
        Tail::As => match word.and_then(keywords::inclusive_comparison) {
            Some(op) => Ok(Some((op, Tail::SecondAs))),
            None => Err(unexpected_word(lexeme, "'high', 'low' or a synonym")),
        },
        Tail::SecondAs => match word {
            Some("as") => Ok(Some((op, Tail::Done))),
            _ => Err(unexpected_word(lexeme, "'as'")),
        },
        Tail::Done => Ok(None),
    }
}

/// Converts a number lexeme.
fn parse_number(lexeme: &Lexeme) -> ParseResult<f64> {
    lexeme.literal
          .parse::<f64>()
          .map_err(|_| ParseError::InvalidNumber { literal: lexeme.literal.clone(),
                                                   range:   lexeme.range, })
}

/// Lower-cases a name and collapses its whitespace to single spaces.
///
/// ## Example
/// ```
/// use lyric::interpreter::parser::value::normalize;
///
/// assert_eq!(normalize("Doctor  Feelgood"), "doctor feelgood");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
