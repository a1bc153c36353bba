use crate::{
    ast::{BinaryOperator, Mutation, Node, NodeKind, RoundMode},
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
            poetic::PoeticBuilder,
            value::{Fed, Mode, ValueBuilder},
        },
    },
};

/// The statements that take a source, an optional destination and an
/// optional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// `cast`, `burn`
    Cast,
    /// `split`, `cut`, `shatter`
    Split,
    /// `join`, `unite`
    Join,
}

/// Which part of a mutation is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The value being converted.
    Source,
    /// The location after `into`.
    Destination,
    /// The value after `with`.
    Argument,
}

/// The statements that open a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Head {
    /// `if`
    If,
    /// `while`
    While,
    /// `until`
    Until,
}

/// Builds one statement, up to and including its line terminator.
///
/// The first word selects the statement form; anything that does not start
/// with a statement keyword is read as an expression, which may still turn
/// into a poetic assignment (`X is ...`, `X says ...`) or a function
/// declaration (`X takes ...`) depending on the word after it.
///
/// Statements that open a block (`if`, `while`, `until` and function
/// declarations) finish with an empty body; the enclosing block builder
/// fills it in.
#[derive(Debug, Clone)]
pub enum StatementBuilder {
    /// Before the first significant lexeme. `blank` is cleared by a comment,
    /// so comment-only lines do not count as empty.
    Start {
        blank: bool,
    },
    /// An expression statement, or the target of a poetic assignment.
    Bare(ValueBuilder),
    /// `X is <poetic literal>`
    Poetic {
        target:  Node,
        literal: PoeticBuilder,
    },
    /// `X says <rest of the line>`
    Says {
        target:  Node,
        text:    String,
        started: bool,
        end:     Range,
    },
    /// `F takes A and B`
    Params {
        name:       Node,
        parameters: Vec<String>,
        current:    ValueBuilder,
        end:        Range,
    },
    /// `let X` before `be`.
    Let {
        start:  Range,
        target: ValueBuilder,
    },
    /// `let X be V`
    LetValue {
        start:  Range,
        target: Node,
        value:  ValueBuilder,
    },
    /// `put V` before `into`.
    Put {
        start: Range,
        value: ValueBuilder,
    },
    /// `put V into X`
    PutTarget {
        start:  Range,
        value:  Node,
        target: ValueBuilder,
    },
    /// `say V`
    Output {
        start: Range,
        value: ValueBuilder,
    },
    /// `listen`, before an optional `to`.
    Listen {
        start: Range,
    },
    /// `listen to X`
    ListenTarget {
        start:  Range,
        target: ValueBuilder,
    },
    /// `build X` / `knock X`, before the first `up` / `down`.
    Adjust {
        start:  Range,
        target: ValueBuilder,
        up:     bool,
    },
    /// `build X up, up`
    AdjustCount {
        start:  Range,
        target: Node,
        up:     bool,
        count:  u32,
        end:    Range,
    },
    /// `turn`, before either the direction or the target.
    Turn {
        start: Range,
    },
    /// `turn up X` or `turn X` before its direction.
    TurnTarget {
        start:  Range,
        mode:   Option<RoundMode>,
        target: ValueBuilder,
    },
    /// `rock X`, before an optional `with`.
    Rock {
        start:  Range,
        target: ValueBuilder,
    },
    /// `rock X with V, W`
    RockValues {
        start:  Range,
        target: Node,
        values: ListBuilder,
    },
    /// `roll X`, before an optional `into`.
    Roll {
        start:  Range,
        source: ValueBuilder,
    },
    /// `roll X into Y`
    RollInto {
        start:       Range,
        source:      Node,
        destination: ValueBuilder,
    },
    /// `cast`, `split` or `join` with its optional parts.
    Mutate {
        start:       Range,
        kind:        MutationKind,
        slot:        Slot,
        current:     ValueBuilder,
        source:      Option<Node>,
        destination: Option<Node>,
        argument:    Option<Node>,
    },
    /// `if C`, `while C`, `until C`
    Condition {
        start:     Range,
        head:      Head,
        condition: ValueBuilder,
    },
    /// `give` or `send`, before `back` or the value.
    Give {
        start: Range,
    },
    /// `return V`, `give back V`, `give V back`
    Return {
        start: Range,
        value: ValueBuilder,
    },
    /// A fixed phrase such as `break it down` or `take it to the top`.
    Phrase {
        node:      Node,
        remaining: &'static [&'static str],
        optional:  bool,
    },
    /// A complete statement waiting for the end of its line.
    Finished(Node),
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder {
    /// Creates a builder for a new line.
    #[must_use]
    pub const fn new() -> Self {
        Self::Start { blank: true }
    }

    /// The name used when reporting errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "statement",
            Self::Bare(_) => "expression",
            Self::Poetic { .. } => "poetic assignment",
            Self::Says { .. } => "poetic string",
            Self::Params { .. } => "function declaration",
            Self::Let { .. } | Self::LetValue { .. } | Self::Put { .. } | Self::PutTarget { .. } => {
                "assignment"
            },
            Self::Output { .. } => "output",
            Self::Listen { .. } | Self::ListenTarget { .. } => "input",
            Self::Adjust { .. } | Self::AdjustCount { .. } => "increment",
            Self::Turn { .. } | Self::TurnTarget { .. } => "rounding",
            Self::Rock { .. } | Self::RockValues { .. } => "push",
            Self::Roll { .. } | Self::RollInto { .. } => "pop",
            Self::Mutate { .. } => "mutation",
            Self::Condition { .. } => "condition",
            Self::Give { .. } | Self::Return { .. } => "return",
            Self::Phrase { .. } => "control flow",
            Self::Finished(_) => "end of statement",
        }
    }

    /// Returns `true` before the first significant lexeme of the line.
    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self, Self::Start { .. })
    }

    /// Feeds one lexeme to the statement.
    ///
    /// # Returns
    /// - `Step::Next` while the statement is incomplete.
    /// - `Step::Done` once the line terminator has been consumed. An empty
    ///   line finishes as [`NodeKind::NoOp`].
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the lexeme does not fit the statement.
    pub fn push(self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        match self {
            Self::Start { blank } => Self::start(blank, lexeme),
            Self::Says { target,
                         text,
                         started,
                         end, } => Ok(Self::says(target, text, started, end, lexeme)),
            Self::Poetic { target, literal } => match literal.push(lexeme)? {
                Step::Next(literal) => Ok(Step::Next(Self::Poetic { target, literal })),
                Step::Done(value) | Step::Yield(value, _) => Ok(Step::Done(assign(target, value))),
            },
            builder if lexeme.is_trivia() => Ok(Step::Next(builder)),
            builder => builder.push_significant(lexeme),
        }
    }

    fn start(blank: bool, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        let start = lexeme.range;
        match lexeme.kind {
            LexemeKind::Whitespace => return Ok(Step::Next(Self::Start { blank })),
            LexemeKind::Comment => return Ok(Step::Next(Self::Start { blank: false })),
            LexemeKind::Newline { .. } if blank => {
                return Ok(Step::Done(Node::new(NodeKind::NoOp, start)));
            },
            LexemeKind::Newline { .. } => return Ok(Step::Next(Self::new())),
            _ => {},
        }

        let Some(word) = lexeme.word() else {
            return Self::Bare(ValueBuilder::new(Mode::Value)).push_significant(lexeme);
        };

        let location = || ValueBuilder::new(Mode::Location);
        let value = || ValueBuilder::new(Mode::Value);
        let mutate = |kind| Self::Mutate { start,
                                           kind,
                                           slot: Slot::Source,
                                           current: ValueBuilder::new(Mode::Key),
                                           source: None,
                                           destination: None,
                                           argument: None };
        let condition = |head| Self::Condition { start,
                                                 head,
                                                 condition: value() };

        let next = match word.as_str() {
            "let" => Self::Let { start,
                                 target: location() },
            "put" => Self::Put { start,
                                 value: value() },
            "say" | "shout" | "whisper" | "scream" => Self::Output { start,
                                                                     value: value() },
            "listen" => Self::Listen { start },
            "build" | "knock" => Self::Adjust { start,
                                                target: location(),
                                                up: word == "build" },
            "turn" => Self::Turn { start },
            "rock" | "push" => Self::Rock { start,
                                            target: location() },
            "roll" | "pop" => Self::Roll { start,
                                           source: location() },
            "cast" | "burn" => mutate(MutationKind::Cast),
            "split" | "cut" | "shatter" => mutate(MutationKind::Split),
            "join" | "unite" => mutate(MutationKind::Join),
            "if" => condition(Head::If),
            "while" => condition(Head::While),
            "until" => condition(Head::Until),
            "else" | "otherwise" => Self::Finished(Node::new(NodeKind::Else, start)),
            "break" => Self::Phrase { node:      Node::new(NodeKind::Break, start),
                                      remaining: &["it", "down"],
                                      optional:  true, },
            "continue" => Self::Finished(Node::new(NodeKind::Continue, start)),
            "take" => Self::Phrase { node:      Node::new(NodeKind::Continue, start),
                                     remaining: &["it", "to", "the", "top"],
                                     optional:  false, },
            "return" => Self::Return { start,
                                       value: value() },
            "give" | "send" => Self::Give { start },
            _ => return Self::Bare(value()).push_significant(lexeme),
        };

        Ok(Step::Next(next))
    }

    /// Collects the rest of the line verbatim, minus one leading blank.
    fn says(target: Node, mut text: String, started: bool, end: Range, lexeme: Lexeme) -> Step<Self> {
        if lexeme.is_newline() {
            let range = target.range.to(end);
            let value = Node::new(NodeKind::String(text), end);
            return Step::Done(Node::new(NodeKind::Assign { target: Box::new(target),
                                                           value:  Box::new(value), },
                                        range));
        }

        let source = lexeme.source();
        if !started && lexeme.kind == LexemeKind::Whitespace {
            let mut chars = source.chars();
            chars.next();
            text.push_str(chars.as_str());
        } else {
            text.push_str(source);
        }

        Step::Next(Self::Says { target,
                                text,
                                started: true,
                                end: lexeme.range })
    }

    #[allow(clippy::too_many_lines)]
    fn push_significant(self, lexeme: Lexeme) -> ParseResult<Step<Self>> {
        let context = self.name();
        let word = lexeme.word();
        let word = word.as_deref();

        match self {
            Self::Bare(builder) => {
                if word.is_some_and(keywords::is_copula) && builder.is_location() {
                    let target = builder.finish(lexeme.range)?;
                    return Ok(Step::Next(Self::Poetic { target,
                                                        literal: PoeticBuilder::new() }));
                }
                if word.is_some_and(keywords::is_says) && builder.is_location() {
                    let target = builder.finish(lexeme.range)?;
                    return Ok(Step::Next(Self::Says { target,
                                                      text: String::new(),
                                                      started: false,
                                                      end: lexeme.range }));
                }
                if word.is_some_and(keywords::is_takes) && builder.is_variable() {
                    let name = builder.finish(lexeme.range)?;
                    return Ok(Step::Next(Self::Params { name,
                                                        parameters: Vec::new(),
                                                        current: ValueBuilder::new(Mode::Location),
                                                        end: lexeme.range }));
                }
                match builder.feed(lexeme)? {
                    Fed::Pending(builder) => Ok(Step::Next(Self::Bare(builder))),
                    Fed::Finished(node, lexeme) => end_with(node, &lexeme, context),
                }
            },
            Self::Params { name,
                           mut parameters,
                           current,
                           end, } => {
                let separator = lexeme.kind == LexemeKind::Delimiter || word == Some("and");
                if current.is_empty() && !parameters.is_empty() && separator {
                    return Ok(Step::Next(Self::Params { name,
                                                        parameters,
                                                        current,
                                                        end }));
                }
                match current.feed(lexeme)? {
                    Fed::Pending(current) => Ok(Step::Next(Self::Params { name,
                                                                          parameters,
                                                                          current,
                                                                          end })),
                    Fed::Finished(parameter, lexeme) => {
                        let parameter_name = match parameter.kind {
                            NodeKind::Variable(parameter_name) => parameter_name,
                            other => {
                                return Err(ParseError::UnexpectedExpressionKind {
                                    expected: "parameter name",
                                    found:    other.name(),
                                    range:    parameter.range,
                                });
                            },
                        };
                        parameters.push(parameter_name);
                        let end = parameter.range;

                        if lexeme.is_newline() {
                            return Ok(Step::Done(function(name, parameters, end)));
                        }
                        let separator = lexeme.kind == LexemeKind::Delimiter
                                        || lexeme.word().as_deref() == Some("and");
                        if !separator {
                            return Err(unexpected(&lexeme, "function declaration"));
                        }
                        Ok(Step::Next(Self::Params { name,
                                                     parameters,
                                                     current: ValueBuilder::new(Mode::Location),
                                                     end }))
                    },
                }
            },
            Self::Let { start, target } => match target.feed(lexeme)? {
                Fed::Pending(target) => Ok(Step::Next(Self::Let { start, target })),
                Fed::Finished(target, lexeme) => {
                    expect_word(&lexeme, "be")?;
                    Ok(Step::Next(Self::LetValue { start,
                                                   target,
                                                   value: ValueBuilder::new(Mode::Value) }))
                },
            },
            Self::LetValue { start,
                             target,
                             value, } => match value.feed(lexeme)? {
                Fed::Pending(value) => Ok(Step::Next(Self::LetValue { start,
                                                                      target,
                                                                      value })),
                Fed::Finished(value, lexeme) => {
                    let node = assign(target, value);
                    end_with(widen(node, start), &lexeme, context)
                },
            },
            Self::Put { start, value } => match value.feed(lexeme)? {
                Fed::Pending(value) => Ok(Step::Next(Self::Put { start, value })),
                Fed::Finished(value, lexeme) => {
                    expect_word(&lexeme, "into")?;
                    Ok(Step::Next(Self::PutTarget { start,
                                                    value,
                                                    target: ValueBuilder::new(Mode::Location) }))
                },
            },
            Self::PutTarget { start,
                              value,
                              target, } => match target.feed(lexeme)? {
                Fed::Pending(target) => Ok(Step::Next(Self::PutTarget { start,
                                                                        value,
                                                                        target })),
                Fed::Finished(target, lexeme) => {
                    let range = start.to(target.range);
                    let node = Node::new(NodeKind::Assign { target: Box::new(target),
                                                            value:  Box::new(value), },
                                         range);
                    end_with(node, &lexeme, context)
                },
            },
            Self::Output { start, value } => match value.feed(lexeme)? {
                Fed::Pending(value) => Ok(Step::Next(Self::Output { start, value })),
                Fed::Finished(value, lexeme) => {
                    let range = start.to(value.range);
                    end_with(Node::new(NodeKind::Output(Box::new(value)), range), &lexeme, context)
                },
            },
            Self::Listen { start } => {
                if lexeme.is_newline() {
                    return Ok(Step::Done(Node::new(NodeKind::Input(None), start)));
                }
                expect_word(&lexeme, "to")?;
                Ok(Step::Next(Self::ListenTarget { start,
                                                   target: ValueBuilder::new(Mode::Location) }))
            },
            Self::ListenTarget { start, target } => match target.feed(lexeme)? {
                Fed::Pending(target) => Ok(Step::Next(Self::ListenTarget { start, target })),
                Fed::Finished(target, lexeme) => {
                    let range = start.to(target.range);
                    end_with(Node::new(NodeKind::Input(Some(Box::new(target))), range),
                             &lexeme,
                             context)
                },
            },
            Self::Adjust { start, target, up } => match target.feed(lexeme)? {
                Fed::Pending(target) => Ok(Step::Next(Self::Adjust { start, target, up })),
                Fed::Finished(target, lexeme) => {
                    expect_word(&lexeme, direction(up))?;
                    Ok(Step::Next(Self::AdjustCount { start,
                                                      target,
                                                      up,
                                                      count: 1,
                                                      end: lexeme.range }))
                },
            },
            Self::AdjustCount { start,
                                target,
                                up,
                                count,
                                end, } => {
                if lexeme.is_newline() {
                    return Ok(Step::Done(adjust(start, target, up, count, end)));
                }
                if lexeme.kind == LexemeKind::Delimiter {
                    return Ok(Step::Next(Self::AdjustCount { start,
                                                             target,
                                                             up,
                                                             count,
                                                             end }));
                }
                expect_word(&lexeme, direction(up))?;
                Ok(Step::Next(Self::AdjustCount { start,
                                                  target,
                                                  up,
                                                  count: count + 1,
                                                  end: lexeme.range }))
            },
            Self::Turn { start } => {
                if let Some(mode) = word.and_then(keywords::round_mode) {
                    return Ok(Step::Next(Self::TurnTarget { start,
                                                            mode: Some(mode),
                                                            target: ValueBuilder::new(Mode::Location) }));
                }
                Self::TurnTarget { start,
                                   mode: None,
                                   target: ValueBuilder::new(Mode::Location) }.push_significant(lexeme)
            },
            Self::TurnTarget { start,
                               mode,
                               target, } => match target.feed(lexeme)? {
                Fed::Pending(target) => Ok(Step::Next(Self::TurnTarget { start,
                                                                         mode,
                                                                         target })),
                Fed::Finished(target, lexeme) => {
                    if let Some(mode) = mode {
                        return end_with(round(start, target, mode, None), &lexeme, context);
                    }
                    let Some(mode) = lexeme.word().as_deref().and_then(keywords::round_mode) else {
                        return Err(unexpected_word(&lexeme, "'up', 'down', 'round' or 'around'"));
                    };
                    Ok(Step::Next(Self::Finished(round(start, target, mode, Some(lexeme.range)))))
                },
            },
            Self::Rock { start, target } => match target.feed(lexeme)? {
                Fed::Pending(target) => Ok(Step::Next(Self::Rock { start, target })),
                Fed::Finished(target, lexeme) => {
                    if lexeme.word().as_deref() == Some("with") {
                        return Ok(Step::Next(Self::RockValues { start,
                                                                target,
                                                                values: ListBuilder::new() }));
                    }
                    end_with(push(start, target, Vec::new(), None), &lexeme, context)
                },
            },
            Self::RockValues { start,
                               target,
                               values, } => match values.push(lexeme)? {
                Step::Next(values) => Ok(Step::Next(Self::RockValues { start,
                                                                       target,
                                                                       values })),
                Step::Done(list) => {
                    let (values, range) = items(list);
                    Ok(Step::Next(Self::Finished(push(start, target, values, Some(range)))))
                },
                Step::Yield(list, lexeme) => {
                    let (values, range) = items(list);
                    end_with(push(start, target, values, Some(range)), &lexeme, context)
                },
            },
            Self::Roll { start, source } => match source.feed(lexeme)? {
                Fed::Pending(source) => Ok(Step::Next(Self::Roll { start, source })),
                Fed::Finished(source, lexeme) => {
                    if lexeme.word().as_deref() == Some("into") {
                        return Ok(Step::Next(Self::RollInto { start,
                                                              source,
                                                              destination:
                                                                  ValueBuilder::new(Mode::Location) }));
                    }
                    let range = start.to(source.range);
                    end_with(Node::new(NodeKind::Pop(Box::new(source)), range), &lexeme, context)
                },
            },
            Self::RollInto { start,
                             source,
                             destination, } => match destination.feed(lexeme)? {
                Fed::Pending(destination) => Ok(Step::Next(Self::RollInto { start,
                                                                            source,
                                                                            destination })),
                Fed::Finished(destination, lexeme) => {
                    let pop_range = start.to(source.range);
                    let pop = Node::new(NodeKind::Pop(Box::new(source)), pop_range);
                    let node = widen(assign(destination, pop), start);
                    end_with(node, &lexeme, context)
                },
            },
            Self::Mutate { start,
                           kind,
                           slot,
                           current,
                           mut source,
                           mut destination,
                           mut argument, } => match current.feed(lexeme)? {
                Fed::Pending(current) => Ok(Step::Next(Self::Mutate { start,
                                                                      kind,
                                                                      slot,
                                                                      current,
                                                                      source,
                                                                      destination,
                                                                      argument })),
                Fed::Finished(node, lexeme) => {
                    match slot {
                        Slot::Source => source = Some(node),
                        Slot::Destination => destination = Some(node),
                        Slot::Argument => argument = Some(node),
                    }

                    if lexeme.is_newline() {
                        return mutation(start, kind, source, destination, argument).map(Step::Done);
                    }

                    let next = match lexeme.word().as_deref() {
                        Some("into") if slot == Slot::Source => {
                            (Slot::Destination, Mode::Location)
                        },
                        Some("with") if argument.is_none() => (Slot::Argument, Mode::Value),
                        _ => return Err(unexpected(&lexeme, context)),
                    };

                    Ok(Step::Next(Self::Mutate { start,
                                                 kind,
                                                 slot: next.0,
                                                 current: ValueBuilder::new(next.1),
                                                 source,
                                                 destination,
                                                 argument }))
                },
            },
            Self::Condition { start,
                              head,
                              condition, } => match condition.feed(lexeme)? {
                Fed::Pending(condition) => Ok(Step::Next(Self::Condition { start,
                                                                           head,
                                                                           condition })),
                Fed::Finished(condition, lexeme) => {
                    end_with(header(start, head, condition), &lexeme, context)
                },
            },
            Self::Give { start } => {
                let value = ValueBuilder::new(Mode::Value);
                if word == Some("back") {
                    return Ok(Step::Next(Self::Return { start, value }));
                }
                Self::Return { start, value }.push_significant(lexeme)
            },
            Self::Return { start, value } => match value.feed(lexeme)? {
                Fed::Pending(value) => Ok(Step::Next(Self::Return { start, value })),
                Fed::Finished(value, lexeme) => {
                    let range = start.to(value.range);
                    let node = Node::new(NodeKind::Return(Box::new(value)), range);
                    if lexeme.word().as_deref() == Some("back") {
                        return Ok(Step::Next(Self::Finished(widen_to(node, lexeme.range))));
                    }
                    end_with(node, &lexeme, context)
                },
            },
            Self::Phrase { node,
                           remaining,
                           optional, } => {
                if lexeme.is_newline() && (remaining.is_empty() || optional) {
                    return Ok(Step::Done(node));
                }
                match remaining.split_first() {
                    Some((expected, rest)) if word == Some(*expected) => {
                        Ok(Step::Next(Self::Phrase { node:      widen_to(node, lexeme.range),
                                                     remaining: rest,
                                                     optional:  false, }))
                    },
                    Some((expected, _)) => Err(unexpected_word(&lexeme, &format!("'{expected}'"))),
                    None => Err(unexpected(&lexeme, context)),
                }
            },
            Self::Finished(node) => end_with(node, &lexeme, context),
            Self::Start { .. } | Self::Says { .. } | Self::Poetic { .. } => {
                Err(unexpected(&lexeme, context))
            },
        }
    }

    /// Completes the statement at the end of the input.
    ///
    /// # Errors
    /// Returns [`ParseError::UnfinishedExpression`] unless the builder is
    /// still at the start of a line.
    pub fn finish(self, end: Range) -> ParseResult<Option<Node>> {
        if self.is_start() {
            return Ok(None);
        }
        Err(ParseError::UnfinishedExpression { builder: self.name(),
                                               range:   end, })
    }
}

/// Ends a statement at the line terminator.
fn end_with(node: Node, lexeme: &Lexeme, builder: &'static str) -> ParseResult<Step<StatementBuilder>> {
    if lexeme.is_newline() {
        Ok(Step::Done(node))
    } else {
        Err(unexpected(lexeme, builder))
    }
}

fn expect_word(lexeme: &Lexeme, expected: &str) -> ParseResult<()> {
    if lexeme.word().as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(unexpected_word(lexeme, &format!("'{expected}'")))
    }
}

const fn direction(up: bool) -> &'static str {
    if up { "up" } else { "down" }
}

/// Stretches a node's range back to the statement keyword.
fn widen(mut node: Node, start: Range) -> Node {
    node.range = start.to(node.range);
    node
}

/// Stretches a node's range forward over a trailing keyword.
fn widen_to(mut node: Node, end: Range) -> Node {
    node.range = node.range.to(end);
    node
}

fn assign(target: Node, value: Node) -> Node {
    let range = target.range.to(value.range);
    Node::new(NodeKind::Assign { target: Box::new(target),
                                 value:  Box::new(value), },
              range)
}

/// `build X up, up` becomes `X = X + 2`.
fn adjust(start: Range, target: Node, up: bool, count: u32, end: Range) -> Node {
    let op = if up { BinaryOperator::Add } else { BinaryOperator::Sub };
    let amount = Node::new(NodeKind::Number(f64::from(count)), end);
    let sum = Node::new(NodeKind::Binary { op,
                                           left: Box::new(target.clone()),
                                           right: Box::new(amount) },
                        target.range.to(end));
    Node::new(NodeKind::Assign { target: Box::new(target),
                                 value:  Box::new(sum), },
              start.to(end))
}

fn round(start: Range, target: Node, mode: RoundMode, end: Option<Range>) -> Node {
    let range = start.to(end.unwrap_or(target.range));
    Node::new(NodeKind::Round { target: Box::new(target),
                                mode },
              range)
}

fn push(start: Range, target: Node, values: Vec<Node>, end: Option<Range>) -> Node {
    let range = start.to(end.unwrap_or(target.range));
    Node::new(NodeKind::Push { target: Box::new(target),
                               values },
              range)
}

/// Unpacks a finished list into its items and range.
fn items(list: Node) -> (Vec<Node>, Range) {
    let range = list.range;
    match list.kind {
        NodeKind::List(items) => (items, range),
        kind => (vec![Node::new(kind, range)], range),
    }
}

fn mutation(start: Range,
            kind: MutationKind,
            source: Option<Node>,
            destination: Option<Node>,
            argument: Option<Node>)
            -> ParseResult<Node> {
    let Some(source) = source else {
        return Err(ParseError::UnfinishedExpression { builder: "mutation",
                                                      range:   start, });
    };
    if destination.is_none() && !source.is_location() {
        return Err(ParseError::UnexpectedExpressionKind { expected: "location",
                                                          found:    source.kind.name(),
                                                          range:    source.range, });
    }

    let end = [argument.as_ref(), destination.as_ref(), Some(&source)].into_iter()
                                                                       .flatten()
                                                                       .map(|n| n.range)
                                                                       .max_by_key(|r| r.end)
                                                                       .unwrap_or(start);
    let mutation = Mutation { source:      Box::new(source),
                              destination: destination.map(Box::new),
                              argument:    argument.map(Box::new), };
    let kind = match kind {
        MutationKind::Cast => NodeKind::Cast(mutation),
        MutationKind::Split => NodeKind::Split(mutation),
        MutationKind::Join => NodeKind::Join(mutation),
    };
    Ok(Node::new(kind, start.to(end)))
}

/// A block-opening statement with an empty body.
fn header(start: Range, head: Head, condition: Node) -> Node {
    let range = start.to(condition.range);
    let condition = Box::new(condition);
    let kind = match head {
        Head::If => NodeKind::Conditional { condition,
                                            then_block: Vec::new(),
                                            else_block: Vec::new() },
        Head::While => NodeKind::Loop { condition,
                                        body: Vec::new(),
                                        until: false },
        Head::Until => NodeKind::Loop { condition,
                                        body: Vec::new(),
                                        until: true },
    };
    Node::new(kind, range)
}

fn function(name: Node, parameters: Vec<String>, end: Range) -> Node {
    let range = name.range.to(end);
    let name = match name.kind {
        NodeKind::Variable(name) => name,
        _ => String::new(),
    };
    Node::new(NodeKind::Function { name,
                                   parameters,
                                   body: Vec::new() },
              range)
}
