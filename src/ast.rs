use std::fmt;

use crate::interpreter::lexer::position::Range;

/// A node of the abstract syntax tree.
///
/// Nodes own their children by value, so a tree never shares or cycles. The
/// range covers the source text of the node and all its children; it exists
/// for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node is.
    pub kind:  NodeKind,
    /// Where the node came from.
    pub range: Range,
}

impl Node {
    /// Creates a node.
    #[must_use]
    pub const fn new(kind: NodeKind, range: Range) -> Self {
        Self { kind, range }
    }

    /// Creates a boxed node, the shape child slots use.
    #[must_use]
    pub fn boxed(kind: NodeKind, range: Range) -> Box<Self> {
        Box::new(Self::new(kind, range))
    }

    /// Returns `true` if the node names a storage slot: a variable, a pronoun
    /// or an indexed location.
    ///
    /// ## Example
    /// ```
    /// use lyric::{ast::{Node, NodeKind}, interpreter::lexer::position::Range};
    ///
    /// let name = Node::new(NodeKind::Variable("my heart".into()), Range::default());
    /// let five = Node::new(NodeKind::Number(5.0), Range::default());
    /// assert!(name.is_location());
    /// assert!(!five.is_location());
    /// ```
    #[must_use]
    pub const fn is_location(&self) -> bool {
        matches!(self.kind,
                 NodeKind::Variable(_) | NodeKind::Pronoun(_) | NodeKind::Index { .. })
    }

    /// Returns `true` if the node produces a value when evaluated.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self.kind,
                 NodeKind::Number(_)
                 | NodeKind::String(_)
                 | NodeKind::Boolean(_)
                 | NodeKind::Null
                 | NodeKind::Mysterious
                 | NodeKind::Variable(_)
                 | NodeKind::Pronoun(_)
                 | NodeKind::Index { .. }
                 | NodeKind::List(_)
                 | NodeKind::Binary { .. }
                 | NodeKind::Not(_)
                 | NodeKind::Call { .. }
                 | NodeKind::Pop(_))
    }
}

/// The target, destination and argument of the in-place string and array
/// mutations (`cast`, `split` and `join`).
///
/// Without a destination the result is written back to the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    /// The location read, and written when there is no destination.
    pub source:      Box<Node>,
    /// Where the result goes, from `into`.
    pub destination: Option<Box<Node>>,
    /// The radix for `cast`, the delimiter for `split` and `join`.
    pub argument:    Option<Box<Node>>,
}

/// The closed set of syntactic forms.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A number literal.
    Number(f64),
    /// A string literal.
    String(String),
    /// A boolean literal.
    Boolean(bool),
    /// The null literal.
    Null,
    /// The mysterious literal.
    Mysterious,
    /// A variable reference by normalized name: lower case, single spaces.
    Variable(String),
    /// A pronoun, resolved at run time to the last assigned variable.
    Pronoun(String),
    /// `target at index`.
    Index {
        /// The indexed value.
        target: Box<Node>,
        /// The key.
        index:  Box<Node>,
    },
    /// A comma-separated list of values.
    List(Vec<Node>),
    /// An arithmetic, comparison or boolean operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Node>,
        /// Right operand.
        right: Box<Node>,
    },
    /// Logical negation.
    Not(Box<Node>),
    /// `callee taking arguments`.
    Call {
        /// The called function, always a variable.
        callee:    Box<Node>,
        /// Argument expressions, in order.
        arguments: Vec<Node>,
    },
    /// Removes and returns the last auto-indexed entry of an array.
    Pop(Box<Node>),

    /// Stores a value in a location.
    Assign {
        /// Where to store.
        target: Box<Node>,
        /// What to store.
        value:  Box<Node>,
    },
    /// Reads one value from the input callback, optionally storing it.
    Input(Option<Box<Node>>),
    /// Hands a value to the output callback.
    Output(Box<Node>),
    /// Appends values to an array, creating it when needed.
    Push {
        /// The array location.
        target: Box<Node>,
        /// The pushed values. Empty for a bare `rock X`.
        values: Vec<Node>,
    },
    /// Splits a string into an array.
    Split(Mutation),
    /// Joins an array into a string.
    Join(Mutation),
    /// Converts between strings and numbers.
    Cast(Mutation),
    /// Rounds a number in place.
    Round {
        /// The rounded location.
        target: Box<Node>,
        /// Which way to round.
        mode:   RoundMode,
    },
    /// `if`, with an optional `else` block.
    Conditional {
        /// The condition.
        condition:  Box<Node>,
        /// Runs when the condition is truthy.
        then_block: Vec<Node>,
        /// Runs otherwise. Empty when absent.
        else_block: Vec<Node>,
    },
    /// `while` or `until`.
    Loop {
        /// Checked before every iteration.
        condition: Box<Node>,
        /// The loop body.
        body:      Vec<Node>,
        /// `true` for `until`, which runs while the condition is falsy.
        until:     bool,
    },
    /// A function declaration.
    Function {
        /// The normalized function name.
        name:       String,
        /// Normalized parameter names, in order.
        parameters: Vec<String>,
        /// The function body.
        body:       Vec<Node>,
    },
    /// Returns a value from the enclosing function.
    Return(Box<Node>),
    /// Leaves the enclosing loop.
    Break,
    /// Starts the next iteration of the enclosing loop.
    Continue,
    /// Separates the two blocks of a conditional. Never evaluated.
    Else,
    /// An empty statement. Closes the innermost open block.
    NoOp,
}

impl NodeKind {
    /// A short description used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
            Self::Mysterious => "mysterious",
            Self::Variable(_) => "variable",
            Self::Pronoun(_) => "pronoun",
            Self::Index { .. } => "index",
            Self::List(_) => "list",
            Self::Binary { .. } => "operation",
            Self::Not(_) => "negation",
            Self::Call { .. } => "call",
            Self::Pop(_) => "pop",
            Self::Assign { .. } => "assignment",
            Self::Input(_) => "input",
            Self::Output(_) => "output",
            Self::Push { .. } => "push",
            Self::Split(_) => "split",
            Self::Join(_) => "join",
            Self::Cast(_) => "cast",
            Self::Round { .. } => "rounding",
            Self::Conditional { .. } => "conditional",
            Self::Loop { .. } => "loop",
            Self::Function { .. } => "function declaration",
            Self::Return(_) => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Else => "else",
            Self::NoOp => "empty statement",
        }
    }
}

/// The direction of a `turn` statement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundMode {
    /// `turn up`: towards positive infinity.
    Up,
    /// `turn down`: towards negative infinity.
    Down,
    /// `turn round` / `turn around`: to the nearest integer, half away from
    /// zero.
    Nearest,
}

/// Represents a binary operator.
///
/// Every operator has a rank used by the parser for precedence climbing; a
/// higher rank binds tighter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `plus`, `with`
    Add,
    /// `minus`, `without`
    Sub,
    /// `times`, `of`
    Mul,
    /// `over`, `between`
    Div,
    /// `is`
    Equal,
    /// `is not`, `ain't`, `isn't` ...
    NotEqual,
    /// `is higher than`
    Greater,
    /// `is lower than`
    Less,
    /// `is as high as`
    GreaterEqual,
    /// `is as low as`
    LessEqual,
    /// `and`
    And,
    /// `or`
    Or,
    /// `nor`
    Nor,
}

impl BinaryOperator {
    /// The binding strength of the operator.
    ///
    /// ## Example
    /// ```
    /// use lyric::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Mul.rank() > BinaryOperator::Add.rank());
    /// assert!(BinaryOperator::Equal.rank() > BinaryOperator::And.rank());
    /// ```
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::And | Self::Or | Self::Nor => 1,
            Self::Equal
            | Self::NotEqual
            | Self::Greater
            | Self::Less
            | Self::GreaterEqual
            | Self::LessEqual => 2,
            Self::Add | Self::Sub => 3,
            Self::Mul | Self::Div => 4,
        }
    }

    /// Returns `true` for `and`, `or` and `nor`.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Nor)
    }

    /// Returns `true` for the comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        self.rank() == 2
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "plus",
            Self::Sub => "minus",
            Self::Mul => "times",
            Self::Div => "over",
            Self::Equal => "is",
            Self::NotEqual => "is not",
            Self::Greater => "is higher than",
            Self::Less => "is lower than",
            Self::GreaterEqual => "is as high as",
            Self::LessEqual => "is as low as",
            Self::And => "and",
            Self::Or => "or",
            Self::Nor => "nor",
        };
        write!(f, "{operator}")
    }
}
