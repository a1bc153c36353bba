/// The lexer module turns source text into lexemes.
///
/// The lexer reads the raw source text and produces a stream of lexemes:
/// words, numbers, strings, comments, delimiters, whitespace and newlines,
/// each with the exact range it covers. A contraction pass then folds
/// apostrophe fragments into the words they belong to.
///
/// # Responsibilities
/// - Classifies every character of the input; lexing never fails.
/// - Tracks line and column positions for diagnostics.
/// - Guarantees that the stream ends with a newline.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from lexemes.
///
/// The parser consumes one lexeme at a time through a family of small
/// builders, one per construct, each of which either absorbs the lexeme,
/// finishes, or hands the lexeme back to its parent.
///
/// # Responsibilities
/// - Recognizes keywords, multi-word names and poetic literals.
/// - Resolves operator precedence.
/// - Collects the bodies of conditionals, loops and functions.
pub mod parser;
/// The evaluator module executes AST nodes.
///
/// The evaluator walks the tree against nested scope frames, performs
/// arithmetic and string operations, resolves pronouns and carries
/// control-flow signals to the loop or function that handles them.
///
/// # Responsibilities
/// - Evaluates every statement and value form.
/// - Implements closures, pronoun resolution and the loop ceiling.
/// - Reports runtime errors such as unfit values or stray `break`s.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its truthiness, equality and rendering.
/// - Implements arrays with stack semantics and function values.
/// - Converts values to and from the host program.
pub mod value;
/// The public entry point: a program, its callbacks and its global
/// variables.
pub mod session;
