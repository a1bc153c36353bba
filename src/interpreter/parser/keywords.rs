use crate::ast::{BinaryOperator, NodeKind, RoundMode};

/// Words that start a two-word common variable such as `my heart`.
pub const ARTICLES: &[&str] = &["a", "an", "the", "my", "your", "our"];

/// Words that refer back to the most recently assigned variable.
pub const PRONOUNS: &[&str] = &["it", "he", "she", "him", "her", "they", "them", "ze", "hir",
                                "zie", "zir", "xe", "xem", "ve", "ver"];

const TRUE: &[&str] = &["true", "right", "yes", "ok"];
const FALSE: &[&str] = &["false", "wrong", "no", "lies"];
const NULL: &[&str] = &["null", "nothing", "nowhere", "nobody", "gone"];
const MYSTERIOUS: &[&str] = &["mysterious"];
const EMPTY: &[&str] = &["empty", "silent", "silence"];

/// `is` and its relatives. Start a poetic literal after a location at the
/// start of a statement, and an equality test anywhere else.
pub const COPULAS: &[&str] = &["is", "are", "was", "were", "'s", "'re"];
/// Negated copulas, which always mean "not equal".
pub const NEGATED_COPULAS: &[&str] = &["isn't", "aren't", "wasn't", "weren't", "ain't"];

/// Words that turn the rest of the line into a string after a location.
pub const SAYS: &[&str] = &["say", "says", "said"];
/// Words that start a function's parameter list.
pub const TAKES: &[&str] = &["takes", "wants"];

const GREATER: &[&str] = &["higher", "greater", "bigger", "stronger"];
const LESS: &[&str] = &["lower", "less", "smaller", "weaker"];
const GREATER_EQUAL: &[&str] = &["high", "great", "big", "strong"];
const LESS_EQUAL: &[&str] = &["low", "little", "small", "weak"];

const ARITHMETIC: &[(&str, BinaryOperator)] = &[("plus", BinaryOperator::Add),
                                                ("with", BinaryOperator::Add),
                                                ("minus", BinaryOperator::Sub),
                                                ("without", BinaryOperator::Sub),
                                                ("times", BinaryOperator::Mul),
                                                ("of", BinaryOperator::Mul),
                                                ("over", BinaryOperator::Div),
                                                ("between", BinaryOperator::Div),
                                                ("and", BinaryOperator::And),
                                                ("or", BinaryOperator::Or),
                                                ("nor", BinaryOperator::Nor)];

/// Words that open a statement.
const STATEMENT: &[&str] = &["let", "be", "put", "into", "say", "shout", "whisper", "scream",
                             "listen", "to", "build", "up", "knock", "down", "turn", "round",
                             "around", "rock", "push", "roll", "pop", "cast", "burn", "split",
                             "cut", "shatter", "join", "unite", "if", "else", "otherwise",
                             "while", "until", "break", "continue", "return", "give", "send",
                             "take", "back", "takes", "wants", "taking", "says", "said", "not",
                             "at", "than", "as"];

fn contains(set: &[&str], word: &str) -> bool {
    set.contains(&word)
}

/// Returns `true` for a common-noun article.
#[must_use]
pub fn is_article(word: &str) -> bool {
    contains(ARTICLES, word)
}

/// Returns `true` for a pronoun.
#[must_use]
pub fn is_pronoun(word: &str) -> bool {
    contains(PRONOUNS, word)
}

/// Returns `true` for a copula, including the contracted `'s` and `'re`.
#[must_use]
pub fn is_copula(word: &str) -> bool {
    contains(COPULAS, word)
}

/// Returns `true` for a negated copula such as `ain't`.
#[must_use]
pub fn is_negated_copula(word: &str) -> bool {
    contains(NEGATED_COPULAS, word)
}

/// Returns `true` for `say`, `says` and `said`.
#[must_use]
pub fn is_says(word: &str) -> bool {
    contains(SAYS, word)
}

/// Returns `true` for `takes` and `wants`.
#[must_use]
pub fn is_takes(word: &str) -> bool {
    contains(TAKES, word)
}

/// Maps a constant keyword to its literal.
///
/// ## Example
/// ```
/// use lyric::{ast::NodeKind, interpreter::parser::keywords::constant};
///
/// assert_eq!(constant("lies"), Some(NodeKind::Boolean(false)));
/// assert_eq!(constant("silence"), Some(NodeKind::String(String::new())));
/// assert_eq!(constant("guitar"), None);
/// ```
#[must_use]
pub fn constant(word: &str) -> Option<NodeKind> {
    if contains(TRUE, word) {
        Some(NodeKind::Boolean(true))
    } else if contains(FALSE, word) {
        Some(NodeKind::Boolean(false))
    } else if contains(NULL, word) {
        Some(NodeKind::Null)
    } else if contains(MYSTERIOUS, word) {
        Some(NodeKind::Mysterious)
    } else if contains(EMPTY, word) {
        Some(NodeKind::String(String::new()))
    } else {
        None
    }
}

/// Maps an arithmetic or boolean connective to its operator.
///
/// Comparisons are not covered; they start with a copula and are refined by
/// the words that follow.
#[must_use]
pub fn connective(word: &str) -> Option<BinaryOperator> {
    ARITHMETIC.iter()
              .find(|(keyword, _)| *keyword == word)
              .map(|(_, op)| *op)
}

/// The strict comparison selected by the word after a copula, as in
/// `is higher than`.
#[must_use]
pub fn strict_comparison(word: &str) -> Option<BinaryOperator> {
    if contains(GREATER, word) {
        Some(BinaryOperator::Greater)
    } else if contains(LESS, word) {
        Some(BinaryOperator::Less)
    } else {
        None
    }
}

/// The inclusive comparison selected by the word inside `is as ... as`.
#[must_use]
pub fn inclusive_comparison(word: &str) -> Option<BinaryOperator> {
    if contains(GREATER_EQUAL, word) {
        Some(BinaryOperator::GreaterEqual)
    } else if contains(LESS_EQUAL, word) {
        Some(BinaryOperator::LessEqual)
    } else {
        None
    }
}

/// Maps the direction word of a `turn` statement.
#[must_use]
pub fn round_mode(word: &str) -> Option<RoundMode> {
    match word {
        "up" => Some(RoundMode::Up),
        "down" => Some(RoundMode::Down),
        "round" | "around" => Some(RoundMode::Nearest),
        _ => None,
    }
}

/// Returns `true` if `word` belongs to any keyword set and so cannot name a
/// variable.
///
/// ## Example
/// ```
/// use lyric::interpreter::parser::keywords::is_reserved;
///
/// assert!(is_reserved("into"));
/// assert!(is_reserved("nothing"));
/// assert!(!is_reserved("heart"));
/// ```
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    is_article(word)
    || is_pronoun(word)
    || constant(word).is_some()
    || is_copula(word)
    || is_negated_copula(word)
    || connective(word).is_some()
    || strict_comparison(word).is_some()
    || contains(STATEMENT, word)
}
