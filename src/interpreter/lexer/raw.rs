use logos::{Lexer, Logos};

/// Raw token classes recognised by the `logos` automaton.
///
/// The automaton only finds where each lexeme starts and which scan applies;
/// the irregular scans (balanced comments, escaped strings, speculative
/// numbers) are done by callbacks. Characters no pattern accepts come back as
/// errors and are folded into whitespace by [`super::core::Lexer`].
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    /// `( ... )`, nested parentheses allowed.
    #[token("(", scan_comment)]
    Comment,
    /// `"..."` with the decoded contents.
    #[token("\"", scan_string)]
    String(String),
    /// `'` followed by zero or more letters.
    #[regex(r"'\p{L}*")]
    Contraction,
    /// A run of letters.
    #[regex(r"\p{L}+")]
    Identifier,
    /// A digit, sign or dot, extended by [`scan_number`].
    #[regex(r"[0-9+\-.]", scan_number)]
    Number,
    /// `\n` or `\r\n`.
    #[regex(r"\r?\n")]
    Newline,
    /// `,` or `&`.
    #[token(",")]
    #[token("&")]
    Delimiter,
    /// Blanks.
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,
}

/// Consumes a comment body up to the parenthesis that balances the opening
/// one. An unterminated comment runs to the end of the input.
fn scan_comment(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder();
    let mut depth = 1_usize;
    let mut consumed = rest.len();

    for (index, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    consumed = index + c.len_utf8();
                    break;
                }
            },
            _ => {},
        }
    }

    lex.bump(consumed);
}

/// Consumes a string body and returns its decoded text.
///
/// Recognised escapes are `\n`, `\r`, `\t`, `\\` and `\"`; any other escape
/// keeps both characters. An unterminated string runs to the end of the
/// input.
fn scan_string(lex: &mut Lexer<RawToken>) -> String {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut consumed = rest.len();
    let mut chars = rest.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => {
                consumed = index + 1;
                break;
            },
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 't')) => value.push('\t'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '"')) => value.push('"'),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                },
                None => value.push('\\'),
            },
            _ => value.push(c),
        }
    }

    lex.bump(consumed);
    value
}

/// Which parts of a number are still acceptable while scanning.
struct NumberScan {
    digits:      bool,
    dot_ok:      bool,
    exponent_ok: bool,
    sign_ok:     bool,
}

impl NumberScan {
    fn starting_with(first: char) -> Self {
        Self { digits:      first.is_ascii_digit(),
               dot_ok:      first != '.',
               exponent_ok: true,
               sign_ok:     false, }
    }

    /// Decides whether `c` extends the number; `after` is the text following
    /// `c`, used to look one step past an exponent marker.
    fn accept(&mut self, c: char, after: &str) -> bool {
        match c {
            '0'..='9' => {
                self.digits = true;
                self.sign_ok = false;
                true
            },
            '.' if self.dot_ok => {
                self.dot_ok = false;
                self.sign_ok = false;
                true
            },
            'e' | 'E' if self.digits && self.exponent_ok && exponent_follows(after) => {
                self.exponent_ok = false;
                self.dot_ok = false;
                self.sign_ok = true;
                true
            },
            '+' | '-' if self.sign_ok => {
                self.sign_ok = false;
                true
            },
            _ => false,
        }
    }
}

fn exponent_follows(after: &str) -> bool {
    let mut chars = after.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Extends a speculative number as far as it stays well-formed.
///
/// A lone sign or dot is not a number and is reported as whitespace instead.
fn scan_number(lex: &mut Lexer<RawToken>) -> RawToken {
    let first = lex.slice().chars().next().unwrap_or('.');
    let rest = lex.remainder();
    let mut scan = NumberScan::starting_with(first);
    let mut consumed = 0;

    for (index, c) in rest.char_indices() {
        let next = index + c.len_utf8();
        if !scan.accept(c, &rest[next..]) {
            break;
        }
        consumed = next;
    }

    lex.bump(consumed);

    if consumed == 0 && !first.is_ascii_digit() {
        RawToken::Whitespace
    } else {
        RawToken::Number
    }
}
