//! Path-glob ignore rules -- suppress matching subtrees from diff output.
//!
//! Patterns are matched against full slash-delimited path strings, case
//! sensitively, with `fnmatch`-style semantics:
//!
//! - `*` matches any run of characters, including `/`
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]` character classes; `[!...]` negates
//!
//! A pattern that never matches any path is permitted. A pattern that cannot
//! be compiled (unterminated character class) is rejected when the set is
//! built.

use crate::error::{DiffError, Result};

/// One compiled matcher element.
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(char),
    /// `*` -- any run of characters, `/` included.
    AnyRun,
    /// `?` -- exactly one character.
    AnyOne,
    Class { negated: bool, ranges: Vec<(char, char)> },
}

/// A single ignore rule: the original pattern text plus its compiled form.
#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    tokens: Vec<Token>,
}

/// An immutable set of ignore rules, compiled once per comparison run.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    rules: Vec<Rule>,
}

impl IgnoreSet {
    /// Compile a set of glob patterns. Fails on the first malformed pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let tokens = compile(pattern).map_err(|message| DiffError::Pattern {
                pattern: pattern.to_owned(),
                message,
            })?;
            rules.push(Rule {
                pattern: pattern.to_owned(),
                tokens,
            });
        }
        Ok(Self { rules })
    }

    /// An empty set that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if `path` matches any rule. The caller is expected to prune the
    /// whole subtree below a matching path.
    pub fn is_ignored(&self, path: &str) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let chars: Vec<char> = path.chars().collect();
        self.rules.iter().any(|rule| matches(&rule.tokens, &chars))
    }

    /// The original pattern strings, in the order supplied.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|rule| rule.pattern.as_str())
    }
}

/// Compile a glob pattern into tokens. Consecutive `*` collapse into one so
/// matching stays linear in practice.
fn compile(pattern: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
            }
            '?' => tokens.push(Token::AnyOne),
            '[' => tokens.push(parse_class(&mut chars)?),
            other => tokens.push(Token::Literal(other)),
        }
    }
    Ok(tokens)
}

/// Parse a character class body after the opening `[`.
///
/// `!` as the first character negates. A `]` immediately after the opening
/// bracket (or the negation) is a literal member, so `[]]` matches `]`.
/// A `-` at either end of the class is a literal member, not a range.
fn parse_class(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> std::result::Result<Token, String> {
    let mut negated = false;
    if chars.peek() == Some(&'!') {
        negated = true;
        chars.next();
    }

    let mut ranges: Vec<(char, char)> = Vec::new();
    let mut first = true;
    loop {
        let Some(c) = chars.next() else {
            return Err("unterminated character class".to_owned());
        };
        if c == ']' && !first {
            break;
        }
        first = false;

        // `a-z` range, unless the `-` is the last character before `]`.
        if chars.peek() == Some(&'-') {
            let mut lookahead = chars.clone();
            lookahead.next();
            match lookahead.peek() {
                Some(&end) if end != ']' => {
                    chars.next();
                    chars.next();
                    ranges.push((c, end));
                    continue;
                }
                Some(_) => {}
                None => return Err("unterminated character class".to_owned()),
            }
        }
        ranges.push((c, c));
    }

    Ok(Token::Class { negated, ranges })
}

/// Token-by-token matcher. `AnyRun` backtracks over every possible split.
fn matches(tokens: &[Token], text: &[char]) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return text.is_empty();
    };
    match token {
        Token::AnyRun => (0..=text.len()).any(|skip| matches(rest, &text[skip..])),
        Token::AnyOne => !text.is_empty() && matches(rest, &text[1..]),
        Token::Literal(expected) => text
            .split_first()
            .is_some_and(|(c, tail)| c == expected && matches(rest, tail)),
        Token::Class { negated, ranges } => text.split_first().is_some_and(|(c, tail)| {
            let inside = ranges.iter().any(|(lo, hi)| *lo <= *c && *c <= *hi);
            inside != *negated && matches(rest, tail)
        }),
    }
}
