//! Pattern primitives for token rules
//!
//! A [`Pattern`] is a small, regex-like tree evaluated directly against the
//! source text at a byte offset. Alternatives are tried in order and
//! repetitions are greedy, giving back iterations only when the rest of the
//! enclosing sequence fails to match. Each repetition step keeps the first
//! match of its sub-pattern, so nothing inside a single iteration is retried.

use serde::{Deserialize, Serialize};

/// One member of a [`CharSet`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClass {
    Char(char),
    Range(char, char),
    /// Unicode alphanumerics plus `_`
    Word,
    Whitespace,
}

impl CharClass {
    fn contains(&self, ch: char) -> bool {
        match self {
            CharClass::Char(c) => *c == ch,
            CharClass::Range(lo, hi) => (*lo..=*hi).contains(&ch),
            CharClass::Word => ch.is_alphanumeric() || ch == '_',
            CharClass::Whitespace => ch.is_whitespace(),
        }
    }
}

/// Set of characters used by [`Pattern::InSet`] and [`Pattern::NotInSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSet {
    classes: Vec<CharClass>,
}

impl CharSet {
    /// Every character of `chars`
    pub fn of(chars: &str) -> Self {
        Self {
            classes: chars.chars().map(CharClass::Char).collect(),
        }
    }

    pub fn range(lo: char, hi: char) -> Self {
        Self::default().with_range(lo, hi)
    }

    pub fn digits() -> Self {
        Self::range('0', '9')
    }

    pub fn word() -> Self {
        Self {
            classes: vec![CharClass::Word],
        }
    }

    pub fn whitespace() -> Self {
        Self {
            classes: vec![CharClass::Whitespace],
        }
    }

    pub fn with_chars(mut self, chars: &str) -> Self {
        self.classes.extend(chars.chars().map(CharClass::Char));
        self
    }

    pub fn with_range(mut self, lo: char, hi: char) -> Self {
        self.classes.push(CharClass::Range(lo, hi));
        self
    }

    pub fn contains(&self, ch: char) -> bool {
        self.classes.iter().any(|class| class.contains(ch))
    }
}

/// Closed set of lexical pattern primitives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// Exact text
    Literal(String),
    /// Exactly one character, provided the text here does not start with the literal
    NotLiteral(String),
    /// One character from the set
    InSet(CharSet),
    /// One character outside the set
    NotInSet(CharSet),
    /// Between `min` and `max` (unbounded when `None`) greedy repetitions
    Repeat {
        pattern: Box<Pattern>,
        min: usize,
        max: Option<usize>,
    },
    Sequence(Vec<Pattern>),
    /// First alternative that lets the rest of the pattern match
    Alternation(Vec<Pattern>),
    Optional(Box<Pattern>),
    /// Any single character
    Any,
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::Literal(text.into())
    }

    pub fn not_literal(text: impl Into<String>) -> Self {
        Pattern::NotLiteral(text.into())
    }

    pub fn in_set(set: CharSet) -> Self {
        Pattern::InSet(set)
    }

    pub fn not_in_set(set: CharSet) -> Self {
        Pattern::NotInSet(set)
    }

    pub fn repeat(pattern: Pattern, min: usize, max: Option<usize>) -> Self {
        Pattern::Repeat {
            pattern: Box::new(pattern),
            min,
            max,
        }
    }

    pub fn zero_or_more(pattern: Pattern) -> Self {
        Self::repeat(pattern, 0, None)
    }

    pub fn one_or_more(pattern: Pattern) -> Self {
        Self::repeat(pattern, 1, None)
    }

    pub fn seq(patterns: Vec<Pattern>) -> Self {
        Pattern::Sequence(patterns)
    }

    pub fn alt(patterns: Vec<Pattern>) -> Self {
        Pattern::Alternation(patterns)
    }

    pub fn optional(pattern: Pattern) -> Self {
        Pattern::Optional(Box::new(pattern))
    }

    pub fn any() -> Self {
        Pattern::Any
    }

    /// Byte offset where the preferred non-empty match starting at `start` ends
    pub fn match_at(&self, text: &str, start: usize) -> Option<usize> {
        let mut end = None;
        self.walk(text, start, &mut |pos| {
            if pos > start {
                end = Some(pos);
                true
            } else {
                false
            }
        });
        end
    }

    /// Like [`Pattern::match_at`] but an empty match counts
    fn first_end(&self, text: &str, start: usize) -> Option<usize> {
        let mut end = None;
        self.walk(text, start, &mut |pos| {
            end = Some(pos);
            true
        });
        end
    }

    /// Feed every end position this pattern can reach from `pos`, in
    /// preference order, to `next` until it accepts one.
    fn walk(&self, text: &str, pos: usize, next: &mut dyn FnMut(usize) -> bool) -> bool {
        match self {
            Pattern::Literal(literal) => text[pos..].starts_with(literal.as_str()) && next(pos + literal.len()),
            Pattern::NotLiteral(literal) => {
                let rest = &text[pos..];
                match rest.chars().next() {
                    Some(ch) if literal.is_empty() || !rest.starts_with(literal.as_str()) => {
                        next(pos + ch.len_utf8())
                    }
                    _ => false,
                }
            }
            Pattern::InSet(set) => match text[pos..].chars().next() {
                Some(ch) if set.contains(ch) => next(pos + ch.len_utf8()),
                _ => false,
            },
            Pattern::NotInSet(set) => match text[pos..].chars().next() {
                Some(ch) if !set.contains(ch) => next(pos + ch.len_utf8()),
                _ => false,
            },
            Pattern::Any => match text[pos..].chars().next() {
                Some(ch) => next(pos + ch.len_utf8()),
                None => false,
            },
            Pattern::Sequence(items) => walk_sequence(items, text, pos, next),
            Pattern::Alternation(options) => options.iter().any(|option| option.walk(text, pos, &mut *next)),
            Pattern::Optional(inner) => inner.walk(text, pos, &mut *next) || next(pos),
            Pattern::Repeat { pattern, min, max } => {
                let mut ends = vec![pos];
                let mut cursor = pos;
                while max.map_or(true, |max| ends.len() - 1 < max) {
                    match pattern.first_end(text, cursor) {
                        Some(end) if end > cursor => {
                            ends.push(end);
                            cursor = end;
                        }
                        // An empty iteration only helps to reach the minimum
                        Some(end) if ends.len() - 1 < *min => ends.push(end),
                        _ => break,
                    }
                }
                if ends.len() - 1 < *min {
                    return false;
                }
                ends[*min..].iter().rev().any(|end| next(*end))
            }
        }
    }
}

fn walk_sequence(
    items: &[Pattern],
    text: &str,
    pos: usize,
    next: &mut dyn FnMut(usize) -> bool,
) -> bool {
    match items.split_first() {
        None => next(pos),
        Some((head, rest)) => head.walk(text, pos, &mut |mid| walk_sequence(rest, text, mid, &mut *next)),
    }
}
