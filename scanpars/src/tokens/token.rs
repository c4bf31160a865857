//! Tokens and their type labels
use crate::lexical::catalog::kinds;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Type label of a token, as assigned by the rule that matched it.
///
/// Labels compare by content, so a label built at runtime equals the
/// corresponding constant from [`kinds`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(Cow<'static, str>);

impl TokenType {
    /// Label backed by a static string; usable in `const` items
    pub const fn new_static(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    pub fn new(label: impl Into<String>) -> Self {
        Self(Cow::Owned(label.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Line terminators, tabs, four-space units and single blanks
    pub fn is_whitespace(&self) -> bool {
        kinds::WHITESPACE.contains(self)
    }

    /// Block and end-of-line comments
    pub fn is_comment(&self) -> bool {
        kinds::COMMENTS.contains(self)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenType {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for TokenType {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

/// A classified slice of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Exact source text, quotes, signs and prefixes included
    pub lexeme: String,
    #[serde(rename = "type")]
    pub kind: TokenType,
    pub span: Span,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenType, span: Span) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            span,
        }
    }

    /// Token without a meaningful location, for hand-built streams
    pub fn bare(lexeme: impl Into<String>, kind: TokenType) -> Self {
        Self::new(lexeme, kind, Span::dummy())
    }

    /// The `(lexeme, type)` pair
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.lexeme, self.kind.as_str())
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {})", self.lexeme, self.kind)
    }
}
