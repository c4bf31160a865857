//! Grammar combinators
//!
//! A [`GrammarRule`] is a closed tree of combinators. Productions are
//! referenced by name through [`GrammarRule::Call`] and resolved against the
//! registry while matching, so forward and recursive references need no
//! special handling at construction time.

use super::production::Production;
use crate::tokens::{Token, TokenType};
use std::fmt;

/// Matches one token by lexeme, by type, or by both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    value: Option<String>,
    kind: Option<TokenType>,
}

impl Terminal {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            kind: None,
        }
    }

    pub fn kind(kind: impl Into<TokenType>) -> Self {
        Self {
            value: None,
            kind: Some(kind.into()),
        }
    }

    pub fn exact(value: impl Into<String>, kind: impl Into<TokenType>) -> Self {
        Self {
            value: Some(value.into()),
            kind: Some(kind.into()),
        }
    }

    pub fn expected_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn expected_kind(&self) -> Option<&TokenType> {
        self.kind.as_ref()
    }

    /// Every configured field must equal the token's
    pub fn matches(&self, token: &Token) -> bool {
        self.value.as_deref().map_or(true, |value| token.lexeme == value)
            && self.kind.as_ref().map_or(true, |kind| &token.kind == kind)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, &self.kind) {
            (Some(value), Some(kind)) => write!(f, "{:?}:{}", value, kind),
            (Some(value), None) => write!(f, "{:?}", value),
            (None, Some(kind)) => write!(f, "{}", kind),
            (None, None) => f.write_str("<empty>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarRule {
    Terminal(Terminal),
    /// Every sub-rule in order
    And(Vec<GrammarRule>),
    /// First sub-rule that matches
    Or(Vec<GrammarRule>),
    /// Succeeds without consuming iff the sub-rule fails
    Not(Box<GrammarRule>),
    Optional(Box<GrammarRule>),
    /// Greedy zero-or-more, wrapped into a `*name` element
    Repeat {
        rule: Box<GrammarRule>,
        name: Option<String>,
    },
    /// Reference to a registered production by name
    Call(String),
}

impl GrammarRule {
    pub fn terminal(value: impl Into<String>) -> Self {
        GrammarRule::Terminal(Terminal::value(value))
    }

    pub fn terminal_type(kind: impl Into<TokenType>) -> Self {
        GrammarRule::Terminal(Terminal::kind(kind))
    }

    pub fn terminal_exact(value: impl Into<String>, kind: impl Into<TokenType>) -> Self {
        GrammarRule::Terminal(Terminal::exact(value, kind))
    }

    pub fn and(rules: Vec<GrammarRule>) -> Self {
        GrammarRule::And(rules)
    }

    pub fn or(rules: Vec<GrammarRule>) -> Self {
        GrammarRule::Or(rules)
    }

    pub fn not(rule: impl Into<GrammarRule>) -> Self {
        GrammarRule::Not(Box::new(rule.into()))
    }

    pub fn optional(rule: impl Into<GrammarRule>) -> Self {
        GrammarRule::Optional(Box::new(rule.into()))
    }

    /// Repeat named after the production it calls
    pub fn repeat(rule: impl Into<GrammarRule>) -> Self {
        GrammarRule::Repeat {
            rule: Box::new(rule.into()),
            name: None,
        }
    }

    pub fn repeat_named(rule: impl Into<GrammarRule>, name: impl Into<String>) -> Self {
        GrammarRule::Repeat {
            rule: Box::new(rule.into()),
            name: Some(name.into()),
        }
    }

    pub fn call(name: impl Into<String>) -> Self {
        GrammarRule::Call(name.into())
    }

    /// Head of the wrapper element a repeat produces, if it can be named
    pub fn repeat_label(&self) -> Option<String> {
        match self {
            GrammarRule::Repeat {
                name: Some(name), ..
            } => Some(format!("*{}", name)),
            GrammarRule::Repeat { rule, name: None } => match rule.as_ref() {
                GrammarRule::Call(target) => Some(format!("*{}", target)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Immediate sub-rules
    pub fn children(&self) -> &[GrammarRule] {
        match self {
            GrammarRule::And(rules) | GrammarRule::Or(rules) => rules,
            GrammarRule::Not(rule) | GrammarRule::Optional(rule) => std::slice::from_ref(&**rule),
            GrammarRule::Repeat { rule, .. } => std::slice::from_ref(&**rule),
            GrammarRule::Terminal(_) | GrammarRule::Call(_) => &[],
        }
    }

    /// Names of every production this rule calls, in order of appearance
    pub fn calls(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut pending = vec![self];
        while let Some(rule) = pending.pop() {
            if let GrammarRule::Call(name) = rule {
                names.push(name.as_str());
            }
            pending.extend(rule.children().iter().rev());
        }
        names
    }
}

impl From<Terminal> for GrammarRule {
    fn from(terminal: Terminal) -> Self {
        GrammarRule::Terminal(terminal)
    }
}

impl From<&Production> for GrammarRule {
    fn from(production: &Production) -> Self {
        GrammarRule::Call(production.name().to_string())
    }
}

impl From<Production> for GrammarRule {
    fn from(production: Production) -> Self {
        GrammarRule::from(&production)
    }
}

impl fmt::Display for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |rules: &[GrammarRule], sep: &str| {
            rules
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(sep)
        };
        match self {
            GrammarRule::Terminal(terminal) => write!(f, "{}", terminal),
            GrammarRule::And(rules) => write!(f, "({})", join(rules, " ")),
            GrammarRule::Or(rules) => write!(f, "({})", join(rules, " | ")),
            GrammarRule::Not(rule) => write!(f, "!{}", rule),
            GrammarRule::Optional(rule) => write!(f, "{}?", rule),
            GrammarRule::Repeat { rule, name: None } => write!(f, "{}*", rule),
            GrammarRule::Repeat {
                rule,
                name: Some(name),
            } => write!(f, "{}*<{}>", rule, name),
            GrammarRule::Call(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::kinds;

    #[test]
    fn test_terminal_matching_requires_every_field() {
        let minus = Token::bare("-", kinds::MINUS);
        assert!(Terminal::value("-").matches(&minus));
        assert!(Terminal::kind(kinds::MINUS).matches(&minus));
        assert!(Terminal::exact("-", kinds::MINUS).matches(&minus));
        assert!(!Terminal::exact("-", kinds::PLUS).matches(&minus));
        assert!(!Terminal::value("+").matches(&minus));
    }

    #[test]
    fn test_repeat_labels() {
        assert_eq!(
            GrammarRule::repeat(GrammarRule::call("number")).repeat_label(),
            Some("*number".to_string())
        );
        assert_eq!(
            GrammarRule::repeat_named(GrammarRule::terminal("a"), "as").repeat_label(),
            Some("*as".to_string())
        );
        assert_eq!(GrammarRule::repeat(GrammarRule::terminal("a")).repeat_label(), None);
    }

    #[test]
    fn test_calls_in_order() {
        let rule = GrammarRule::and(vec![
            GrammarRule::optional(GrammarRule::call("minus")),
            GrammarRule::or(vec![GrammarRule::call("number"), GrammarRule::terminal("x")]),
            GrammarRule::not(GrammarRule::call("minus")),
        ]);
        assert_eq!(rule.calls(), vec!["minus", "number", "minus"]);
    }

    #[test]
    fn test_display() {
        let rule = GrammarRule::and(vec![
            GrammarRule::optional(GrammarRule::call("minus")),
            GrammarRule::repeat(GrammarRule::terminal_type(kinds::UINT)),
        ]);
        assert_eq!(rule.to_string(), "(minus? UINT*)");
    }
}
