//! Token rules and the ordered table the lexer evaluates

use super::pattern::Pattern;
use crate::tokens::TokenType;

/// A pattern paired with the type label it assigns
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRule {
    pub pattern: Pattern,
    pub kind: TokenType,
}

impl TokenRule {
    pub fn new(pattern: Pattern, kind: TokenType) -> Self {
        Self { pattern, kind }
    }
}

/// Rules in priority order; the first rule matching at a position wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    rules: Vec<TokenRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: TokenRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Priority of the first rule carrying `kind`, if any
    pub fn priority_of(&self, kind: &TokenType) -> Option<usize> {
        self.rules.iter().position(|rule| &rule.kind == kind)
    }

    /// First rule that matches at `offset`, with the end of its match
    pub fn first_match(&self, text: &str, offset: usize) -> Option<(&TokenRule, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.pattern.match_at(text, offset).map(|end| (rule, end)))
    }
}

impl FromIterator<TokenRule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = TokenRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<TokenRule> for RuleTable {
    fn extend<I: IntoIterator<Item = TokenRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

/// Build a table from `(pattern, type)` pairs, keeping their order as priority
pub fn build_rule_table<I, K>(rules: I) -> RuleTable
where
    I: IntoIterator<Item = (Pattern, K)>,
    K: Into<TokenType>,
{
    rules
        .into_iter()
        .map(|(pattern, kind)| TokenRule::new(pattern, kind.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::pattern::CharSet;

    #[test]
    fn test_first_rule_wins_over_longer_match() {
        let table = build_rule_table(vec![
            (Pattern::literal("a"), "A"),
            (Pattern::one_or_more(Pattern::in_set(CharSet::of("ab"))), "AB"),
        ]);

        let (rule, end) = table.first_match("abab", 0).unwrap();
        assert_eq!(rule.kind.as_str(), "A");
        assert_eq!(end, 1);

        let (rule, end) = table.first_match("abab", 1).unwrap();
        assert_eq!(rule.kind.as_str(), "AB");
        assert_eq!(end, 4);
    }

    #[test]
    fn test_priorities_follow_insertion_order() {
        let table = build_rule_table(vec![
            (Pattern::literal("x"), TokenType::new("X")),
            (Pattern::literal("y"), TokenType::new("Y")),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.priority_of(&TokenType::new("Y")), Some(1));
        assert_eq!(table.priority_of(&TokenType::new("Z")), None);
        assert!(table.first_match("z", 0).is_none());
    }
}
