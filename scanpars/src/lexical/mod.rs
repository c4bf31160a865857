//! Lexical analysis
//!
//! Pattern-driven tokenization: a [`RuleTable`] of [`TokenRule`]s is
//! evaluated in priority order at each position and the first rule that
//! matches produces the next token. The built-in catalog lives in
//! [`catalog`]; [`sanitizer`] and [`literal`] post-process the tokens.

pub mod analyzer;
pub mod catalog;
pub mod literal;
pub mod pattern;
pub mod rules;
pub mod sanitizer;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::Token;
use serde::Serialize;
use std::collections::BTreeMap;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use catalog::{default_rule_table, kinds, RuleBuilder};
pub use pattern::{CharSet, Pattern};
pub use rules::{build_rule_table, RuleTable, TokenRule};

/// Tokenize with the built-in catalog and default preferences
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::new().tokenize(text)
}

/// Tokenize with the built-in catalog and custom runtime preferences
pub fn tokenize_with_preferences(
    text: &str,
    preferences: LexicalPreferences,
) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize(text)
}

/// Tokenize with a caller-supplied rule table
pub fn tokenize_with_rules(text: &str, rules: RuleTable) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::with_rules(rules).tokenize(text)
}

// ============================================================================
// TOKEN STATISTICS
// ============================================================================

/// Summary counts over a token sequence
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub whitespace: usize,
    pub comments: usize,
    pub numbers: usize,
    pub strings: usize,
    pub words: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl TokenCounts {
    /// Tokens a parser would see once whitespace is filtered out
    pub fn significant(&self) -> usize {
        self.total - self.whitespace
    }
}

pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in tokens {
        counts.total += 1;
        if token.is_whitespace() {
            counts.whitespace += 1;
        } else if token.is_comment() {
            counts.comments += 1;
        } else if kinds::NUMBERS.contains(&token.kind) {
            counts.numbers += 1;
        } else if kinds::STRINGS.contains(&token.kind) {
            counts.strings += 1;
        } else if token.kind == kinds::WORD {
            counts.words += 1;
        }
        *counts.by_type.entry(token.kind.to_string()).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_tokenize_uses_catalog() {
        let tokens = tokenize("1 - 2").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, vec!["UINT", "BLANK", "MINUS", "BLANK", "UINT"]);
    }

    #[test]
    fn test_token_counts() {
        let tokens = tokenize("x = 'a' + 1.5 # done\n").unwrap();
        let counts = get_token_counts(&tokens);

        assert_eq!(counts.total, tokens.len());
        assert_eq!(counts.words, 1);
        assert_eq!(counts.strings, 1);
        assert_eq!(counts.numbers, 1);
        assert_eq!(counts.comments, 1);
        assert_eq!(counts.by_type.get("BLANK"), Some(&5));
        assert_eq!(counts.by_type.get("LF"), Some(&1));
        assert_eq!(counts.whitespace, 6);
        assert_eq!(counts.significant(), counts.total - 6);
    }
}
