//! Core lexical analyzer
//!
//! Walks the input once, asking the rule table for the first rule matching
//! at the current offset and emitting its token. Every character ends up in
//! exactly one token, or tokenizing fails at the first character no rule
//! accepts.

use super::catalog::default_rule_table;
use super::rules::RuleTable;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_info, log_success};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unrecognized character {character:?} at line {line}, column {column}")]
    UnrecognizedCharacter {
        character: char,
        offset: usize,
        line: u32,
        column: u32,
    },

    #[error("Input too large: {size} bytes (max {MAX_INPUT_SIZE})")]
    InputTooLarge { size: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Lexeme too long: {length} bytes at offset {offset} (max {MAX_LEXEME_LENGTH})")]
    LexemeTooLong { length: usize, offset: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
            LexerError::InputTooLarge { .. } => codes::lexical::INPUT_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
        }
    }

    /// Location of the offending character, when there is one
    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::UnrecognizedCharacter {
                character,
                offset,
                line,
                column,
            } => Some(Span::of_char(Position::new(*offset, *line, *column), *character)),
            _ => None,
        }
    }
}

/// Lexical analysis metrics for the last tokenize call
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub whitespace_tokens: usize,
    pub comment_tokens: usize,
    pub longest_lexeme: usize,
    pub input_bytes: usize,

    // Runtime preference-controlled metrics
    pub type_counts: BTreeMap<String, usize>,
    #[serde(skip)]
    pub elapsed: Option<Duration>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }
        if token.is_whitespace() {
            self.whitespace_tokens += 1;
        } else if token.is_comment() {
            self.comment_tokens += 1;
        }
        self.longest_lexeme = self.longest_lexeme.max(token.lexeme.len());

        if preferences.track_type_counts {
            *self
                .type_counts
                .entry(token.kind.to_string())
                .or_insert(0) += 1;
        }
    }
}

/// Rule-table driven lexical analyzer
pub struct LexicalAnalyzer {
    rules: RuleTable,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    /// Analyzer over the complete built-in catalog
    pub fn new() -> Self {
        Self::with_rules(default_rule_table())
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self {
            rules,
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self::new().preferences(preferences)
    }

    /// Replace the runtime preferences, keeping the rule table
    pub fn preferences(mut self, preferences: LexicalPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Split `text` into tokens covering every character in order
    pub fn tokenize(&mut self, text: &str) -> Result<Vec<Token>, LexerError> {
        self.metrics = LexicalMetrics {
            input_bytes: text.len(),
            ..LexicalMetrics::default()
        };
        let started = self.preferences.log_timing.then(Instant::now);

        log_debug!("Starting lexical analysis",
            "input_bytes" => text.len(),
            "rules" => self.rules.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let result = self.scan(text);
        self.metrics.elapsed = started.map(|start| start.elapsed());

        match &result {
            Ok(tokens) => self.report_success(tokens),
            Err(error) => self.report_failure(error),
        }
        result
    }

    /// Tokenize straight into a [`TokenStream`] ready for the parser
    pub fn tokenize_stream(&mut self, text: &str) -> Result<TokenStream, LexerError> {
        self.tokenize(text).map(TokenStream::new)
    }

    fn scan(&mut self, text: &str) -> Result<Vec<Token>, LexerError> {
        if text.len() > MAX_INPUT_SIZE {
            return Err(LexerError::InputTooLarge { size: text.len() });
        }

        let mut tokens = Vec::new();
        let mut offset = 0;
        let mut position = Position::start();

        while offset < text.len() {
            let Some((rule, end)) = self.rules.first_match(text, offset) else {
                return Err(LexerError::UnrecognizedCharacter {
                    character: text[offset..].chars().next().unwrap_or_default(),
                    offset,
                    line: position.line,
                    column: position.column,
                });
            };

            let lexeme = &text[offset..end];
            if lexeme.len() > MAX_LEXEME_LENGTH {
                return Err(LexerError::LexemeTooLong {
                    length: lexeme.len(),
                    offset,
                });
            }
            if tokens.len() >= MAX_TOKEN_COUNT {
                return Err(LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                });
            }

            let next = position.advance_str(lexeme);
            let token = Token::new(lexeme, rule.kind.clone(), Span::new(position, next));
            self.metrics.record_token(&token, &self.preferences);
            tokens.push(token);

            position = next;
            offset = end;
        }

        Ok(tokens)
    }

    fn report_success(&self, tokens: &[Token]) {
        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "tokens" => tokens.len(),
            "input_bytes" => self.metrics.input_bytes
        );

        if self.preferences.collect_detailed_metrics {
            log_debug!("Lexical metrics",
                "whitespace_tokens" => self.metrics.whitespace_tokens,
                "comment_tokens" => self.metrics.comment_tokens,
                "longest_lexeme" => self.metrics.longest_lexeme
            );
        }
        if self.preferences.track_type_counts {
            for (kind, count) in &self.metrics.type_counts {
                log_debug!("Token type count", "type" => kind, "count" => count);
            }
        }
        if let Some(elapsed) = self.metrics.elapsed {
            if crate::logging::config::log_performance_events() {
                log_info!("Tokenization timing",
                    "elapsed_us" => elapsed.as_micros(),
                    "tokens" => tokens.len()
                );
            }
        }
    }

    fn report_failure(&self, error: &LexerError) {
        let message = error.to_string();
        match (error.span(), self.preferences.include_position_in_errors) {
            (Some(span), true) => log_error!(error.error_code(), &message, span = span,
                "offset" => span.start.offset,
                "tokens_before_failure" => self.metrics.total_tokens
            ),
            _ => log_error!(error.error_code(), &message,
                "tokens_before_failure" => self.metrics.total_tokens
            ),
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pairs(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.lexeme.as_str(), t.kind.as_str())).collect()
    }

    #[test]
    fn test_total_coverage() {
        let text = "x = (-2+1j) # complex\n\ty /* multi\nline */ 'q\\'s' 0b11";
        let tokens = LexicalAnalyzer::new().tokenize(text).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_spans_follow_lines() {
        let tokens = LexicalAnalyzer::new().tokenize("a\n  b").unwrap();
        let b = tokens.last().unwrap();
        assert_eq!(b.lexeme, "b");
        assert_eq!((b.span.start.line, b.span.start.column), (2, 3));
        assert_eq!(b.span.start.offset, 4);
    }

    #[test]
    fn test_unrecognized_character_position() {
        let error = LexicalAnalyzer::new().tokenize("ab\n c\u{7}").unwrap_err();
        assert_matches!(
            error,
            LexerError::UnrecognizedCharacter {
                character: '\u{7}',
                offset: 5,
                line: 2,
                column: 3
            }
        );
        assert_eq!(error.error_code(), codes::lexical::UNRECOGNIZED_CHARACTER);
        assert_eq!(error.span().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_restricted_table() {
        let table = crate::lexical::RuleBuilder::new().add_numbers().build();
        let mut analyzer = LexicalAnalyzer::with_rules(table);
        assert_eq!(pairs(&analyzer.tokenize("12-3").unwrap()), vec![("12", "UINT"), ("-3", "INT")]);
        assert_matches!(
            analyzer.tokenize("1 2"),
            Err(LexerError::UnrecognizedCharacter { character: ' ', .. })
        );
    }

    #[test]
    fn test_metrics_follow_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            track_type_counts: true,
            include_position_in_errors: true,
            log_timing: true,
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        analyzer.tokenize("a  b # c").unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 6);
        assert_eq!(metrics.whitespace_tokens, 3);
        assert_eq!(metrics.comment_tokens, 1);
        assert_eq!(metrics.type_counts.get("BLANK"), Some(&3));
        assert_eq!(metrics.type_counts.get("WORD"), Some(&2));
        assert!(metrics.elapsed.is_some());
    }

    #[test]
    fn test_empty_input() {
        let mut analyzer = LexicalAnalyzer::default();
        assert!(analyzer.tokenize("").unwrap().is_empty());
        assert!(analyzer.tokenize_stream("").unwrap().is_empty());
    }
}
