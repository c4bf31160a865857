//! Cursor over an immutable token sequence with checkpoint/restore
//!
//! Every grammar attempt is bracketed by a checkpoint; a failed attempt
//! leaves the cursor exactly where it started.

use super::token::Token;
use crate::utils::Span;

/// Saved cursor value. Restoring is O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Token index the checkpoint points at
    pub fn index(self) -> usize {
        self.0
    }
}

/// Token sequence plus cursor. The sequence itself is never modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    // === CORE NAVIGATION ===

    /// Token at the cursor, `None` once the stream is exhausted
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Token `n` places after the cursor
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume the token at the cursor and return it
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Move the cursor forward by `count` tokens, stopping at the end
    pub fn advance_by(&mut self, count: usize) {
        self.position = (self.position + count).min(self.tokens.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    /// Rewind to the first token
    pub fn reset(&mut self) {
        self.position = 0;
    }

    // === BACKTRACKING ===

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0.min(self.tokens.len());
    }

    /// Tokens consumed since `checkpoint`
    pub fn consumed_since(&self, checkpoint: Checkpoint) -> usize {
        self.position.saturating_sub(checkpoint.0)
    }

    /// Run `attempt`; keep its progress only when it yields a value.
    ///
    /// `Ok(None)` and `Err(_)` both rewind the cursor to where it was.
    pub fn attempt<T, E, F>(&mut self, attempt: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&mut Self) -> Result<Option<T>, E>,
    {
        let checkpoint = self.checkpoint();
        let outcome = attempt(self);
        if !matches!(outcome, Ok(Some(_))) {
            self.restore(checkpoint);
        }
        outcome
    }

    /// Run `attempt` and always rewind. A success reports how many tokens
    /// it would have consumed.
    pub fn probe<T, E, F>(&mut self, attempt: F) -> Result<Option<(T, usize)>, E>
    where
        F: FnOnce(&mut Self) -> Result<Option<T>, E>,
    {
        let checkpoint = self.checkpoint();
        let outcome = attempt(self);
        let consumed = self.consumed_since(checkpoint);
        self.restore(checkpoint);
        Ok(outcome?.map(|value| (value, consumed)))
    }

    // === INSPECTION ===

    /// Span of the token at the cursor, or an empty span just past the last token
    pub fn current_span(&self) -> Span {
        match (self.current(), self.tokens.last()) {
            (Some(token), _) => token.span,
            (None, Some(last)) => Span::point(last.span.end),
            (None, None) => Span::dummy(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Tokens from the cursor to the end
    pub fn remaining_tokens(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    /// Short description for debug logs
    pub fn diagnostic(&self) -> String {
        let current = self
            .current()
            .map(|token| token.to_string())
            .unwrap_or_else(|| "<end>".to_string());
        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.tokens.len(),
            current
        )
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
