//! Token filters applied between the lexer and the parser

use crate::tokens::{Token, TokenType};

/// Drop whitespace tokens whose kind is not listed in `keep`; comments always survive
pub fn whitespace(tokens: Vec<Token>, keep: &[TokenType]) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.is_whitespace() || keep.contains(&token.kind))
        .collect()
}

/// Drop comment tokens
pub fn comments(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.is_comment())
        .collect()
}
