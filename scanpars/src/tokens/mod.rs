//! Token model shared by the lexer and the parser
//!
//! The lexer produces an ordered `Vec<Token>` covering every character of
//! its input; the parser reads it through a [`TokenStream`].
//!
//! ## Key Components
//!
//! - **[`TokenType`]** - Open-ended type label assigned by a token rule
//!   (`"UINT"`, `"WORD"`, `"BLANK"`, ...). The built-in labels live in
//!   [`crate::lexical::catalog::kinds`]; custom rule tables may use any label.
//! - **[`Token`]** - Verbatim lexeme, type label and source span. Tokens are
//!   never mutated after the lexer creates them.
//! - **[`TokenStream`]** - Read-only token sequence plus an integer cursor.
//!   Backtracking is a [`Checkpoint`] (the cursor value) and a restore;
//!   [`TokenStream::attempt`] and [`TokenStream::probe`] wrap a match attempt
//!   so the rollback cannot be forgotten.
//!
//! ## Debug Representation
//!
//! A token renders as its `(lexeme, type)` pair, e.g. `("-2", INT)`.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenType};
pub use token_stream::{Checkpoint, TokenStream};

pub use crate::utils::{Position, Span};
