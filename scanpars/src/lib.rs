//! scanpars: a pattern-driven lexer and a backtracking grammar-combinator parser
//!
//! Text is split into [`Token`]s by a priority-ordered [`RuleTable`], and the
//! tokens are parsed by named productions built from [`GrammarRule`]
//! combinators into an [`Element`] tree.

// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::{GrammarRule, Production, Terminal};
pub use lexical::{tokenize, LexerError, RuleBuilder, RuleTable};
pub use syntax::{Element, GrammarError, Node, Parser, SyntaxError, SyntaxResult};
pub use tokens::{Token, TokenStream, TokenType};
