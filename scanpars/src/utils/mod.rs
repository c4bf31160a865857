//! Shared source-location types used by the lexer, the parser and the CLI.

pub mod span;

pub use span::{Position, SourceMap, Span};
