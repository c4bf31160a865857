//! Syntax analysis: tokens to element trees
//!
//! Productions are registered on a [`Parser`], input tokens are supplied
//! with [`Parser::set_input`], and [`Parser::run`] returns the tree.

pub mod element;
pub mod error;
pub mod parser;

pub use element::{Element, Flat, Node, REPEAT_PREFIX, ROOT_LABEL};
pub use error::{GrammarError, SyntaxError, SyntaxResult};
pub use parser::Parser;

use crate::grammar::GrammarRule;
use crate::tokens::Token;

/// Register `productions` in order on a fresh parser and run it over `tokens`
pub fn parse_with<'a, I>(productions: I, tokens: Vec<Token>) -> SyntaxResult<Element>
where
    I: IntoIterator<Item = (&'a str, GrammarRule)>,
{
    let mut parser = Parser::new();
    for (name, rule) in productions {
        parser.production(name, rule)?;
    }
    parser.set_input(tokens);
    parser.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::{kinds, sanitizer, tokenize};

    #[test]
    fn test_parse_with() {
        let tokens = sanitizer::whitespace(tokenize("a b").unwrap(), &[]);
        let root = parse_with(
            vec![(
                "words",
                GrammarRule::repeat(GrammarRule::terminal_type(kinds::WORD)),
            )],
            tokens,
        )
        .unwrap();
        assert_eq!(
            root.to_string(),
            "---root---, words, (\"a\", WORD), (\"b\", WORD)"
        );
    }
}
