//! Backtracking evaluation of grammar rules over a token stream
//!
//! `Ok(None)` is an ordinary no-match: the stream is back where it started
//! and the enclosing combinator decides what to do next. `Err` aborts the
//! whole run.

use super::production::{ProductionDef, ProductionRegistry};
use super::rule::GrammarRule;
use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::syntax::element::{Element, Node};
use crate::syntax::error::{GrammarError, SyntaxError, SyntaxResult};
use crate::tokens::TokenStream;

pub struct Matcher<'g> {
    registry: &'g ProductionRegistry,
    depth: usize,
    max_depth: usize,
}

impl<'g> Matcher<'g> {
    pub fn new(registry: &'g ProductionRegistry) -> Self {
        Self::with_max_depth(registry, MAX_PARSE_DEPTH)
    }

    pub fn with_max_depth(registry: &'g ProductionRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            depth: 0,
            max_depth,
        }
    }

    /// Match one production at the stream's position
    pub fn match_production(
        &mut self,
        def: &'g ProductionDef,
        stream: &mut TokenStream,
    ) -> SyntaxResult<Option<Element>> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::max_recursion_depth(&def.name, self.max_depth));
        }

        self.depth += 1;
        let result = match &def.rule {
            GrammarRule::Repeat { rule, .. } if def.absorbs_repeat() => {
                self.match_repetitions(rule, stream).map(Some)
            }
            rule => self.match_rule(rule, stream),
        };
        self.depth -= 1;

        Ok(result?.map(|tail| Element::new(def.name.clone(), tail)))
    }

    /// Match any rule, returning the children it contributes
    pub fn match_rule(
        &mut self,
        rule: &'g GrammarRule,
        stream: &mut TokenStream,
    ) -> SyntaxResult<Option<Vec<Node>>> {
        match rule {
            GrammarRule::Terminal(terminal) => match stream.current() {
                Some(token) if terminal.matches(token) => {
                    let token = token.clone();
                    stream.advance();
                    Ok(Some(vec![Node::Token(token)]))
                }
                _ => Ok(None),
            },

            GrammarRule::And(rules) => stream.attempt(|stream| {
                let mut children = Vec::new();
                for rule in rules {
                    match self.match_rule(rule, stream)? {
                        Some(matched) => children.extend(matched),
                        None => return Ok(None),
                    }
                }
                Ok(Some(children))
            }),

            GrammarRule::Or(rules) => {
                for rule in rules {
                    if let Some(children) = self.match_rule(rule, stream)? {
                        return Ok(Some(children));
                    }
                }
                Ok(None)
            }

            GrammarRule::Not(inner) => {
                let checkpoint = stream.checkpoint();
                let matched = self.match_rule(inner, stream)?;
                stream.restore(checkpoint);
                Ok(match matched {
                    Some(_) => None,
                    None => Some(Vec::new()),
                })
            }

            GrammarRule::Optional(inner) => {
                Ok(Some(self.match_rule(inner, stream)?.unwrap_or_default()))
            }

            GrammarRule::Repeat { rule: inner, .. } => {
                let tail = self.match_repetitions(inner, stream)?;
                if tail.is_empty() {
                    return Ok(Some(Vec::new()));
                }
                let head = rule.repeat_label().unwrap_or_else(|| "*".to_string());
                Ok(Some(vec![Node::Element(Element::new(head, tail))]))
            }

            GrammarRule::Call(name) => {
                let def = self.registry.get(name).ok_or_else(|| {
                    GrammarError::UndefinedProduction {
                        name: name.clone(),
                        referenced_by: String::new(),
                    }
                })?;
                Ok(self
                    .match_production(def, stream)?
                    .map(|element| vec![Node::Element(element)]))
            }
        }
    }

    /// Greedy zero-or-more; stops at the first iteration that fails or
    /// consumes nothing
    fn match_repetitions(
        &mut self,
        rule: &'g GrammarRule,
        stream: &mut TokenStream,
    ) -> SyntaxResult<Vec<Node>> {
        let mut tail = Vec::new();
        loop {
            let checkpoint = stream.checkpoint();
            match self.match_rule(rule, stream)? {
                Some(children) if stream.consumed_since(checkpoint) > 0 => tail.extend(children),
                _ => {
                    stream.restore(checkpoint);
                    return Ok(tail);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::kinds;
    use crate::tokens::Token;
    use assert_matches::assert_matches;

    fn stream(items: &[(&str, crate::tokens::TokenType)]) -> TokenStream {
        TokenStream::new(
            items
                .iter()
                .map(|(lexeme, kind)| Token::bare(*lexeme, kind.clone()))
                .collect(),
        )
    }

    fn heads(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node {
                Node::Element(element) => element.head.clone(),
                Node::Token(token) => token.lexeme.clone(),
            })
            .collect()
    }

    #[test]
    fn test_and_restores_on_failure() {
        let registry = ProductionRegistry::new();
        let rule = GrammarRule::and(vec![GrammarRule::terminal("a"), GrammarRule::terminal("b")]);
        let mut tokens = stream(&[("a", kinds::WORD), ("c", kinds::WORD)]);

        let mut matcher = Matcher::new(&registry);
        assert_eq!(matcher.match_rule(&rule, &mut tokens), Ok(None));
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn test_or_commits_to_first_success() {
        let registry = ProductionRegistry::new();
        let rule = GrammarRule::or(vec![
            GrammarRule::terminal_type(kinds::WORD),
            GrammarRule::terminal("a"),
        ]);
        let mut tokens = stream(&[("a", kinds::WORD)]);
        let children = Matcher::new(&registry)
            .match_rule(&rule, &mut tokens)
            .unwrap()
            .unwrap();
        assert_eq!(heads(&children), vec!["a"]);
        assert!(tokens.is_at_end());
    }

    #[test]
    fn test_not_and_optional_never_consume_on_failure() {
        let registry = ProductionRegistry::new();
        let mut tokens = stream(&[("a", kinds::WORD)]);
        let mut matcher = Matcher::new(&registry);

        let not_b = GrammarRule::not(GrammarRule::terminal("b"));
        assert_eq!(matcher.match_rule(&not_b, &mut tokens), Ok(Some(vec![])));
        let not_a = GrammarRule::not(GrammarRule::terminal("a"));
        assert_eq!(matcher.match_rule(&not_a, &mut tokens), Ok(None));
        let maybe_b = GrammarRule::optional(GrammarRule::terminal("b"));
        assert_eq!(matcher.match_rule(&maybe_b, &mut tokens), Ok(Some(vec![])));
        assert_eq!(tokens.position(), 0);
    }

    #[test]
    fn test_repeat_wraps_and_skips_empty() {
        let mut registry = ProductionRegistry::new();
        registry
            .register("number", GrammarRule::terminal_type(kinds::UINT))
            .unwrap();
        let rule = GrammarRule::repeat(GrammarRule::call("number"));

        let mut tokens = stream(&[("1", kinds::UINT), ("2", kinds::UINT), ("x", kinds::WORD)]);
        let children = Matcher::new(&registry)
            .match_rule(&rule, &mut tokens)
            .unwrap()
            .unwrap();
        assert_eq!(heads(&children), vec!["*number"]);
        let wrapper = children[0].as_element().unwrap();
        assert_eq!(heads(&wrapper.tail), vec!["number", "number"]);
        assert_eq!(tokens.position(), 2);

        let mut tokens = stream(&[("x", kinds::WORD)]);
        assert_eq!(
            Matcher::new(&registry).match_rule(&rule, &mut tokens),
            Ok(Some(vec![]))
        );
    }

    #[test]
    fn test_left_recursion_hits_depth_limit() {
        let mut registry = ProductionRegistry::new();
        registry
            .register(
                "expr",
                GrammarRule::and(vec![GrammarRule::call("expr"), GrammarRule::terminal("+")]),
            )
            .unwrap();
        let def = registry.get("expr").unwrap();
        let mut tokens = stream(&[("1", kinds::UINT)]);

        assert_matches!(
            Matcher::with_max_depth(&registry, 16).match_production(def, &mut tokens),
            Err(SyntaxError::MaxRecursionDepth { depth: 16, .. })
        );
    }
}
