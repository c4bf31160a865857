//! Production-driven parser
//!
//! The parser owns a [`ProductionRegistry`] and an input [`TokenStream`].
//! A run repeatedly tries every production at the current position, keeps
//! the one that consumes the most tokens (the earliest declared on a tie),
//! and appends its element to the root until the input is used up.

use crate::config::compile_time::syntax::*;
use crate::config::runtime::ParserPreferences;
use crate::grammar::{validate, GrammarRule, Matcher, Production, ProductionRegistry};
use crate::logging::codes;
use crate::syntax::element::{Element, Node};
use crate::syntax::error::{GrammarError, SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenStream};
use crate::{log_debug, log_error, log_info, log_success};
use std::collections::VecDeque;

pub struct Parser {
    registry: ProductionRegistry,
    input: Option<TokenStream>,
    preferences: ParserPreferences,
    validated: bool,
    error_history: VecDeque<SyntaxError>,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_preferences(ParserPreferences::default())
    }

    pub fn with_preferences(preferences: ParserPreferences) -> Self {
        Self {
            registry: ProductionRegistry::new(),
            input: None,
            preferences,
            validated: false,
            error_history: VecDeque::new(),
        }
    }

    /// Register a named rule; it becomes both a call target and a top-level alternative
    pub fn production(
        &mut self,
        name: &str,
        rule: impl Into<GrammarRule>,
    ) -> Result<Production, GrammarError> {
        let rule = rule.into();
        log_debug!("Registering production", "name" => name, "rule" => &rule);

        match self.registry.register(name, rule) {
            Ok(production) => {
                self.validated = false;
                log_success!(codes::success::PRODUCTION_REGISTERED, "Production registered",
                    "name" => name,
                    "index" => production.index()
                );
                Ok(production)
            }
            Err(error) => {
                log_error!(error.error_code(), "Production registration failed",
                    "name" => name,
                    "error" => &error
                );
                Err(error)
            }
        }
    }

    pub fn register_production(
        &mut self,
        name: &str,
        rule: impl Into<GrammarRule>,
    ) -> Result<Production, GrammarError> {
        self.production(name, rule)
    }

    /// Rule that calls a registered production
    pub fn call(&self, production: &Production) -> GrammarRule {
        GrammarRule::from(production)
    }

    pub fn set_input(&mut self, tokens: Vec<Token>) {
        log_debug!("Parser input set", "tokens" => tokens.len());
        self.input = Some(TokenStream::new(tokens));
    }

    pub fn registry(&self) -> &ProductionRegistry {
        &self.registry
    }

    pub fn preferences(&self) -> &ParserPreferences {
        &self.preferences
    }

    /// Most recent failed runs, oldest first
    pub fn error_history(&self) -> impl Iterator<Item = &SyntaxError> {
        self.error_history.iter()
    }

    /// Check every call resolves and no repeat can loop without consuming
    pub fn validate(&mut self) -> Result<(), GrammarError> {
        validate(&self.registry)?;
        self.validated = true;
        log_success!(codes::success::GRAMMAR_VALIDATION_PASSED, "Grammar validated",
            "productions" => self.registry.len()
        );
        Ok(())
    }

    /// Parse the whole input into a tree rooted at [`super::ROOT_LABEL`]
    ///
    /// Production calls nest at most `MAX_PARSE_DEPTH` deep, counting calls
    /// that are attempted and then fail to match. Deeper input aborts the run
    /// with [`SyntaxError::MaxRecursionDepth`] rather than a no-match, so a
    /// self-nesting rule like `list = "(" list? ")"` accepts
    /// `MAX_PARSE_DEPTH - 1` levels. The ceiling is set per build profile in
    /// `config/<profile>.toml`.
    pub fn run(&mut self) -> SyntaxResult<Element> {
        let result = self.run_inner();
        match &result {
            Ok(root) => {
                log_success!(codes::success::PARSE_COMPLETE, "Parse completed",
                    "top_level_matches" => root.tail.len()
                );
            }
            Err(error) => {
                match error.span() {
                    Some(span) => log_error!(error.error_code(), "Parse failed", span = span,
                        "error" => error
                    ),
                    None => log_error!(error.error_code(), "Parse failed", "error" => error),
                }
                self.record_error(error.clone());
            }
        }
        result
    }

    fn run_inner(&mut self) -> SyntaxResult<Element> {
        if self.input.is_none() {
            return Err(SyntaxError::NoInput);
        }
        if !self.validated || self.preferences.validate_every_run {
            self.validate()?;
        }

        let registry = &self.registry;
        let trace = self.preferences.trace_resolution;
        let Some(stream) = self.input.as_mut() else {
            return Err(SyntaxError::NoInput);
        };
        stream.reset();

        let mut matcher = Matcher::new(registry);
        let mut tail = Vec::new();

        while !stream.is_at_end() {
            let mut best: Option<(Element, usize)> = None;
            for def in registry.iter() {
                let attempt = stream.probe(|stream| matcher.match_production(def, stream))?;
                if let Some((element, consumed)) = attempt {
                    if consumed > 0 && best.as_ref().map_or(true, |(_, most)| consumed > *most) {
                        best = Some((element, consumed));
                    }
                }
            }

            let Some((element, consumed)) = best else {
                let found = stream.current().map(|t| t.lexeme.clone()).unwrap_or_default();
                return Err(SyntaxError::no_solution(
                    stream.position(),
                    &found,
                    stream.current_span(),
                ));
            };

            if trace {
                log_info!("Top-level match committed",
                    "production" => &element.head,
                    "position" => stream.position(),
                    "consumed" => consumed
                );
            }
            stream.advance_by(consumed);
            tail.push(Node::Element(element));
        }

        Ok(Element::root(tail))
    }

    fn record_error(&mut self, error: SyntaxError) {
        if !self.preferences.record_error_history || MAX_ERROR_HISTORY == 0 {
            return;
        }
        if self.error_history.len() >= MAX_ERROR_HISTORY {
            self.error_history.pop_front();
        }
        self.error_history.push_back(error);
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
