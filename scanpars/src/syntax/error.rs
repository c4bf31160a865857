//! Error types for grammar construction and parsing
//!
//! A rule that does not match is not an error: matchers report it as
//! `Ok(None)` and the enclosing combinator moves on. Only the failures
//! below escape to the caller.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Problems with the set of registered productions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("Production '{name}' is already registered")]
    DuplicateProduction { name: String },

    #[error("Production '{referenced_by}' calls undefined production '{name}'")]
    UndefinedProduction { name: String, referenced_by: String },

    #[error("Production '{production}' repeats a rule that can match without consuming tokens")]
    NullableRepeat { production: String },

    #[error("Production '{production}' contains a repeat that needs an explicit name")]
    UnnamedRepeat { production: String },

    #[error("Too many productions: {count} (max {max})")]
    TooManyProductions { count: usize, max: usize },
}

impl GrammarError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::DuplicateProduction { .. } => codes::grammar::DUPLICATE_PRODUCTION,
            Self::UndefinedProduction { .. } => codes::grammar::UNDEFINED_PRODUCTION,
            Self::NullableRepeat { .. } => codes::grammar::NULLABLE_REPEAT,
            Self::UnnamedRepeat { .. } => codes::grammar::UNNAMED_REPEAT,
            Self::TooManyProductions { .. } => codes::grammar::TOO_MANY_PRODUCTIONS,
        }
    }

    /// Production the error was found in
    pub fn production(&self) -> &str {
        match self {
            Self::DuplicateProduction { name } => name,
            Self::UndefinedProduction { referenced_by, .. } => referenced_by,
            Self::NullableRepeat { production } | Self::UnnamedRepeat { production } => production,
            Self::TooManyProductions { .. } => "",
        }
    }
}

/// Failures of a parser run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("No input: set_input must be called before run")]
    NoInput,

    #[error("No production matches at token {position} ('{found}') at {span}")]
    NoSolution {
        position: usize,
        found: String,
        span: Span,
    },

    #[error("Maximum recursion depth {depth} exceeded in production '{production}'")]
    MaxRecursionDepth { production: String, depth: usize },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

impl SyntaxError {
    pub fn no_solution(position: usize, found: &str, span: Span) -> Self {
        Self::NoSolution {
            position,
            found: found.to_string(),
            span,
        }
    }

    pub fn max_recursion_depth(production: &str, depth: usize) -> Self {
        Self::MaxRecursionDepth {
            production: production.to_string(),
            depth,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::NoInput => codes::syntax::NO_INPUT,
            Self::NoSolution { .. } => codes::syntax::NO_SOLUTION,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::Grammar(error) => error.error_code(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::NoSolution { span, .. } => Some(*span),
            Self::NoInput | Self::MaxRecursionDepth { .. } | Self::Grammar(_) => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_error_codes() {
        let span = Span::point(Position::start());
        assert_eq!(SyntaxError::NoInput.error_code(), codes::syntax::NO_INPUT);
        assert_eq!(
            SyntaxError::no_solution(3, "a", span).error_code(),
            codes::syntax::NO_SOLUTION
        );
        assert_eq!(
            SyntaxError::from(GrammarError::NullableRepeat {
                production: "p".into()
            })
            .error_code(),
            codes::grammar::NULLABLE_REPEAT
        );
    }

    #[test]
    fn test_span_and_metadata() {
        let span = Span::point(Position::new(4, 1, 5));
        let error = SyntaxError::no_solution(2, "a", span);
        assert_eq!(error.span(), Some(span));
        assert!(error.requires_halt());
        assert!(!error.description().is_empty());
        assert_eq!(SyntaxError::max_recursion_depth("expr", 8).span(), None);
    }

    #[test]
    fn test_grammar_error_messages() {
        let error = GrammarError::UndefinedProduction {
            name: "missing".into(),
            referenced_by: "main".into(),
        };
        assert_eq!(
            error.to_string(),
            "Production 'main' calls undefined production 'missing'"
        );
        assert_eq!(error.production(), "main");
    }
}
