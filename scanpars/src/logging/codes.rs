//! Error and success codes with their classification metadata
//!
//! Every failure the library can report maps to one [`Code`]; the metadata
//! registry below is the single place where severity and handling advice live.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Runtime configuration error codes
pub mod config {
    use super::Code;

    pub const CONFIG_LOAD_FAILURE: Code = Code::new("E010");
    pub const INVALID_CONFIG: Code = Code::new("E011");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const INPUT_TOO_LARGE: Code = Code::new("E021");
    pub const TOO_MANY_TOKENS: Code = Code::new("E022");
    pub const LEXEME_TOO_LONG: Code = Code::new("E023");
    pub const INVALID_LITERAL: Code = Code::new("E024");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const NO_INPUT: Code = Code::new("E040");
    pub const NO_SOLUTION: Code = Code::new("E041");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Grammar construction error codes
pub mod grammar {
    use super::Code;

    pub const DUPLICATE_PRODUCTION: Code = Code::new("E060");
    pub const UNDEFINED_PRODUCTION: Code = Code::new("E061");
    pub const NULLABLE_REPEAT: Code = Code::new("E062");
    pub const UNNAMED_REPEAT: Code = Code::new("E063");
    pub const TOO_MANY_PRODUCTIONS: Code = Code::new("E064");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    pub const PRODUCTION_REGISTERED: Code = Code::new("I030");
    pub const GRAMMAR_VALIDATION_PASSED: Code = Code::new("I031");

    pub const PARSE_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const ERROR_METADATA: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or configuration initialization failure",
        "Check runtime preferences and initialize logging once per process",
    ),
    // Configuration
    ErrorMetadata::new(
        "E010",
        "Config",
        Severity::Medium,
        true,
        false,
        "Runtime configuration file could not be read",
        "Check the configuration path and its permissions",
    ),
    ErrorMetadata::new(
        "E011",
        "Config",
        Severity::Medium,
        true,
        false,
        "Runtime configuration document is malformed",
        "Fix the TOML document or remove the offending key",
    ),
    // Lexical
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::High,
        false,
        true,
        "No token rule matches the character at this position",
        "Add a rule covering the character or remove it from the input",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        true,
        "Input exceeds the maximum size accepted by the lexer",
        "Split the input or raise max_input_size in the build profile",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::High,
        false,
        true,
        "Input produced more tokens than the configured limit",
        "Split the input or raise max_token_count in the build profile",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "A single lexeme exceeds the configured maximum length",
        "Check for an unterminated block comment or string",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::Low,
        true,
        false,
        "A numeric token could not be decoded to a value",
        "Check the literal is in range for its type",
    ),
    // Syntax
    ErrorMetadata::new(
        "E040",
        "Syntax",
        Severity::Medium,
        true,
        true,
        "Parser was run before any input was set",
        "Call set_input with a token sequence before run",
    ),
    ErrorMetadata::new(
        "E041",
        "Syntax",
        Severity::High,
        false,
        true,
        "No production matches the remaining input",
        "Inspect the token at the reported position and extend the grammar",
    ),
    ErrorMetadata::new(
        "E087",
        "Syntax",
        Severity::High,
        false,
        true,
        "Production calls nested deeper than the configured limit",
        "Look for left recursion in the grammar",
    ),
    // Grammar
    ErrorMetadata::new(
        "E060",
        "Grammar",
        Severity::Medium,
        true,
        false,
        "A production with this name is already registered",
        "Rename one of the productions",
    ),
    ErrorMetadata::new(
        "E061",
        "Grammar",
        Severity::High,
        true,
        true,
        "A Call refers to a production that was never registered",
        "Register the production or fix the name",
    ),
    ErrorMetadata::new(
        "E062",
        "Grammar",
        Severity::High,
        true,
        true,
        "A Repeat wraps a rule that can succeed without consuming input",
        "Remove the Optional/Not/Repeat directly under the Repeat",
    ),
    ErrorMetadata::new(
        "E063",
        "Grammar",
        Severity::Medium,
        true,
        false,
        "A nested Repeat has no name and does not repeat a production",
        "Give the Repeat an explicit name",
    ),
    ErrorMetadata::new(
        "E064",
        "Grammar",
        Severity::Medium,
        true,
        false,
        "Too many productions registered on one parser",
        "Raise max_productions in the build profile",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        ERROR_METADATA
            .iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get complete metadata for error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get severity level for error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
