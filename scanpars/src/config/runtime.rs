// RUNTIME PREFERENCES (User Experience)
//
// Limits that protect the process are compile-time constants; everything
// here only changes what gets measured and reported.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised while loading a runtime configuration document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect detailed token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to keep a per-type histogram while tokenizing
    pub track_type_counts: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,

    /// Whether to log the elapsed time of each tokenize call
    pub log_timing: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_type_counts: env::var(env_vars::LEXICAL_TRACK_TYPES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_position_in_errors: env::var(env_vars::LEXICAL_INCLUDE_POSITIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_timing: env::var(env_vars::LEXICAL_LOG_TIMING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Whether to log every committed top-level match
    pub trace_resolution: bool,

    /// Whether failed runs are kept in the parser's error history
    pub record_error_history: bool,

    /// Whether the grammar is validated before every run (always done on first run)
    pub validate_every_run: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            trace_resolution: env::var(env_vars::PARSER_TRACE_RESOLUTION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            record_error_history: env::var(env_vars::PARSER_RECORD_ERRORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            validate_every_run: env::var(env_vars::PARSER_VALIDATE_EVERY_RUN)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Write log output to the console
    pub enable_console_logging: bool,

    /// Most verbose level that gets logged
    pub min_log_level: LogLevel,

    /// Include timing and throughput figures in success events
    pub log_performance_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var(env_vars::LOGGING_LOG_PERFORMANCE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing sections fall back to their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "SCANPARS_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_TRACK_TYPES: &str = "SCANPARS_LEXICAL_TRACK_TYPES";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "SCANPARS_LEXICAL_INCLUDE_POSITIONS";
    pub const LEXICAL_LOG_TIMING: &str = "SCANPARS_LEXICAL_LOG_TIMING";

    // Parser
    pub const PARSER_TRACE_RESOLUTION: &str = "SCANPARS_PARSER_TRACE_RESOLUTION";
    pub const PARSER_RECORD_ERRORS: &str = "SCANPARS_PARSER_RECORD_ERRORS";
    pub const PARSER_VALIDATE_EVERY_RUN: &str = "SCANPARS_PARSER_VALIDATE_EVERY_RUN";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SCANPARS_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SCANPARS_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SCANPARS_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "SCANPARS_LOGGING_LOG_PERFORMANCE";
}
