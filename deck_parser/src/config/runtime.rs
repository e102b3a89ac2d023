// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// What the parser does when it meets input it cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputErrorAction {
    /// Abort the parse with an error
    Throw,
    /// Log a warning and continue
    Warn,
    /// Continue silently
    Ignore,
}

impl InputErrorAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputErrorAction::Throw => "throw",
            InputErrorAction::Warn => "warn",
            InputErrorAction::Ignore => "ignore",
        }
    }
}

impl FromStr for InputErrorAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "throw" | "error" => Ok(InputErrorAction::Throw),
            "warn" | "warning" => Ok(InputErrorAction::Warn),
            "ignore" => Ok(InputErrorAction::Ignore),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserPreferences {
    /// Keyword header not present in the registry
    pub unknown_keyword: InputErrorAction,

    /// Tokens left over after the last item of a record
    pub extra_data: InputErrorAction,

    /// Non-keyword text found between keywords
    pub random_text: InputErrorAction,

    /// Whether to log a debug event for every parsed keyword
    pub log_keyword_details: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            unknown_keyword: env::var(env_vars::PARSER_UNKNOWN_KEYWORD)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(InputErrorAction::Throw),
            extra_data: env::var(env_vars::PARSER_EXTRA_DATA)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(InputErrorAction::Throw),
            random_text: env::var(env_vars::PARSER_RANDOM_TEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(InputErrorAction::Warn),
            log_keyword_details: env::var(env_vars::PARSER_LOG_KEYWORD_DETAILS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl ParserPreferences {
    /// Preferences that reject every irregularity, independent of the environment
    pub fn strict() -> Self {
        Self {
            unknown_keyword: InputErrorAction::Throw,
            extra_data: InputErrorAction::Throw,
            random_text: InputErrorAction::Throw,
            log_keyword_details: false,
        }
    }

    /// Preferences that skip over irregular input with a warning
    pub fn permissive() -> Self {
        Self {
            unknown_keyword: InputErrorAction::Warn,
            extra_data: InputErrorAction::Warn,
            random_text: InputErrorAction::Warn,
            log_keyword_details: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
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
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
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
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Parser
    pub const PARSER_UNKNOWN_KEYWORD: &str = "DECK_PARSER_UNKNOWN_KEYWORD";
    pub const PARSER_EXTRA_DATA: &str = "DECK_PARSER_EXTRA_DATA";
    pub const PARSER_RANDOM_TEXT: &str = "DECK_PARSER_RANDOM_TEXT";
    pub const PARSER_LOG_KEYWORD_DETAILS: &str = "DECK_PARSER_LOG_KEYWORD_DETAILS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "DECK_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DECK_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DECK_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "DECK_LOGGING_INCLUDE_FILE_CONTEXT";
}
