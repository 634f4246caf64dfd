// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginePreferences {
    /// Whether to emit a debug event for every one-character fallback token
    pub log_fallback_tokens: bool,

    /// Whether to log state-table construction summaries
    pub log_table_construction: bool,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self {
            log_fallback_tokens: env::var(env_vars::ENGINE_LOG_FALLBACK_TOKENS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_table_construction: env::var(env_vars::ENGINE_LOG_TABLE_CONSTRUCTION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePreferences {
    /// Whether to log read timings for source files
    pub enable_performance_logging: bool,

    /// Whether a leading UTF-8 byte-order mark is removed before lexing
    pub strip_byte_order_mark: bool,
}

impl Default for SourcePreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            strip_byte_order_mark: env::var(env_vars::SOURCE_STRIP_BOM)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether diagnostics are written as JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
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

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    /// Convert from events::LogLevel for compatibility
    pub fn from_events_log_level(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Parse log level from string (environment variables and the CLI)
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
pub struct RuntimeConfig {
    pub engine: EnginePreferences,
    pub source: SourcePreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Engine
    pub const ENGINE_LOG_FALLBACK_TOKENS: &str = "WEBLEX_ENGINE_LOG_FALLBACK_TOKENS";
    pub const ENGINE_LOG_TABLE_CONSTRUCTION: &str = "WEBLEX_ENGINE_LOG_TABLE_CONSTRUCTION";

    // Source
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "WEBLEX_ENABLE_PERFORMANCE_LOGGING";
    pub const SOURCE_STRIP_BOM: &str = "WEBLEX_SOURCE_STRIP_BOM";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "WEBLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "WEBLEX_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_level_conversion_round_trips() {
        for level in [LogLevel::Error, LogLevel::Warning, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(LogLevel::from_events_log_level(level.to_events_log_level()), level);
        }
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::ENGINE_LOG_FALLBACK_TOKENS.starts_with("WEBLEX_"));
        assert!(env_vars::SOURCE_STRIP_BOM.starts_with("WEBLEX_"));
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("WEBLEX_"));
    }
}
