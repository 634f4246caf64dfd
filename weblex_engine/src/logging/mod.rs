//! Global logging module for weblex
//!
//! Provides thread-safe global logging, a per-thread source context so events can name
//! the file being lexed, and the macro support functions behind `log_error!` and friends.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{EventSummary, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SOURCE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the process-wide service; the first call wins
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    install(service)
}

fn install(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    let required_codes = [
        codes::system::INTERNAL_ERROR,
        codes::table::INCLUDE_CYCLE,
        codes::options::INVALID_OPTION_VALUE,
        codes::source::FILE_NOT_FOUND,
    ];
    for code in required_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// SOURCE CONTEXT MANAGEMENT
// ============================================================================

/// Tag subsequent events on this thread with the file being lexed
pub fn set_source_context(path: &Path) {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(path.to_path_buf());
    });
}

pub fn clear_source_context() {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with source context
pub fn with_source_context<F, R>(path: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_source_context(path);
    let result = f();
    clear_source_context();
    result
}

pub fn get_current_source_context() -> Option<PathBuf> {
    SOURCE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn decorate(
    mut event: LogEvent,
    span: Option<Range<usize>>,
    context: Vec<(&str, &str)>,
) -> LogEvent {
    if let Some(span) = span {
        event = event.with_span(span);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(path) = get_current_source_context() {
        event = event.with_context("source", &path.display().to_string());
    }

    event
}

fn dispatch(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Range<usize>>,
    context: Vec<(&str, &str)>,
) {
    dispatch(decorate(LogEvent::error(code, message), span, context));
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    span: Option<Range<usize>>,
    context: Vec<(&str, &str)>,
) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(decorate(event, span, context));
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(decorate(LogEvent::success(code, message), None, context));
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(decorate(LogEvent::info(message), None, context));
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(
    code: Option<Code>,
    message: &str,
    span: Option<Range<usize>>,
    context: Vec<(&str, &str)>,
) {
    let event = match code {
        Some(code) => LogEvent::debug_with_code(code, message),
        None => LogEvent::debug(message),
    };
    dispatch(decorate(event, span, context));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_logging_initialization() {
        if is_initialized() {
            return;
        }

        let logger = service::create_test_logger();
        let service = Arc::new(LoggingService::new(logger.clone(), LogLevel::Debug));
        if init_global_logging_with_service(service).is_ok() {
            assert!(is_initialized());
            assert!(logger.has_success_with_code(codes::success::SYSTEM_INITIALIZATION_COMPLETED));
            let again = Arc::new(LoggingService::new(logger.clone(), LogLevel::Error));
            assert!(init_global_logging_with_service(again).is_err());
        }
    }

    #[test]
    fn test_source_context_management() {
        let path = PathBuf::from("index.html");

        assert!(get_current_source_context().is_none());

        set_source_context(&path);
        assert_eq!(get_current_source_context(), Some(path.clone()));

        clear_source_context();
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_with_source_context() {
        let path = PathBuf::from("style.css");

        let result = with_source_context(&path, || {
            assert_eq!(get_current_source_context(), Some(path.clone()));
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_decorate_adds_span_context_and_source() {
        let path = PathBuf::from("app.js");
        let event = with_source_context(&path, || {
            decorate(
                LogEvent::warning("w"),
                Some(2..5),
                vec![("state", "root")],
            )
        });

        assert_eq!(event.span, Some(2..5));
        assert_eq!(event.context.get("state").map(String::as_str), Some("root"));
        assert_eq!(event.context.get("source").map(String::as_str), Some("app.js"));
    }
}
