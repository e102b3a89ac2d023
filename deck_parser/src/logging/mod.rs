//! Global logging module for the deck parser
//!
//! Logging is a no-op until `init_global_logging` has been called. Events
//! logged while a deck file is open are also collected per file.

#[macro_use]
pub mod macros;
pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod service;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(LoggingService::from_preferences()))?;

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        ));
    }

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    // The collector may outlive a failed logger install in tests
    let _ = GLOBAL_ERROR_COLLECTOR.set(Arc::new(ErrorCollector::new()));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_file_context(file_path: PathBuf) {
    let context = FileProcessingContext::new(file_path);
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_file_context();
    set_file_context(file_path);
    let result = f();
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    let file_ctx = get_current_file_context();
    if let Some(file_ctx) = &file_ctx {
        if config::include_file_context() {
            event = event.with_context("file", &file_ctx.file_path.display().to_string());
        }
    }

    if let (Some(file_ctx), Some(collector)) = (&file_ctx, try_get_global_error_collector()) {
        if event.is_error() || event.is_warning() {
            collector.record_event(&file_ctx.file_path, event.clone());
        }
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event, context);
}

/// Used by `log_warning!`
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(event, context);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::info(message), context);
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    if config::get_min_log_level() >= LogLevel::Debug {
        dispatch(LogEvent::debug(message), context);
    }
}

// ============================================================================
// REPORTING
// ============================================================================

/// Events collected while the given deck file was parsed
pub fn get_file_events(file_path: &Path) -> Vec<LogEvent> {
    try_get_global_error_collector()
        .map(|collector| collector.get_file_events(file_path))
        .unwrap_or_default()
}

pub fn get_file_errors(file_path: &Path) -> Vec<LogEvent> {
    try_get_global_error_collector()
        .map(|collector| collector.get_file_errors(file_path))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_management() {
        let file_path = PathBuf::from("CASE.DATA");

        clear_file_context();
        assert!(get_current_file_context().is_none());

        set_file_context(file_path.clone());
        let context = get_current_file_context();
        assert_eq!(context.map(|c| c.file_path), Some(file_path));

        clear_file_context();
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_with_file_context_restores_previous() {
        clear_file_context();
        let outer = PathBuf::from("OUTER.DATA");
        let inner = PathBuf::from("INNER.INC");

        with_file_context(outer.clone(), || {
            let seen = with_file_context(inner.clone(), || {
                get_current_file_context().map(|c| c.file_path)
            });
            assert_eq!(seen, Some(inner.clone()));
            assert_eq!(
                get_current_file_context().map(|c| c.file_path),
                Some(outer.clone())
            );
        });

        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_macros_are_safe_without_initialization() {
        log_error!(codes::system::INTERNAL_ERROR, "Test error");
        log_warning!("Test warning", "keyword" => "EQUIL");
        log_info!("Test info");
        log_debug!("Test debug", "records" => 3);
        log_success!(codes::success::DECK_PARSE_COMPLETE, "Done", "keywords" => 2);
    }
}
