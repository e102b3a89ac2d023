//! Per-file event collection for deck files
//!
//! Warnings and errors logged while `Parser::parse_file` runs are grouped
//! under the deck file's path, so a caller can inspect them after the parse.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Deck file being parsed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

/// Thread-safe event collector keyed by deck file path
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
        }
    }

    fn events(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<LogEvent>>> {
        self.file_events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record an event for a deck file; events past the limits are dropped
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.events();

        let total: usize = events.values().map(|v| v.len()).sum();
        if total >= MAX_ERROR_COLLECTION {
            return;
        }

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for deck file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        self.events().get(file_path).cloned().unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.events()
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_events_are_grouped_by_file() {
        let collector = ErrorCollector::new();
        let case = PathBuf::from("CASE.DATA");
        let include = PathBuf::from("GRID.INC");

        collector.record_event(
            &case,
            LogEvent::error(codes::parse::UNKNOWN_KEYWORD, "Unknown keyword"),
        );
        collector.record_event(&case, LogEvent::warning("Skipped text"));
        collector.record_event(&include, LogEvent::warning("Skipped text"));

        assert_eq!(collector.get_file_events(&case).len(), 2);
        assert_eq!(collector.get_file_errors(&case).len(), 1);
        assert_eq!(collector.get_file_events(&include).len(), 1);
        assert!(collector.get_file_errors(&include).is_empty());
        assert!(collector.get_file_events(Path::new("OTHER.DATA")).is_empty());
    }

    #[test]
    fn test_per_file_limit() {
        let collector = ErrorCollector::new();
        let case = PathBuf::from("CASE.DATA");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&case, LogEvent::warning("w"));
        }

        let events = collector.get_file_events(&case);
        assert!(events.len() <= MAX_LOG_EVENTS_PER_FILE + 1);
    }
}
