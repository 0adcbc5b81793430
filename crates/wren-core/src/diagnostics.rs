//! Fire-and-forget diagnostic signals.
//!
//! Engines report exceptional-but-non-fatal conditions here: the one-time
//! "app restarted while clearing" signal, failed wipes, unreadable storage.
//! Sinks must never fail and never block the lifecycle thread.

use std::cell::RefCell;

/// Diagnostic event names emitted by the engines.
pub const APP_RESTARTED_WHILE_CLEARING: &str = "app_restarted_while_clearing";
pub const DATA_CLEAR_FAILED: &str = "data_clear_failed";
pub const LIFECYCLE_OBSERVER_FAILED: &str = "lifecycle_observer_failed";
pub const STORAGE_READ_FAILED: &str = "storage_read_failed";
pub const PENDING_STATE_READ_FAILED: &str = "pending_state_read_failed";
pub const PENDING_STATE_WRITE_FAILED: &str = "pending_state_write_failed";

/// Fire-and-forget telemetry sink.
pub trait DiagnosticSink {
    fn emit(&self, name: &str, attrs: &[(&str, &str)]);
}

/// A captured diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

/// In-memory sink for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.name == name).count()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, name: &str, attrs: &[(&str, &str)]) {
        self.events.borrow_mut().push(DiagnosticEvent {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}

/// Sink that writes one line per event to stderr. Used by the CLI.
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, name: &str, attrs: &[(&str, &str)]) {
        if attrs.is_empty() {
            eprintln!("diagnostic: {name}");
        } else {
            let attrs = attrs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" ");
            eprintln!("diagnostic: {name} {attrs}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_captures_events_in_order() {
        let sink = MemorySink::new();
        sink.emit(STORAGE_READ_FAILED, &[("error", "locked")]);
        sink.emit(APP_RESTARTED_WHILE_CLEARING, &[]);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, STORAGE_READ_FAILED);
        assert_eq!(events[0].attrs, vec![("error".into(), "locked".into())]);
        assert_eq!(sink.count(APP_RESTARTED_WHILE_CLEARING), 1);
    }
}
