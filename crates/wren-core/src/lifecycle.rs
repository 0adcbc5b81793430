//! App lifecycle observer registry.
//!
//! The host delivers foreground/background/cold-start transitions on a
//! single cooperative thread; the registry fans them out to observers in
//! registration order. An observer error never stops dispatch: it becomes a
//! diagnostic event and iteration continues with the next observer.

use chrono::{DateTime, Utc};

use crate::diagnostics::{self, DiagnosticSink};
use crate::error::CoreError;
use crate::events::Event;

/// A lifecycle transition delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLifecycleEvent {
    Foreground,
    Background,
    ColdStart,
}

/// A component interested in lifecycle transitions. Default methods are
/// no-ops so observers implement only the hooks they care about.
pub trait LifecycleObserver {
    /// Stable name for diagnostics.
    fn name(&self) -> &'static str;

    fn on_foreground(&mut self, _now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        Ok(Vec::new())
    }

    fn on_background(&mut self, _now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        Ok(Vec::new())
    }

    fn on_cold_start(&mut self, _now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        Ok(Vec::new())
    }
}

/// Ordered registry of lifecycle observers.
pub struct LifecycleRegistry<'a> {
    observers: Vec<&'a mut dyn LifecycleObserver>,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> LifecycleRegistry<'a> {
    pub fn new(diagnostics: &'a dyn DiagnosticSink) -> Self {
        Self {
            observers: Vec::new(),
            diagnostics,
        }
    }

    /// Register an observer; dispatch order is registration order.
    pub fn register(&mut self, observer: &'a mut dyn LifecycleObserver) {
        self.observers.push(observer);
    }

    /// Deliver one lifecycle transition to every observer, collecting the
    /// events they produce.
    pub fn dispatch(&mut self, event: AppLifecycleEvent, now: DateTime<Utc>) -> Vec<Event> {
        let mut out = Vec::new();
        for observer in self.observers.iter_mut() {
            let result = match event {
                AppLifecycleEvent::Foreground => observer.on_foreground(now),
                AppLifecycleEvent::Background => observer.on_background(now),
                AppLifecycleEvent::ColdStart => observer.on_cold_start(now),
            };
            match result {
                Ok(mut events) => out.append(&mut events),
                Err(e) => self.diagnostics.emit(
                    diagnostics::LIFECYCLE_OBSERVER_FAILED,
                    &[("observer", observer.name()), ("error", &e.to_string())],
                ),
            }
        }
        out
    }
}
