//! Automatic data clearer state machine.
//!
//! A wall-clock-based state machine driven by lifecycle transitions; every
//! transition takes an explicit `now` so tests never sleep. The machine
//! guarantees at most one wipe per background→foreground cycle: idempotence
//! comes from the state itself, not from re-checking timestamps.
//!
//! ## State transitions
//!
//! ```text
//! Idle ──on_app_backgrounded──▶ Backgrounded(since)
//! Backgrounded ──on_app_foregrounded, threshold exceeded──▶ ClearingInProgress ──▶ ClearedThisSession
//! Backgrounded ──on_app_foregrounded, not exceeded──▶ Idle
//! (cold start, pending ClearOnResume past deadline) ──▶ ClearingInProgress ──▶ ClearedThisSession
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BackgroundTimeKeeper, ClearDataAction, ClearingIntervalSetting, PendingClear,
    PendingClearState, PendingClearStore,
};
use crate::diagnostics::{self, DiagnosticSink};
use crate::error::CoreError;
use crate::events::Event;
use crate::lifecycle::LifecycleObserver;

/// What caused a wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearTrigger {
    /// The app resumed after being backgrounded past the configured interval.
    ForegroundResume,
    /// The clear fell due while the process was killed; it ran on the next
    /// cold start instead.
    ColdStartRestart,
}

/// Serializable state of the clearer. The host persists this between
/// process lifetimes of its own tooling; within the app it lives on the
/// lifecycle thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ClearerState {
    #[default]
    Idle,
    Backgrounded { since: DateTime<Utc> },
    ClearingInProgress,
    ClearedThisSession,
}

/// Decides whether to wipe browsing data on resume or cold start.
///
/// Collaborators are passed by reference at construction; the machine never
/// owns storage or the wipe itself.
pub struct AutomaticDataClearer<'a> {
    state: ClearerState,
    interval: &'a dyn ClearingIntervalSetting,
    action: &'a dyn ClearDataAction,
    pending: &'a dyn PendingClearStore,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> AutomaticDataClearer<'a> {
    pub fn new(
        interval: &'a dyn ClearingIntervalSetting,
        action: &'a dyn ClearDataAction,
        pending: &'a dyn PendingClearStore,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self::with_state(ClearerState::Idle, interval, action, pending, diagnostics)
    }

    /// Resume from a previously captured state.
    pub fn with_state(
        state: ClearerState,
        interval: &'a dyn ClearingIntervalSetting,
        action: &'a dyn ClearDataAction,
        pending: &'a dyn PendingClearStore,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            state,
            interval,
            action,
            pending,
            diagnostics,
        }
    }

    pub fn state(&self) -> ClearerState {
        self.state
    }

    /// The app moved to the background. Records the timestamp and, when a
    /// timed interval is configured, arms the persisted pending-clear record
    /// and returns the deadline the host scheduler should wake at.
    ///
    /// A repeated background event without an intervening foreground is a
    /// no-op: the first timestamp stands, so the deadline never slides later.
    pub fn on_app_backgrounded(&mut self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.state {
            ClearerState::ClearingInProgress | ClearerState::Backgrounded { .. } => return None,
            ClearerState::Idle | ClearerState::ClearedThisSession => {}
        }
        self.state = ClearerState::Backgrounded { since: now };

        match self.interval.current().duration() {
            Some(threshold) => {
                self.save_pending(&PendingClear::clear_on_resume(now));
                Some(now + threshold)
            }
            None => {
                // Interval is Never: make sure no stale record can fire.
                self.save_pending(&PendingClear::none());
                None
            }
        }
    }

    /// The app returned to the foreground. Wipes iff the configured interval
    /// was exceeded while backgrounded. Repeated calls without an
    /// intervening background are no-ops.
    ///
    /// A failed wipe still advances to `ClearedThisSession` (best effort, no
    /// mid-session retry); the error is returned for logging only.
    pub fn on_app_foregrounded(&mut self, now: DateTime<Utc>) -> Result<Option<Event>, CoreError> {
        let since = match self.state {
            ClearerState::Backgrounded { since } => since,
            _ => return Ok(None),
        };

        // The process survived backgrounding, so the killed-while-clearing
        // signal must not fire on a later cold start.
        self.save_pending(&PendingClear::none());

        if !BackgroundTimeKeeper::has_exceeded(now - since, self.interval.current()) {
            self.state = ClearerState::Idle;
            return Ok(None);
        }

        self.run_clear(ClearTrigger::ForegroundResume, now)
    }

    /// A fresh process started. If a pending-clear record survived and its
    /// deadline passed, the OS killed the app after the clear fell due:
    /// wipe now and emit the one-time restart diagnostic.
    pub fn on_cold_start(&mut self, now: DateTime<Utc>) -> Result<Option<Event>, CoreError> {
        let pending = self.pending.load_pending_clear().unwrap_or_else(|e| {
            self.diagnostics.emit(
                diagnostics::PENDING_STATE_READ_FAILED,
                &[("error", &e.to_string())],
            );
            PendingClear::none()
        });

        match pending.state {
            PendingClearState::ClearOnResume => {
                let due = pending
                    .backgrounded_at
                    .map(|since| {
                        BackgroundTimeKeeper::has_exceeded(now - since, self.interval.current())
                    })
                    .unwrap_or(false);
                if !due {
                    self.save_pending(&PendingClear::none());
                    self.state = ClearerState::Idle;
                    return Ok(None);
                }

                // Mark the wipe as started before running it, so a process
                // death mid-clear cannot cause a second wipe next start.
                self.save_pending(&PendingClear {
                    state: PendingClearState::ClearedWhileKilled,
                    backgrounded_at: pending.backgrounded_at,
                });
                let result = self.run_clear(ClearTrigger::ColdStartRestart, now);
                self.diagnostics
                    .emit(diagnostics::APP_RESTARTED_WHILE_CLEARING, &[]);
                self.save_pending(&PendingClear::none());
                result
            }
            PendingClearState::ClearedWhileKilled => {
                // Previous start died mid-clear; the wipe already ran.
                self.save_pending(&PendingClear::none());
                self.state = ClearerState::Idle;
                Ok(None)
            }
            PendingClearState::None => {
                self.state = ClearerState::Idle;
                Ok(None)
            }
        }
    }

    fn run_clear(
        &mut self,
        trigger: ClearTrigger,
        now: DateTime<Utc>,
    ) -> Result<Option<Event>, CoreError> {
        self.state = ClearerState::ClearingInProgress;
        let result = self.action.clear();
        self.state = ClearerState::ClearedThisSession;
        if let Err(e) = result {
            self.diagnostics
                .emit(diagnostics::DATA_CLEAR_FAILED, &[("error", &e.to_string())]);
            return Err(e.into());
        }
        Ok(Some(Event::DataCleared { trigger, at: now }))
    }

    /// Pending-record persistence is best effort: a write failure degrades
    /// to a diagnostic rather than blocking the lifecycle transition.
    fn save_pending(&self, pending: &PendingClear) {
        if let Err(e) = self.pending.save_pending_clear(pending) {
            self.diagnostics.emit(
                diagnostics::PENDING_STATE_WRITE_FAILED,
                &[("error", &e.to_string())],
            );
        }
    }
}

impl LifecycleObserver for AutomaticDataClearer<'_> {
    fn name(&self) -> &'static str {
        "automatic_data_clearer"
    }

    fn on_foreground(&mut self, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        Ok(self.on_app_foregrounded(now)?.into_iter().collect())
    }

    fn on_background(&mut self, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        Ok(self
            .on_app_backgrounded(now)
            .map(|deadline| Event::DataClearScheduled { deadline, at: now })
            .into_iter()
            .collect())
    }

    fn on_cold_start(&mut self, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        Ok(self.on_cold_start(now)?.into_iter().collect())
    }
}
