//! Automatic data-clearing engine.
//!
//! Decides, from elapsed background time and the user's configured clearing
//! interval, whether to wipe browsing data on foreground-resume, and whether
//! a due wipe happened while the process was killed (which requires a
//! one-time "restarted while clearing" diagnostic).
//!
//! The wipe itself (cookies, cache, site permissions, tabs) is performed by
//! an external [`ClearDataAction`]; only the decision logic lives here.

pub mod clearer;
pub mod time_keeper;

pub use clearer::{AutomaticDataClearer, ClearTrigger, ClearerState};
pub use time_keeper::BackgroundTimeKeeper;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClearError, CoreError};

/// User-configured duration of backgrounding after which browsing data is
/// wiped on resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClearingInterval {
    Minutes5,
    Minutes15,
    Minutes30,
    #[default]
    Never,
}

impl ClearingInterval {
    /// Threshold duration for this interval; `None` for `Never`.
    pub fn duration(self) -> Option<Duration> {
        match self {
            ClearingInterval::Minutes5 => Some(Duration::minutes(5)),
            ClearingInterval::Minutes15 => Some(Duration::minutes(15)),
            ClearingInterval::Minutes30 => Some(Duration::minutes(30)),
            ClearingInterval::Never => None,
        }
    }

    pub fn as_setting_str(self) -> &'static str {
        match self {
            ClearingInterval::Minutes5 => "minutes_5",
            ClearingInterval::Minutes15 => "minutes_15",
            ClearingInterval::Minutes30 => "minutes_30",
            ClearingInterval::Never => "never",
        }
    }

    /// Parse a settings value. Unrecognized values fall back to `Never`,
    /// the safe default: never auto-clear.
    pub fn from_setting_str(s: &str) -> Self {
        match s {
            "minutes_5" => ClearingInterval::Minutes5,
            "minutes_15" => ClearingInterval::Minutes15,
            "minutes_30" => ClearingInterval::Minutes30,
            _ => ClearingInterval::Never,
        }
    }
}

/// Persisted marker for a clear that fell due while the app was not
/// foregrounded. Survives process death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PendingClearState {
    #[default]
    None,
    /// A timed interval is running against the last background timestamp;
    /// the clear must be evaluated on the next resume or cold start.
    ClearOnResume,
    /// A cold-start clear was already started; guards against a second wipe
    /// if the process dies mid-clear.
    ClearedWhileKilled,
}

/// The persisted pending-clear record: the marker plus the background
/// timestamp it was armed at, so a cold start can re-evaluate the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClear {
    pub state: PendingClearState,
    pub backgrounded_at: Option<DateTime<Utc>>,
}

impl PendingClear {
    pub fn none() -> Self {
        Self {
            state: PendingClearState::None,
            backgrounded_at: None,
        }
    }

    pub fn clear_on_resume(backgrounded_at: DateTime<Utc>) -> Self {
        Self {
            state: PendingClearState::ClearOnResume,
            backgrounded_at: Some(backgrounded_at),
        }
    }
}

impl Default for PendingClear {
    fn default() -> Self {
        Self::none()
    }
}

/// Performs the actual browsing-data wipe. May fail partially; safe to call
/// repeatedly.
pub trait ClearDataAction {
    fn clear(&self) -> Result<(), ClearError>;
}

/// Read access to the user's configured clearing interval.
pub trait ClearingIntervalSetting {
    fn current(&self) -> ClearingInterval;
}

/// Persistence for the pending-clear record. Single writer: the
/// [`AutomaticDataClearer`].
pub trait PendingClearStore {
    fn load_pending_clear(&self) -> Result<PendingClear, CoreError>;
    fn save_pending_clear(&self, pending: &PendingClear) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_durations() {
        assert_eq!(
            ClearingInterval::Minutes5.duration(),
            Some(Duration::minutes(5))
        );
        assert_eq!(
            ClearingInterval::Minutes30.duration(),
            Some(Duration::minutes(30))
        );
        assert_eq!(ClearingInterval::Never.duration(), None);
    }

    #[test]
    fn interval_setting_str_roundtrip() {
        for interval in [
            ClearingInterval::Minutes5,
            ClearingInterval::Minutes15,
            ClearingInterval::Minutes30,
            ClearingInterval::Never,
        ] {
            assert_eq!(
                ClearingInterval::from_setting_str(interval.as_setting_str()),
                interval
            );
        }
    }

    #[test]
    fn unknown_interval_falls_back_to_never() {
        assert_eq!(
            ClearingInterval::from_setting_str("minutes_45"),
            ClearingInterval::Never
        );
        assert_eq!(ClearingInterval::from_setting_str(""), ClearingInterval::Never);
    }
}
