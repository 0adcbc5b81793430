//! Background-interval threshold check.

use chrono::Duration;

use super::ClearingInterval;

/// Pure predicate over elapsed background time and the configured interval.
pub struct BackgroundTimeKeeper;

impl BackgroundTimeKeeper {
    /// True iff the configured interval is timed and `elapsed` has reached
    /// it. Never true for [`ClearingInterval::Never`].
    pub fn has_exceeded(elapsed: Duration, configured: ClearingInterval) -> bool {
        match configured.duration() {
            Some(threshold) => elapsed >= threshold,
            None => false,
        }
    }
}
