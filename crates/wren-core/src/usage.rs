//! Distinct-days-used tracking.
//!
//! Records that the app was opened today, at most once per calendar day.
//! The count of distinct days is the engagement threshold the rating prompt
//! deciders read.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CoreError;
use crate::events::Event;
use crate::lifecycle::LifecycleObserver;

/// Storage for usage-day records. At most one record per date; the count is
/// monotonic non-decreasing.
pub trait UsageRepository {
    fn record_usage(&self, day: NaiveDate) -> Result<(), CoreError>;
    fn distinct_days_used(&self) -> Result<u32, CoreError>;
    fn recorded_on(&self, day: NaiveDate) -> Result<bool, CoreError>;
}

/// Lifecycle observer that records the current day on every foreground and
/// cold start.
pub struct UsageRecorder<'a> {
    repository: &'a dyn UsageRepository,
}

impl<'a> UsageRecorder<'a> {
    pub fn new(repository: &'a dyn UsageRepository) -> Self {
        Self { repository }
    }

    /// Record today's usage if not already recorded. Returns whether a new
    /// day was recorded.
    pub fn record_today(&self, now: DateTime<Utc>) -> Result<bool, CoreError> {
        let today = now.date_naive();
        if self.repository.recorded_on(today)? {
            return Ok(false);
        }
        self.repository.record_usage(today)?;
        Ok(true)
    }

    pub fn days_used(&self) -> Result<u32, CoreError> {
        self.repository.distinct_days_used()
    }

    pub fn recorded_today(&self, now: DateTime<Utc>) -> Result<bool, CoreError> {
        self.repository.recorded_on(now.date_naive())
    }

    fn record_event(&self, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        if self.record_today(now)? {
            Ok(vec![Event::UsageRecorded {
                day: now.date_naive(),
                at: now,
            }])
        } else {
            Ok(Vec::new())
        }
    }
}

impl LifecycleObserver for UsageRecorder<'_> {
    fn name(&self) -> &'static str {
        "usage_recorder"
    }

    fn on_foreground(&mut self, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        self.record_event(now)
    }

    fn on_cold_start(&mut self, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        self.record_event(now)
    }
}
