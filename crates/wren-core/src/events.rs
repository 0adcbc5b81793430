use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clearing::ClearTrigger;
use crate::rating::{EnjoymentAnswer, PromptType};

/// Every externally visible decision produces an Event.
/// The host shell observes these; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Outcome of a prompt-type decision on app start. `prompt` is `None`
    /// when no prompt should be shown.
    PromptDecision {
        prompt: Option<PromptType>,
        at: DateTime<Utc>,
    },
    /// The user answered a shown enjoyment prompt.
    EnjoymentAnswerRecorded {
        answer: EnjoymentAnswer,
        at: DateTime<Utc>,
    },
    /// The app was backgrounded with a timed clearing interval configured;
    /// the host should schedule a wake-up at `deadline`.
    DataClearScheduled {
        deadline: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// Browsing data was wiped.
    DataCleared {
        trigger: ClearTrigger,
        at: DateTime<Utc>,
    },
    /// First app open of a calendar day was recorded.
    UsageRecorded { day: NaiveDate, at: DateTime<Utc> },
}
