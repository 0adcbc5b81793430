//! App-rating prompt decision engine.
//!
//! Decides, from usage history and the user's prior answer, whether and
//! which kind of "are you enjoying Wren" prompt to show on app start,
//! and records the answer the user gives to a shown prompt.

pub mod deciders;
pub mod recorder;

pub use deciders::{
    InitialPromptDecider, PromptTypeDecider, SecondaryPromptDecider, ShowPromptDecider,
};
pub use recorder::{AnswerEmitter, AppEnjoymentRecorder};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which variant of the rating/feedback prompt should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
    /// First "are you enjoying the app?" question.
    EnjoymentQuestion,
    /// Follow-up question for users who were not enjoying it last time.
    SecondaryEnjoymentQuestion,
}

/// The user's latest answer to an enjoyment prompt.
///
/// A single current-value slot: each prompt cycle overwrites the previous
/// answer, history is not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnjoymentAnswer {
    #[default]
    NotAnswered,
    Enjoying,
    NotEnjoying,
    Rated,
    Declined,
    Feedback,
}

impl EnjoymentAnswer {
    pub fn as_str(self) -> &'static str {
        match self {
            EnjoymentAnswer::NotAnswered => "not_answered",
            EnjoymentAnswer::Enjoying => "enjoying",
            EnjoymentAnswer::NotEnjoying => "not_enjoying",
            EnjoymentAnswer::Rated => "rated",
            EnjoymentAnswer::Declined => "declined",
            EnjoymentAnswer::Feedback => "feedback",
        }
    }

    /// Parse a stored value. Unknown strings read as `NotAnswered`, which
    /// fails safe toward not prompting.
    pub fn from_stored_str(s: &str) -> Self {
        match s {
            "enjoying" => EnjoymentAnswer::Enjoying,
            "not_enjoying" => EnjoymentAnswer::NotEnjoying,
            "rated" => EnjoymentAnswer::Rated,
            "declined" => EnjoymentAnswer::Declined,
            "feedback" => EnjoymentAnswer::Feedback,
            _ => EnjoymentAnswer::NotAnswered,
        }
    }
}

/// Storage for the single enjoyment-answer slot.
pub trait EnjoymentRepository {
    fn current_answer(&self) -> Result<EnjoymentAnswer, CoreError>;
    fn set_answer(&self, answer: EnjoymentAnswer) -> Result<(), CoreError>;
}

/// Whether rating through the platform app store is available on this device.
pub trait StoreAvailability {
    fn is_rating_available(&self) -> bool;
}

/// Whether the user has finished onboarding. No prompt is shown before that.
pub trait OnboardingState {
    fn is_complete(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_str_roundtrip() {
        for answer in [
            EnjoymentAnswer::NotAnswered,
            EnjoymentAnswer::Enjoying,
            EnjoymentAnswer::NotEnjoying,
            EnjoymentAnswer::Rated,
            EnjoymentAnswer::Declined,
            EnjoymentAnswer::Feedback,
        ] {
            assert_eq!(EnjoymentAnswer::from_stored_str(answer.as_str()), answer);
        }
    }

    #[test]
    fn unknown_stored_answer_reads_as_not_answered() {
        assert_eq!(
            EnjoymentAnswer::from_stored_str("garbage"),
            EnjoymentAnswer::NotAnswered
        );
    }
}
