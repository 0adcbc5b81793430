//! Records the user's response to a shown enjoyment prompt.

use chrono::{DateTime, Utc};

use super::{EnjoymentAnswer, EnjoymentRepository};
use crate::error::CoreError;
use crate::events::Event;

/// Notified with each recorded answer, synchronously, exactly once.
pub trait AnswerEmitter {
    fn answer_recorded(&self, answer: EnjoymentAnswer);
}

/// Persists the user's answer, overwriting the prior one, then notifies the
/// emitter before returning. If persistence fails the emitter is not
/// notified: no answer is ever reported that was not stored.
pub struct AppEnjoymentRecorder<'a> {
    repository: &'a dyn EnjoymentRepository,
    emitter: &'a dyn AnswerEmitter,
}

impl<'a> AppEnjoymentRecorder<'a> {
    pub fn new(repository: &'a dyn EnjoymentRepository, emitter: &'a dyn AnswerEmitter) -> Self {
        Self {
            repository,
            emitter,
        }
    }

    pub fn record_answer(
        &self,
        answer: EnjoymentAnswer,
        now: DateTime<Utc>,
    ) -> Result<Event, CoreError> {
        self.repository.set_answer(answer)?;
        self.emitter.answer_recorded(answer);
        Ok(Event::EnjoymentAnswerRecorded { answer, at: now })
    }
}
