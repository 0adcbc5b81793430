//! Prompt-type decision logic.
//!
//! Two tagged sub-deciders behind one trait, evaluated in fixed priority
//! order by [`PromptTypeDecider`]: Initial first, Secondary only if Initial
//! declines. Each sub-decider is a pure read of usage and enjoyment state.

use chrono::{DateTime, Utc};

use super::{EnjoymentAnswer, EnjoymentRepository, OnboardingState, PromptType, StoreAvailability};
use crate::diagnostics::{self, DiagnosticSink};
use crate::events::Event;
use crate::usage::UsageRepository;

/// Default distinct-days-used threshold for the initial prompt.
pub const DEFAULT_INITIAL_MIN_DAYS_USED: u32 = 2;
/// Default distinct-days-used threshold for the secondary prompt.
pub const DEFAULT_SECONDARY_MIN_DAYS_USED: u32 = 7;

/// Stateless predicate deciding whether one prompt variant should show.
pub trait ShowPromptDecider {
    fn should_show_prompt(&self) -> Option<PromptType>;
}

/// Shows the first enjoyment question to users who have used the app on
/// enough distinct days and have never answered.
pub struct InitialPromptDecider<'a> {
    usage: &'a dyn UsageRepository,
    enjoyment: &'a dyn EnjoymentRepository,
    diagnostics: &'a dyn DiagnosticSink,
    min_days_used: u32,
}

impl<'a> InitialPromptDecider<'a> {
    pub fn new(
        usage: &'a dyn UsageRepository,
        enjoyment: &'a dyn EnjoymentRepository,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self::with_threshold(usage, enjoyment, diagnostics, DEFAULT_INITIAL_MIN_DAYS_USED)
    }

    pub fn with_threshold(
        usage: &'a dyn UsageRepository,
        enjoyment: &'a dyn EnjoymentRepository,
        diagnostics: &'a dyn DiagnosticSink,
        min_days_used: u32,
    ) -> Self {
        Self {
            usage,
            enjoyment,
            diagnostics,
            min_days_used,
        }
    }
}

impl ShowPromptDecider for InitialPromptDecider<'_> {
    fn should_show_prompt(&self) -> Option<PromptType> {
        let days = safe_days_used(self.usage, self.diagnostics);
        let answer = safe_current_answer(self.enjoyment, self.diagnostics);
        if days >= self.min_days_used && answer == EnjoymentAnswer::NotAnswered {
            Some(PromptType::EnjoymentQuestion)
        } else {
            None
        }
    }
}

/// Re-asks users who previously said they were not enjoying the app, after
/// more usage. Users who rated, declined, or confirmed enjoying are never
/// re-prompted.
pub struct SecondaryPromptDecider<'a> {
    usage: &'a dyn UsageRepository,
    enjoyment: &'a dyn EnjoymentRepository,
    diagnostics: &'a dyn DiagnosticSink,
    min_days_used: u32,
}

impl<'a> SecondaryPromptDecider<'a> {
    pub fn new(
        usage: &'a dyn UsageRepository,
        enjoyment: &'a dyn EnjoymentRepository,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self::with_threshold(
            usage,
            enjoyment,
            diagnostics,
            DEFAULT_SECONDARY_MIN_DAYS_USED,
        )
    }

    pub fn with_threshold(
        usage: &'a dyn UsageRepository,
        enjoyment: &'a dyn EnjoymentRepository,
        diagnostics: &'a dyn DiagnosticSink,
        min_days_used: u32,
    ) -> Self {
        Self {
            usage,
            enjoyment,
            diagnostics,
            min_days_used,
        }
    }
}

impl ShowPromptDecider for SecondaryPromptDecider<'_> {
    fn should_show_prompt(&self) -> Option<PromptType> {
        let days = safe_days_used(self.usage, self.diagnostics);
        let answer = safe_current_answer(self.enjoyment, self.diagnostics);
        let eligible_answer = matches!(
            answer,
            EnjoymentAnswer::NotAnswered | EnjoymentAnswer::NotEnjoying
        );
        if days >= self.min_days_used && eligible_answer {
            Some(PromptType::SecondaryEnjoymentQuestion)
        } else {
            None
        }
    }
}

/// Top-level decider run on app start. Gates on store availability and
/// onboarding completion, then evaluates the sub-deciders strictly in order;
/// the first non-`None` result wins.
pub struct PromptTypeDecider<'a> {
    store: &'a dyn StoreAvailability,
    onboarding: &'a dyn OnboardingState,
    initial: &'a dyn ShowPromptDecider,
    secondary: &'a dyn ShowPromptDecider,
}

impl<'a> PromptTypeDecider<'a> {
    pub fn new(
        store: &'a dyn StoreAvailability,
        onboarding: &'a dyn OnboardingState,
        initial: &'a dyn ShowPromptDecider,
        secondary: &'a dyn ShowPromptDecider,
    ) -> Self {
        Self {
            store,
            onboarding,
            initial,
            secondary,
        }
    }

    pub fn decide(&self) -> Option<PromptType> {
        if !self.store.is_rating_available() {
            return None;
        }
        if !self.onboarding.is_complete() {
            return None;
        }
        self.initial
            .should_show_prompt()
            .or_else(|| self.secondary.should_show_prompt())
    }

    /// Decide and wrap the outcome in the event surfaced to the
    /// presentation layer.
    pub fn decide_event(&self, now: DateTime<Utc>) -> Event {
        Event::PromptDecision {
            prompt: self.decide(),
            at: now,
        }
    }
}

/// Storage read failures fail safe toward not prompting: days read as 0.
fn safe_days_used(usage: &dyn UsageRepository, diagnostics: &dyn DiagnosticSink) -> u32 {
    usage.distinct_days_used().unwrap_or_else(|e| {
        diagnostics.emit(
            diagnostics::STORAGE_READ_FAILED,
            &[("store", "usage"), ("error", &e.to_string())],
        );
        0
    })
}

/// Storage read failures fail safe toward not prompting: answer reads as
/// `NotAnswered` (which still blocks the secondary path because days also
/// degrade to 0).
fn safe_current_answer(
    enjoyment: &dyn EnjoymentRepository,
    diagnostics: &dyn DiagnosticSink,
) -> EnjoymentAnswer {
    enjoyment.current_answer().unwrap_or_else(|e| {
        diagnostics.emit(
            diagnostics::STORAGE_READ_FAILED,
            &[("store", "enjoyment"), ("error", &e.to_string())],
        );
        EnjoymentAnswer::NotAnswered
    })
}
