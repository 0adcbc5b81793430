use chrono::Utc;
use clap::Subcommand;
use wren_core::diagnostics::StderrSink;
use wren_core::storage::{Database, Settings};
use wren_core::rating::AnswerEmitter;
use wren_core::{
    AppEnjoymentRecorder, EnjoymentAnswer, EnjoymentRepository, InitialPromptDecider,
    OnboardingState, PromptTypeDecider, SecondaryPromptDecider, StoreAvailability, UsageRecorder,
};

#[derive(Subcommand)]
pub enum RatingAction {
    /// Decide which prompt (if any) should be shown now
    Check,
    /// Record the user's answer to a shown prompt
    Answer {
        /// One of: enjoying, not_enjoying, rated, declined, feedback
        answer: String,
    },
    /// Print current rating-engine state as JSON
    Status,
}

/// The CLI host always has a store frontend to rate through.
struct HostStore;

impl StoreAvailability for HostStore {
    fn is_rating_available(&self) -> bool {
        true
    }
}

/// Onboarding completion is a kv flag the lifecycle command sets after the
/// first cold start.
struct HostOnboarding<'a> {
    db: &'a Database,
}

impl OnboardingState for HostOnboarding<'_> {
    fn is_complete(&self) -> bool {
        self.db
            .kv_get(super::ONBOARDING_COMPLETE_KEY)
            .ok()
            .flatten()
            .as_deref()
            == Some("true")
    }
}

struct StderrEmitter;

impl AnswerEmitter for StderrEmitter {
    fn answer_recorded(&self, answer: EnjoymentAnswer) {
        eprintln!("answer recorded: {}", answer.as_str());
    }
}

fn parse_answer(raw: &str) -> Result<EnjoymentAnswer, Box<dyn std::error::Error>> {
    match raw {
        "enjoying" => Ok(EnjoymentAnswer::Enjoying),
        "not_enjoying" => Ok(EnjoymentAnswer::NotEnjoying),
        "rated" => Ok(EnjoymentAnswer::Rated),
        "declined" => Ok(EnjoymentAnswer::Declined),
        "feedback" => Ok(EnjoymentAnswer::Feedback),
        other => Err(format!(
            "unknown answer '{other}' (expected enjoying, not_enjoying, rated, declined, feedback)"
        )
        .into()),
    }
}

pub fn run(action: RatingAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let settings = Settings::load_or_default();
    let sink = StderrSink;

    match action {
        RatingAction::Check => {
            let store = HostStore;
            let onboarding = HostOnboarding { db: &db };
            let initial = InitialPromptDecider::with_threshold(
                &db,
                &db,
                &sink,
                settings.rating.initial_prompt_min_days_used,
            );
            let secondary = SecondaryPromptDecider::with_threshold(
                &db,
                &db,
                &sink,
                settings.rating.secondary_prompt_min_days_used,
            );
            let decider = PromptTypeDecider::new(&store, &onboarding, &initial, &secondary);
            let event = decider.decide_event(Utc::now());
            println!("{}", serde_json::to_string(&event)?);
        }
        RatingAction::Answer { answer } => {
            let emitter = StderrEmitter;
            let recorder = AppEnjoymentRecorder::new(&db, &emitter);
            let event = recorder.record_answer(parse_answer(&answer)?, Utc::now())?;
            println!("{}", serde_json::to_string(&event)?);
        }
        RatingAction::Status => {
            let usage = UsageRecorder::new(&db);
            let status = serde_json::json!({
                "days_used": usage.days_used()?,
                "recorded_today": usage.recorded_today(Utc::now())?,
                "current_answer": db.current_answer()?,
                "initial_prompt_min_days_used": settings.rating.initial_prompt_min_days_used,
                "secondary_prompt_min_days_used": settings.rating.secondary_prompt_min_days_used,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
