pub mod config;
pub mod lifecycle;
pub mod rating;
pub mod usage;

/// kv flag the host shell sets once onboarding has run (first cold start).
pub(crate) const ONBOARDING_COMPLETE_KEY: &str = "onboarding_complete";
