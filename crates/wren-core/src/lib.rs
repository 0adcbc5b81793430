//! # Wren Browser Core Library
//!
//! This library provides the core decision logic for the Wren mobile
//! browser. It implements a CLI-first philosophy where the engines can be
//! driven and inspected via a standalone CLI binary, with the mobile shells
//! being thin hosts over the same core library.
//!
//! ## Architecture
//!
//! - **Automatic data clearing**: A wall-clock-based state machine that the
//!   host drives with lifecycle transitions; it decides when backgrounding
//!   has lasted long enough that browsing data must be wiped on resume
//! - **Rating prompts**: Ordered deciders that pick which "are you enjoying
//!   Wren" prompt (if any) to show on app start
//! - **Storage**: SQLite-based usage/enjoyment records and TOML-based
//!   settings
//! - **Lifecycle**: An ordered observer registry the host dispatches
//!   foreground/background/cold-start events through
//!
//! ## Key Components
//!
//! - [`AutomaticDataClearer`]: Data-clearing state machine
//! - [`PromptTypeDecider`]: Rating prompt decision engine
//! - [`Database`]: Usage and enjoyment persistence
//! - [`Settings`]: User settings management

pub mod clearing;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod rating;
pub mod storage;
pub mod usage;

pub use clearing::{
    AutomaticDataClearer, BackgroundTimeKeeper, ClearDataAction, ClearTrigger, ClearerState,
    ClearingInterval, ClearingIntervalSetting, PendingClear, PendingClearState, PendingClearStore,
};
pub use diagnostics::DiagnosticSink;
pub use error::{ClearError, ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use lifecycle::{AppLifecycleEvent, LifecycleObserver, LifecycleRegistry};
pub use rating::{
    AppEnjoymentRecorder, EnjoymentAnswer, EnjoymentRepository, InitialPromptDecider,
    OnboardingState, PromptType, PromptTypeDecider, SecondaryPromptDecider, ShowPromptDecider,
    StoreAvailability,
};
pub use storage::{Database, Settings};
pub use usage::{UsageRecorder, UsageRepository};
