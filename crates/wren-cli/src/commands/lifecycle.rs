use chrono::Utc;
use clap::Subcommand;
use wren_core::diagnostics::StderrSink;
use wren_core::storage::{Database, Settings};
use wren_core::{
    AppLifecycleEvent, AutomaticDataClearer, ClearDataAction, ClearError, ClearerState,
    LifecycleRegistry, UsageRecorder,
};

const CLEARER_STATE_KEY: &str = "data_clearer_state";
const LAST_CLEARED_KEY: &str = "last_cleared_at";

#[derive(Subcommand)]
pub enum LifecycleAction {
    /// App moved to the foreground
    Foreground,
    /// App moved to the background
    Background,
    /// Fresh process start
    ColdStart,
}

/// Host-side wipe hook: the real browsing-data deletion lives in the mobile
/// shells; here we just record that a wipe happened.
struct HostClearAction<'a> {
    db: &'a Database,
}

impl ClearDataAction for HostClearAction<'_> {
    fn clear(&self) -> Result<(), ClearError> {
        self.db
            .kv_set(LAST_CLEARED_KEY, &Utc::now().to_rfc3339())
            .map_err(|e| ClearError::ActionFailed(e.to_string()))
    }
}

fn load_state(db: &Database) -> ClearerState {
    if let Ok(Some(json)) = db.kv_get(CLEARER_STATE_KEY) {
        if let Ok(state) = serde_json::from_str::<ClearerState>(&json) {
            return state;
        }
    }
    ClearerState::default()
}

fn save_state(db: &Database, state: ClearerState) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(&state)?;
    db.kv_set(CLEARER_STATE_KEY, &json)?;
    Ok(())
}

pub fn run(action: LifecycleAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let settings = Settings::load_or_default();
    let sink = StderrSink;
    let clear_action = HostClearAction { db: &db };
    let now = Utc::now();

    let (event, state) = match action {
        LifecycleAction::Foreground => (AppLifecycleEvent::Foreground, load_state(&db)),
        LifecycleAction::Background => (AppLifecycleEvent::Background, load_state(&db)),
        // A cold start is a fresh process: the in-memory state machine
        // starts over, only the persisted pending record survives.
        LifecycleAction::ColdStart => (AppLifecycleEvent::ColdStart, ClearerState::default()),
    };

    let mut usage = UsageRecorder::new(&db);
    let mut clearer = AutomaticDataClearer::with_state(state, &settings, &clear_action, &db, &sink);

    let events = {
        let mut registry = LifecycleRegistry::new(&sink);
        registry.register(&mut usage);
        registry.register(&mut clearer);
        registry.dispatch(event, now)
    };

    save_state(&db, clearer.state())?;

    if matches!(event, AppLifecycleEvent::ColdStart) {
        // The host shell runs onboarding on first start; mark it complete.
        db.kv_set(super::ONBOARDING_COMPLETE_KEY, "true")?;
    }

    for e in &events {
        println!("{}", serde_json::to_string(e)?);
    }
    Ok(())
}
