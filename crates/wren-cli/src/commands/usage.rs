use chrono::Utc;
use clap::Subcommand;
use wren_core::storage::Database;
use wren_core::UsageRecorder;

#[derive(Subcommand)]
pub enum UsageAction {
    /// Record that the app was used today
    Record,
    /// Print usage counters as JSON
    Status,
}

pub fn run(action: UsageAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let recorder = UsageRecorder::new(&db);
    let now = Utc::now();

    match action {
        UsageAction::Record => {
            let newly_recorded = recorder.record_today(now)?;
            let status = serde_json::json!({
                "recorded": newly_recorded,
                "days_used": recorder.days_used()?,
            });
            println!("{}", serde_json::to_string(&status)?);
        }
        UsageAction::Status => {
            let status = serde_json::json!({
                "days_used": recorder.days_used()?,
                "recorded_today": recorder.recorded_today(now)?,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
