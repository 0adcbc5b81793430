//! SQLite-backed persistence for the decision engines.
//!
//! Provides storage for:
//! - Distinct usage-day records (one row per calendar day)
//! - The single enjoyment-answer slot
//! - Key-value store for engine state (pending-clear record, host flags)

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};

use super::data_dir;
use crate::clearing::{PendingClear, PendingClearStore};
use crate::error::{CoreError, DatabaseError};
use crate::rating::{EnjoymentAnswer, EnjoymentRepository};
use crate::usage::UsageRepository;

const PENDING_CLEAR_KEY: &str = "pending_clear";

/// SQLite database backing the usage, enjoyment, and pending-clear stores.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/wren/wren.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("wren.db");
        let conn = Connection::open(&path).map_err(|e| DatabaseError::OpenFailed {
            path: path.clone(),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS app_days_used (
                day TEXT PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS app_enjoyment (
                id          INTEGER PRIMARY KEY CHECK (id = 0),
                answer      TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl UsageRepository for Database {
    fn record_usage(&self, day: NaiveDate) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO app_days_used (day) VALUES (?1)",
            params![day.format("%Y-%m-%d").to_string()],
        )?;
        Ok(())
    }

    fn distinct_days_used(&self) -> Result<u32, CoreError> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM app_days_used", [], |row| row.get(0))?;
        Ok(count)
    }

    fn recorded_on(&self, day: NaiveDate) -> Result<bool, CoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM app_days_used WHERE day = ?1)",
            params![day.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl EnjoymentRepository for Database {
    fn current_answer(&self) -> Result<EnjoymentAnswer, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT answer FROM app_enjoyment WHERE id = 0")?;
        let result = stmt.query_row([], |row| row.get::<_, String>(0));
        match result {
            Ok(raw) => Ok(EnjoymentAnswer::from_stored_str(&raw)),
            // Install-level init: the slot starts out NotAnswered.
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(EnjoymentAnswer::NotAnswered),
            Err(e) => Err(e.into()),
        }
    }

    fn set_answer(&self, answer: EnjoymentAnswer) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO app_enjoyment (id, answer, recorded_at) VALUES (0, ?1, ?2)
             ON CONFLICT(id) DO UPDATE
             SET answer = excluded.answer, recorded_at = excluded.recorded_at",
            params![answer.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl PendingClearStore for Database {
    fn load_pending_clear(&self) -> Result<PendingClear, CoreError> {
        match self.kv_get(PENDING_CLEAR_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(PendingClear::none()),
        }
    }

    fn save_pending_clear(&self, pending: &PendingClear) -> Result<(), CoreError> {
        let json = serde_json::to_string(pending)?;
        self.kv_set(PENDING_CLEAR_KEY, &json)
    }
}
