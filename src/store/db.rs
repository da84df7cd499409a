//! SQLite database connection and schema for wellbear state
//!
//! Manages the `~/.wellbear/wellbear.db` database. The engine itself never
//! touches storage; this collaborator persists its state and the raw event
//! logs.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use rusqlite::Connection;

/// Database wrapper shared by the store handles
#[derive(Clone)]
pub struct WellnessDb {
    conn: Arc<Mutex<Connection>>,
}

impl WellnessDb {
    /// Open or create the database at the default location (~/.wellbear/wellbear.db)
    pub fn open_default() -> Result<Self> {
        let db_path = crate::config::Config::global_config_dir().join("wellbear.db");
        Self::open(&db_path)
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open wellbear db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a guard on the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("wellbear db lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }
}

/// Day bucket string ("YYYY-MM-DD") for a timestamp, used by weekly queries.
pub fn day_bucket(at: DateTime<Utc>) -> String {
    format!("{:04}-{:02}-{:02}", at.year(), at.month(), at.day())
}

const SCHEMA_SQL: &str = r#"
-- Per-user progress state; feature flags and evolution history are
-- serialized as JSON since the engine owns their shape.
CREATE TABLE IF NOT EXISTS progress (
    user_id TEXT PRIMARY KEY,
    level TEXT NOT NULL,
    experience INTEGER NOT NULL,
    total_activities INTEGER NOT NULL,
    consecutive_days INTEGER NOT NULL,
    last_active_date TEXT,
    unlocked_features TEXT NOT NULL,
    evolution_history TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Bounded mood history; rowid preserves insertion order.
CREATE TABLE IF NOT EXISTS mood_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    intensity REAL NOT NULL,
    timestamp INTEGER NOT NULL,
    pos_x REAL NOT NULL,
    pos_y REAL NOT NULL,
    pos_z REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_mood_user ON mood_entries(user_id, id);

-- Raw event logs
CREATE TABLE IF NOT EXISTS activity_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    occurred_at INTEGER NOT NULL,
    calories_burned INTEGER,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_activity_user_day ON activity_log(user_id, day_bucket);

CREATE TABLE IF NOT EXISTS emotion_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    intensity REAL NOT NULL,
    responses TEXT NOT NULL,
    occurred_at INTEGER NOT NULL,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_emotion_user_day ON emotion_log(user_id, day_bucket);

CREATE TABLE IF NOT EXISTS sleep_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    bed_time INTEGER NOT NULL,
    wake_time INTEGER NOT NULL,
    quality TEXT NOT NULL,
    source TEXT NOT NULL,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sleep_user_day ON sleep_log(user_id, day_bucket);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_bucket_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 5, 23, 59, 0).unwrap();
        assert_eq!(day_bucket(at), "2025-03-05");
    }

    #[test]
    fn test_open_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let db = WellnessDb::open(&dir.path().join("test.db")).unwrap();
        let conn = db.conn();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('progress', 'mood_entries', 'activity_log', 'emotion_log', 'sleep_log')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }
}
