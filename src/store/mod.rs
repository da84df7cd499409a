//! Persistence collaborator for the wellness engine
//!
//! The engine mutates in memory; this store writes each recorded event and
//! the resulting state together in one transaction, so a record operation is
//! either fully persisted or not at all.

mod db;

pub use db::{day_bucket, WellnessDb};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Transaction};

use crate::domain::{
    ActivityKind, ActivityLogged, EmotionKind, EmotionLogged, SleepLogged, SleepQuality,
    SleepSource, UserId,
};
use crate::engine::{Level, MoodEntry, MoodHistory, Position, ProgressState};

/// Store handle for a single database
#[derive(Clone)]
pub struct WellnessStore {
    db: WellnessDb,
}

impl WellnessStore {
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            db: WellnessDb::open_default()?,
        })
    }

    pub fn with_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self {
            db: WellnessDb::open(path)?,
        })
    }

    // ========================================
    // LOADING
    // ========================================

    /// Load a user's progress state, or the default state for a new user.
    pub fn load_progress(&self, user: &UserId) -> Result<ProgressState> {
        let conn = self.db.conn();
        let row = conn
            .query_row(
                "SELECT level, experience, total_activities, consecutive_days,
                        last_active_date, unlocked_features, evolution_history
                 FROM progress WHERE user_id = ?1",
                [user.as_str()],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, u32>(1)?,
                        r.get::<_, u32>(2)?,
                        r.get::<_, u32>(3)?,
                        r.get::<_, Option<String>>(4)?,
                        r.get::<_, String>(5)?,
                        r.get::<_, String>(6)?,
                    ))
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        let Some((level, experience, total_activities, consecutive_days, last_date, features, history)) =
            row
        else {
            return Ok(ProgressState::default());
        };

        Ok(ProgressState {
            level: Level::from_str(&level).unwrap_or(Level::Cub),
            experience,
            total_activities,
            consecutive_days,
            last_active_date: last_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            unlocked_features: serde_json::from_str(&features)
                .context("corrupt unlocked_features column")?,
            evolution_history: serde_json::from_str(&history)
                .context("corrupt evolution_history column")?,
        })
    }

    /// Load a user's mood history with the given capacity.
    pub fn load_moods(&self, user: &UserId, capacity: usize) -> Result<MoodHistory> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT kind, intensity, timestamp, pos_x, pos_y, pos_z
             FROM mood_entries WHERE user_id = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([user.as_str()], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, f32>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, f32>(3)?,
                r.get::<_, f32>(4)?,
                r.get::<_, f32>(5)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (kind, intensity, ts, x, y, z) = row?;
            let Some(kind) = EmotionKind::from_str(&kind) else {
                continue; // skip rows written by a newer version
            };
            let Some(timestamp) = DateTime::from_timestamp_millis(ts) else {
                continue;
            };
            entries.push(MoodEntry {
                kind,
                intensity,
                timestamp,
                position: Position { x, y, z },
            });
        }
        MoodHistory::restore(capacity, entries).map_err(Into::into)
    }

    // ========================================
    // RECORDING (event + state, one transaction)
    // ========================================

    /// Persist a recorded activity together with the updated progress state.
    pub fn persist_activity(
        &self,
        user: &UserId,
        event: &ActivityLogged,
        state: &ProgressState,
    ) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO activity_log (user_id, kind, duration_minutes, occurred_at, calories_burned, day_bucket)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.as_str(),
                event.kind.as_str(),
                event.duration_minutes,
                event.occurred_at.timestamp_millis(),
                event.calories_burned,
                day_bucket(event.occurred_at),
            ],
        )?;
        upsert_progress(&tx, user, state)?;
        tx.commit()?;
        tracing::debug!(user = %user, kind = event.kind.as_str(), "activity persisted");
        Ok(())
    }

    /// Persist a recorded emotion, its mood entry, and the updated state.
    pub fn persist_emotion(
        &self,
        user: &UserId,
        event: &EmotionLogged,
        entry: &MoodEntry,
        state: &ProgressState,
        capacity: usize,
    ) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO emotion_log (user_id, kind, intensity, responses, occurred_at, day_bucket)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.as_str(),
                event.kind.as_str(),
                event.intensity,
                serde_json::to_string(&event.responses)?,
                event.occurred_at.timestamp_millis(),
                day_bucket(event.occurred_at),
            ],
        )?;
        tx.execute(
            "INSERT INTO mood_entries (user_id, kind, intensity, timestamp, pos_x, pos_y, pos_z)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.as_str(),
                entry.kind.as_str(),
                entry.intensity,
                entry.timestamp.timestamp_millis(),
                entry.position.x,
                entry.position.y,
                entry.position.z,
            ],
        )?;
        // Mirror the in-memory FIFO bound: keep only the newest `capacity` rows.
        tx.execute(
            "DELETE FROM mood_entries WHERE user_id = ?1 AND id NOT IN (
                 SELECT id FROM mood_entries WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2
             )",
            params![user.as_str(), capacity as i64],
        )?;
        upsert_progress(&tx, user, state)?;
        tx.commit()?;
        tracing::debug!(user = %user, kind = event.kind.as_str(), "emotion persisted");
        Ok(())
    }

    /// Persist a recorded sleep session together with the updated state.
    pub fn persist_sleep(
        &self,
        user: &UserId,
        event: &SleepLogged,
        state: &ProgressState,
    ) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO sleep_log (user_id, bed_time, wake_time, quality, source, day_bucket)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.as_str(),
                event.bed_time.timestamp_millis(),
                event.wake_time.timestamp_millis(),
                event.quality.as_str(),
                event.source.as_str(),
                day_bucket(event.wake_time),
            ],
        )?;
        upsert_progress(&tx, user, state)?;
        tx.commit()?;
        tracing::debug!(user = %user, "sleep persisted");
        Ok(())
    }

    // ========================================
    // QUERIES
    // ========================================

    /// Activities on or after the given day, oldest first.
    pub fn activities_since(&self, user: &UserId, cutoff: NaiveDate) -> Result<Vec<ActivityLogged>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT kind, duration_minutes, occurred_at, calories_burned
             FROM activity_log WHERE user_id = ?1 AND day_bucket >= ?2 ORDER BY id ASC",
        )?;
        let cutoff = cutoff.format("%Y-%m-%d").to_string();
        let rows = stmt.query_map(params![user.as_str(), cutoff], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, u32>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, Option<u32>>(3)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (kind, duration_minutes, ts, calories_burned) = row?;
            let (Some(kind), Some(occurred_at)) = (
                ActivityKind::from_str(&kind),
                DateTime::from_timestamp_millis(ts),
            ) else {
                continue;
            };
            out.push(ActivityLogged {
                kind,
                duration_minutes,
                occurred_at,
                calories_burned,
            });
        }
        Ok(out)
    }

    /// Emotion check-ins on or after the given day, oldest first.
    pub fn emotions_since(&self, user: &UserId, cutoff: NaiveDate) -> Result<Vec<EmotionLogged>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT kind, intensity, responses, occurred_at
             FROM emotion_log WHERE user_id = ?1 AND day_bucket >= ?2 ORDER BY id ASC",
        )?;
        let cutoff = cutoff.format("%Y-%m-%d").to_string();
        let rows = stmt.query_map(params![user.as_str(), cutoff], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, f32>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, i64>(3)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (kind, intensity, responses, ts) = row?;
            let (Some(kind), Some(occurred_at)) = (
                EmotionKind::from_str(&kind),
                DateTime::from_timestamp_millis(ts),
            ) else {
                continue;
            };
            out.push(EmotionLogged {
                kind,
                intensity,
                responses: serde_json::from_str(&responses).unwrap_or_default(),
                occurred_at,
            });
        }
        Ok(out)
    }

    /// Sleep sessions waking on or after the given day, oldest first.
    pub fn sleeps_since(&self, user: &UserId, cutoff: NaiveDate) -> Result<Vec<SleepLogged>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT bed_time, wake_time, quality, source
             FROM sleep_log WHERE user_id = ?1 AND day_bucket >= ?2 ORDER BY id ASC",
        )?;
        let cutoff = cutoff.format("%Y-%m-%d").to_string();
        let rows = stmt.query_map(params![user.as_str(), cutoff], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, i64>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (bed, wake, quality, source) = row?;
            let (Some(bed_time), Some(wake_time), Some(quality)) = (
                DateTime::from_timestamp_millis(bed),
                DateTime::from_timestamp_millis(wake),
                SleepQuality::from_str(&quality),
            ) else {
                continue;
            };
            out.push(SleepLogged {
                bed_time,
                wake_time,
                quality,
                source: SleepSource::from_str(&source).unwrap_or_default(),
            });
        }
        Ok(out)
    }
}

fn upsert_progress(tx: &Transaction<'_>, user: &UserId, state: &ProgressState) -> Result<()> {
    let now = Utc::now().timestamp_millis();
    tx.execute(
        "INSERT INTO progress
             (user_id, level, experience, total_activities, consecutive_days,
              last_active_date, unlocked_features, evolution_history, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(user_id) DO UPDATE SET
             level = ?2, experience = ?3, total_activities = ?4, consecutive_days = ?5,
             last_active_date = ?6, unlocked_features = ?7, evolution_history = ?8,
             updated_at = ?9",
        params![
            user.as_str(),
            state.level.as_str(),
            state.experience,
            state.total_activities,
            state.consecutive_days,
            state
                .last_active_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            serde_json::to_string(&state.unlocked_features)?,
            serde_json::to_string(&state.evolution_history)?,
            now,
        ],
    )?;
    Ok(())
}
