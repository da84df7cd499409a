//! Log commands - record activity, emotion, and sleep events

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    ActivityKind, ActivityLogged, CheckInResponse, EmotionKind, EmotionLogged, SleepLogged,
    SleepQuality, SleepSource,
};
use crate::engine::{EngineEvent, Evolution};

use super::Session;

/// Record a physical activity
pub fn activity_command(
    kind: &str,
    minutes: u32,
    calories: Option<u32>,
    at: Option<String>,
) -> Result<()> {
    let kind = ActivityKind::from_str(kind)
        .ok_or_else(|| anyhow!("unknown activity kind: {}", kind))?;
    let event = ActivityLogged {
        kind,
        duration_minutes: minutes,
        occurred_at: parse_at(at)?,
        calories_burned: calories,
    };

    let mut session = Session::load()?;
    let events = session.engine.record_activity(&event)?;
    session
        .store
        .persist_activity(&session.config.user_id, &event, session.engine.progress())?;

    println!("Logged {} min of {}.", minutes, kind.as_str());
    print_events(&events);
    Ok(())
}

/// Record an emotional check-in
pub fn emotion_command(
    kind: &str,
    intensity: f32,
    responses: Vec<String>,
    at: Option<String>,
) -> Result<()> {
    let kind =
        EmotionKind::from_str(kind).ok_or_else(|| anyhow!("unknown emotion kind: {}", kind))?;
    let responses = responses
        .iter()
        .map(|r| {
            let (question, answer) = r
                .split_once('=')
                .ok_or_else(|| anyhow!("response must be question=answer, got: {}", r))?;
            Ok(CheckInResponse {
                question: question.trim().to_string(),
                answer: answer.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let event = EmotionLogged {
        kind,
        intensity,
        responses,
        occurred_at: parse_at(at)?,
    };

    let mut session = Session::load()?;
    let events = session.engine.record_emotion(&event)?;
    let entry = session
        .engine
        .moods()
        .entries()
        .last()
        .cloned()
        .ok_or_else(|| anyhow!("mood history empty after check-in"))?;
    session.store.persist_emotion(
        &session.config.user_id,
        &event,
        &entry,
        session.engine.progress(),
        session.config.history_capacity,
    )?;

    println!("Checked in feeling {}.", kind.as_str());
    print_events(&events);
    Ok(())
}

/// Record a sleep session
pub fn sleep_command(
    quality: &str,
    hours: Option<f64>,
    bed: Option<String>,
    wake: Option<String>,
    synced: bool,
) -> Result<()> {
    let quality = SleepQuality::from_str(quality)
        .ok_or_else(|| anyhow!("unknown sleep quality: {}", quality))?;

    let (bed_time, wake_time) = match (bed, wake, hours) {
        (Some(bed), Some(wake), _) => (parse_at(Some(bed))?, parse_at(Some(wake))?),
        (None, wake, Some(hours)) => {
            let wake_time = parse_at(wake)?;
            let bed_time = wake_time - Duration::minutes((hours * 60.0) as i64);
            (bed_time, wake_time)
        }
        _ => bail!("provide either --bed and --wake, or --hours"),
    };

    let event = SleepLogged {
        bed_time,
        wake_time,
        quality,
        source: if synced {
            SleepSource::HealthSync
        } else {
            SleepSource::Manual
        },
    };

    let mut session = Session::load()?;
    let events = session.engine.record_sleep(&event)?;
    session
        .store
        .persist_sleep(&session.config.user_id, &event, session.engine.progress())?;

    println!("Logged {:.1}h of {} sleep.", event.hours(), quality.as_str());
    print_events(&events);
    Ok(())
}

fn parse_at(at: Option<String>) -> Result<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| anyhow!("invalid timestamp {:?}: {}", s, e)),
    }
}

fn print_events(events: &[EngineEvent]) {
    for event in events {
        match event {
            EngineEvent::XpAwarded { amount, reason } => {
                println!("  +{} XP ({})", amount, reason);
            }
            EngineEvent::StreakExtended { count } => {
                println!("  Streak: {} day{}!", count, if *count == 1 { "" } else { "s" });
            }
            EngineEvent::Evolved(Evolution { to, message, .. }) => {
                println!("  Evolution: now a {} bear - {}", to.as_str(), message);
            }
        }
    }
}
