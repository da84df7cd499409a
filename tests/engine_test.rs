//! End-to-end tests: record events through the engine, persist, and reload.

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::tempdir;

use wellbear::domain::{
    ActivityKind, ActivityLogged, EmotionKind, EmotionLogged, SleepLogged, SleepQuality,
    SleepSource, UserId,
};
use wellbear::engine::{GoalId, Level, WellnessEngine};
use wellbear::store::WellnessStore;

fn activity(day: u32, minutes: u32) -> ActivityLogged {
    ActivityLogged {
        kind: ActivityKind::Running,
        duration_minutes: minutes,
        occurred_at: Utc.with_ymd_and_hms(2025, 3, day, 8, 0, 0).unwrap(),
        calories_burned: Some(200),
    }
}

fn emotion(day: u32, kind: EmotionKind) -> EmotionLogged {
    EmotionLogged {
        kind,
        intensity: 0.7,
        responses: vec![],
        occurred_at: Utc.with_ymd_and_hms(2025, 3, day, 21, 0, 0).unwrap(),
    }
}

fn sleep(day: u32) -> SleepLogged {
    SleepLogged {
        bed_time: Utc.with_ymd_and_hms(2025, 3, day - 1, 23, 0, 0).unwrap(),
        wake_time: Utc.with_ymd_and_hms(2025, 3, day, 7, 0, 0).unwrap(),
        quality: SleepQuality::Good,
        source: SleepSource::HealthSync,
    }
}

#[test]
fn test_week_of_logging_roundtrips_through_store() {
    let dir = tempdir().unwrap();
    let store = WellnessStore::with_path(&dir.path().join("wellbear.db")).unwrap();
    let user = UserId::generate();
    let capacity = 30;
    let weekly_goal = 3;

    let mut engine = WellnessEngine::new(weekly_goal);

    // A consistent week: 2025-03-10 (Monday) through 03-14.
    for day in 10..=14 {
        let a = activity(day, 30);
        engine.record_activity(&a).unwrap();
        store.persist_activity(&user, &a, engine.progress()).unwrap();

        let e = emotion(day, EmotionKind::Grateful);
        engine.record_emotion(&e).unwrap();
        let entry = engine.moods().entries().last().cloned().unwrap();
        store
            .persist_emotion(&user, &e, &entry, engine.progress(), capacity)
            .unwrap();

        let s = sleep(day);
        engine.record_sleep(&s).unwrap();
        store.persist_sleep(&user, &s, engine.progress()).unwrap();
    }

    // 5 days * (26 + 20 + 18) = 320 XP: Young, not yet Adult.
    assert_eq!(engine.progress().experience, 320);
    assert_eq!(engine.progress().level, Level::Young);
    assert_eq!(engine.progress().consecutive_days, 5);

    // Reload from storage and verify the state survives intact.
    let progress = store.load_progress(&user).unwrap();
    assert_eq!(progress.experience, 320);
    assert_eq!(progress.level, Level::Young);
    assert_eq!(progress.consecutive_days, 5);
    assert_eq!(progress.evolution_history.len(), 1);

    let moods = store.load_moods(&user, capacity).unwrap();
    assert_eq!(moods.len(), 5);
    assert_eq!(moods.recent_kind(), Some(EmotionKind::Grateful));

    // Resume and keep going: one more big activity crosses the Adult line.
    let mut resumed = WellnessEngine::from_parts(progress, moods, weekly_goal);
    let a = activity(15, 60);
    let events = resumed.record_activity(&a).unwrap();
    // 320 + 30 = 350, exactly the Adult threshold
    assert_eq!(resumed.progress().level, Level::Adult);
    assert!(events
        .iter()
        .any(|e| matches!(e, wellbear::EngineEvent::Evolved(ev) if ev.to == Level::Adult)));
    assert_eq!(resumed.progress().consecutive_days, 6);
}

#[test]
fn test_weekly_stats_from_stored_logs() {
    let dir = tempdir().unwrap();
    let store = WellnessStore::with_path(&dir.path().join("wellbear.db")).unwrap();
    let user = UserId::generate();
    let mut engine = WellnessEngine::new(3);

    for day in 10..=12 {
        let a = activity(day, 30);
        engine.record_activity(&a).unwrap();
        store.persist_activity(&user, &a, engine.progress()).unwrap();
    }
    for day in 10..=12 {
        let e = emotion(day, EmotionKind::Peaceful);
        engine.record_emotion(&e).unwrap();
        let entry = engine.moods().entries().last().cloned().unwrap();
        store
            .persist_emotion(&user, &e, &entry, engine.progress(), 30)
            .unwrap();
    }

    let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let activities = store.activities_since(&user, monday).unwrap();
    let emotions = store.emotions_since(&user, monday).unwrap();
    let sleeps = store.sleeps_since(&user, monday).unwrap();
    assert_eq!(activities.len(), 3);
    assert_eq!(emotions.len(), 3);
    assert!(sleeps.is_empty());

    let stats = engine.weekly_stats(&activities, &emotions, &sleeps, today);
    assert_eq!(stats.week_start, monday);
    assert_eq!(stats.activities_completed, 3);
    assert_eq!(stats.emotions_tracked, 3);
    // No sleep data: the documented default, not an error.
    assert_eq!(stats.sleep_quality, SleepQuality::Fair);
    // 3 * 26 + 3 * 20
    assert_eq!(stats.experience_earned, 138);
    assert_eq!(
        stats.goals_achieved,
        vec![GoalId::WeeklyActivityGoal, GoalId::EmotionalTrackingGoal]
    );
}
