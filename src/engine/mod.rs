//! Wellness engine - progress, gamification, and aggregation core
//!
//! Turns raw logged events into a bounded mood history, a leveling state
//! machine, and weighted wellness scores.
//!
//! # Architecture
//!
//! ```text
//! ActivityLogged ─┐
//! EmotionLogged ──┼─► WellnessEngine ──► ProgressTracker (XP, level, streak)
//! SleepLogged ────┘         │
//!                           └──────────► MoodHistory (emotions only)
//! ```
//!
//! Recording an event applies the XP award, the daily-streak update, and
//! (for emotions) the mood-history append as one in-memory unit; callers
//! persisting state must save the whole result together.

pub mod aggregator;
pub mod levels;
pub mod mood;
pub mod placement;
pub mod progress;

pub use aggregator::{
    EmotionalStats, GoalId, PhysicalStats, ProgressStats, ProgressSummary, SleepStats, WeeklyStats,
};
pub use levels::{FeatureFlag, Level};
pub use mood::{MoodEntry, MoodHistory};
pub use placement::{DiscPlacement, FixedPlacement, Placement, Position};
pub use progress::{Evolution, ProgressState, ProgressTracker};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use thiserror::Error;

use crate::domain::{ActivityLogged, EmotionLogged, SleepLogged};

/// Precondition violations at the engine boundary
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("activity duration must be positive")]
    NonPositiveDuration,

    #[error("emotion intensity {0} is outside [0, 1]")]
    IntensityOutOfRange(f32),

    #[error("wake time must be after bed time")]
    WakeBeforeBed,

    #[error("mood history capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

/// What happened while recording an event
#[derive(Debug, Clone)]
pub enum EngineEvent {
    XpAwarded { amount: u32, reason: String },
    Evolved(Evolution),
    StreakExtended { count: u32 },
}

/// Per-user engine composing the progress tracker and mood history
pub struct WellnessEngine {
    progress: ProgressTracker,
    moods: MoodHistory,
    placement: Box<dyn Placement + Send>,
    weekly_goal: u32,
}

impl WellnessEngine {
    /// Fresh engine for a new user.
    pub fn new(weekly_goal: u32) -> Self {
        Self {
            progress: ProgressTracker::new(),
            moods: MoodHistory::new(),
            placement: Box::new(DiscPlacement::new()),
            weekly_goal,
        }
    }

    /// Resume from persisted state.
    pub fn from_parts(progress: ProgressState, moods: MoodHistory, weekly_goal: u32) -> Self {
        Self {
            progress: ProgressTracker::from_state(progress),
            moods,
            placement: Box::new(DiscPlacement::new()),
            weekly_goal,
        }
    }

    /// Swap in a custom placement generator (tests use a fixed one).
    pub fn with_placement(mut self, placement: Box<dyn Placement + Send>) -> Self {
        self.placement = placement;
        self
    }

    pub fn progress(&self) -> &ProgressState {
        self.progress.state()
    }

    pub fn moods(&self) -> &MoodHistory {
        &self.moods
    }

    pub fn weekly_goal(&self) -> u32 {
        self.weekly_goal
    }

    /// Tear the engine down into its persistable parts.
    pub fn into_parts(self) -> (ProgressState, MoodHistory) {
        (self.progress.into_state(), self.moods)
    }

    /// Record a physical activity.
    pub fn record_activity(&mut self, event: &ActivityLogged) -> Result<Vec<EngineEvent>, EngineError> {
        event.validate()?;
        let points = aggregator::experience_for_activity(event.kind, event.duration_minutes);
        Ok(self.apply_reward(
            points,
            format!("{} for {} min", event.kind.as_str(), event.duration_minutes),
            event.occurred_at,
        ))
    }

    /// Record an emotional check-in. Also appends to the mood history.
    pub fn record_emotion(&mut self, event: &EmotionLogged) -> Result<Vec<EngineEvent>, EngineError> {
        event.validate()?;
        self.moods.add(
            event.kind,
            event.intensity,
            event.occurred_at,
            self.placement.as_mut(),
        );
        let points = aggregator::experience_for_emotion(event.kind, event.responses.len() as u32);
        Ok(self.apply_reward(
            points,
            format!("{} check-in", event.kind.as_str()),
            event.occurred_at,
        ))
    }

    /// Record a sleep session. The streak day is the wake-up day.
    pub fn record_sleep(&mut self, event: &SleepLogged) -> Result<Vec<EngineEvent>, EngineError> {
        event.validate()?;
        let points = aggregator::experience_for_sleep(event.hours(), event.quality);
        Ok(self.apply_reward(
            points,
            format!("{:.1}h of {} sleep", event.hours(), event.quality.as_str()),
            event.wake_time,
        ))
    }

    fn apply_reward(&mut self, points: u32, reason: String, at: DateTime<Utc>) -> Vec<EngineEvent> {
        let streak_before = self.progress.state().consecutive_days;
        self.progress.update_daily_activity(at.date_naive());
        let evolutions = self.progress.add_experience(points, at);

        tracing::debug!(points, %reason, "experience awarded");

        let mut events = vec![EngineEvent::XpAwarded {
            amount: points,
            reason,
        }];
        let streak_now = self.progress.state().consecutive_days;
        if streak_now > streak_before {
            events.push(EngineEvent::StreakExtended { count: streak_now });
        }
        events.extend(evolutions.into_iter().map(EngineEvent::Evolved));
        events
    }

    /// Full summary over the supplied raw logs (typically the current week).
    pub fn progress_summary(
        &self,
        activities: &[ActivityLogged],
        sleeps: &[SleepLogged],
        now: DateTime<Utc>,
    ) -> ProgressSummary {
        let state = self.progress.state();
        let physical = aggregator::physical_stats(activities, self.weekly_goal);
        let emotional = aggregator::emotional_stats(&self.moods);
        let sleep = aggregator::sleep_stats(sleeps);
        let overall_score = aggregator::overall_score(
            physical.days_ratio,
            emotional.entries > 0,
            sleep.avg_hours,
        );

        ProgressSummary {
            level: state.level,
            experience: state.experience,
            progress_percentage: self.progress.progress_percentage(),
            consecutive_days: state.consecutive_days,
            unlocked_features: state.unlocked_features.iter().copied().collect(),
            physical,
            emotional,
            sleep,
            overall_score,
            computed_at: now,
        }
    }

    /// Weekly rollup for the Monday-based week containing `today`.
    ///
    /// Events outside the week window are ignored, so callers may pass
    /// unfiltered logs.
    pub fn weekly_stats(
        &self,
        activities: &[ActivityLogged],
        emotions: &[EmotionLogged],
        sleeps: &[SleepLogged],
        today: NaiveDate,
    ) -> WeeklyStats {
        let start = aggregator::week_start(today);
        let end = start + Duration::days(6);
        let in_week = |d: NaiveDate| d >= start && d <= end;

        let activities: Vec<ActivityLogged> = activities
            .iter()
            .filter(|a| in_week(a.occurred_at.date_naive()))
            .cloned()
            .collect();
        let emotions: Vec<EmotionLogged> = emotions
            .iter()
            .filter(|e| in_week(e.occurred_at.date_naive()))
            .cloned()
            .collect();
        let sleeps: Vec<SleepLogged> = sleeps
            .iter()
            .filter(|s| in_week(s.wake_time.date_naive()))
            .cloned()
            .collect();

        let qualities: Vec<_> = sleeps.iter().map(|s| s.quality).collect();

        WeeklyStats {
            week_start: start,
            week_end: end,
            activities_completed: activities.len() as u32,
            emotions_tracked: emotions.len() as u32,
            sleep_hours: sleeps.iter().map(|s| s.hours()).sum(),
            sleep_quality: aggregator::average_sleep_quality(&qualities),
            experience_earned: aggregator::weekly_experience(&activities, &emotions, &sleeps),
            goals_achieved: aggregator::achieved_goals(
                self.weekly_goal,
                activities.len() as u32,
                emotions.len() as u32,
                self.progress.state().consecutive_days,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityKind, EmotionKind, SleepQuality, SleepSource};
    use chrono::TimeZone;

    fn activity(day: u32, minutes: u32) -> ActivityLogged {
        ActivityLogged {
            kind: ActivityKind::Running,
            duration_minutes: minutes,
            occurred_at: Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
            calories_burned: None,
        }
    }

    fn emotion(day: u32, kind: EmotionKind) -> EmotionLogged {
        EmotionLogged {
            kind,
            intensity: 0.6,
            responses: vec![],
            occurred_at: Utc.with_ymd_and_hms(2025, 3, day, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_record_activity_awards_xp_and_streak() {
        let mut engine = WellnessEngine::new(5);
        let events = engine.record_activity(&activity(1, 30)).unwrap();

        assert_eq!(engine.progress().experience, 26);
        assert_eq!(engine.progress().consecutive_days, 1);
        assert!(matches!(
            events[0],
            EngineEvent::XpAwarded { amount: 26, .. }
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::StreakExtended { count: 1 })));
    }

    #[test]
    fn test_record_emotion_feeds_mood_history() {
        let mut engine = WellnessEngine::new(5)
            .with_placement(Box::new(FixedPlacement(Position::default())));
        engine.record_emotion(&emotion(1, EmotionKind::Happy)).unwrap();
        engine.record_emotion(&emotion(1, EmotionKind::Tired)).unwrap();

        assert_eq!(engine.moods().len(), 2);
        assert_eq!(engine.moods().recent_kind(), Some(EmotionKind::Tired));
        // happy: 20, tired: 18
        assert_eq!(engine.progress().experience, 38);
    }

    #[test]
    fn test_record_rejects_invalid_events() {
        let mut engine = WellnessEngine::new(5);
        let mut bad = activity(1, 30);
        bad.duration_minutes = 0;
        assert!(engine.record_activity(&bad).is_err());
        // Nothing was applied
        assert_eq!(engine.progress().experience, 0);
        assert_eq!(engine.progress().total_activities, 0);
    }

    #[test]
    fn test_evolution_surfaces_as_event() {
        let mut engine = WellnessEngine::new(5);
        // Four 30-minute runs: 26 * 4 = 104 XP, crossing 100
        let mut all = Vec::new();
        for day in 1..=4 {
            all.extend(engine.record_activity(&activity(day, 30)).unwrap());
        }
        assert_eq!(engine.progress().level, Level::Young);
        assert_eq!(
            all.iter()
                .filter(|e| matches!(e, EngineEvent::Evolved(_)))
                .count(),
            1
        );
        assert_eq!(engine.progress().consecutive_days, 4);
    }

    #[test]
    fn test_weekly_stats_window_and_goals() {
        let mut engine = WellnessEngine::new(2);
        // 2025-03-12 is a Wednesday; week is 03-10..03-16
        let today = chrono::NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();

        let activities = vec![activity(10, 30), activity(12, 20), activity(3, 60)];
        let emotions = vec![
            emotion(10, EmotionKind::Happy),
            emotion(11, EmotionKind::Peaceful),
            emotion(12, EmotionKind::Happy),
        ];
        let sleeps = vec![SleepLogged {
            bed_time: Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap(),
            wake_time: Utc.with_ymd_and_hms(2025, 3, 11, 7, 0, 0).unwrap(),
            quality: SleepQuality::Good,
            source: SleepSource::HealthSync,
        }];

        for e in &emotions {
            engine.record_emotion(e).unwrap();
        }
        let stats = engine.weekly_stats(&activities, &emotions, &sleeps, today);

        assert_eq!(stats.week_start, chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(stats.week_end, chrono::NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());
        // The March 3rd activity falls outside the window
        assert_eq!(stats.activities_completed, 2);
        assert_eq!(stats.emotions_tracked, 3);
        assert!((stats.sleep_hours - 8.0).abs() < 1e-9);
        assert_eq!(stats.sleep_quality, SleepQuality::Good);
        assert_eq!(
            stats.goals_achieved,
            vec![GoalId::WeeklyActivityGoal, GoalId::EmotionalTrackingGoal]
        );
    }

    #[test]
    fn test_progress_summary_composition() {
        let mut engine = WellnessEngine::new(5);
        engine.record_emotion(&emotion(10, EmotionKind::Grateful)).unwrap();

        let activities = vec![activity(10, 30)];
        let sleeps: Vec<SleepLogged> = vec![];
        let summary = engine.progress_summary(&activities, &sleeps, Utc::now());

        assert_eq!(summary.level, Level::Cub);
        assert_eq!(summary.experience, 20);
        assert_eq!(summary.emotional.entries, 1);
        assert_eq!(summary.sleep.entries, 0);
        // 1 active day of 5 goal days: 0.2 * 0.4 + 0.3 + 0
        assert!((summary.overall_score - 0.38).abs() < 1e-9);
        assert!(summary.overall_score >= 0.0 && summary.overall_score <= 1.0);
    }
}
