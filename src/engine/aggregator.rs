//! Wellness aggregator - experience rewards, category stats, and scoring
//!
//! Every function here is a pure computation over caller-supplied data; the
//! aggregator owns no state. The reward and score constants are part of the
//! compatibility contract and must not be "improved".

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::levels::{FeatureFlag, Level};
use super::mood::MoodHistory;
use super::progress::ProgressState;
use crate::domain::{ActivityKind, ActivityLogged, EmotionKind, EmotionLogged, SleepLogged, SleepQuality};

/// Named achievement condition over weekly aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalId {
    WeeklyActivityGoal,
    EmotionalTrackingGoal,
    ContinuousCareGoal,
}

impl GoalId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeeklyActivityGoal => "weekly_activity_goal",
            Self::EmotionalTrackingGoal => "emotional_tracking_goal",
            Self::ContinuousCareGoal => "continuous_care_goal",
        }
    }
}

/// Physical category rollup for a reporting window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicalStats {
    pub activities: u32,
    pub total_minutes: u32,
    pub active_days: u32,
    pub calories_burned: u32,
    /// Distinct active days over the weekly goal, clamped to [0, 1].
    pub days_ratio: f64,
}

/// Emotional category rollup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionalStats {
    pub entries: u32,
    pub dominant_kind: Option<EmotionKind>,
    pub recent_trend: Vec<EmotionKind>,
}

/// Sleep category rollup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepStats {
    pub entries: u32,
    pub total_hours: f64,
    pub avg_hours: f64,
    pub avg_quality: Option<SleepQuality>,
}

/// Progress category projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStats {
    pub level: Level,
    pub experience: u32,
    pub consecutive_days: u32,
    pub total_activities: u32,
}

/// Full per-user summary handed to the reporting layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub level: Level,
    pub experience: u32,
    pub progress_percentage: f32,
    pub consecutive_days: u32,
    pub unlocked_features: Vec<FeatureFlag>,
    pub physical: PhysicalStats,
    pub emotional: EmotionalStats,
    pub sleep: SleepStats,
    pub overall_score: f64,
    pub computed_at: DateTime<Utc>,
}

/// Weekly rollup handed to the reporting layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub activities_completed: u32,
    pub emotions_tracked: u32,
    pub sleep_hours: f64,
    pub sleep_quality: SleepQuality,
    pub experience_earned: u32,
    pub goals_achieved: Vec<GoalId>,
}

/// Experience reward for a logged activity: `10 + min(duration/10, 5)`,
/// doubled for cardio. Always within [10, 30].
pub fn experience_for_activity(kind: ActivityKind, duration_minutes: u32) -> u32 {
    let base = 10 + (duration_minutes / 10).min(5);
    if kind.is_cardio() {
        base * 2
    } else {
        base
    }
}

/// Experience reward for an emotional check-in. Within [18, 30].
pub fn experience_for_emotion(kind: EmotionKind, response_count: u32) -> u32 {
    let depth_bonus = (response_count * 2).min(10);
    let kind_bonus = if kind.is_positive() { 5 } else { 3 };
    15 + depth_bonus + kind_bonus
}

/// Experience reward for a sleep session. Within [10, 20].
pub fn experience_for_sleep(hours: f64, quality: SleepQuality) -> u32 {
    let duration_bonus = if (7.0..=9.0).contains(&hours) {
        5
    } else if (6.0..7.0).contains(&hours) {
        2
    } else {
        0
    };
    let quality_bonus = match quality {
        SleepQuality::Excellent => 5,
        SleepQuality::Good => 3,
        SleepQuality::Fair => 1,
        SleepQuality::Poor => 0,
    };
    10 + duration_bonus + quality_bonus
}

/// Weighted overall wellness score in [0, 1].
///
/// The physical ratio is clamped defensively: callers derive it from a weekly
/// goal that may be zero, in which case they pass 0 rather than dividing.
pub fn overall_score(
    physical_days_ratio: f64,
    has_emotion_entries: bool,
    avg_sleep_hours: f64,
) -> f64 {
    let physical = physical_days_ratio.clamp(0.0, 1.0) * 0.4;
    let emotional = if has_emotion_entries { 0.3 } else { 0.0 };
    let sleep = if (7.0..=9.0).contains(&avg_sleep_hours) {
        0.3
    } else if avg_sleep_hours > 0.0 {
        0.15
    } else {
        0.0
    };
    physical + emotional + sleep
}

/// Average a set of sleep qualities back to a bucket.
///
/// Empty input yields `Fair` - the documented "no data" default, not an
/// error.
pub fn average_sleep_quality(entries: &[SleepQuality]) -> SleepQuality {
    if entries.is_empty() {
        return SleepQuality::Fair;
    }
    let sum: u32 = entries.iter().map(|q| q.ordinal()).sum();
    let avg = sum as f64 / entries.len() as f64;
    if avg >= 3.5 {
        SleepQuality::Excellent
    } else if avg >= 2.5 {
        SleepQuality::Good
    } else if avg >= 1.5 {
        SleepQuality::Fair
    } else {
        SleepQuality::Poor
    }
}

/// Total experience the given logs would earn, element-wise.
pub fn weekly_experience(
    activities: &[ActivityLogged],
    emotions: &[EmotionLogged],
    sleeps: &[SleepLogged],
) -> u32 {
    let activity_xp: u32 = activities
        .iter()
        .map(|a| experience_for_activity(a.kind, a.duration_minutes))
        .sum();
    let emotion_xp: u32 = emotions
        .iter()
        .map(|e| experience_for_emotion(e.kind, e.responses.len() as u32))
        .sum();
    let sleep_xp: u32 = sleeps
        .iter()
        .map(|s| experience_for_sleep(s.hours(), s.quality))
        .sum();
    activity_xp + emotion_xp + sleep_xp
}

/// Goals achieved this week, in declaration order (reporting relies on it).
pub fn achieved_goals(
    weekly_goal: u32,
    activity_count: u32,
    emotion_count: u32,
    consecutive_days: u32,
) -> Vec<GoalId> {
    let mut goals = Vec::new();
    if activity_count >= weekly_goal {
        goals.push(GoalId::WeeklyActivityGoal);
    }
    if emotion_count >= 3 {
        goals.push(GoalId::EmotionalTrackingGoal);
    }
    if consecutive_days >= 7 {
        goals.push(GoalId::ContinuousCareGoal);
    }
    goals
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Physical rollup over the supplied activities.
///
/// `weekly_goal` of zero yields a ratio of 0 rather than dividing by zero.
pub fn physical_stats(activities: &[ActivityLogged], weekly_goal: u32) -> PhysicalStats {
    let mut days: Vec<NaiveDate> = activities
        .iter()
        .map(|a| a.occurred_at.date_naive())
        .collect();
    days.sort_unstable();
    days.dedup();

    let active_days = days.len() as u32;
    let days_ratio = if weekly_goal == 0 {
        0.0
    } else {
        (active_days as f64 / weekly_goal as f64).clamp(0.0, 1.0)
    };

    PhysicalStats {
        activities: activities.len() as u32,
        total_minutes: activities.iter().map(|a| a.duration_minutes).sum(),
        active_days,
        calories_burned: activities.iter().filter_map(|a| a.calories_burned).sum(),
        days_ratio,
    }
}

/// Emotional rollup projected from the mood history.
pub fn emotional_stats(history: &MoodHistory) -> EmotionalStats {
    let mut counts: Vec<(EmotionKind, u32)> = Vec::new();
    for entry in history.entries() {
        match counts.iter_mut().find(|(k, _)| *k == entry.kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.kind, 1)),
        }
    }
    // First-seen wins ties, which keeps the projection deterministic.
    let mut dominant_kind: Option<(EmotionKind, u32)> = None;
    for &(kind, n) in &counts {
        if dominant_kind.map_or(true, |(_, best)| n > best) {
            dominant_kind = Some((kind, n));
        }
    }
    let dominant_kind = dominant_kind.map(|(k, _)| k);

    EmotionalStats {
        entries: history.len() as u32,
        dominant_kind,
        recent_trend: history.trend(7),
    }
}

/// Sleep rollup over the supplied sessions.
pub fn sleep_stats(sleeps: &[SleepLogged]) -> SleepStats {
    if sleeps.is_empty() {
        return SleepStats::default();
    }
    let total_hours: f64 = sleeps.iter().map(|s| s.hours()).sum();
    let qualities: Vec<SleepQuality> = sleeps.iter().map(|s| s.quality).collect();
    SleepStats {
        entries: sleeps.len() as u32,
        total_hours,
        avg_hours: total_hours / sleeps.len() as f64,
        avg_quality: Some(average_sleep_quality(&qualities)),
    }
}

/// Progress projection from the persistent state.
pub fn progress_stats(state: &ProgressState) -> ProgressStats {
    ProgressStats {
        level: state.level,
        experience: state.experience,
        consecutive_days: state.consecutive_days,
        total_activities: state.total_activities,
    }
}
