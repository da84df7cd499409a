//! Progress tracker - leveling state machine and daily streaks
//!
//! Converts accumulated experience into a growth level, tracks consecutive
//! active calendar days, and records evolutions with their unlocked features.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::levels::{FeatureFlag, Level};

/// A recorded level-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evolution {
    pub from: Level,
    pub to: Level,
    pub date: DateTime<Utc>,
    pub message: String,
}

/// Persistent per-user progress state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressState {
    pub level: Level,
    pub experience: u32,
    pub total_activities: u32,
    pub consecutive_days: u32,
    pub last_active_date: Option<NaiveDate>,
    pub unlocked_features: BTreeSet<FeatureFlag>,
    pub evolution_history: Vec<Evolution>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            level: Level::Cub,
            experience: 0,
            total_activities: 0,
            consecutive_days: 0,
            last_active_date: None,
            unlocked_features: BTreeSet::new(),
            evolution_history: Vec::new(),
        }
    }
}

/// Leveling state machine over a [`ProgressState`]
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    state: ProgressState,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously persisted state.
    pub fn from_state(state: ProgressState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn into_state(self) -> ProgressState {
        self.state
    }

    /// Add experience and re-evaluate level transitions.
    ///
    /// Transitions are re-checked in a loop; a single reward cannot skip a
    /// level with the current thresholds, but the check never assumes that.
    /// Returns the evolutions triggered by this award, in order.
    pub fn add_experience(&mut self, points: u32, now: DateTime<Utc>) -> Vec<Evolution> {
        self.state.experience = self.state.experience.saturating_add(points);

        let mut evolutions = Vec::new();
        while let Some(next) = self.state.level.next() {
            if self.state.experience < next.xp_required() {
                break;
            }
            let evolution = Evolution {
                from: self.state.level,
                to: next,
                date: now,
                message: next.celebration_message().to_string(),
            };
            self.state.level = next;
            self.state
                .unlocked_features
                .extend(next.unlocked_features().iter().copied());
            tracing::info!(from = %evolution.from.as_str(), to = %next.as_str(), "bear evolved");
            self.state.evolution_history.push(evolution.clone());
            evolutions.push(evolution);
        }
        evolutions
    }

    /// Register activity on a calendar day and update the streak.
    ///
    /// Streak arithmetic uses calendar-day gaps, not elapsed hours: a gap of
    /// exactly one day extends the streak, a larger gap resets it to 1, and
    /// repeat activity on the same day leaves it unchanged.
    pub fn update_daily_activity(&mut self, today: NaiveDate) {
        match self.state.last_active_date {
            None => self.state.consecutive_days = 1,
            Some(last) => {
                let gap = (today - last).num_days();
                if gap == 1 {
                    self.state.consecutive_days += 1;
                } else if gap > 1 {
                    self.state.consecutive_days = 1;
                }
                // gap <= 0: already counted today
            }
        }
        self.state.last_active_date = Some(today);
        self.state.total_activities += 1;
    }

    /// Progress toward the next level, in [0, 1]. Terminal Adult is 1.0.
    pub fn progress_percentage(&self) -> f32 {
        let Some(next) = self.state.level.next() else {
            return 1.0;
        };
        let floor = self.state.level.xp_required();
        let span = next.xp_required() - floor;
        let into_level = self.state.experience.saturating_sub(floor);
        (into_level as f32 / span as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_streak_consecutive_days() {
        let mut tracker = ProgressTracker::new();
        tracker.update_daily_activity(day(1));
        tracker.update_daily_activity(day(2));
        tracker.update_daily_activity(day(3));
        assert_eq!(tracker.state().consecutive_days, 3);
        assert_eq!(tracker.state().total_activities, 3);
    }

    #[test]
    fn test_streak_resets_on_gap() {
        let mut tracker = ProgressTracker::new();
        tracker.update_daily_activity(day(1));
        tracker.update_daily_activity(day(6));
        assert_eq!(tracker.state().consecutive_days, 1);
    }

    #[test]
    fn test_streak_unchanged_same_day() {
        let mut tracker = ProgressTracker::new();
        tracker.update_daily_activity(day(1));
        tracker.update_daily_activity(day(2));
        let before = tracker.state().consecutive_days;
        tracker.update_daily_activity(day(2));
        assert_eq!(tracker.state().consecutive_days, before);
        // The repeat still counts as an activity
        assert_eq!(tracker.state().total_activities, 3);
    }

    #[test]
    fn test_evolution_at_thresholds() {
        let mut tracker = ProgressTracker::new();
        let now = Utc::now();

        let first = tracker.add_experience(60, now);
        assert!(first.is_empty());
        assert_eq!(tracker.state().level, Level::Cub);

        let second = tracker.add_experience(60, now);
        assert_eq!(tracker.state().experience, 120);
        assert_eq!(tracker.state().level, Level::Young);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].from, Level::Cub);
        assert_eq!(second[0].to, Level::Young);
        assert_eq!(tracker.state().evolution_history.len(), 1);
        assert!(tracker
            .state()
            .unlocked_features
            .contains(&FeatureFlag::AdvancedAnalytics));
    }

    #[test]
    fn test_level_never_regresses() {
        let mut tracker = ProgressTracker::new();
        let now = Utc::now();
        let mut previous = Level::Cub;
        for points in [0, 30, 70, 0, 100, 150, 0, 500] {
            tracker.add_experience(points, now);
            assert!(tracker.state().level >= previous);
            previous = tracker.state().level;
        }
        assert_eq!(tracker.state().level, Level::Adult);
    }

    #[test]
    fn test_cascading_transition() {
        // One oversized reward crosses both thresholds; both evolutions fire.
        let mut tracker = ProgressTracker::new();
        let evolutions = tracker.add_experience(400, Utc::now());
        assert_eq!(evolutions.len(), 2);
        assert_eq!(evolutions[0].to, Level::Young);
        assert_eq!(evolutions[1].to, Level::Adult);
        assert!(tracker
            .state()
            .unlocked_features
            .contains(&FeatureFlag::SocialSharing));
    }

    #[test]
    fn test_progress_percentage() {
        let mut tracker = ProgressTracker::new();
        assert!((tracker.progress_percentage() - 0.0).abs() < f32::EPSILON);

        tracker.add_experience(50, Utc::now());
        assert!((tracker.progress_percentage() - 0.5).abs() < 0.001);

        tracker.add_experience(75, Utc::now()); // 125 XP, Young; 25 into 250 span
        assert!((tracker.progress_percentage() - 0.1).abs() < 0.001);

        tracker.add_experience(1000, Utc::now());
        assert!((tracker.progress_percentage() - 1.0).abs() < f32::EPSILON);
    }
}
