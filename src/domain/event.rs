//! Raw logged events and their enums
//!
//! Events arrive from the logging surfaces (CLI, health sync) already parsed;
//! `validate()` enforces the remaining preconditions before the engine
//! accepts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Kind of physical activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Walking,
    Running,
    Cycling,
    Swimming,
    Yoga,
    Strength,
    Other,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Yoga => "yoga",
            Self::Strength => "strength",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "walking" => Some(Self::Walking),
            "running" => Some(Self::Running),
            "cycling" => Some(Self::Cycling),
            "swimming" => Some(Self::Swimming),
            "yoga" => Some(Self::Yoga),
            "strength" => Some(Self::Strength),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Cardio activities earn double experience.
    pub fn is_cardio(&self) -> bool {
        matches!(self, Self::Running | Self::Cycling | Self::Swimming)
    }
}

/// Kind of emotional check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Happy,
    Sad,
    Angry,
    Anxious,
    Tired,
    Grateful,
    Peaceful,
    Excited,
}

impl EmotionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Anxious => "anxious",
            Self::Tired => "tired",
            Self::Grateful => "grateful",
            Self::Peaceful => "peaceful",
            Self::Excited => "excited",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "angry" => Some(Self::Angry),
            "anxious" => Some(Self::Anxious),
            "tired" => Some(Self::Tired),
            "grateful" => Some(Self::Grateful),
            "peaceful" => Some(Self::Peaceful),
            "excited" => Some(Self::Excited),
            _ => None,
        }
    }

    /// Positive emotions earn a slightly larger check-in bonus.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            Self::Happy | Self::Grateful | Self::Peaceful | Self::Excited
        )
    }
}

/// Self-reported sleep quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "poor" => Some(Self::Poor),
            "fair" => Some(Self::Fair),
            "good" => Some(Self::Good),
            "excellent" => Some(Self::Excellent),
            _ => None,
        }
    }

    /// Ordinal used when averaging qualities (poor=1 .. excellent=4).
    pub fn ordinal(&self) -> u32 {
        match self {
            Self::Poor => 1,
            Self::Fair => 2,
            Self::Good => 3,
            Self::Excellent => 4,
        }
    }
}

/// Where a sleep record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepSource {
    HealthSync,
    #[default]
    Manual,
}

impl SleepSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HealthSync => "health_sync",
            Self::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "health_sync" => Some(Self::HealthSync),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// A completed physical activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogged {
    pub kind: ActivityKind,
    pub duration_minutes: u32,
    pub occurred_at: DateTime<Utc>,
    pub calories_burned: Option<u32>,
}

impl ActivityLogged {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.duration_minutes == 0 {
            return Err(EngineError::NonPositiveDuration);
        }
        Ok(())
    }
}

/// One question/answer pair from a guided check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub question: String,
    pub answer: String,
}

/// An emotional check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionLogged {
    pub kind: EmotionKind,
    pub intensity: f32,
    pub responses: Vec<CheckInResponse>,
    pub occurred_at: DateTime<Utc>,
}

impl EmotionLogged {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.intensity) || self.intensity.is_nan() {
            return Err(EngineError::IntensityOutOfRange(self.intensity));
        }
        Ok(())
    }
}

/// A sleep session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLogged {
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub quality: SleepQuality,
    pub source: SleepSource,
}

impl SleepLogged {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.wake_time <= self.bed_time {
            return Err(EngineError::WakeBeforeBed);
        }
        Ok(())
    }

    /// Duration slept, in fractional hours.
    pub fn hours(&self) -> f64 {
        (self.wake_time - self.bed_time).num_minutes() as f64 / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sleep_validation_and_hours() {
        let bed = Utc.with_ymd_and_hms(2025, 3, 1, 22, 30, 0).unwrap();
        let wake = Utc.with_ymd_and_hms(2025, 3, 2, 6, 0, 0).unwrap();

        let sleep = SleepLogged {
            bed_time: bed,
            wake_time: wake,
            quality: SleepQuality::Good,
            source: SleepSource::Manual,
        };
        assert!(sleep.validate().is_ok());
        assert!((sleep.hours() - 7.5).abs() < 1e-9);

        let backwards = SleepLogged {
            bed_time: wake,
            wake_time: bed,
            quality: SleepQuality::Good,
            source: SleepSource::Manual,
        };
        assert!(backwards.validate().is_err());
    }

    #[test]
    fn test_intensity_bounds() {
        let entry = EmotionLogged {
            kind: EmotionKind::Happy,
            intensity: 1.2,
            responses: vec![],
            occurred_at: Utc::now(),
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in [
            ActivityKind::Walking,
            ActivityKind::Running,
            ActivityKind::Swimming,
            ActivityKind::Other,
        ] {
            assert_eq!(ActivityKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EmotionKind::from_str("grateful"), Some(EmotionKind::Grateful));
        assert_eq!(SleepQuality::from_str("excellent"), Some(SleepQuality::Excellent));
        assert_eq!(SleepQuality::from_str("amazing"), None);
    }
}
