//! Bear growth levels
//!
//! Defines level thresholds, the features each level unlocks, and the
//! celebration copy shown on evolution.

use serde::{Deserialize, Serialize};

/// Growth stage of the companion bear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Cub,
    Young,
    Adult,
}

/// Feature unlocked by reaching a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    AdvancedAnalytics,
    CustomOutfits,
    MeditationGuides,
    SocialSharing,
}

impl FeatureFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdvancedAnalytics => "advanced_analytics",
            Self::CustomOutfits => "custom_outfits",
            Self::MeditationGuides => "meditation_guides",
            Self::SocialSharing => "social_sharing",
        }
    }
}

impl Level {
    /// Cumulative experience required to reach this level.
    pub const fn xp_required(self) -> u32 {
        match self {
            Self::Cub => 0,
            Self::Young => 100,
            Self::Adult => 350,
        }
    }

    /// The level after this one, or `None` at the terminal stage.
    pub const fn next(self) -> Option<Level> {
        match self {
            Self::Cub => Some(Self::Young),
            Self::Young => Some(Self::Adult),
            Self::Adult => None,
        }
    }

    /// Level for a given cumulative experience total.
    pub fn for_xp(xp: u32) -> Level {
        [Self::Adult, Self::Young, Self::Cub]
            .into_iter()
            .find(|l| xp >= l.xp_required())
            .unwrap_or(Self::Cub)
    }

    /// Features newly unlocked when this level is reached.
    pub fn unlocked_features(self) -> &'static [FeatureFlag] {
        match self {
            Self::Cub => &[],
            Self::Young => &[FeatureFlag::AdvancedAnalytics, FeatureFlag::CustomOutfits],
            Self::Adult => &[FeatureFlag::MeditationGuides, FeatureFlag::SocialSharing],
        }
    }

    /// Celebration message shown when this level is reached.
    pub fn celebration_message(self) -> &'static str {
        match self {
            Self::Cub => "A tiny cub joins you on your wellness journey!",
            Self::Young => "Your cub has grown into a young bear! Keep the good habits coming.",
            Self::Adult => "Your bear is all grown up - a true wellness companion!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cub => "cub",
            Self::Young => "young",
            Self::Adult => "adult",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cub" => Some(Self::Cub),
            "young" => Some(Self::Young),
            "adult" => Some(Self::Adult),
            _ => None,
        }
    }
}
