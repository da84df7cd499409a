//! Wellbear - personal wellness companion
//!
//! Wellbear turns logged wellness events (activities, emotional check-ins,
//! sleep sessions) into experience points for a growing bear companion, a
//! bounded mood history, and weighted wellness scores.
//!
//! The core lives in [`engine`] and is pure, synchronous, in-memory logic;
//! [`store`] persists its state to SQLite and [`cli`] exposes it as commands.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod store;

pub use domain::*;
pub use engine::{
    EngineError, EngineEvent, Evolution, FeatureFlag, Level, MoodEntry, MoodHistory,
    ProgressState, ProgressSummary, ProgressTracker, WeeklyStats, WellnessEngine,
};
