//! Core domain types shared across the engine, store, and CLI.

mod event;
mod user;

pub use event::{
    ActivityKind, ActivityLogged, CheckInResponse, EmotionKind, EmotionLogged, SleepLogged,
    SleepQuality, SleepSource,
};
pub use user::UserId;
