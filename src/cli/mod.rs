//! CLI command implementations

pub mod init;
pub mod log;
pub mod moods;
pub mod summary;
pub mod weekly;

use anyhow::Result;

use crate::config::Config;
use crate::engine::WellnessEngine;
use crate::store::WellnessStore;

/// Everything a command needs: config, store, and the user's engine.
pub struct Session {
    pub config: Config,
    pub store: WellnessStore,
    pub engine: WellnessEngine,
}

impl Session {
    /// Load config and state from their default locations.
    pub fn load() -> Result<Self> {
        let config = Config::load_or_init()?;
        let store = WellnessStore::open_default()?;
        let progress = store.load_progress(&config.user_id)?;
        let moods = store.load_moods(&config.user_id, config.history_capacity)?;
        let engine =
            WellnessEngine::from_parts(progress, moods, config.weekly_activity_goal);
        Ok(Self {
            config,
            store,
            engine,
        })
    }
}
