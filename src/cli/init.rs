//! Init command - create the configuration file

use anyhow::Result;

use crate::config::Config;

/// Initialize ~/.wellbear/config.toml
pub fn init_command(force: bool) -> Result<()> {
    let path = Config::global_config_path();

    if path.exists() && !force {
        println!("Config already exists at {}.", path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    let config = Config::default();
    config.save_to_file(&path)?;
    println!("Created {} for user {}.", path.display(), config.user_id);
    Ok(())
}
