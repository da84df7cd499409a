//! Moods command - recent mood trend

use anyhow::Result;

use super::Session;

/// Show the most recent mood check-ins, oldest first
pub fn moods_command(last: usize, json: bool) -> Result<()> {
    let session = Session::load()?;
    let history = session.engine.moods();

    if json {
        let trend = history.trend(last);
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No mood check-ins yet.");
        return Ok(());
    }

    let skip = history.len().saturating_sub(last);
    println!("Recent moods (oldest first):");
    for entry in history.entries().skip(skip) {
        println!(
            "  {}  {:<8} intensity {:.1}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.kind.as_str(),
            entry.intensity
        );
    }
    Ok(())
}
