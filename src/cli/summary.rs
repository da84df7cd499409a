//! Summary command - full progress report

use anyhow::Result;
use chrono::Utc;

use crate::engine::aggregator::week_start;

use super::Session;

/// Print the user's progress summary for the current week
pub fn summary_command(json: bool) -> Result<()> {
    let session = Session::load()?;
    let now = Utc::now();
    let cutoff = week_start(now.date_naive());

    let activities = session.store.activities_since(&session.config.user_id, cutoff)?;
    let sleeps = session.store.sleeps_since(&session.config.user_id, cutoff)?;
    let summary = session.engine.progress_summary(&activities, &sleeps, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Your bear: {} ({} XP, {:.0}% to next stage)",
        summary.level.as_str(),
        summary.experience,
        summary.progress_percentage * 100.0
    );
    println!("Streak: {} consecutive day(s)", summary.consecutive_days);
    if !summary.unlocked_features.is_empty() {
        let features: Vec<_> = summary
            .unlocked_features
            .iter()
            .map(|f| f.as_str())
            .collect();
        println!("Unlocked: {}", features.join(", "));
    }
    println!();
    println!(
        "This week: {} activities ({} min), {} check-ins, {:.1}h avg sleep",
        summary.physical.activities,
        summary.physical.total_minutes,
        summary.emotional.entries,
        summary.sleep.avg_hours
    );
    if let Some(kind) = summary.emotional.dominant_kind {
        println!("Dominant mood: {}", kind.as_str());
    }
    println!("Overall wellness score: {:.2}", summary.overall_score);
    Ok(())
}
