//! Weekly command - current week's rollup

use anyhow::Result;
use chrono::Utc;

use crate::engine::aggregator::week_start;

use super::Session;

/// Print the weekly statistics
pub fn weekly_command(json: bool) -> Result<()> {
    let session = Session::load()?;
    let today = Utc::now().date_naive();
    let cutoff = week_start(today);

    let user = &session.config.user_id;
    let activities = session.store.activities_since(user, cutoff)?;
    let emotions = session.store.emotions_since(user, cutoff)?;
    let sleeps = session.store.sleeps_since(user, cutoff)?;

    let stats = session
        .engine
        .weekly_stats(&activities, &emotions, &sleeps, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Week {} to {}", stats.week_start, stats.week_end);
    println!("  Activities: {}", stats.activities_completed);
    println!("  Check-ins:  {}", stats.emotions_tracked);
    println!(
        "  Sleep:      {:.1}h total, average quality {}",
        stats.sleep_hours,
        stats.sleep_quality.as_str()
    );
    println!("  Experience: {} XP", stats.experience_earned);
    if stats.goals_achieved.is_empty() {
        println!("  Goals:      none yet");
    } else {
        let goals: Vec<_> = stats.goals_achieved.iter().map(|g| g.as_str()).collect();
        println!("  Goals:      {}", goals.join(", "));
    }
    Ok(())
}
