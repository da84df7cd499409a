use anyhow::Result;
use clap::{Parser, Subcommand};

use wellbear::cli;

#[derive(Parser)]
#[command(name = "wellbear")]
#[command(about = "Personal wellness companion with a growing bear buddy")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a wellness event
    Log {
        #[command(subcommand)]
        event: LogCommands,
    },

    /// Show your bear's progress and this week's wellness summary
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this week's statistics and achieved goals
    Weekly {
        /// Print the stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent mood check-ins
    Moods {
        /// How many entries to show
        #[arg(long, default_value_t = 7)]
        last: usize,

        /// Print the trend as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize the configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum LogCommands {
    /// Log a physical activity
    Activity {
        /// Activity kind (walking, running, cycling, swimming, yoga, strength, other)
        #[arg(long)]
        kind: String,

        /// Duration in minutes
        #[arg(long)]
        minutes: u32,

        /// Calories burned, if known
        #[arg(long)]
        calories: Option<u32>,

        /// When it happened (RFC 3339; defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Log an emotional check-in
    Emotion {
        /// Emotion kind (happy, sad, angry, anxious, tired, grateful, peaceful, excited)
        #[arg(long)]
        kind: String,

        /// Intensity in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        intensity: f32,

        /// Guided check-in responses as question=answer (repeatable)
        #[arg(long = "response")]
        responses: Vec<String>,

        /// When it happened (RFC 3339; defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Log a sleep session
    Sleep {
        /// Sleep quality (poor, fair, good, excellent)
        #[arg(long)]
        quality: String,

        /// Hours slept (alternative to --bed/--wake; wakes now unless --wake given)
        #[arg(long)]
        hours: Option<f64>,

        /// Bed time (RFC 3339)
        #[arg(long)]
        bed: Option<String>,

        /// Wake time (RFC 3339)
        #[arg(long)]
        wake: Option<String>,

        /// Mark the record as synced from a health platform
        #[arg(long)]
        synced: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Log { event } => match event {
            LogCommands::Activity {
                kind,
                minutes,
                calories,
                at,
            } => cli::log::activity_command(&kind, minutes, calories, at)?,
            LogCommands::Emotion {
                kind,
                intensity,
                responses,
                at,
            } => cli::log::emotion_command(&kind, intensity, responses, at)?,
            LogCommands::Sleep {
                quality,
                hours,
                bed,
                wake,
                synced,
            } => cli::log::sleep_command(&quality, hours, bed, wake, synced)?,
        },
        Commands::Summary { json } => cli::summary::summary_command(json)?,
        Commands::Weekly { json } => cli::weekly::weekly_command(json)?,
        Commands::Moods { last, json } => cli::moods::moods_command(last, json)?,
        Commands::Init { force } => cli::init::init_command(force)?,
    }

    Ok(())
}
