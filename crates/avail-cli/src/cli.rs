//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Find free time in your calendar.
///
/// Reads exported calendar events and lists the open slots inside your
/// working hours, skipping weekends and gaps that are too short to use.
#[derive(Debug, Parser)]
#[command(name = "avail", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List free slots over a date range.
    Report(ReportArgs),

    /// Print the effective configuration.
    Config,
}

/// Options for `avail report`.
///
/// Working-hour options override the configured values for this run only.
#[derive(Debug, Default, Args)]
pub struct ReportArgs {
    /// First day of the range: YYYY-MM-DD, "today", "tomorrow" or "in N days".
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Last day of the range, inclusive [default: six days after start].
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Start of the working day, e.g. 08:00 or 8:30 AM.
    #[arg(long, value_name = "TIME")]
    pub start_time: Option<String>,

    /// End of the working day, e.g. 17:00 or 5 PM.
    #[arg(long, value_name = "TIME")]
    pub end_time: Option<String>,

    /// Shortest gap worth reporting, in minutes.
    #[arg(long, value_name = "MINUTES")]
    pub min_minutes: Option<u32>,

    /// Exported calendar events (JSON).
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// IANA time zone to report in [default: system zone].
    #[arg(long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write the report to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
