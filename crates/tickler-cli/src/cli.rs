use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Preview, inspect and dry-run the Tickler reminder scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Preview the occurrences of a recurrence rule
    Preview(PreviewCommand),
    /// Show timezone information
    Tz(TzCommand),
    /// Run one expansion sweep over a JSON reminder file
    Sweep(SweepCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// Anchor instant (RFC 3339, 'YYYY-MM-DDTHH:MM', or 'YYYY-MM-DD')
    pub anchor: String,
    /// Cadence (none, daily, weekly, monthly)
    #[clap(short, long, default_value = "daily")]
    pub cadence: String,
    /// Step between occurrences (every Nth day/week/month)
    #[clap(short, long, default_value_t = 1)]
    pub interval: u32,
    /// Weekday indices for weekly cadence (0=Sun..6=Sat)
    #[clap(long, value_delimiter = ',', help = "Weekday indices, comma separated (0=Sun..6=Sat)")]
    pub days: Vec<u8>,
    /// Timezone for local-day computations (IANA format)
    #[clap(short, long)]
    pub timezone: Option<String>,
    /// Window start (defaults to the anchor)
    #[clap(long)]
    pub from: Option<String>,
    /// Window end (defaults to start + configured horizon)
    #[clap(long)]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TzCommand {
    /// Timezone to inspect; omit to list common zones
    pub zone: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SweepCommand {
    /// JSON file holding an array of reminders
    pub file: PathBuf,
    /// Sweep instant (defaults to now)
    #[clap(long)]
    pub at: Option<String>,
    /// Rolling window length in minutes
    #[clap(long)]
    pub window_minutes: Option<i64>,
    /// Fire due jobs immediately after scheduling (dry-run delivery)
    #[clap(long)]
    pub fire: bool,
}
