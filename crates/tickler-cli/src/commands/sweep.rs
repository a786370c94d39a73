use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use tickler_core::error::CoreError;
use tickler_core::models::Reminder;
use tickler_core::recurrence::RecurrenceExpander;
use tickler_core::scheduler::{InMemoryScheduler, Notifier, SweepConfig, SweepRunner};
use tickler_core::timezone::ensure_time_zone;
use tracing::debug;
use uuid::Uuid;

use crate::cli::SweepCommand;
use crate::config::Config;
use crate::parser::parse_instant;

/// Dry-run notifier: prints each delivery instead of pushing it.
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, user_id: Uuid, title: &str, body: &str) -> Result<(), CoreError> {
        println!(
            "{} user={} title={:?} body={:?}",
            "deliver".green().bold(),
            user_id,
            title,
            body
        );
        Ok(())
    }
}

pub async fn sweep_command(command: SweepCommand, config: &Config) -> Result<()> {
    let raw = std::fs::read_to_string(&command.file)
        .with_context(|| format!("Failed to read reminder file {}", command.file.display()))?;
    let reminders: Vec<Reminder> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid reminder JSON in {}", command.file.display()))?;
    debug!(count = reminders.len(), file = %command.file.display(), "loaded reminders");

    let zone = ensure_time_zone(&config.default_timezone);
    let now = match &command.at {
        Some(at) => parse_instant(at, zone)?,
        None => Utc::now(),
    };
    let window_minutes = command.window_minutes.unwrap_or(config.sweep_window_minutes);

    let scheduler = InMemoryScheduler::new();
    let runner = SweepRunner::new(
        RecurrenceExpander::with_defaults(),
        SweepConfig { window_minutes },
    );
    let summary = runner.run(&reminders, &scheduler, now).await;

    println!(
        "Swept {} reminder(s): {} job(s) scheduled, {} with errors",
        summary.reminders_processed, summary.jobs_scheduled, summary.reminders_with_errors,
    );
    for error in &summary.errors {
        eprintln!("  {} {}", "!".red().bold(), error);
    }

    for (key, job) in scheduler.due(now + Duration::minutes(window_minutes)) {
        println!(
            "  {} at {} ({})",
            key,
            job.run_at.format("%Y-%m-%d %H:%M:%S UTC"),
            job.payload.local_meta.local_date_time_display,
        );
    }

    if command.fire {
        let fired = scheduler
            .fire_due(now + Duration::minutes(window_minutes), &ConsoleNotifier)
            .await;
        println!("Fired {} job(s); {} left pending", fired, scheduler.job_count());
    }

    Ok(())
}
