use anyhow::Result;
use chrono::Duration;
use comfy_table::Table;
use owo_colors::OwoColorize;
use tickler_core::models::{Cadence, Recurrence, Reminder};
use tickler_core::recurrence::{ExpansionConfig, RecurrenceExpander};
use tickler_core::timezone::ensure_time_zone;

use crate::cli::PreviewCommand;
use crate::config::Config;
use crate::parser::parse_instant;

pub fn preview_command(command: PreviewCommand, config: &Config) -> Result<()> {
    let timezone = command
        .timezone
        .unwrap_or_else(|| config.default_timezone.clone());
    let zone = ensure_time_zone(&timezone);

    let cadence: Cadence = command
        .cadence
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let anchor = parse_instant(&command.anchor, zone)?;
    let window_start = match &command.from {
        Some(from) => parse_instant(from, zone)?,
        None => anchor,
    };
    let window_end = match &command.until {
        Some(until) => parse_instant(until, zone)?,
        None => window_start + Duration::days(config.horizon_days),
    };

    let reminder = Reminder {
        title: "preview".to_string(),
        scheduled_at: anchor,
        timezone: timezone.clone(),
        recurrence: Some(Recurrence {
            cadence,
            interval: command.interval,
            days_of_week: command.days,
            anchor_date: None,
        }),
        ..Default::default()
    };

    let expander = RecurrenceExpander::new(ExpansionConfig {
        default_horizon_days: config.horizon_days,
        ..ExpansionConfig::default()
    });
    let occurrences = expander.expand(&reminder, Some(window_start), Some(window_end));

    if occurrences.is_empty() {
        println!("{}", "No occurrences in the window.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "UTC", "Local", "Zone"]);
    for (index, occurrence) in occurrences.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            occurrence
                .occurrence_date
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            occurrence.local_meta.local_date_time_display.clone(),
            occurrence.local_meta.local_timezone.clone(),
        ]);
    }
    println!("{table}");
    println!(
        "{} occurrence(s) between {} and {}",
        occurrences.len(),
        window_start.format("%Y-%m-%d %H:%M UTC"),
        window_end.format("%Y-%m-%d %H:%M UTC"),
    );

    Ok(())
}
