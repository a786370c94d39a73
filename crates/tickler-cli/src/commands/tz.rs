use anyhow::Result;
use chrono::Utc;
use comfy_table::Table;
use owo_colors::OwoColorize;
use tickler_core::timezone::{now_in_zone, utc_offset_minutes, validate_time_zone};

use crate::cli::TzCommand;

/// Common timezones for the listing view
fn common_time_zones() -> Vec<&'static str> {
    vec![
        "UTC",
        "America/New_York",
        "America/Chicago",
        "America/Denver",
        "America/Los_Angeles",
        "America/Sao_Paulo",
        "Europe/London",
        "Europe/Paris",
        "Europe/Berlin",
        "Europe/Madrid",
        "Asia/Tokyo",
        "Asia/Seoul",
        "Asia/Shanghai",
        "Asia/Singapore",
        "Asia/Kolkata",
        "Asia/Dubai",
        "Australia/Sydney",
        "Pacific/Auckland",
    ]
}

fn offset_display(minutes: i64) -> String {
    // utc_offset_minutes is UTC minus local; display the conventional
    // local-relative sign.
    let local = -minutes;
    format!("{}{:02}:{:02}", if local < 0 { "-" } else { "+" }, local.abs() / 60, local.abs() % 60)
}

pub fn tz_command(command: TzCommand) -> Result<()> {
    let now = Utc::now();

    if let Some(zone_name) = command.zone {
        let zone = validate_time_zone(&zone_name)?;
        let local_now = now_in_zone(zone);
        println!("{}", zone_name.blue().bold());
        println!("Current time:  {}", local_now.format("%Y-%m-%d %H:%M:%S"));
        println!("Abbreviation:  {}", local_now.format("%Z"));
        println!("UTC offset:    {}", offset_display(utc_offset_minutes(zone, now)));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Zone", "Current time", "Offset"]);
    for zone_name in common_time_zones() {
        let zone = validate_time_zone(zone_name)?;
        table.add_row(vec![
            zone_name.to_string(),
            now_in_zone(zone).format("%Y-%m-%d %H:%M").to_string(),
            offset_display(utc_offset_minutes(zone, now)),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_display() {
        assert_eq!(offset_display(300), "-05:00"); // New York winter
        assert_eq!(offset_display(-840), "+14:00"); // Kiritimati
        assert_eq!(offset_display(0), "+00:00");
        assert_eq!(offset_display(-330), "+05:30"); // Kolkata
    }

    #[test]
    fn test_common_time_zones_all_valid() {
        for zone in common_time_zones() {
            assert!(validate_time_zone(zone).is_ok(), "bad zone {}", zone);
        }
    }
}
