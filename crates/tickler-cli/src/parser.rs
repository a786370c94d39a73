use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;
use tickler_core::timezone::parse_date_input_to_utc;

/// Parse a window-bound argument: explicit date/datetime formats first
/// (zone-local), then human-friendly phrases like "tomorrow" (UTC-relative).
pub fn parse_instant(input: &str, zone: Tz) -> Result<DateTime<Utc>> {
    if let Ok(instant) = parse_date_input_to_utc(input, zone) {
        return Ok(instant);
    }
    parse_date_string(input, Utc::now(), Dialect::Us)
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", input, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_explicit() {
        let instant = parse_instant("2024-06-01T12:00:00Z", Tz::UTC).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_instant_human() {
        assert!(parse_instant("tomorrow", Tz::UTC).is_ok());
    }

    #[test]
    fn test_parse_instant_garbage() {
        assert!(parse_instant("not a date at all", Tz::UTC).is_err());
    }
}
