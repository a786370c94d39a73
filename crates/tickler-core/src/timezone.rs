use crate::error::CoreError;
use crate::models::LocalMeta;
use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::warn;

/// Validate an IANA timezone name, returning the parsed zone.
pub fn validate_time_zone(candidate: &str) -> Result<Tz, CoreError> {
    Tz::from_str(candidate)
        .map_err(|_| CoreError::InvalidTimezone(format!("Invalid timezone: {}", candidate)))
}

/// Resolve a timezone candidate to a usable zone, falling back to UTC.
///
/// An empty candidate means "no preference" and resolves to UTC quietly; an
/// unusable candidate is logged and also resolves to UTC. Never fails; a
/// scheduling sweep must degrade rather than drop reminders over a bad zone.
pub fn ensure_time_zone(candidate: &str) -> Tz {
    if candidate.is_empty() {
        return Tz::UTC;
    }
    match Tz::from_str(candidate) {
        Ok(zone) => zone,
        Err(_) => {
            warn!(timezone = candidate, "unusable timezone, falling back to UTC");
            Tz::UTC
        }
    }
}

/// Pick the first usable zone from a requested value and a profile default,
/// UTC last. The request/user-preference resolution chain with the HTTP
/// layer stripped away.
pub fn resolve_time_zone(requested: Option<&str>, profile_default: Option<&str>) -> Tz {
    for candidate in [requested, profile_default].into_iter().flatten() {
        if candidate.is_empty() {
            continue;
        }
        match Tz::from_str(candidate) {
            Ok(zone) => return zone,
            Err(_) => {
                warn!(timezone = candidate, "skipping unusable timezone candidate");
            }
        }
    }
    Tz::UTC
}

/// Signed offset of `zone` at `at`, in minutes, as UTC minus local time
/// (positive west of Greenwich). Re-derived at the exact instant, so the
/// value is correct on both sides of a DST transition.
pub fn utc_offset_minutes(zone: Tz, at: DateTime<Utc>) -> i64 {
    let local_minus_utc = i64::from(at.with_timezone(&zone).offset().fix().local_minus_utc());
    -local_minus_utc / 60
}

/// Calendar parts understood as wall-clock time in some zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl LocalParts {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
        }
    }
}

/// Convert calendar parts understood as local time in `zone` to the
/// equivalent UTC instant.
///
/// Ambiguous local times (the repeated hour when clocks fall back) resolve
/// to the earliest mapping. Local times inside a spring-forward gap do not
/// exist; those are resolved by reading the parts as a naive UTC instant and
/// subtracting the zone's offset at that instant, which lands just past the
/// gap. Invalid calendar parts are a caller error.
pub fn convert_local_parts_to_utc(parts: &LocalParts, zone: Tz) -> Result<DateTime<Utc>, CoreError> {
    let date = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day).ok_or_else(|| {
        CoreError::InvalidDateInput(format!(
            "Invalid calendar date: {:04}-{:02}-{:02}",
            parts.year, parts.month, parts.day
        ))
    })?;
    let time = NaiveTime::from_hms_milli_opt(parts.hour, parts.minute, parts.second, parts.millisecond)
        .ok_or_else(|| {
            CoreError::InvalidDateInput(format!(
                "Invalid wall-clock time: {:02}:{:02}:{:02}.{:03}",
                parts.hour, parts.minute, parts.second, parts.millisecond
            ))
        })?;
    Ok(naive_local_to_utc(date.and_time(time), zone))
}

/// Map a naive local datetime into UTC, handling DST folds and gaps.
fn naive_local_to_utc(naive: NaiveDateTime, zone: Tz) -> DateTime<Utc> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Inside a spring-forward gap: approximate via the zone's offset
            // at the naive instant read as UTC.
            let guess = naive.and_utc();
            let local_minus_utc =
                i64::from(guess.with_timezone(&zone).offset().fix().local_minus_utc());
            guess - Duration::seconds(local_minus_utc)
        }
    }
}

/// Parse a date or datetime string into a UTC instant.
///
/// Accepts RFC 3339 instants (kept as-is), naive datetimes
/// (`YYYY-MM-DDTHH:MM[:SS]`, read as local time in `zone`), and date-only
/// strings (`YYYY-MM-DD`, read as local midnight in `zone`). Anything else
/// raises a descriptive error; malformed inputs here are programming
/// mistakes upstream, not normal operating conditions.
pub fn parse_date_input_to_utc(input: &str, zone: Tz) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive_local_to_utc(naive, zone));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            CoreError::InvalidDateInput(format!("Invalid date: '{}'", input))
        })?;
        return Ok(naive_local_to_utc(midnight, zone));
    }
    Err(CoreError::InvalidDateInput(format!(
        "Unparseable date input: '{}' (expected RFC 3339, YYYY-MM-DDTHH:MM[:SS], or YYYY-MM-DD)",
        input
    )))
}

/// Start of the zone-local calendar day containing `at`, as a UTC instant.
pub fn start_of_day_utc(at: DateTime<Utc>, zone: Tz) -> DateTime<Utc> {
    let local_date = at.with_timezone(&zone).date_naive();
    // Midnight always exists as an hms value; gaps are handled by the
    // local-to-UTC mapping.
    let midnight = local_date.and_hms_opt(0, 0, 0).unwrap_or_default();
    naive_local_to_utc(midnight, zone)
}

/// End of the zone-local calendar day containing `at` (23:59:59.999 local),
/// as a UTC instant.
pub fn end_of_day_utc(at: DateTime<Utc>, zone: Tz) -> DateTime<Utc> {
    let local_date = at.with_timezone(&zone).date_naive();
    let last_milli = local_date
        .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default());
    naive_local_to_utc(last_milli, zone)
}

/// Current wall-clock time in `zone`.
pub fn now_in_zone(zone: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&zone)
}

/// Localized display metadata for an instant in `zone`. Pure formatting.
pub fn build_localized_metadata(at: DateTime<Utc>, zone: Tz) -> LocalMeta {
    let local = at.with_timezone(&zone);
    LocalMeta {
        local_date: local.format("%Y-%m-%d").to_string(),
        local_time: local.format("%H:%M").to_string(),
        local_date_time_iso: local.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        local_date_time_display: local.format("%Y-%m-%d %H:%M %Z").to_string(),
        local_timezone: zone.name().to_string(),
    }
}
