use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::models::{Cadence, Occurrence, Reminder};
use crate::timezone::{
    build_localized_metadata, convert_local_parts_to_utc, ensure_time_zone, LocalParts,
};

/// Configuration for occurrence expansion.
#[derive(Debug, Clone)]
pub struct ExpansionConfig {
    /// Hard cap on occurrences per expansion call; guards against runaway
    /// loops from pathological intervals.
    pub max_occurrences: usize,
    /// Horizon in days used when the caller omits the window end.
    pub default_horizon_days: i64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_occurrences: 400,
            default_horizon_days: 90,
        }
    }
}

/// RecurrenceExpander: turns one reminder's recurrence rule into the
/// concrete list of firing instants inside a UTC window.
///
/// Responsibilities:
/// 1. Resolve the anchor instant and the reminder's timezone
/// 2. Enumerate occurrences per cadence (none/daily/weekly/monthly)
/// 3. Keep every occurrence inside the inclusive window bounds
/// 4. Attach localized display metadata to each occurrence
///
/// Expansion is a pure function of its inputs: identical arguments always
/// yield the identical, ascending occurrence list. A well-formed but
/// degenerate rule (say, an interval larger than the window) yields fewer or
/// zero occurrences, never an error.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceExpander {
    config: ExpansionConfig,
}

impl RecurrenceExpander {
    pub fn new(config: ExpansionConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExpansionConfig::default())
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Expand `reminder` into its occurrences within
    /// `[window_start, window_end]` (inclusive on both ends).
    ///
    /// The window defaults to "now" through "now + default horizon" when
    /// bounds are omitted. Unrecognized cadences degrade to a one-shot
    /// firing at the anchor.
    pub fn expand(
        &self,
        reminder: &Reminder,
        window_start: Option<DateTime<Utc>>,
        window_end: Option<DateTime<Utc>>,
    ) -> Vec<Occurrence> {
        let now = Utc::now();
        let window_start = window_start.unwrap_or(now);
        let window_end =
            window_end.unwrap_or_else(|| now + Duration::days(self.config.default_horizon_days));
        if window_end < window_start {
            return Vec::new();
        }

        let recurrence = reminder.recurrence.clone().unwrap_or_default();
        let anchor = recurrence.anchor_date.unwrap_or(reminder.scheduled_at);
        let zone = ensure_time_zone(&reminder.timezone);

        match recurrence.cadence {
            Cadence::Daily => {
                self.expand_daily(anchor, recurrence.interval, window_start, window_end, zone)
            }
            Cadence::Weekly => self.expand_weekly(
                anchor,
                recurrence.interval,
                &recurrence.days_of_week,
                window_start,
                window_end,
                zone,
            ),
            Cadence::Monthly => {
                self.expand_monthly(anchor, recurrence.interval, window_start, window_end, zone)
            }
            Cadence::None | Cadence::Custom => {
                self.expand_one_shot(anchor, window_start, window_end, zone)
            }
        }
    }

    /// The anchor itself, iff it falls in the window. Also the fallback for
    /// any cadence outside the supported set.
    fn expand_one_shot(
        &self,
        anchor: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        zone: Tz,
    ) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        push_if_in_window(&mut occurrences, anchor, window_start, window_end, zone);
        occurrences
    }

    /// Every `interval` days from the anchor. Aligned by whole-day count
    /// from the anchor, not by wall-clock rounding, then walked forward in
    /// exact UTC days.
    fn expand_daily(
        &self,
        anchor: DateTime<Utc>,
        interval: u32,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        zone: Tz,
    ) -> Vec<Occurrence> {
        let step = i64::from(interval.max(1));
        let mut occurrences = Vec::new();

        // First candidate on or after the window start, aligned to the step.
        let mut candidate = if anchor >= window_start {
            anchor
        } else {
            let whole_days = (window_start - anchor).num_days();
            let aligned = whole_days - whole_days % step;
            let mut first = anchor + Duration::days(aligned);
            if first < window_start {
                first += Duration::days(step);
            }
            first
        };

        while candidate <= window_end && occurrences.len() < self.config.max_occurrences {
            push_if_in_window(&mut occurrences, candidate, window_start, window_end, zone);
            candidate += Duration::days(step);
        }
        occurrences
    }

    /// Every `interval` weeks, on the given local weekdays (the anchor's own
    /// local weekday when the set is empty).
    ///
    /// Walks day-by-day rather than week-by-week, starting a day before the
    /// window so boundary days are never missed. A day matches when the
    /// elapsed whole weeks since the anchor are a multiple of the interval
    /// and its weekday, observed in the reminder's zone, is in the set. The
    /// same instant can be a different calendar day in different zones, so
    /// the weekday check must be zone-local, never UTC.
    fn expand_weekly(
        &self,
        anchor: DateTime<Utc>,
        interval: u32,
        days_of_week: &[u8],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        zone: Tz,
    ) -> Vec<Occurrence> {
        let step = i64::from(interval.max(1));
        let weekday_set: Vec<u8> = if days_of_week.is_empty() {
            vec![anchor.with_timezone(&zone).weekday().num_days_from_sunday() as u8]
        } else {
            days_of_week.to_vec()
        };

        let mut day_offset = if anchor >= window_start {
            0
        } else {
            ((window_start - Duration::days(1)) - anchor).num_days().max(0)
        };

        let mut occurrences = Vec::new();
        loop {
            let candidate = anchor + Duration::days(day_offset);
            if candidate > window_end || occurrences.len() >= self.config.max_occurrences {
                break;
            }
            let weeks_elapsed = day_offset / 7;
            if weeks_elapsed % step == 0 {
                let local_weekday =
                    candidate.with_timezone(&zone).weekday().num_days_from_sunday() as u8;
                if weekday_set.contains(&local_weekday) {
                    push_if_in_window(&mut occurrences, candidate, window_start, window_end, zone);
                }
            }
            day_offset += 1;
        }
        occurrences
    }

    /// Every `interval` months on the anchor's local day-of-month, clamped
    /// to the last day of shorter months (never overflowing into the next
    /// month). The anchor's local time-of-day is held constant; the UTC
    /// instant shifts with the zone's offset across DST.
    fn expand_monthly(
        &self,
        anchor: DateTime<Utc>,
        interval: u32,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        zone: Tz,
    ) -> Vec<Occurrence> {
        let step = interval.max(1) as i32;
        let anchor_local = anchor.with_timezone(&zone);
        let anchor_year = anchor_local.year();
        let anchor_month = anchor_local.month() as i32;
        let anchor_day = anchor_local.day();

        // First month offset worth trying: one step before the window start,
        // aligned down to the interval.
        let start_local = window_start.with_timezone(&zone);
        let months_to_start = (start_local.year() - anchor_year) * 12
            + start_local.month() as i32
            - anchor_month;
        let mut offset = (months_to_start - 1).max(0);
        offset -= offset % step;

        // Iteration budget derived from the window length; candidates also
        // break out as soon as they pass the window end.
        let window_months = ((window_end - window_start).num_days() / 28 + 2).max(1) as i32;
        let max_offset = months_to_start.max(0) + window_months + step;

        let mut occurrences = Vec::new();
        while offset <= max_offset && occurrences.len() < self.config.max_occurrences {
            let months = anchor_month - 1 + offset;
            let year = anchor_year + months.div_euclid(12);
            let month = (months.rem_euclid(12) + 1) as u32;
            let day = anchor_day.min(days_in_month(year, month));
            let parts = LocalParts {
                year,
                month,
                day,
                hour: anchor_local.hour(),
                minute: anchor_local.minute(),
                second: anchor_local.second(),
                millisecond: anchor_local.timestamp_subsec_millis(),
            };
            match convert_local_parts_to_utc(&parts, zone) {
                Ok(candidate) => {
                    if candidate > window_end {
                        break;
                    }
                    push_if_in_window(&mut occurrences, candidate, window_start, window_end, zone);
                }
                Err(err) => {
                    warn!(%err, "skipping unrepresentable monthly candidate");
                }
            }
            offset += step;
        }
        occurrences
    }
}

/// Append the candidate when it lies inside the inclusive window, attaching
/// localized metadata; silently skip it otherwise.
fn push_if_in_window(
    occurrences: &mut Vec<Occurrence>,
    candidate: DateTime<Utc>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    zone: Tz,
) {
    if candidate >= window_start && candidate <= window_end {
        occurrences.push(Occurrence {
            occurrence_date: candidate,
            local_meta: build_localized_metadata(candidate, zone),
        });
    }
}

/// Number of days in a calendar month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Expand a reminder's occurrences with the default configuration. The
/// entry point the periodic sweep driver uses.
pub fn expand_reminder_occurrences(
    reminder: &Reminder,
    window_start: Option<DateTime<Utc>>,
    window_end: Option<DateTime<Utc>>,
) -> Vec<Occurrence> {
    RecurrenceExpander::with_defaults().expand(reminder, window_start, window_end)
}
