use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Recurrence pattern type for a reminder.
///
/// Stored data may carry cadence strings outside the supported set; those
/// deserialize to `Custom` and degrade to a one-shot firing at the anchor
/// instead of failing the record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    #[serde(other)]
    Custom,
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cadence::None => write!(f, "none"),
            Cadence::Daily => write!(f, "daily"),
            Cadence::Weekly => write!(f, "weekly"),
            Cadence::Monthly => write!(f, "monthly"),
            Cadence::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid cadence: {0}")]
pub struct ParseCadenceError(String);

impl FromStr for Cadence {
    type Err = ParseCadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Cadence::None),
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            "custom" => Ok(Cadence::Custom),
            _ => Err(ParseCadenceError(s.to_string())),
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// Recurrence rule attached to a reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recurrence {
    #[serde(default)]
    pub cadence: Cadence,
    /// Step between occurrences: every Nth day/week/month. Values below 1
    /// are treated as 1 during expansion.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekday indices 0 (Sunday) through 6 (Saturday); weekly cadence only.
    /// Empty means "the anchor's own local weekday".
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// First occurrence; falls back to the reminder's `scheduled_at`.
    #[serde(default)]
    pub anchor_date: Option<DateTime<Utc>>,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self {
            cadence: Cadence::None,
            interval: 1,
            days_of_week: Vec::new(),
            anchor_date: None,
        }
    }
}

/// A user's reminder as read from the owning store. The expander only ever
/// reads these; mutation belongs to the excluded CRUD layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    /// Fallback anchor when the recurrence carries no explicit anchor.
    pub scheduled_at: DateTime<Utc>,
    /// IANA timezone name; empty means UTC. Governs local-day and weekday
    /// computations for this reminder.
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    /// Soft-delete flag; deleted reminders are excluded from sweeps.
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Reminder {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: String::new(),
            body: None,
            scheduled_at: Utc::now(),
            timezone: "UTC".to_string(),
            recurrence: None,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Localized display metadata for one occurrence, derived in the reminder's
/// timezone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalMeta {
    /// Local calendar date, `YYYY-MM-DD`.
    pub local_date: String,
    /// Local wall-clock time, `HH:MM`.
    pub local_time: String,
    /// Local datetime with offset, RFC 3339 style.
    pub local_date_time_iso: String,
    /// Human-readable local datetime with zone abbreviation.
    pub local_date_time_display: String,
    /// The IANA zone the fields above were derived in.
    pub local_timezone: String,
}

/// One concrete firing instant of a reminder. Computed on demand per
/// expansion call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occurrence {
    pub occurrence_date: DateTime<Utc>,
    pub local_meta: LocalMeta,
}
