//! # Tickler Core Library
//!
//! Timezone-aware recurrence expansion and delivery scheduling for the
//! Tickler reminder system.
//!
//! ## Features
//!
//! - **Recurrence Expansion**: deterministic enumeration of concrete firing
//!   instants for none/daily/weekly/monthly cadences within a UTC window,
//!   with interval skipping, a hard occurrence cap, and localized metadata
//!   per occurrence
//! - **Timezone Normalization**: IANA zone validation with graceful UTC
//!   fallback, per-instant offset derivation (DST correct), local-parts to
//!   UTC conversion, and day-boundary helpers
//! - **Scheduling Contract**: injected `Scheduler`/`Notifier` collaborators,
//!   `(reminder, occurrence)` job keying for idempotent sweeps, and
//!   fire-once job removal
//!
//! The expander and timezone utilities are pure, synchronous and stateless,
//! so they are safe to call concurrently without locking. State lives only
//! behind the `Scheduler` trait.
//!
//! ## Core Modules
//!
//! - [`models`]: reminder, recurrence and occurrence data structures
//! - [`timezone`]: timezone normalization and localized formatting
//! - [`recurrence`]: the occurrence expander
//! - [`scheduler`]: scheduling traits, sweep runner and in-memory scheduler
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use tickler_core::models::{Cadence, Recurrence, Reminder};
//! use tickler_core::recurrence::expand_reminder_occurrences;
//!
//! let reminder = Reminder {
//!     title: "Daily standup".to_string(),
//!     timezone: "America/New_York".to_string(),
//!     recurrence: Some(Recurrence {
//!         cadence: Cadence::Daily,
//!         interval: 1,
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let now = Utc::now();
//! let occurrences = expand_reminder_occurrences(
//!     &reminder,
//!     Some(now),
//!     Some(now + Duration::days(7)),
//! );
//! assert!(occurrences.len() <= 8);
//! ```

pub mod error;
pub mod models;
pub mod recurrence;
pub mod scheduler;
pub mod timezone;
