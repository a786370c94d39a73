use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{LocalMeta, Reminder};
use crate::recurrence::RecurrenceExpander;

/// Identity of one scheduled delivery job. Keying jobs by reminder and
/// occurrence instant is what makes re-running a sweep idempotent: the same
/// occurrence always maps to the same job, so re-scheduling replaces rather
/// than duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub reminder_id: Uuid,
    pub occurrence_date: DateTime<Utc>,
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reminder-delivery:{}:{}",
            self.reminder_id,
            self.occurrence_date.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

/// Payload handed to the delivery handler when a job fires. Serializable so
/// durable queue implementations can persist it across restarts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryPayload {
    pub reminder_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub occurrence_date: DateTime<Utc>,
    pub local_meta: LocalMeta,
}

/// The external job-queue capability: schedule a keyed job to run at a UTC
/// instant, and remove pending jobs when a reminder goes away. Durable
/// implementations are expected to survive process restarts with
/// at-least-once execution; this crate only relies on the keying contract.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Schedule (or re-schedule) the job for `key`. Scheduling an already
    /// known key replaces the pending job; it must never duplicate delivery.
    async fn schedule(
        &self,
        run_at: DateTime<Utc>,
        key: JobKey,
        payload: DeliveryPayload,
    ) -> Result<(), CoreError>;

    /// Remove every pending job for a reminder (deletion/update path).
    /// Returns the number of jobs removed.
    async fn cancel_reminder(&self, reminder_id: Uuid) -> Result<usize, CoreError>;
}

/// The delivery-notification capability invoked once per firing instant.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, user_id: Uuid, title: &str, body: &str) -> Result<(), CoreError>;
}

/// Configuration for expansion sweeps.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Length of the rolling window each sweep covers, in minutes.
    pub window_minutes: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { window_minutes: 5 }
    }
}

/// Accounting for one expansion sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    /// Number of non-deleted reminders expanded
    pub reminders_processed: usize,
    /// Jobs handed to the scheduler
    pub jobs_scheduled: usize,
    /// Reminders whose scheduling hit at least one error
    pub reminders_with_errors: usize,
    /// Detailed error messages
    pub errors: Vec<String>,
}

/// SweepRunner: one pass of the periodic driver, made a library citizen so
/// it can be exercised without timers.
///
/// Responsibilities:
/// 1. Expand every non-deleted reminder over the rolling window
/// 2. Hand each occurrence to the scheduler, keyed `(reminder, occurrence)`
/// 3. Absorb per-reminder failures into the summary; one bad record must
///    never abort a sweep touching thousands of reminders
///
/// The runner keeps no memory of previous sweeps; idempotence across
/// overlapping windows comes entirely from the job keying scheme.
#[derive(Debug, Clone, Default)]
pub struct SweepRunner {
    expander: RecurrenceExpander,
    config: SweepConfig,
}

impl SweepRunner {
    pub fn new(expander: RecurrenceExpander, config: SweepConfig) -> Self {
        Self { expander, config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Expand `reminders` over `[now, now + window]` and schedule every
    /// occurrence on `scheduler`.
    pub async fn run<S: Scheduler>(
        &self,
        reminders: &[Reminder],
        scheduler: &S,
        now: DateTime<Utc>,
    ) -> SweepSummary {
        let window_end = now + Duration::minutes(self.config.window_minutes);
        let mut summary = SweepSummary::default();

        for reminder in reminders {
            if reminder.is_deleted {
                continue;
            }
            summary.reminders_processed += 1;

            let occurrences = self.expander.expand(reminder, Some(now), Some(window_end));
            let mut had_error = false;
            for occurrence in occurrences {
                let key = JobKey {
                    reminder_id: reminder.id,
                    occurrence_date: occurrence.occurrence_date,
                };
                let payload = DeliveryPayload {
                    reminder_id: reminder.id,
                    user_id: reminder.user_id,
                    title: reminder.title.clone(),
                    body: reminder.body.clone(),
                    occurrence_date: occurrence.occurrence_date,
                    local_meta: occurrence.local_meta,
                };
                match scheduler.schedule(occurrence.occurrence_date, key, payload).await {
                    Ok(()) => summary.jobs_scheduled += 1,
                    Err(err) => {
                        warn!(%key, %err, "failed to schedule delivery job");
                        summary.errors.push(format!("{}: {}", key, err));
                        had_error = true;
                    }
                }
            }
            if had_error {
                summary.reminders_with_errors += 1;
            }
        }

        debug!(
            reminders = summary.reminders_processed,
            jobs = summary.jobs_scheduled,
            errors = summary.errors.len(),
            "expansion sweep finished"
        );
        summary
    }
}

/// One pending job inside the in-memory scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledJob {
    pub run_at: DateTime<Utc>,
    pub payload: DeliveryPayload,
}

/// Reference `Scheduler` implementation backed by a keyed map. Used by the
/// CLI and the test suite; a production deployment plugs a durable queue in
/// behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    jobs: Mutex<HashMap<JobKey, ScheduledJob>>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().map(|jobs| jobs.len()).unwrap_or(0)
    }

    /// Pending jobs due at or before `now`, ordered by run time.
    pub fn due(&self, now: DateTime<Utc>) -> Vec<(JobKey, ScheduledJob)> {
        let mut due: Vec<(JobKey, ScheduledJob)> = self
            .jobs
            .lock()
            .map(|jobs| {
                jobs.iter()
                    .filter(|(_, job)| job.run_at <= now)
                    .map(|(key, job)| (*key, job.clone()))
                    .collect()
            })
            .unwrap_or_default();
        due.sort_by_key(|(_, job)| job.run_at);
        due
    }

    /// Fire every due job through `notifier` and remove it afterward,
    /// whether delivery succeeded or failed. Fire-once: a failed delivery is
    /// logged, not retried.
    pub async fn fire_due<N: Notifier>(&self, now: DateTime<Utc>, notifier: &N) -> usize {
        let due = self.due(now);
        let mut fired = 0;
        for (key, job) in due {
            let body = job.payload.body.as_deref().unwrap_or("");
            if let Err(err) = notifier
                .deliver(job.payload.user_id, &job.payload.title, body)
                .await
            {
                warn!(%key, %err, "delivery failed; job removed without retry");
            }
            if let Ok(mut jobs) = self.jobs.lock() {
                jobs.remove(&key);
            }
            fired += 1;
        }
        fired
    }
}

#[async_trait]
impl Scheduler for InMemoryScheduler {
    async fn schedule(
        &self,
        run_at: DateTime<Utc>,
        key: JobKey,
        payload: DeliveryPayload,
    ) -> Result<(), CoreError> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| CoreError::Scheduler("scheduler state poisoned".to_string()))?;
        jobs.insert(key, ScheduledJob { run_at, payload });
        Ok(())
    }

    async fn cancel_reminder(&self, reminder_id: Uuid) -> Result<usize, CoreError> {
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| CoreError::Scheduler("scheduler state poisoned".to_string()))?;
        let before = jobs.len();
        jobs.retain(|key, _| key.reminder_id != reminder_id);
        Ok(before - jobs.len())
    }
}
