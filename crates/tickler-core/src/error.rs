use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid date input: {0}")]
    InvalidDateInput(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("Delivery error: {0}")]
    Delivery(String),
}
