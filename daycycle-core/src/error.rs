//! Error types for daycycle-core.

use thiserror::Error;

/// Errors raised while setting up a resolver.
///
/// Resolution itself never fails; missing or malformed calendar data
/// degrades to `ScheduleResult::NotAvailable` instead.
#[derive(Error, Debug)]
pub enum DayCycleError {
    #[error("Cycle length must be between 1 and {max}, got {got}")]
    InvalidCycleLength { got: u8, max: u8 },

    #[error("Invalid day selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Schedule marker must not be empty")]
    EmptyScheduleMarker,

    #[error("Holiday marker must not be empty")]
    EmptyHolidayMarker,
}

/// Result type alias for daycycle-core operations.
pub type DayCycleResult<T> = Result<T, DayCycleError>;
