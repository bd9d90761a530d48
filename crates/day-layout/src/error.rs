//! Error types for day-layout operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid bound type: {field} is not a number ({value})")]
    InvalidBoundType { field: &'static str, value: String },

    #[error("Start out of range: {0} is before the start of the day")]
    OutOfRangeStart(i64),

    #[error("End out of range: {0} is after the end of the day")]
    OutOfRangeEnd(i64),

    #[error("Ordering violation: start {start} must be before end {end}")]
    OrderingViolation { start: i64, end: i64 },

    #[error("Invalid track: {0}")]
    InvalidTrack(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
