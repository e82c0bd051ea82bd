//! Error types for measure construction and lifecycle transitions
//!
//! Sink delivery and probe failures are deliberately not represented here:
//! dispatch is fire-and-forget and a failing sink or probe propagates as a
//! panic at the call site that invoked the write.

use thiserror::Error;

/// Standard result type for measure operations
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Error type for measure construction and state transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// A measure was constructed with an empty name
    #[error("Invalid arguments: name is required")]
    MissingName,

    /// `Timer::start` was called while the timer was already running
    #[error("Timer is already running")]
    TimerAlreadyRunning,
}

#[cfg(test)]
mod tests {
    //! Unit tests for error.
    use super::*;

    /// Validates `MeasureError` display formatting.
    ///
    /// Assertions:
    /// - Confirms `MeasureError::MissingName.to_string()` equals
    ///   `"Invalid arguments: name is required"`.
    /// - Confirms `MeasureError::TimerAlreadyRunning.to_string()` equals
    ///   `"Timer is already running"`.
    #[test]
    fn test_error_messages() {
        assert_eq!(MeasureError::MissingName.to_string(), "Invalid arguments: name is required");
        assert_eq!(MeasureError::TimerAlreadyRunning.to_string(), "Timer is already running");
    }
}
