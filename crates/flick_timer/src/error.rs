//! Timer error types

use thiserror::Error;

/// Timer-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A repeating timer needs a non-zero period
    #[error("Timer period must be greater than zero")]
    ZeroPeriod,

    /// The scheduler behind a handle no longer exists
    #[error("Timer scheduler has been dropped")]
    SchedulerDropped,
}

/// Result type for timer operations
pub type Result<T> = std::result::Result<T, TimerError>;
