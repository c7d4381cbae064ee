//! Error types for script runs
//!
//! [`RunError`] covers failures of the run itself. Stack errors raised by an
//! operation are not run errors; they are recorded in the output log.

use std::fmt;

/// Errors that can occur while running or navigating a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation went past either end
    History { message: String },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RunError::History { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RunError {}
