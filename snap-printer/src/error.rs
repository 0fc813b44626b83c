//! Error types for the printer library

use std::time::Duration;

use thiserror::Error;

use crate::printer::JobState;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// The printer did not complete the exchange before the deadline
    #[error("Timeout after {after:?} while {stage}")]
    Timeout { stage: JobState, after: Duration },

    /// Socket-level failure (refused, reset, unreachable, DNS)
    #[error("Connection failed: {0}")]
    Connection(#[from] std::io::Error),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PrintError::Timeout { .. })
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
