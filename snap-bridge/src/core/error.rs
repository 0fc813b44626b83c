//! Bridge error types

use snap_printer::PrintError;
use thiserror::Error;

use crate::printing::Destination;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Errors raised while handing a job to a print worker
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid printer destination: {0}")]
    Destination(#[from] PrintError),

    #[error("Print worker for {0} has stopped")]
    WorkerGone(Destination),

    #[error("Dispatcher is shutting down")]
    ShuttingDown,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
