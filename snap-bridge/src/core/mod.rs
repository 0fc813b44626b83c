//! Core module - configuration, errors and task lifecycle
//!
//! - [`Config`] - bridge configuration
//! - [`BackgroundTasks`] - background task manager
//! - [`ConfigError`], [`DispatchError`] - error types

pub mod config;
pub mod error;
pub mod tasks;

pub use config::Config;
pub use error::{ConfigError, DispatchError, DispatchResult};
pub use tasks::{BackgroundTasks, TaskKind};
