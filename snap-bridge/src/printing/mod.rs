//! Receipt Printing Module
//!
//! - Rendering: order → ESC/POS bytes
//! - Dispatch: per-printer job queues, one TCP connection per job

pub mod dispatcher;
pub mod renderer;
pub mod types;

pub use dispatcher::{PrintDispatcher, execute_job, run_worker};
pub use renderer::{ReceiptRenderer, RendererConfig};
pub use types::*;
