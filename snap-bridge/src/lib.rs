//! Snap Bridge - order receipt printing daemon
//!
//! # Architecture
//!
//! Orders pushed by the backend are rendered into ESC/POS receipts and sent to
//! a network thermal printer over raw TCP.
//!
//! ```text
//! backend ──Socket.IO──▶ intake ──mpsc──▶ dispatcher ──▶ worker per printer ──TCP──▶ printer
//!                                          (render)        (one job at a time)
//! ```
//!
//! # Modules
//!
//! ```text
//! snap-bridge/src/
//! ├── core/          # config, errors, background tasks
//! ├── intake/        # Socket.IO client
//! ├── order.rs       # order model
//! ├── printing/      # renderer, dispatcher
//! └── utils/         # logging
//! ```

pub mod core;
pub mod intake;
pub mod order;
pub mod printing;
pub mod utils;

pub use crate::core::{BackgroundTasks, Config, ConfigError, DispatchError, TaskKind};
pub use intake::SocketIntake;
pub use order::{Order, OrderExtra, OrderItem, Scalar};
pub use printing::{Destination, PrintDispatcher, PrintJob, ReceiptRenderer, RendererConfig};

pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
  ___                    ___      _    _
 / __|_ _  __ _ _ __    | _ )_ _ (_)__| |__ _ ___
 \__ \ ' \/ _` | '_ \   | _ \ '_|| / _` / _` / -_)
 |___/_||_\__,_| .__/   |___/_|  |_\__,_\__, \___|
               |_|                      |___/
    "#
    );
}
