//! # snap-printer
//!
//! ESC/POS receipt printing primitives - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command constants and an append-only byte builder
//! - Text sanitization for the printer's single-byte code page
//! - Network printing (raw TCP, one connection per job)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Order receipt rendering → snap-bridge
//!
//! ## Example
//!
//! ```ignore
//! use snap_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.codepage_ascii();
//! builder.line("Café Sol");
//! builder.separator();
//! builder.feed_lines(4);
//! builder.cut();
//!
//! let printer = NetworkPrinter::new("192.168.1.50", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

pub mod command;
mod error;
mod escpos;
mod printer;
mod sanitize;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{DEFAULT_PORT, DEFAULT_TIMEOUT, JobState, NetworkPrinter, Printer};
pub use sanitize::{is_printable, sanitize};
