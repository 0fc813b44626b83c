//! ESC/POS command builder
//!
//! Provides a fluent, append-only API for building ESC/POS print data.

use crate::command;
use crate::sanitize::sanitize;

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. Text passed to
/// [`line`](Self::line) and [`labeled_line`](Self::labeled_line) is sanitized
/// before it is appended, so the buffer only ever holds command bytes and
/// printer-safe ASCII.
#[derive(Debug, Clone)]
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// The buffer starts with the printer reset command.
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(command::RESET);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write a sanitized line
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(sanitize(s).as_bytes());
        self.buf.push(command::LF);
        self
    }

    /// Write a fixed label followed by a sanitized value
    ///
    /// The label is emitted verbatim and must be printer-safe ASCII
    /// (e.g. `"PEDIDO #"`).
    pub fn labeled_line(&mut self, label: &'static str, value: &str) -> &mut Self {
        debug_assert!(label.is_ascii());
        self.buf.extend_from_slice(label.as_bytes());
        self.line(value)
    }

    /// Write generated ASCII text verbatim (timestamps, fixed captions)
    pub fn literal_line(&mut self, s: &str) -> &mut Self {
        debug_assert!(s.is_ascii());
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(command::LF);
        self
    }

    /// Write `n` empty lines
    pub fn feed_lines(&mut self, n: usize) -> &mut Self {
        self.buf.extend(std::iter::repeat_n(command::LF, n));
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.raw(command::ALIGN_CENTER)
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.raw(command::ALIGN_LEFT)
    }

    // === Character Set ===

    /// Select the ASCII/USA code page
    pub fn codepage_ascii(&mut self) -> &mut Self {
        self.raw(command::CODEPAGE_ASCII)
    }

    // === Text Style ===

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.raw(command::DOUBLE_SIZE)
    }

    /// Reset to normal size
    pub fn normal_size(&mut self) -> &mut Self {
        self.raw(command::NORMAL_SIZE)
    }

    // === Separators ===

    /// Print a line of '-' characters
    pub fn separator(&mut self) -> &mut Self {
        self.buf.extend(std::iter::repeat_n(b'-', self.width));
        self.buf.push(command::LF);
        self
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.raw(command::CUT)
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    // === Build ===

    /// Current buffer contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish and return the byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
