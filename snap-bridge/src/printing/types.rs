//! Print job types

use std::fmt;

/// Printer address; jobs to the same destination never overlap
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One rendered receipt bound for one printer
#[derive(Debug, Clone)]
pub struct PrintJob {
    /// Order number, for logs only
    pub order_number: String,
    pub destination: Destination,
    pub payload: Vec<u8>,
}
