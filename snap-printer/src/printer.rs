//! Printer adapters for sending ESC/POS data
//!
//! Network printers accept raw print data on a TCP port (9100 by convention).
//! Each job opens its own connection, writes the whole payload and closes it.
//! Nothing is read back from the printer.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::error::{PrintError, PrintResult};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, warn};

/// Raw printing port used by most thermal printers
pub const DEFAULT_PORT: u16 = 9100;

/// Deadline for a whole print exchange (connect + write + close)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for printer adapters
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    fn print(&self, data: &[u8]) -> impl Future<Output = PrintResult<()>> + Send;
}

/// Lifecycle of a single print job's connection
///
/// `Idle → Connecting → Connected → Writing → Closed`. `Connecting` and
/// `Writing` may instead end in `Failed`. `Closed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Connecting,
    Connected,
    Writing,
    Closed,
    Failed,
}

impl JobState {
    fn advance(&mut self, next: JobState) {
        debug!(from = %self, to = %next, "Print job state");
        *self = next;
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Idle => write!(f, "idle"),
            JobState::Connecting => write!(f, "connecting"),
            JobState::Connected => write!(f, "connected"),
            JobState::Writing => write!(f, "writing"),
            JobState::Closed => write!(f, "closed"),
            JobState::Failed => write!(f, "failed"),
        }
    }
}

/// Network printer (raw TCP)
///
/// The host may be an IP literal or a name; names are resolved on every job.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Empty printer host".to_string()));
        }
        if port == 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid printer port for {}: 0",
                host
            )));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the exchange timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connect, write the whole payload, close
    ///
    /// `state` is updated as the exchange progresses so the caller can tell
    /// where a timeout struck.
    async fn exchange(&self, data: &[u8], state: &mut JobState) -> PrintResult<()> {
        state.advance(JobState::Connecting);
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        state.advance(JobState::Connected);

        state.advance(JobState::Writing);
        stream.write_all(data).await?;
        stream.flush().await?;

        // Closing is cleanup: the payload has already been handed to the socket.
        if let Err(e) = stream.shutdown().await {
            debug!(error = %e, "Shutdown after write failed");
        }
        state.advance(JobState::Closed);
        Ok(())
    }
}

impl fmt::Display for NetworkPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut state = JobState::Idle;
        // Dropping the exchange future on timeout drops the stream, which
        // closes the socket.
        let outcome = tokio::time::timeout(self.timeout, self.exchange(data, &mut state)).await;

        let result = match outcome {
            Ok(result) => result,
            Err(_) => Err(PrintError::Timeout {
                stage: state,
                after: self.timeout,
            }),
        };

        match &result {
            Ok(()) => info!("Print job sent successfully"),
            Err(e) => {
                warn!(stage = %state, error = %e, "Print job failed");
                state.advance(JobState::Failed);
            }
        }
        result
    }
}
