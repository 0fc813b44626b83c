use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use super::error::ConfigError;
use crate::printing::{Destination, RendererConfig};

/// Bridge configuration, read once at startup
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BACKEND_URL | https://snapserveconnect.com | Socket.IO backend |
/// | RESTAURANT_ID | 5 | Restaurant the printer registers for |
/// | API_KEY | (required) | Registration credential |
/// | PRINTER_HOST | 192.168.1.50 | Printer host or IP |
/// | PRINTER_PORT | 9100 | Printer raw TCP port |
/// | PRINT_TIMEOUT_MS | 5000 | Deadline for one print exchange |
/// | PAPER_WIDTH | 48 | Characters per line |
/// | TIMEZONE | America/Costa_Rica | Zone for receipt timestamps |
/// | CURRENCY_LABEL | COLONES | Unit printed after the total |
/// | LOG_LEVEL | info | Max log level |
/// | LOG_DIR | (unset) | Write daily log files here when set |
///
/// # Example
///
/// ```ignore
/// API_KEY=secret PRINTER_HOST=10.0.0.20 cargo run -p snap-bridge
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub restaurant_id: i64,
    pub api_key: String,
    pub printer_host: String,
    pub printer_port: u16,
    pub print_timeout_ms: u64,
    pub paper_width: usize,
    pub timezone: Tz,
    pub currency_label: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset or empty values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            backend_url: get("BACKEND_URL").unwrap_or_else(|| "https://snapserveconnect.com".into()),
            restaurant_id: parse_or(&get, "RESTAURANT_ID", 5)?,
            api_key: get("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?,
            printer_host: get("PRINTER_HOST").unwrap_or_else(|| "192.168.1.50".into()),
            printer_port: parse_or(&get, "PRINTER_PORT", snap_printer::DEFAULT_PORT)?,
            print_timeout_ms: parse_or(&get, "PRINT_TIMEOUT_MS", 5000)?,
            paper_width: parse_or(&get, "PAPER_WIDTH", 48)?,
            timezone: parse_or(&get, "TIMEZONE", chrono_tz::America::Costa_Rica)?,
            currency_label: get("CURRENCY_LABEL").unwrap_or_else(|| "COLONES".into()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: get("LOG_DIR"),
        })
    }

    /// Printer this bridge prints to
    pub fn destination(&self) -> Destination {
        Destination::new(self.printer_host.clone(), self.printer_port)
    }

    pub fn print_timeout(&self) -> Duration {
        Duration::from_millis(self.print_timeout_ms)
    }

    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            width: self.paper_width,
            timezone: self.timezone,
            currency_label: self.currency_label.clone(),
            ..Default::default()
        }
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
