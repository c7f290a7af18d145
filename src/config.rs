//! Server configuration loaded from environment variables.

use std::net::SocketAddr;
use thiserror::Error;

/// Listen address used when `REPORTLINE_BIND` is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Pool size used when `REPORTLINE_DB_POOL_SIZE` is unset.
pub const DEFAULT_POOL_SIZE: u32 = 8;

const MAX_POOL_SIZE: u32 = 64;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Environment variable name.
        name: &'static str,
        /// Offending raw value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}

/// Process-level settings for the report server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// `PostgreSQL` connection URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Log output format.
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("REPORTLINE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "REPORTLINE_BIND",
                value: bind_raw.clone(),
                reason: "expected host:port",
            })?;

        let database_url = lookup("DATABASE_URL")
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        let pool_size = match lookup("REPORTLINE_DB_POOL_SIZE") {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => parse_pool_size(&raw)?,
        };

        let log_format = match lookup("REPORTLINE_LOG_FORMAT") {
            None => LogFormat::default(),
            Some(raw) => parse_log_format(&raw)?,
        };

        Ok(Self {
            bind_addr,
            database_url,
            pool_size,
            log_format,
        })
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| (1..=MAX_POOL_SIZE).contains(size))
        .ok_or_else(|| ConfigError::InvalidValue {
            name: "REPORTLINE_DB_POOL_SIZE",
            value: raw.to_owned(),
            reason: "expected an integer between 1 and 64",
        })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        _ => Err(ConfigError::InvalidValue {
            name: "REPORTLINE_LOG_FORMAT",
            value: raw.to_owned(),
            reason: "expected text or json",
        }),
    }
}
