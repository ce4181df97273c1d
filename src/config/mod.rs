//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so the service starts without any setup. `Config::from_env` validates the
//! values that have to parse (the upstream URL and the retry knobs) and
//! reports the offending variable through `ConfigError`.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

use url::Url;

/// Environment variable names. Public so integration tests can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_UPSTREAM_BASE_URL: &str = "UPSTREAM_BASE_URL";
pub const ENV_FETCH_MAX_RETRIES: &str = "FETCH_MAX_RETRIES";
pub const ENV_FETCH_BACKOFF_BASE_MS: &str = "FETCH_BACKOFF_BASE_MS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.imdb.com";
const DEFAULT_FETCH_MAX_RETRIES: u32 = 2;
const DEFAULT_FETCH_BACKOFF_BASE_MS: u64 = 250;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    upstream_base_url: Url,
    fetch_max_retries: u32,
    fetch_backoff_base_ms: u64,
    log_format: LogFormat,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(bind_addr: impl Into<String>, upstream_base_url: Url) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            upstream_base_url,
            fetch_max_retries: DEFAULT_FETCH_MAX_RETRIES,
            fetch_backoff_base_ms: DEFAULT_FETCH_BACKOFF_BASE_MS,
            log_format: LogFormat::Text,
        }
    }

    /// Override the retry policy of the upstream fetcher.
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.fetch_max_retries = max_retries;
        self.fetch_backoff_base_ms = backoff_base_ms;
        self
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let upstream_raw = env::var(ENV_UPSTREAM_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string());
        let upstream_base_url =
            Url::parse(&upstream_raw).map_err(|e| ConfigError::InvalidValue {
                field: ENV_UPSTREAM_BASE_URL,
                reason: e.to_string(),
            })?;
        if upstream_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: ENV_UPSTREAM_BASE_URL,
                reason: "must be an absolute http(s) URL".to_string(),
            });
        }

        let fetch_max_retries = parse_var(ENV_FETCH_MAX_RETRIES, DEFAULT_FETCH_MAX_RETRIES)?;
        let fetch_backoff_base_ms =
            parse_var(ENV_FETCH_BACKOFF_BASE_MS, DEFAULT_FETCH_BACKOFF_BASE_MS)?;

        let log_format = match env::var(ENV_LOG_FORMAT).ok().as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'text' or 'json', got '{}'", other),
                });
            }
        };

        Ok(Self {
            bind_addr,
            upstream_base_url,
            fetch_max_retries,
            fetch_backoff_base_ms,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Origin the title pages and episode fragments are fetched from.
    pub fn upstream_base_url(&self) -> &Url {
        &self.upstream_base_url
    }
    /// How many times a retriable fetch failure is retried.
    pub fn fetch_max_retries(&self) -> u32 {
        self.fetch_max_retries
    }
    /// Base delay for the exponential retry backoff, in milliseconds.
    pub fn fetch_backoff_base_ms(&self) -> u64 {
        self.fetch_backoff_base_ms
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
