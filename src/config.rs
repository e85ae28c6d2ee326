//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::cache::DEFAULT_MAX_ENTRIES;
use crate::ratelimit::{DEFAULT_MAX_KEYS, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS};
use crate::upstream::{DEFAULT_FINNHUB_BASE_URL, DEFAULT_YAHOO_BASE_URL};

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_CLEANUP_INTERVAL: u64 = 300;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FINNHUB_API_KEY must be set")]
    MissingApiKey,

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Server configuration parameters.
///
/// Everything except the Finnhub API key has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Finnhub API token, sent as a request header
    pub finnhub_api_key: String,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the response cache can hold
    pub cache_max_entries: usize,
    /// Requests allowed per client and route in one window
    pub rate_limit_max_requests: u32,
    /// Rate-limit window length in seconds
    pub rate_limit_window_secs: u64,
    /// Maximum number of tracked client/route keys
    pub rate_limit_max_keys: usize,
    /// Background sweep interval in seconds; 0 disables the sweep
    pub cleanup_interval: u64,
    /// Per-request timeout for provider calls, in seconds
    pub upstream_timeout_secs: u64,
    pub finnhub_base_url: String,
    pub yahoo_base_url: String,
}

impl Config {
    /// Default configuration around the given API key.
    pub fn new(finnhub_api_key: impl Into<String>) -> Self {
        Self {
            finnhub_api_key: finnhub_api_key.into(),
            server_port: DEFAULT_SERVER_PORT,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            rate_limit_window_secs: DEFAULT_WINDOW_SECS,
            rate_limit_max_keys: DEFAULT_MAX_KEYS,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            finnhub_base_url: DEFAULT_FINNHUB_BASE_URL.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FINNHUB_API_KEY` - required
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 30)
    /// - `RATE_LIMIT_WINDOW_SECS` - Window length (default: 60)
    /// - `RATE_LIMIT_MAX_KEYS` - Tracked rate-limit keys (default: 10000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 300)
    /// - `UPSTREAM_TIMEOUT_SECS` - Provider call timeout (default: 10)
    /// - `FINNHUB_BASE_URL`, `YAHOO_BASE_URL` - provider endpoints
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FINNHUB_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let defaults = Self::new(api_key);

        Ok(Self {
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port)?,
            cache_max_entries: parse_or(&lookup, "CACHE_MAX_ENTRIES", defaults.cache_max_entries)?,
            rate_limit_max_requests: parse_or(
                &lookup,
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            )?,
            rate_limit_window_secs: parse_or(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            rate_limit_max_keys: parse_or(
                &lookup,
                "RATE_LIMIT_MAX_KEYS",
                defaults.rate_limit_max_keys,
            )?,
            cleanup_interval: parse_or(&lookup, "CLEANUP_INTERVAL", defaults.cleanup_interval)?,
            upstream_timeout_secs: parse_or(
                &lookup,
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout_secs,
            )?,
            finnhub_base_url: lookup("FINNHUB_BASE_URL").unwrap_or(defaults.finnhub_base_url),
            yahoo_base_url: lookup("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            finnhub_api_key: defaults.finnhub_api_key,
        })
    }
}

/// Parses `var` when present; an unparsable value is an error, not a default.
fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        None => Ok(default),
    }
}
