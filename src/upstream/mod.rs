//! Upstream Module
//!
//! Thin clients for the two data providers. Each call is a single attempt;
//! failures come back as [`UpstreamError`] for the endpoint to log.
//!
//! # Providers
//! - [`FinnhubClient`]: symbol search, quotes, company profiles and news
//! - [`YahooChartClient`]: daily close series

mod finnhub;
pub mod types;
mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::CACHE_CONTROL;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::models::{CandlesResponse, ChartRange};
use types::{NewsArticleRaw, ProfileRaw, QuoteRaw, SymbolSearchRaw};

pub use finnhub::{FinnhubClient, DEFAULT_FINNHUB_BASE_URL};
pub use yahoo::{YahooChartClient, DEFAULT_YAHOO_BASE_URL};

/// Longest slice of a provider error body kept for logging.
pub const MAX_ERROR_BODY_CHARS: usize = 256;

// == Upstream Error ==
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Provider answered with a non-success status
    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Network-level failure, including timeouts
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Success status with a body that is not the expected JSON
    #[error("{provider} returned an undecodable body: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Configured base URL cannot carry request paths
    #[error("invalid {provider} base url: {url}")]
    InvalidBaseUrl { provider: &'static str, url: String },

    /// The shared HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    /// HTTP status reported by the provider, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for provider calls.
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

// == Provider Traits ==
/// Real-time market data: search, quotes, profiles, news.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn search_symbols(&self, query: &str) -> UpstreamResult<SymbolSearchRaw>;

    async fn quote(&self, symbol: &str) -> UpstreamResult<QuoteRaw>;

    async fn company_profile(&self, symbol: &str) -> UpstreamResult<ProfileRaw>;

    /// Articles published between `from` and `to`, both inclusive.
    async fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> UpstreamResult<Vec<NewsArticleRaw>>;
}

/// Historical daily close prices.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    async fn daily_closes(&self, symbol: &str, range: ChartRange)
        -> UpstreamResult<CandlesResponse>;
}

// == Shared Helpers ==
/// Parses a provider base URL, rejecting ones that cannot take path segments.
pub(crate) fn parse_base_url(provider: &'static str, raw: &str) -> UpstreamResult<Url> {
    match Url::parse(raw) {
        Ok(url) if !url.cannot_be_a_base() => Ok(url),
        _ => Err(UpstreamError::InvalidBaseUrl {
            provider,
            url: raw.to_string(),
        }),
    }
}

/// Appends percent-encoded path segments to `base`.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Sends `request` once and decodes a JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> UpstreamResult<T> {
    let response = request
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|source| UpstreamError::Transport { provider, source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "(unreadable body)".to_string());
        return Err(UpstreamError::Status {
            provider,
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| UpstreamError::Transport { provider, source })?;

    serde_json::from_slice(&bytes).map_err(|source| UpstreamError::Decode { provider, source })
}

/// Cuts a provider body down to [`MAX_ERROR_BODY_CHARS`] characters.
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
