//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::ratelimit::RateLimiter;
use crate::upstream::{
    CandleProvider, FinnhubClient, MarketDataProvider, UpstreamError, UpstreamResult,
    YahooChartClient,
};

/// Stores, providers and the clock, each behind an `Arc`.
///
/// Both stores are wrapped in `RwLock`; reads that touch statistics or
/// expiry take the write lock.
#[derive(Clone)]
pub struct AppState {
    /// Shaped JSON responses keyed by `prefix:params`
    pub cache: Arc<RwLock<CacheStore<Value>>>,
    /// Per client and route request windows
    pub limiter: Arc<RwLock<RateLimiter>>,
    pub market_data: Arc<dyn MarketDataProvider>,
    pub candles: Arc<dyn CandleProvider>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new AppState reading the system clock.
    pub fn new(
        cache: CacheStore<Value>,
        limiter: RateLimiter,
        market_data: Arc<dyn MarketDataProvider>,
        candles: Arc<dyn CandleProvider>,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(RwLock::new(limiter)),
            market_data,
            candles,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Creates a new AppState from configuration.
    ///
    /// Both provider clients share one HTTP client carrying the upstream timeout.
    pub fn from_config(config: &Config) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(UpstreamError::Client)?;

        let finnhub = FinnhubClient::new(
            http.clone(),
            &config.finnhub_base_url,
            config.finnhub_api_key.clone(),
        )?;
        let yahoo = YahooChartClient::new(http, &config.yahoo_base_url)?;

        let limiter = RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
            config.rate_limit_max_keys,
        );

        Ok(Self::new(
            CacheStore::new(config.cache_max_entries),
            limiter,
            Arc::new(finnhub),
            Arc::new(yahoo),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_builds_state() {
        let mut config = Config::new("test-key");
        config.cache_max_entries = 5;

        let state = AppState::from_config(&config).unwrap();

        assert!(state.cache.try_read().unwrap().is_empty());
        assert!(state.limiter.try_read().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let mut config = Config::new("test-key");
        config.finnhub_base_url = "not a url".to_string();

        let result = AppState::from_config(&config);

        assert!(matches!(result, Err(UpstreamError::InvalidBaseUrl { .. })));
    }
}
