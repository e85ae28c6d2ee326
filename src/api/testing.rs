//! In-process providers for handler and pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use super::AppState;
use crate::cache::CacheStore;
use crate::clock::FixedClock;
use crate::models::{CandlesResponse, ChartRange};
use crate::ratelimit::RateLimiter;
use crate::upstream::types::{
    NewsArticleRaw, ProfileRaw, QuoteRaw, SearchResultRaw, SymbolSearchRaw,
};
use crate::upstream::{CandleProvider, MarketDataProvider, UpstreamError, UpstreamResult};

/// Wednesday 2024-01-10 10:00 New York time.
pub fn open_session() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap()
}

/// Counts calls and answers with canned data, or fails every call.
///
/// A non-zero `delay` is slept after counting the call and before answering.
#[derive(Default)]
pub struct FakeProvider {
    pub calls: AtomicUsize,
    pub fail: bool,
    pub delay: Duration,
    pub news_range: std::sync::Mutex<Option<(NaiveDate, NaiveDate)>>,
}

impl FakeProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn record(&self) -> UpstreamResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(UpstreamError::Status {
                provider: "fake",
                status: 502,
                body: "secret upstream body".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataProvider for FakeProvider {
    async fn search_symbols(&self, query: &str) -> UpstreamResult<SymbolSearchRaw> {
        self.record().await?;
        Ok(SymbolSearchRaw {
            result: vec![
                SearchResultRaw {
                    description: format!("{query} INC"),
                    display_symbol: "AAPL".to_string(),
                    symbol: "AAPL".to_string(),
                    kind: "Common Stock".to_string(),
                    mic: Some("XNAS".to_string()),
                },
                SearchResultRaw {
                    description: "FOREIGN LISTING".to_string(),
                    display_symbol: "AAPL.MX".to_string(),
                    symbol: "AAPL.MX".to_string(),
                    kind: "Common Stock".to_string(),
                    mic: Some("XMEX".to_string()),
                },
            ],
        })
    }

    async fn quote(&self, _symbol: &str) -> UpstreamResult<QuoteRaw> {
        self.record().await?;
        Ok(QuoteRaw {
            c: 190.5,
            d: Some(1.5),
            dp: Some(0.79),
            h: 191.0,
            l: 188.0,
            o: 189.0,
            pc: 189.0,
            t: 1_704_900_000,
        })
    }

    async fn company_profile(&self, symbol: &str) -> UpstreamResult<ProfileRaw> {
        self.record().await?;
        Ok(ProfileRaw {
            logo: Some("javascript:alert(1)".to_string()),
            name: Some(format!("{symbol} Corp")),
        })
    }

    async fn company_news(
        &self,
        _symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> UpstreamResult<Vec<NewsArticleRaw>> {
        self.record().await?;
        if let Ok(mut range) = self.news_range.lock() {
            *range = Some((from, to));
        }
        Ok(vec![
            NewsArticleRaw {
                id: 1,
                url: "https://example.com/story".to_string(),
                ..Default::default()
            },
            NewsArticleRaw {
                id: 2,
                url: "javascript:alert(1)".to_string(),
                ..Default::default()
            },
        ])
    }
}

#[async_trait]
impl CandleProvider for FakeProvider {
    async fn daily_closes(
        &self,
        symbol: &str,
        _range: ChartRange,
    ) -> UpstreamResult<CandlesResponse> {
        self.record().await?;
        if symbol == "NODATA" {
            return Ok(CandlesResponse::no_data());
        }
        Ok(CandlesResponse::ok(vec![100, 200], vec![1.5, 2.5]))
    }
}

/// State over one shared fake, small stores and a pinned clock.
pub fn state_with(provider: Arc<FakeProvider>) -> AppState {
    AppState::new(
        CacheStore::<Value>::new(100),
        RateLimiter::new(30, Duration::from_secs(60), 1_000),
        provider.clone(),
        provider,
    )
    .with_clock(Arc::new(FixedClock::new(open_session())))
}
