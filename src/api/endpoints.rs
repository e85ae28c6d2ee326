//! The five stock endpoints.
//!
//! Each is a unit struct describing its route, cache policy, validation and
//! upstream call. The shared steps live in [`super::pipeline`].

use std::time::Duration;

use async_trait::async_trait;

use super::pipeline::{Endpoint, Validated};
use super::AppState;
use crate::error::{ApiError, Result};
use crate::market::is_market_open_at;
use crate::models::{
    is_valid_symbol, param, sanitize_search_query, CandlesResponse, ChartRange, NewsResponse,
    ProfileResponse, QueryParams, QuoteResponse, SearchResponse,
};
use crate::upstream::UpstreamResult;

/// Days of news history requested, counting back from today.
pub const NEWS_LOOKBACK_DAYS: i64 = 30;

fn symbol_param(query: &QueryParams) -> Result<String> {
    let symbol = param(query, "symbol");
    if !is_valid_symbol(symbol) {
        return Err(ApiError::InvalidSymbol);
    }
    Ok(symbol.to_string())
}

// == Quote ==
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteEndpoint;

#[async_trait]
impl Endpoint for QuoteEndpoint {
    type Params = String;
    type Response = QuoteResponse;

    const NAME: &'static str = "quote";
    const ROUTE: &'static str = "/stock/quote";
    const CACHE_PREFIX: &'static str = "quote";
    const TTL: Duration = Duration::from_secs(60);
    const FAILURE_MESSAGE: &'static str = "Failed to fetch quote";

    fn validate(&self, query: &QueryParams) -> Result<Validated<String, QuoteResponse>> {
        symbol_param(query).map(Validated::Proceed)
    }

    fn cache_key(&self, symbol: &String) -> String {
        symbol.clone()
    }

    async fn fetch(&self, state: &AppState, symbol: &String) -> UpstreamResult<QuoteResponse> {
        let raw = state.market_data.quote(symbol).await?;
        Ok(QuoteResponse::from_raw(raw, is_market_open_at(state.clock.now())))
    }
}

// == Candles ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandlesParams {
    pub symbol: String,
    pub range: ChartRange,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CandlesEndpoint;

#[async_trait]
impl Endpoint for CandlesEndpoint {
    type Params = CandlesParams;
    type Response = CandlesResponse;

    const NAME: &'static str = "candles";
    const ROUTE: &'static str = "/stock/candles";
    const CACHE_PREFIX: &'static str = "candles";
    const TTL: Duration = Duration::from_secs(60);
    const FAILURE_MESSAGE: &'static str = "Failed to fetch candles";

    /// Symbol is checked before range.
    fn validate(&self, query: &QueryParams) -> Result<Validated<CandlesParams, CandlesResponse>> {
        let symbol = symbol_param(query)?;
        let range = param(query, "range")
            .parse::<ChartRange>()
            .map_err(|_| ApiError::InvalidRange)?;
        Ok(Validated::Proceed(CandlesParams { symbol, range }))
    }

    fn cache_key(&self, params: &CandlesParams) -> String {
        format!("{}:{}", params.symbol, params.range)
    }

    async fn fetch(
        &self,
        state: &AppState,
        params: &CandlesParams,
    ) -> UpstreamResult<CandlesResponse> {
        state.candles.daily_closes(&params.symbol, params.range).await
    }
}

// == News ==
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsEndpoint;

#[async_trait]
impl Endpoint for NewsEndpoint {
    type Params = String;
    type Response = NewsResponse;

    const NAME: &'static str = "news";
    const ROUTE: &'static str = "/stock/news";
    const CACHE_PREFIX: &'static str = "news";
    const TTL: Duration = Duration::from_secs(5 * 60);
    const FAILURE_MESSAGE: &'static str = "Failed to fetch news";

    fn validate(&self, query: &QueryParams) -> Result<Validated<String, NewsResponse>> {
        symbol_param(query).map(Validated::Proceed)
    }

    fn cache_key(&self, symbol: &String) -> String {
        symbol.clone()
    }

    async fn fetch(&self, state: &AppState, symbol: &String) -> UpstreamResult<NewsResponse> {
        let to = state.clock.now().date_naive();
        let from = to - chrono::Duration::days(NEWS_LOOKBACK_DAYS);

        let raw = state.market_data.company_news(symbol, from, to).await?;
        Ok(NewsResponse::from_raw(raw))
    }
}

// == Profile ==
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileEndpoint;

#[async_trait]
impl Endpoint for ProfileEndpoint {
    type Params = String;
    type Response = ProfileResponse;

    const NAME: &'static str = "profile";
    const ROUTE: &'static str = "/stock/profile";
    const CACHE_PREFIX: &'static str = "profile";
    const TTL: Duration = Duration::from_secs(60 * 60);
    const FAILURE_MESSAGE: &'static str = "Failed to fetch profile";

    fn validate(&self, query: &QueryParams) -> Result<Validated<String, ProfileResponse>> {
        symbol_param(query).map(Validated::Proceed)
    }

    fn cache_key(&self, symbol: &String) -> String {
        symbol.clone()
    }

    async fn fetch(&self, state: &AppState, symbol: &String) -> UpstreamResult<ProfileResponse> {
        let raw = state.market_data.company_profile(symbol).await?;
        Ok(ProfileResponse::from_raw(raw))
    }
}

// == Search ==
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEndpoint;

#[async_trait]
impl Endpoint for SearchEndpoint {
    type Params = String;
    type Response = SearchResponse;

    const NAME: &'static str = "search";
    const ROUTE: &'static str = "/stock/search";
    const CACHE_PREFIX: &'static str = "search";
    const TTL: Duration = Duration::from_secs(60);
    const FAILURE_MESSAGE: &'static str = "Failed to fetch search results";

    /// Never rejects; a query with nothing left after sanitizing answers empty.
    fn validate(&self, query: &QueryParams) -> Result<Validated<String, SearchResponse>> {
        let cleaned = sanitize_search_query(param(query, "q"));
        if cleaned.is_empty() {
            return Ok(Validated::Respond(SearchResponse::empty()));
        }
        Ok(Validated::Proceed(cleaned))
    }

    fn cache_key(&self, cleaned: &String) -> String {
        cleaned.to_lowercase()
    }

    async fn fetch(&self, state: &AppState, cleaned: &String) -> UpstreamResult<SearchResponse> {
        let raw = state.market_data.search_symbols(cleaned).await?;
        Ok(SearchResponse::from_raw(raw))
    }
}
