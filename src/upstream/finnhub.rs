//! Finnhub client: search, quote, profile and news.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use url::Url;

use super::types::{NewsArticleRaw, ProfileRaw, QuoteRaw, SymbolSearchRaw};
use super::{endpoint_url, fetch_json, parse_base_url, MarketDataProvider, UpstreamResult};

pub const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

const PROVIDER: &str = "finnhub";
const TOKEN_HEADER: &str = "X-Finnhub-Token";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct FinnhubClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(http: Client, base_url: &str, api_key: impl Into<String>) -> UpstreamResult<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(PROVIDER, base_url)?,
            api_key: api_key.into(),
        })
    }

    async fn get<T>(&self, segments: &[&str], query: &[(&str, &str)]) -> UpstreamResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut url = endpoint_url(&self.base_url, segments);
        url.query_pairs_mut().extend_pairs(query);

        let request = self
            .http
            .get(url)
            .header(TOKEN_HEADER, self.api_key.as_str());

        fetch_json(PROVIDER, request).await
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    async fn search_symbols(&self, query: &str) -> UpstreamResult<SymbolSearchRaw> {
        self.get(&["search"], &[("q", query)]).await
    }

    async fn quote(&self, symbol: &str) -> UpstreamResult<QuoteRaw> {
        self.get(&["quote"], &[("symbol", symbol)]).await
    }

    async fn company_profile(&self, symbol: &str) -> UpstreamResult<ProfileRaw> {
        self.get(&["stock", "profile2"], &[("symbol", symbol)]).await
    }

    async fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> UpstreamResult<Vec<NewsArticleRaw>> {
        let from = from.format(DATE_FORMAT).to_string();
        let to = to.format(DATE_FORMAT).to_string();

        self.get(
            &["company-news"],
            &[("symbol", symbol), ("from", from.as_str()), ("to", to.as_str())],
        )
        .await
    }
}
