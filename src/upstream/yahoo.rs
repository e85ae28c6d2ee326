//! Yahoo chart client: daily close series.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use url::Url;

use super::types::ChartEnvelope;
use super::{endpoint_url, fetch_json, parse_base_url, CandleProvider, UpstreamResult};
use crate::models::{CandlesResponse, ChartRange};

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

const PROVIDER: &str = "yahoo";
// The chart API refuses requests without a browser-like agent.
const BROWSER_AGENT: &str = "Mozilla/5.0 (compatible; stock-dashboard/1.0)";

/// Provider token for a chart range.
fn range_token(range: ChartRange) -> &'static str {
    match range {
        ChartRange::OneMonth => "1mo",
        ChartRange::ThreeMonths => "3mo",
        ChartRange::OneYear => "1y",
    }
}

#[derive(Debug, Clone)]
pub struct YahooChartClient {
    http: Client,
    base_url: Url,
}

impl YahooChartClient {
    pub fn new(http: Client, base_url: &str) -> UpstreamResult<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(PROVIDER, base_url)?,
        })
    }
}

#[async_trait]
impl CandleProvider for YahooChartClient {
    async fn daily_closes(
        &self,
        symbol: &str,
        range: ChartRange,
    ) -> UpstreamResult<CandlesResponse> {
        let mut url = endpoint_url(&self.base_url, &["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("interval", "1d")
            .append_pair("range", range_token(range));

        let request = self.http.get(url).header(USER_AGENT, BROWSER_AGENT);
        let envelope: ChartEnvelope = fetch_json(PROVIDER, request).await?;

        // No result container at all means the provider knows nothing about the symbol.
        let Some(result) = envelope.into_first_result() else {
            return Ok(CandlesResponse::no_data());
        };

        let (t, c) = result.into_close_series();
        Ok(CandlesResponse::ok(t, c))
    }
}
