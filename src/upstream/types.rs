//! Provider wire shapes
//!
//! Only the fields the endpoints consume are modelled; everything else in
//! the provider payloads is ignored on decode.

use serde::Deserialize;

// == Finnhub ==

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbolSearchRaw {
    #[serde(default)]
    pub result: Vec<SearchResultRaw>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResultRaw {
    /// e.g. "APPLE INC"
    pub description: String,
    #[serde(rename = "displaySymbol")]
    pub display_symbol: String,
    pub symbol: String,
    /// e.g. "Common Stock"
    #[serde(rename = "type")]
    pub kind: String,
    /// Market identifier code, not always present
    pub mic: Option<String>,
}

/// Finnhub reports unknown symbols as all zeros with null change fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRaw {
    #[serde(default)]
    pub c: f64,
    #[serde(default)]
    pub d: Option<f64>,
    #[serde(default)]
    pub dp: Option<f64>,
    #[serde(default)]
    pub h: f64,
    #[serde(default)]
    pub l: f64,
    #[serde(default)]
    pub o: f64,
    #[serde(default)]
    pub pc: f64,
    #[serde(default)]
    pub t: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRaw {
    pub logo: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsArticleRaw {
    pub category: String,
    pub datetime: i64,
    pub headline: String,
    pub id: i64,
    pub image: String,
    pub related: String,
    pub source: String,
    pub summary: String,
    pub url: String,
}

// == Yahoo chart ==

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub chart: Option<ChartBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Option<ChartIndicators>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Option<Vec<QuoteIndicator>>,
}

/// Close series; the provider writes `null` for days without a close.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
}

impl ChartEnvelope {
    /// The first chart result, if the provider sent one.
    pub fn into_first_result(self) -> Option<ChartResult> {
        self.chart?.result?.into_iter().next()
    }
}

impl ChartResult {
    /// Pairs timestamps with closes, dropping indices whose close is missing.
    pub fn into_close_series(self) -> (Vec<i64>, Vec<f64>) {
        let timestamps = self.timestamp.unwrap_or_default();
        let closes = self
            .indicators
            .and_then(|indicators| indicators.quote)
            .and_then(|quotes| quotes.into_iter().next())
            .and_then(|quote| quote.close)
            .unwrap_or_default();

        timestamps
            .into_iter()
            .enumerate()
            .filter_map(|(i, ts)| closes.get(i).copied().flatten().map(|close| (ts, close)))
            .unzip()
    }
}
