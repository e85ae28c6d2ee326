//! Response DTOs for the stock dashboard API
//!
//! Every type here is a narrowed view of a provider payload: only the fields
//! the browser needs survive, under the names it expects.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::ratelimit::RateLimitStats;
use crate::sanitize::sanitize_url;
use crate::upstream::types::{NewsArticleRaw, ProfileRaw, QuoteRaw, SymbolSearchRaw};

/// Most articles returned by the news endpoint
pub const MAX_ARTICLES: usize = 10;
/// Most matches returned by the search endpoint
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Market identifier codes of U.S. exchanges.
pub const US_MIC_CODES: &[&str] = &[
    "XNAS",  // NASDAQ
    "XNYS",  // NYSE
    "XASE",  // NYSE American
    "XARCA", // NYSE Arca
    "BATS",  // Cboe BZX
    "EDGA",  // Cboe EDGA
    "EDGX",  // Cboe EDGX
    "IEXG",  // IEX
    "XCIS",  // NYSE National
    "XBOS",  // Nasdaq BX
    "XPHL",  // Nasdaq PHLX
    "MEMX",  // Members Exchange
    "LTSE",  // Long-Term Stock Exchange
];

const COMMON_STOCK: &str = "Common Stock";

static US_TICKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,5}$").expect("ticker pattern is valid"));

// == Quote ==
/// Response body for `GET /stock/quote`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Current price
    pub c: f64,
    /// Change
    pub d: Option<f64>,
    /// Percent change
    pub dp: Option<f64>,
    /// High of the day
    pub h: f64,
    /// Low of the day
    pub l: f64,
    /// Open
    pub o: f64,
    /// Previous close
    pub pc: f64,
    /// Last update (Unix seconds)
    pub t: i64,
    #[serde(rename = "isMarketOpen")]
    pub is_market_open: bool,
}

impl QuoteResponse {
    pub fn from_raw(raw: QuoteRaw, is_market_open: bool) -> Self {
        Self {
            c: raw.c,
            d: raw.d,
            dp: raw.dp,
            h: raw.h,
            l: raw.l,
            o: raw.o,
            pc: raw.pc,
            t: raw.t,
            is_market_open,
        }
    }
}

// == Candles ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleStatus {
    Ok,
    NoData,
}

/// Response body for `GET /stock/candles`; `t` and `c` always have equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlesResponse {
    pub t: Vec<i64>,
    pub c: Vec<f64>,
    pub s: CandleStatus,
}

impl CandlesResponse {
    pub fn ok(t: Vec<i64>, c: Vec<f64>) -> Self {
        Self {
            t,
            c,
            s: CandleStatus::Ok,
        }
    }

    pub fn no_data() -> Self {
        Self {
            t: Vec::new(),
            c: Vec::new(),
            s: CandleStatus::NoData,
        }
    }
}

// == News ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub datetime: i64,
    pub headline: String,
    pub source: String,
    pub summary: String,
    pub url: String,
    pub image: String,
}

impl NewsArticle {
    /// Drops the article when its link is unsafe; an unsafe image becomes `""`.
    pub fn from_raw(raw: NewsArticleRaw) -> Option<Self> {
        let url = sanitize_url(&raw.url)?.to_string();
        let image = sanitize_url(&raw.image).unwrap_or_default().to_string();

        Some(Self {
            id: raw.id,
            datetime: raw.datetime,
            headline: raw.headline,
            source: raw.source,
            summary: raw.summary,
            url,
            image,
        })
    }
}

/// Response body for `GET /stock/news`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
}

impl NewsResponse {
    pub fn from_raw(raw: Vec<NewsArticleRaw>) -> Self {
        Self {
            articles: raw
                .into_iter()
                .filter_map(NewsArticle::from_raw)
                .take(MAX_ARTICLES)
                .collect(),
        }
    }
}

// == Profile ==
/// Response body for `GET /stock/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub logo: String,
    pub name: String,
}

impl ProfileResponse {
    pub fn from_raw(raw: ProfileRaw) -> Self {
        let logo = raw
            .logo
            .as_deref()
            .and_then(sanitize_url)
            .unwrap_or_default()
            .to_string();

        Self {
            logo,
            name: raw.name.unwrap_or_default(),
        }
    }
}

// == Search ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: String,
    #[serde(rename = "displaySymbol")]
    pub display_symbol: String,
    pub description: String,
}

/// Response body for `GET /stock/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Keeps U.S.-listed common stock, at most [`MAX_SEARCH_RESULTS`].
    ///
    /// Listings with a MIC must be on a U.S. exchange; listings without one
    /// fall back to the plain 1–5 letter ticker shape.
    pub fn from_raw(raw: SymbolSearchRaw) -> Self {
        let results = raw
            .result
            .into_iter()
            .filter(|candidate| {
                if candidate.kind != COMMON_STOCK {
                    return false;
                }
                match candidate.mic.as_deref() {
                    Some(mic) if !mic.is_empty() => US_MIC_CODES.contains(&mic),
                    _ => US_TICKER_PATTERN.is_match(&candidate.symbol),
                }
            })
            .take(MAX_SEARCH_RESULTS)
            .map(|candidate| SearchResult {
                symbol: candidate.symbol,
                display_symbol: candidate.display_symbol,
                description: candidate.description,
            })
            .collect();

        Self { results }
    }
}

// == Operational ==
/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStatsBody,
    pub rate_limit: RateLimitStats,
}

impl StatsResponse {
    pub fn new(cache: CacheStats, rate_limit: RateLimitStats) -> Self {
        Self {
            cache: CacheStatsBody {
                hit_rate: cache.hit_rate(),
                hits: cache.hits,
                misses: cache.misses,
                evictions: cache.evictions,
                expirations: cache.expirations,
                total_entries: cache.total_entries,
            },
            rate_limit,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
