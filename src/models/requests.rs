//! Request-side types for the stock endpoints
//!
//! Query parameters arrive as a flat string map; these helpers turn them
//! into validated values.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Raw query string parameters.
pub type QueryParams = HashMap<String, String>;

static SYMBOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,10}$").expect("symbol pattern is valid"));

static SEARCH_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 .\-&]").expect("search pattern is valid"));

/// Returns the named parameter, or `""` when it is absent.
pub fn param<'a>(query: &'a QueryParams, name: &str) -> &'a str {
    query.get(name).map(String::as_str).unwrap_or("")
}

/// Ticker symbols are 1–10 uppercase ASCII letters. No case folding.
pub fn is_valid_symbol(symbol: &str) -> bool {
    SYMBOL_PATTERN.is_match(symbol)
}

/// Strips everything outside `[A-Za-z0-9 .-&]` and trims the result.
pub fn sanitize_search_query(raw: &str) -> String {
    SEARCH_DISALLOWED.replace_all(raw, "").trim().to_string()
}

// == Chart Range ==
/// Historical window offered by the candles endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
}

impl ChartRange {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartRange::OneMonth => "1M",
            ChartRange::ThreeMonths => "3M",
            ChartRange::OneYear => "1Y",
        }
    }
}

impl FromStr for ChartRange {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "1M" => Ok(ChartRange::OneMonth),
            "3M" => Ok(ChartRange::ThreeMonths),
            "1Y" => Ok(ChartRange::OneYear),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
