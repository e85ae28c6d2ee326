//! Request and Response models for the stock dashboard API
//!
//! This module defines the query validation helpers and the DTOs
//! serialized into HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    is_valid_symbol, param, sanitize_search_query, ChartRange, QueryParams,
};
pub use responses::{
    CandleStatus, CandlesResponse, ErrorResponse, HealthResponse, NewsArticle, NewsResponse,
    ProfileResponse, QuoteResponse, SearchResponse, SearchResult, StatsResponse,
};
