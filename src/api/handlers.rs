//! API Handlers
//!
//! Thin axum adapters: extract state, the client id and the query string,
//! then hand off to the pipeline.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;

use super::endpoints::{
    CandlesEndpoint, NewsEndpoint, ProfileEndpoint, QuoteEndpoint, SearchEndpoint,
};
use super::pipeline::run;
use super::AppState;
use crate::error::Result;
use crate::models::{HealthResponse, QueryParams, StatsResponse};
use crate::ratelimit::client_id_from_headers;

/// Handler for GET /stock/quote
pub async fn quote_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> Result<Json<Value>> {
    run(state, QuoteEndpoint, &client_id_from_headers(&headers), &query).await
}

/// Handler for GET /stock/candles
pub async fn candles_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> Result<Json<Value>> {
    run(state, CandlesEndpoint, &client_id_from_headers(&headers), &query).await
}

/// Handler for GET /stock/news
pub async fn news_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> Result<Json<Value>> {
    run(state, NewsEndpoint, &client_id_from_headers(&headers), &query).await
}

/// Handler for GET /stock/profile
pub async fn profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> Result<Json<Value>> {
    run(state, ProfileEndpoint, &client_id_from_headers(&headers), &query).await
}

/// Handler for GET /stock/search
pub async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> Result<Json<Value>> {
    run(state, SearchEndpoint, &client_id_from_headers(&headers), &query).await
}

/// Handler for GET /stats
///
/// Cache and rate-limit counters; not rate-limited.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await.stats();
    let rate_limit = state.limiter.read().await.stats();

    Json(StatsResponse::new(cache, rate_limit))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
