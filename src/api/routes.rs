//! API Routes
//!
//! Configures the Axum router with the stock and operational endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::endpoints::{
    CandlesEndpoint, NewsEndpoint, ProfileEndpoint, QuoteEndpoint, SearchEndpoint,
};
use super::handlers::{
    candles_handler, health_handler, news_handler, profile_handler, quote_handler,
    search_handler, stats_handler,
};
use super::pipeline::Endpoint;
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /stock/quote?symbol=` - Latest quote plus market-open flag
/// - `GET /stock/candles?symbol=&range=` - Daily closes for 1M, 3M or 1Y
/// - `GET /stock/news?symbol=` - Up to 10 recent articles
/// - `GET /stock/profile?symbol=` - Company name and logo
/// - `GET /stock/search?q=` - U.S. common stock matches
/// - `GET /stats` - Cache and rate-limit statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(QuoteEndpoint::ROUTE, get(quote_handler))
        .route(CandlesEndpoint::ROUTE, get(candles_handler))
        .route(NewsEndpoint::ROUTE, get(news_handler))
        .route(ProfileEndpoint::ROUTE, get(profile_handler))
        .route(SearchEndpoint::ROUTE, get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
