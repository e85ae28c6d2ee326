//! API Module
//!
//! HTTP handlers, the shared request pipeline and routing for the stock
//! dashboard REST API.
//!
//! # Endpoints
//! - `GET /stock/quote` - Quote with market-open flag
//! - `GET /stock/candles` - Daily close series
//! - `GET /stock/news` - Recent company news
//! - `GET /stock/profile` - Company name and logo
//! - `GET /stock/search` - Symbol search
//! - `GET /stats` - Cache and rate-limit statistics
//! - `GET /health` - Health check endpoint

pub mod endpoints;
pub mod handlers;
pub mod pipeline;
pub mod routes;
mod state;
#[cfg(test)]
mod testing;

pub use endpoints::{
    CandlesEndpoint, CandlesParams, NewsEndpoint, ProfileEndpoint, QuoteEndpoint, SearchEndpoint,
};
pub use handlers::*;
pub use pipeline::{run, Endpoint, Validated};
pub use routes::create_router;
pub use state::AppState;
