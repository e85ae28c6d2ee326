//! Stock Dashboard - caching proxy in front of market data providers
//!
//! Serves quotes, daily candles, news, company profiles and symbol search
//! to a browser dashboard, with per-client rate limiting and a bounded TTL
//! response cache.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod market;
pub mod models;
pub mod ratelimit;
pub mod sanitize;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use tasks::spawn_cleanup_task;
