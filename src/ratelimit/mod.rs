//! Rate Limiting Module
//!
//! Per-(client, route) fixed-window limiter sharing the cache's bounded
//! FIFO key store.

mod client;
mod limiter;
mod window;


pub use client::{client_id_from_headers, UNKNOWN_CLIENT};
pub use limiter::{RateLimitStats, RateLimiter};
pub use window::RateWindow;

// == Public Constants ==
/// Requests allowed per key and window
pub const DEFAULT_MAX_REQUESTS: u32 = 30;
/// Window length in seconds
pub const DEFAULT_WINDOW_SECS: u64 = 60;
/// Distinct client/route keys tracked at once
pub const DEFAULT_MAX_KEYS: usize = 10_000;
