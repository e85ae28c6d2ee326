//! Rate Limiter
//!
//! Fixed-window request counter keyed by `client:route`.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::cache::FifoMap;
use crate::clock::current_timestamp_ms;
use crate::ratelimit::RateWindow;

// == Rate Limit Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct RateLimitStats {
    /// Requests let through
    pub allowed: u64,
    /// Requests turned away
    pub rejected: u64,
    /// Distinct client/route keys currently tracked
    pub tracked_keys: usize,
}

// == Rate Limiter ==
/// Fixed-window limiter with a bounded, FIFO-evicted key space.
#[derive(Debug)]
pub struct RateLimiter {
    windows: FifoMap<RateWindow>,
    max_requests: u32,
    window: Duration,
    stats: RateLimitStats,
}

impl RateLimiter {
    // == Constructor ==
    /// Allows `max_requests` per `window` for each of at most `max_keys` keys.
    pub fn new(max_requests: u32, window: Duration, max_keys: usize) -> Self {
        Self {
            windows: FifoMap::with_capacity(max_keys),
            max_requests,
            window,
            stats: RateLimitStats::default(),
        }
    }

    // == Check And Consume ==
    /// Records a request for `client_id` on `route` and reports whether it is allowed.
    pub fn check_and_consume(&mut self, client_id: &str, route: &str) -> bool {
        self.check_and_consume_at(client_id, route, current_timestamp_ms())
    }

    pub fn check_and_consume_at(&mut self, client_id: &str, route: &str, now_ms: u64) -> bool {
        let key = format!("{client_id}:{route}");

        let allowed = match self.windows.get_mut(&key) {
            Some(window) if !window.is_elapsed_at(now_ms) => {
                if window.count >= self.max_requests {
                    false
                } else {
                    window.count += 1;
                    true
                }
            }
            // Restarting a window keeps the key's eviction slot.
            Some(window) => {
                *window = RateWindow::open_at(now_ms, self.window);
                true
            }
            None => {
                let window = RateWindow::open_at(now_ms, self.window);
                if let Some(evicted) = self.windows.insert(key, window) {
                    debug!(
                        key = %evicted,
                        capacity = self.windows.capacity(),
                        "rate-limit key space full, evicted oldest window"
                    );
                }
                true
            }
        };

        if allowed {
            self.stats.allowed += 1;
        } else {
            self.stats.rejected += 1;
        }
        allowed
    }

    // == Purge Expired ==
    /// Drops windows that have already run out; returns how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(current_timestamp_ms())
    }

    pub fn purge_expired_at(&mut self, now_ms: u64) -> usize {
        self.windows.retain(|_, window| !window.is_elapsed_at(now_ms))
    }

    pub fn stats(&self) -> RateLimitStats {
        RateLimitStats {
            tracked_keys: self.windows.len(),
            ..self.stats.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    fn limiter() -> RateLimiter {
        RateLimiter::new(30, WINDOW, 10_000)
    }

    #[test]
    fn test_first_thirty_requests_allowed() {
        let mut limiter = limiter();
        for i in 0..30 {
            assert!(
                limiter.check_and_consume_at("10.0.1.1", "/stock/quote", 1_000),
                "request {} should be allowed",
                i + 1
            );
        }
    }

    #[test]
    fn test_thirty_first_request_denied() {
        let mut limiter = limiter();
        for _ in 0..30 {
            limiter.check_and_consume_at("10.0.2.1", "/stock/quote", 1_000);
        }

        assert!(!limiter.check_and_consume_at("10.0.2.1", "/stock/quote", 1_000));
        assert!(!limiter.check_and_consume_at("10.0.2.1", "/stock/quote", 61_000));

        let stats = limiter.stats();
        assert_eq!(stats.allowed, 30);
        assert_eq!(stats.rejected, 2);
    }

    #[test]
    fn test_routes_are_independent() {
        let mut limiter = limiter();
        for _ in 0..30 {
            limiter.check_and_consume_at("10.0.4.1", "/stock/quote", 0);
        }

        assert!(!limiter.check_and_consume_at("10.0.4.1", "/stock/quote", 0));
        assert!(limiter.check_and_consume_at("10.0.4.1", "/stock/search", 0));
    }

    #[test]
    fn test_clients_are_independent() {
        let mut limiter = limiter();
        for _ in 0..30 {
            limiter.check_and_consume_at("1.2.3.4", "/stock/news", 0);
        }

        assert!(!limiter.check_and_consume_at("1.2.3.4", "/stock/news", 0));
        assert!(limiter.check_and_consume_at("5.6.7.8", "/stock/news", 0));
    }

    #[test]
    fn test_window_resets_after_reset_at() {
        let mut limiter = limiter();
        for _ in 0..30 {
            limiter.check_and_consume_at("10.0.3.1", "/stock/candles", 0);
        }
        assert!(!limiter.check_and_consume_at("10.0.3.1", "/stock/candles", 60_000));

        // First request past reset_at opens a fresh window counting itself.
        assert!(limiter.check_and_consume_at("10.0.3.1", "/stock/candles", 60_001));
        for _ in 0..29 {
            assert!(limiter.check_and_consume_at("10.0.3.1", "/stock/candles", 60_002));
        }
        assert!(!limiter.check_and_consume_at("10.0.3.1", "/stock/candles", 60_003));
    }

    #[test]
    fn test_key_space_is_bounded() {
        let mut limiter = RateLimiter::new(1, WINDOW, 3);

        for client in ["a", "b", "c"] {
            assert!(limiter.check_and_consume_at(client, "/r", 0));
        }
        assert!(!limiter.check_and_consume_at("a", "/r", 0));

        // A fourth client pushes out the oldest key ("a:/r").
        assert!(limiter.check_and_consume_at("d", "/r", 0));
        assert_eq!(limiter.len(), 3);

        // "a" comes back with a fresh window.
        assert!(limiter.check_and_consume_at("a", "/r", 0));
        assert!(!limiter.check_and_consume_at("c", "/r", 0));
    }

    #[test]
    fn test_purge_expired_windows() {
        let mut limiter = limiter();
        limiter.check_and_consume_at("old", "/r", 0);
        limiter.check_and_consume_at("new", "/r", 50_000);

        assert_eq!(limiter.purge_expired_at(70_000), 1);
        assert_eq!(limiter.len(), 1);
        assert_eq!(limiter.stats().tracked_keys, 1);
    }
}
