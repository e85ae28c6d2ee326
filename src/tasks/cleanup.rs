//! Expiry Sweep Task
//!
//! Background task that periodically drops expired cache entries and
//! finished rate-limit windows. Lazy expiry on access stays authoritative;
//! the sweep only reclaims memory for keys nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::ratelimit::RateLimiter;

/// Spawns a background task that purges both stores every `interval`.
///
/// Each store is locked separately and only for the duration of its purge.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore<Value>>>,
    limiter: Arc<RwLock<RateLimiter>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            "starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let expired_entries = cache.write().await.purge_expired();
            let expired_windows = limiter.write().await.purge_expired();

            if expired_entries + expired_windows > 0 {
                info!(
                    expired_entries,
                    expired_windows, "expiry sweep removed stale state"
                );
            } else {
                debug!("expiry sweep: nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::current_timestamp_ms;
    use serde_json::json;

    fn stores() -> (Arc<RwLock<CacheStore<Value>>>, Arc<RwLock<RateLimiter>>) {
        (
            Arc::new(RwLock::new(CacheStore::new(100))),
            Arc::new(RwLock::new(RateLimiter::new(
                30,
                Duration::from_secs(60),
                100,
            ))),
        )
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries_and_windows() {
        let (cache, limiter) = stores();
        let long_ago = current_timestamp_ms() - 10 * 60 * 1000;

        cache.write().await.set_at(
            "quote:OLD".to_string(),
            json!({ "c": 1.0 }),
            Duration::from_secs(60),
            long_ago,
        );
        limiter
            .write()
            .await
            .check_and_consume_at("1.2.3.4", "/stock/quote", long_ago);

        let handle = spawn_cleanup_task(cache.clone(), limiter.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        assert!(cache.read().await.is_empty());
        assert!(limiter.read().await.is_empty());
        assert_eq!(cache.read().await.stats().expirations, 1);
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_state() {
        let (cache, limiter) = stores();

        cache.write().await.set(
            "profile:AAPL".to_string(),
            json!({ "name": "Apple" }),
            Duration::from_secs(3600),
        );
        limiter.write().await.check_and_consume("1.2.3.4", "/stock/quote");

        let handle = spawn_cleanup_task(cache.clone(), limiter.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        assert_eq!(
            cache.write().await.get("profile:AAPL"),
            Some(json!({ "name": "Apple" }))
        );
        assert_eq!(limiter.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, limiter) = stores();

        let handle = spawn_cleanup_task(cache, limiter, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
