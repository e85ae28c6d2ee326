//! Rate Window
//!
//! Counter for one (client, route) pair within a fixed window.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    /// Requests accepted in the current window
    pub count: u32,
    /// Unix milliseconds after which the window is over
    pub reset_at: u64,
}

impl RateWindow {
    /// Opens a window at `now_ms` that already counts the opening request.
    pub fn open_at(now_ms: u64, length: Duration) -> Self {
        let length_ms = u64::try_from(length.as_millis()).unwrap_or(u64::MAX);
        Self {
            count: 1,
            reset_at: now_ms.saturating_add(length_ms),
        }
    }

    pub fn is_elapsed_at(&self, now_ms: u64) -> bool {
        now_ms > self.reset_at
    }
}
