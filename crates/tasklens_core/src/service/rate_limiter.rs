//! Sliding-window request limiter.
//!
//! # Invariants
//! - A key never has more than `max_requests` recorded requests inside any
//!   window ending at the evaluation instant.
//! - Denied checks are not recorded.
//! - Keys without requests inside the window are not retained.

use crate::config::RateLimitConfig;
use std::collections::HashMap;

/// Outcome of one [`RateLimiter::check`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Epoch ms at which capacity frees up again.
    pub reset_at_ms: i64,
    pub remaining: usize,
}

/// Per-key sliding-window limiter. Owned by the host; wrap in a `Mutex` to
/// share across threads.
#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
    requests: HashMap<String, Vec<i64>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            requests: HashMap::new(),
        }
    }

    /// Records a request for `key` at `now_ms` when capacity allows.
    pub fn check(&mut self, key: &str, now_ms: i64) -> RateDecision {
        let window = self.config.window_ms;
        let max_requests = self.config.max_requests;
        self.requests.retain(|_, timestamps| {
            timestamps.retain(|at| now_ms - at < window);
            !timestamps.is_empty()
        });

        let used = self.requests.get(key).map_or(0, Vec::len);
        if used >= max_requests {
            let oldest = self
                .requests
                .get(key)
                .and_then(|timestamps| timestamps.iter().copied().min())
                .unwrap_or(now_ms);
            return RateDecision {
                allowed: false,
                reset_at_ms: oldest + window,
                remaining: 0,
            };
        }

        let timestamps = self.requests.entry(key.to_string()).or_default();
        timestamps.push(now_ms);
        RateDecision {
            allowed: true,
            reset_at_ms: now_ms + window,
            remaining: max_requests - timestamps.len(),
        }
    }

    /// Remaining capacity for `key` at `now_ms`, without recording.
    pub fn remaining(&self, key: &str, now_ms: i64) -> usize {
        let used = self.requests.get(key).map_or(0, |timestamps| {
            timestamps
                .iter()
                .filter(|at| now_ms - **at < self.config.window_ms)
                .count()
        });
        self.config.max_requests.saturating_sub(used)
    }
}

#[cfg(test)]
mod tests {
    use super::RateLimiter;
    use crate::config::RateLimitConfig;

    #[test]
    fn denies_after_max_and_recovers_after_window() {
        let mut limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window_ms: 1_000,
        });

        assert!(limiter.check("user", 0).allowed);
        let second = limiter.check("user", 100);
        assert!(second.allowed);
        assert_eq!(second.remaining, 0);

        let denied = limiter.check("user", 200);
        assert!(!denied.allowed);
        assert_eq!(denied.reset_at_ms, 1_000);

        assert_eq!(limiter.remaining("user", 1_050), 1);
        assert!(limiter.check("user", 1_050).allowed);
    }

    #[test]
    fn keys_are_independent() {
        let mut limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window_ms: 1_000,
        });
        assert!(limiter.check("a", 0).allowed);
        assert!(limiter.check("b", 0).allowed);
        assert!(!limiter.check("a", 1).allowed);
        assert_eq!(limiter.remaining("c", 1), 1);
    }

    #[test]
    fn expired_keys_are_dropped() {
        let mut limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window_ms: 1_000,
        });
        limiter.check("a", 0);
        limiter.check("b", 100);
        assert_eq!(limiter.requests.len(), 2);

        limiter.check("c", 1_050);
        assert_eq!(limiter.requests.len(), 2);
        assert!(!limiter.requests.contains_key("a"));

        let mut closed = RateLimiter::new(RateLimitConfig {
            max_requests: 0,
            window_ms: 1_000,
        });
        assert!(!closed.check("a", 0).allowed);
        assert!(closed.requests.is_empty());
    }
}
