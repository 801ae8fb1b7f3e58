// crates/sl-geodb-core/src/rate_limit.rs

//! Per-client sliding-window admission control.
//!
//! Each client keeps the instants of its admitted calls inside the trailing
//! window. Denied calls are not recorded, so a client that keeps retrying
//! regains access as soon as its oldest admitted call expires.

use crate::error::{GeoError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::warn;

/// Admission budget: at most `max_requests` per trailing `window_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub max_requests: usize,
    pub window_ms: u64,
}

impl RateLimit {
    pub const fn per_minute(max_requests: usize) -> Self {
        RateLimit {
            max_requests,
            window_ms: 60_000,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Per-client sliding-window limiter.
///
/// Each client id gets its own list of admitted request instants, created on
/// first use. Instants that have left the window are dropped on every check.
/// A denied request is not recorded, so it does not use up a slot.
///
/// Independent limiters never share state; the search engine keeps one per
/// operation class.
#[derive(Debug)]
pub struct RateLimiter {
    limit: RateLimit,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        RateLimiter {
            limit,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Admit or deny a request from `client_id` arriving now.
    pub fn allow(&self, client_id: &str) -> bool {
        self.allow_at(client_id, Instant::now())
    }

    /// Admit or deny a request from `client_id` arriving at `now`.
    pub fn allow_at(&self, client_id: &str, now: Instant) -> bool {
        let window = self.limit.window();
        let mut windows = self.windows.lock();
        let stamps = windows.entry(client_id.to_owned()).or_default();

        stamps.retain(|t| now.saturating_duration_since(*t) < window);

        if stamps.len() < self.limit.max_requests {
            stamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// Like [`RateLimiter::allow`], mapping denial to [`GeoError::RateLimit`].
    pub fn check(&self, client_id: &str) -> Result<()> {
        self.check_at(client_id, Instant::now())
    }

    pub fn check_at(&self, client_id: &str, now: Instant) -> Result<()> {
        if self.allow_at(client_id, now) {
            return Ok(());
        }
        warn!(
            client_id,
            max_requests = self.limit.max_requests,
            window_ms = self.limit.window_ms,
            "rate limit exceeded"
        );
        Err(GeoError::RateLimit {
            client_id: client_id.to_owned(),
            max_requests: self.limit.max_requests,
            window_ms: self.limit.window_ms,
        })
    }

    /// Requests `client_id` may still make at `now` without being denied.
    pub fn remaining_at(&self, client_id: &str, now: Instant) -> usize {
        let window = self.limit.window();
        let windows = self.windows.lock();
        let used = windows.get(client_id).map_or(0, |stamps| {
            stamps
                .iter()
                .filter(|t| now.saturating_duration_since(**t) < window)
                .count()
        });
        self.limit.max_requests.saturating_sub(used)
    }

    /// Number of client ids seen so far.
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().len()
    }

    /// Forget the history of one client.
    pub fn reset(&self, client_id: &str) {
        self.windows.lock().remove(client_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: usize, window_ms: u64) -> RateLimiter {
        RateLimiter::new(RateLimit {
            max_requests: max,
            window_ms,
        })
    }

    #[test]
    fn first_n_allowed_then_denied() {
        let rl = limiter(3, 1_000);
        let t0 = Instant::now();
        assert!(rl.allow_at("a", t0));
        assert!(rl.allow_at("a", t0 + Duration::from_millis(1)));
        assert!(rl.allow_at("a", t0 + Duration::from_millis(2)));
        assert!(!rl.allow_at("a", t0 + Duration::from_millis(3)));
        assert_eq!(rl.remaining_at("a", t0 + Duration::from_millis(3)), 0);
    }

    #[test]
    fn window_slides() {
        let rl = limiter(2, 1_000);
        let t0 = Instant::now();
        assert!(rl.allow_at("a", t0));
        assert!(rl.allow_at("a", t0 + Duration::from_millis(500)));
        assert!(!rl.allow_at("a", t0 + Duration::from_millis(900)));
        // the first request has left the window
        assert!(rl.allow_at("a", t0 + Duration::from_millis(1_000)));
        assert!(!rl.allow_at("a", t0 + Duration::from_millis(1_200)));
        assert!(rl.allow_at("a", t0 + Duration::from_millis(1_600)));
    }

    #[test]
    fn denied_calls_do_not_consume_slots() {
        let rl = limiter(1, 1_000);
        let t0 = Instant::now();
        assert!(rl.allow_at("a", t0));
        for ms in [100, 200, 300, 999] {
            assert!(!rl.allow_at("a", t0 + Duration::from_millis(ms)));
        }
        assert!(rl.allow_at("a", t0 + Duration::from_millis(1_000)));
    }

    #[test]
    fn clients_are_independent() {
        let rl = limiter(1, 60_000);
        let t0 = Instant::now();
        assert!(rl.allow_at("a", t0));
        assert!(rl.allow_at("b", t0));
        assert!(!rl.allow_at("a", t0));
        assert_eq!(rl.tracked_clients(), 2);

        rl.reset("a");
        assert!(rl.allow_at("a", t0));
    }

    #[test]
    fn check_maps_denial_to_error() {
        let rl = limiter(0, 1_000);
        let err = rl.check("a").unwrap_err();
        assert!(err.is_rate_limit());
    }
}
