// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sliding-window rate limiting keyed by actor identity.
//!
//! The limiter gates command execution before any persistence work
//! happens. It is a plain synchronous service; the server wraps it in
//! its shared state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::warn;

/// Default request budget inside one window.
pub const DEFAULT_MAX_REQUESTS: u32 = 30;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Rate limiting errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    /// The actor exhausted its request budget for the current window.
    #[error("Rate limit exceeded for '{key}'")]
    LimitExceeded {
        /// The actor key that was limited.
        key: String,
    },
}

/// Sliding-window request limiter.
///
/// Each key holds the timestamps of its requests inside the current
/// window; stamps older than the window are dropped on every check, so
/// the window slides rather than resetting in steps.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    requests: HashMap<String, Vec<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window`.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: HashMap::new(),
        }
    }

    /// Records a request for `key`, rejecting it if the budget for the
    /// current window is already spent.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` has made `max_requests` requests
    /// inside the window.
    pub fn check(&mut self, key: &str) -> Result<(), RateLimitError> {
        let now: Instant = Instant::now();
        self.check_at(key, now)
    }

    /// Clock-injected variant of [`Self::check`] used by tests.
    pub(crate) fn check_at(&mut self, key: &str, now: Instant) -> Result<(), RateLimitError> {
        // Drop keys whose entire history has aged out.
        let window: Duration = self.window;
        self.requests
            .retain(|_, stamps| stamps.iter().any(|stamp| now.duration_since(*stamp) < window));

        let stamps: &mut Vec<Instant> = self.requests.entry(key.to_string()).or_default();
        stamps.retain(|stamp| now.duration_since(*stamp) < window);

        if stamps.len() >= self.max_requests as usize {
            warn!(key, "Rate limit exceeded");
            return Err(RateLimitError::LimitExceeded {
                key: key.to_string(),
            });
        }

        stamps.push(now);
        Ok(())
    }
}
