use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// Bound after which expired windows get swept, so clients that never come
// back cannot grow the map forever.
const SWEEP_THRESHOLD: usize = 10_000;

/// Fixed-window submission counter, keyed by client identifier.
///
/// State is process-local. Handlers only see `check`, so a shared store could
/// replace the map without touching them.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    enabled: bool,
    windows: Mutex<HashMap<String, Window>>,
}

struct Window {
    started_at: Instant,
    count: u32,
}

#[derive(Debug, PartialEq)]
pub enum RateLimitDecision {
    Admitted,
    Rejected { retry_after: Duration },
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, enabled: bool) -> RateLimiter {
        RateLimiter {
            max_requests,
            window,
            enabled,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, client_id: &str) -> RateLimitDecision {
        self.check_at(client_id, Instant::now())
    }

    fn check_at(&self, client_id: &str, now: Instant) -> RateLimitDecision {
        if !self.enabled {
            return RateLimitDecision::Admitted;
        }

        // The count is read and bumped under one lock acquisition, so
        // concurrent requests from the same address never undercount.
        let mut windows = self.windows.lock().unwrap();

        if windows.len() > SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, entry| now.duration_since(entry.started_at) < window);
        }

        let entry = windows
            .entry(client_id.to_string())
            .or_insert_with(|| Window {
                started_at: now,
                count: 0,
            });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let elapsed = now.duration_since(entry.started_at);

            return RateLimitDecision::Rejected {
                retry_after: self.window - elapsed,
            };
        }

        entry.count += 1;

        RateLimitDecision::Admitted
    }
}
