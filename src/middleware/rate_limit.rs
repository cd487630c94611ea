/**
 * Fixed-Window Rate Limiting
 *
 * Per-source request counters for the credential endpoints (signup and
 * login). Each source gets a counter that resets when its window elapses;
 * requests past the cap inside a window are rejected with 429.
 *
 * The source key is the `x-forwarded-for` header when present (first hop),
 * otherwise the peer socket address.
 */
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::error::ApiError;
use crate::server::state::AppState;

/// Maximum attempts per window on the credential endpoints.
const AUTH_MAX_ATTEMPTS: u32 = 5;

/// Window length for the credential endpoints.
const AUTH_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug)]
struct WindowSlot {
    started: Instant,
    count: u32,
}

/// Fixed-window counter keyed by request source.
///
/// Windows are tracked per key and reset lazily on the first request after
/// expiry. The key is client-influenced (forwarded address), so expired
/// slots are swept at most once per window to keep the map bounded by the
/// live request sources instead of every source ever seen. State is
/// in-process only; counts do not survive a restart.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max: u32,
    window: Duration,
    hits: DashMap<String, WindowSlot>,
    last_sweep: Mutex<Instant>,
}

impl FixedWindowLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            hits: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Limiter for signup/login: 5 attempts per 15 minutes per source.
    pub fn auth_default() -> Self {
        Self::new(AUTH_MAX_ATTEMPTS, AUTH_WINDOW)
    }

    /// Record a hit for `key` and report whether it is within the limit.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        self.sweep_expired(now);

        let mut slot = self
            .hits
            .entry(key.to_string())
            .or_insert_with(|| WindowSlot { started: now, count: 0 });

        if now.duration_since(slot.started) >= self.window {
            slot.started = now;
            slot.count = 0;
        }

        slot.count += 1;
        slot.count <= self.max
    }

    /// Number of sources currently tracked.
    pub fn tracked_sources(&self) -> usize {
        self.hits.len()
    }

    /// Drop slots whose window has elapsed, at most once per window.
    /// Contended callers skip the sweep rather than wait.
    fn sweep_expired(&self, now: Instant) {
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if now.duration_since(*last_sweep) < self.window {
            return;
        }
        *last_sweep = now;
        drop(last_sweep);

        self.hits
            .retain(|_, slot| now.duration_since(slot.started) < self.window);
    }
}

/// Derive the limiter key for a request: first `x-forwarded-for` hop,
/// falling back to the peer address captured by `ConnectInfo`.
fn source_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rate-limit middleware for the signup/login routes.
pub async fn auth_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = source_key(&request);

    if !state.auth_limiter.check(&key) {
        tracing::warn!("Rate limit exceeded for {}", key);
        return Err(ApiError::RateLimited);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_allows_up_to_max() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("1.1.1.1"));
        assert!(!limiter.check("1.1.1.1"));
        assert!(limiter.check("2.2.2.2"));
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));

        thread::sleep(Duration::from_millis(30));
        assert!(limiter.check("1.2.3.4"));
    }

    #[test]
    fn test_expired_sources_are_evicted() {
        let limiter = FixedWindowLimiter::new(5, Duration::from_millis(20));
        limiter.check("1.1.1.1");
        limiter.check("2.2.2.2");
        assert_eq!(limiter.tracked_sources(), 2);

        // One request source after the window must not keep the stale
        // entries alive.
        thread::sleep(Duration::from_millis(30));
        limiter.check("3.3.3.3");
        assert_eq!(limiter.tracked_sources(), 1);
    }
}
