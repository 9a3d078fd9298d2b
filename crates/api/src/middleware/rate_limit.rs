//! Fixed-window per-IP rate limiting.
//!
//! In-process counters keyed by `(budget, ip)`; a window starts on the first
//! request and resets after its duration elapses. Three budgets cover the
//! public surface, the auth endpoints, and the contact/booking submissions.
//! State lives behind one mutex; every acquire evicts entries whose window
//! has elapsed, so one-shot clients (or a spoofed `X-Forwarded-For` stream)
//! cannot grow the map without bound.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

/// One named rate budget.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    pub scope: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

/// General API traffic.
pub const PUBLIC_BUDGET: Budget = Budget {
    scope: "public",
    max_requests: 1000,
    window: Duration::from_secs(15 * 60),
};

/// Login/refresh attempts.
pub const AUTH_BUDGET: Budget = Budget {
    scope: "auth",
    max_requests: 10,
    window: Duration::from_secs(15 * 60),
};

/// Contact-form and booking submissions.
pub const CONTACT_BUDGET: Budget = Budget {
    scope: "contact",
    max_requests: 10,
    window: Duration::from_secs(60 * 60),
};

struct FixedWindow {
    started_at: Instant,
    window: Duration,
    count: u32,
}

impl FixedWindow {
    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.started_at) >= self.window
    }
}

/// Per-IP fixed-window counters shared across all budgets.
#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<(&'static str, String), FixedWindow>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request against `budget` for `ip`; `false` when the budget
    /// is exhausted for the current window.
    pub fn try_acquire(&self, budget: &Budget, ip: &str) -> bool {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let now = Instant::now();
        windows.retain(|_, entry| !entry.expired(now));

        let entry = windows
            .entry((budget.scope, ip.to_string()))
            .or_insert(FixedWindow {
                started_at: now,
                window: budget.window,
                count: 0,
            });

        if entry.count >= budget.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        match self.windows.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

/// Best-effort client address: `X-Forwarded-For` (first hop) when present,
/// otherwise the socket peer address.
pub fn client_ip(req: &Request) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn enforce(budget: &Budget, state: &AppState, req: &Request) -> Result<(), AppError> {
    let ip = client_ip(req);
    if !state.rate_limiter.try_acquire(budget, &ip) {
        tracing::warn!(scope = budget.scope, %ip, "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }
    Ok(())
}

pub async fn public_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&PUBLIC_BUDGET, &state, &req)?;
    Ok(next.run(req).await)
}

pub async fn auth_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&AUTH_BUDGET, &state, &req)?;
    Ok(next.run(req).await)
}

pub async fn contact_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    enforce(&CONTACT_BUDGET, &state, &req)?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_exhausts_and_blocks() {
        let limiter = RateLimiter::new();
        let budget = Budget {
            scope: "test",
            max_requests: 3,
            window: Duration::from_secs(60),
        };

        for _ in 0..3 {
            assert!(limiter.try_acquire(&budget, "1.2.3.4"));
        }
        assert!(!limiter.try_acquire(&budget, "1.2.3.4"));

        // Other clients are unaffected.
        assert!(limiter.try_acquire(&budget, "5.6.7.8"));
    }

    #[test]
    fn window_resets_after_duration() {
        let limiter = RateLimiter::new();
        let budget = Budget {
            scope: "test",
            max_requests: 1,
            window: Duration::from_millis(10),
        };

        assert!(limiter.try_acquire(&budget, "1.2.3.4"));
        assert!(!limiter.try_acquire(&budget, "1.2.3.4"));

        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.try_acquire(&budget, "1.2.3.4"));
    }

    #[test]
    fn expired_entries_are_evicted() {
        let limiter = RateLimiter::new();
        let budget = Budget {
            scope: "test",
            max_requests: 5,
            window: Duration::from_millis(10),
        };

        for i in 0..50 {
            assert!(limiter.try_acquire(&budget, &format!("10.0.0.{i}")));
        }
        assert_eq!(limiter.tracked_clients(), 50);

        std::thread::sleep(Duration::from_millis(15));

        // The next acquire sweeps every expired one-shot client.
        assert!(limiter.try_acquire(&budget, "10.0.1.1"));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn budgets_are_independent() {
        let limiter = RateLimiter::new();
        let a = Budget {
            scope: "a",
            max_requests: 1,
            window: Duration::from_secs(60),
        };
        let b = Budget {
            scope: "b",
            max_requests: 1,
            window: Duration::from_secs(60),
        };

        assert!(limiter.try_acquire(&a, "1.2.3.4"));
        assert!(!limiter.try_acquire(&a, "1.2.3.4"));
        assert!(limiter.try_acquire(&b, "1.2.3.4"));
    }
}
