//! Rate Limiter
//!
//! Sliding one-second window kept per client IP.

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

// == Rate Limiter ==
/// Admits at most `max_requests` requests per client in any trailing window.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<ClientWindows>>,
    /// Maximum requests per client per window, 0 = unlimited
    max_requests: u32,
    /// Window duration
    window: Duration,
}

#[derive(Debug)]
struct ClientWindows {
    /// Admission instants per client, oldest first
    admitted: HashMap<IpAddr, VecDeque<Instant>>,
    /// Last time idle clients were dropped
    last_sweep: Instant,
}

impl RateLimiter {
    /// Creates a limiter admitting `max_requests_per_second` per client
    /// (0 disables it).
    pub fn new(max_requests_per_second: u32) -> Self {
        Self {
            windows: Arc::new(Mutex::new(ClientWindows {
                admitted: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            max_requests: max_requests_per_second,
            window: Duration::from_secs(1),
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }

    /// Records a request from `client` and reports whether it may proceed.
    pub async fn try_acquire(&self, client: IpAddr) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        if now.duration_since(windows.last_sweep) >= self.window {
            let window = self.window;
            windows.admitted.retain(|_, admitted| {
                admitted
                    .back()
                    .is_some_and(|&at| now.duration_since(at) < window)
            });
            windows.last_sweep = now;
        }

        let admitted = windows.admitted.entry(client).or_default();
        while admitted
            .front()
            .is_some_and(|&at| now.duration_since(at) >= self.window)
        {
            admitted.pop_front();
        }

        if admitted.len() >= self.max_requests as usize {
            return false;
        }
        admitted.push_back(now);
        true
    }

    /// Number of clients currently holding a window.
    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.admitted.len()
    }
}

// == Middleware ==
/// Rejects requests over their client's limit with `429 Too Many Requests`
/// before they reach a handler.
///
/// The client is the peer IP recorded by axum's connect info; requests served
/// without it share one budget.
pub async fn limit_requests(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let client = match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => addr.ip(),
        None => {
            debug!("no peer address on request, using shared rate limit bucket");
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        }
    };

    if limiter.try_acquire(client).await {
        next.run(request).await
    } else {
        warn!(%client, uri = %request.uri(), "rate limit exceeded");
        (StatusCode::TOO_MANY_REQUESTS, "rate limit exceeded").into_response()
    }
}
