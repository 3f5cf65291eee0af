//! Per-client request rate limiting

use crate::config::RateLimitSettings;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Keyed limiter allowing `max_requests` per window for each client address.
///
/// The full allowance is available as a burst and refills evenly across the
/// window.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl RateLimit {
    /// Build a limiter from settings. Returns `None` when limiting is
    /// disabled or configured with a zero allowance.
    pub fn from_settings(settings: &RateLimitSettings) -> Option<Self> {
        if !settings.enabled {
            return None;
        }
        let burst = NonZeroU32::new(settings.max_requests)?;
        let window = Duration::from_secs(settings.window_secs.max(1));
        let quota = Quota::with_period(window / burst.get())?.allow_burst(burst);

        Some(Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        })
    }

    /// Record a request from `client`; false when over the limit
    pub fn check(&self, client: IpAddr) -> bool {
        self.limiter.check_key(&client).is_ok()
    }

    /// Drop state for clients whose allowance has fully refilled
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Middleware rejecting clients over their allowance with 429
pub async fn enforce(State(limit): State<RateLimit>, request: Request, next: Next) -> Response {
    // absent when served without connect info, e.g. in tests
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limit.check(client) {
        warn!("Rate limit exceeded for {}", client);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "success": false, "error": LIMIT_MESSAGE })),
        )
            .into_response();
    }

    next.run(request).await
}
