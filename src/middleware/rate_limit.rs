//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP. Applied to the
//! authentication routes only.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use tracing::warn;

use crate::{constants::rate_limits, error::AppError, state::AppState};

/// Rate limit middleware for authentication endpoints
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let key = format!("rate_limit:auth:{}", ip);

    match hit(&state, &key).await {
        Ok(count) if count > rate_limits::AUTH_MAX_REQUESTS => {
            warn!(ip = %ip, count, "Rate limit exceeded");
            return Err(AppError::TooManyRequests);
        }
        Ok(_) => {}
        // Counting is best effort; an unavailable Redis does not block logins
        Err(e) => warn!(error = %e, "Rate limiter unavailable"),
    }

    Ok(next.run(request).await)
}

/// Increment the window counter, starting the window on the first hit
async fn hit(state: &AppState, key: &str) -> Result<i64, AppError> {
    let mut redis = state.redis().await?;

    let count: i64 = redis.incr(key, 1).await?;
    if count == 1 {
        redis
            .expire::<_, ()>(key, rate_limits::AUTH_WINDOW_SECS)
            .await?;
    }

    Ok(count)
}
