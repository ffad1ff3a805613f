//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod jury;
pub mod teams;
pub mod users;

use axum::{middleware, Router};

use crate::{
    middleware::{auth::auth_middleware, rate_limit::rate_limit_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/users", users::routes())
        .nest("/teams", teams::routes())
        .nest("/admin", admin::routes())
        .nest("/jury", jury::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .nest(
            "/auth",
            auth::routes(state.clone()).route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            )),
        )
        .merge(protected)
}
