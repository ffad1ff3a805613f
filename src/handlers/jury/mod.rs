//! Jury review handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Jury routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams/{name}/artifacts", get(handler::team_artifacts))
        .route(
            "/teams/{name}/review",
            post(handler::submit_review).put(handler::update_review),
        )
        .route("/reviews/pending", get(handler::pending_reviews))
        .route("/reviews/done", get(handler::completed_reviews))
}
