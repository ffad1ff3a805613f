//! Own-profile handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handler::get_profile)
                .put(handler::update_profile)
                .delete(handler::delete_profile),
        )
        .route("/me/password", put(handler::change_password))
}
