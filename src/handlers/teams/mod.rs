//! Team registry handlers

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

/// Team routes for participants
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_team))
        .route("/mine", get(handler::my_teams))
        .route("/{name}", get(handler::get_team).delete(handler::leave_team))
        .route("/{name}/members", post(handler::invite_member))
        .route(
            "/{name}/artifacts",
            get(handler::get_artifacts).put(handler::save_artifacts),
        )
}
