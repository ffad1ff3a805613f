//! Admin management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route(
            "/users/{username}",
            get(handler::get_user).delete(handler::delete_user),
        )
        .route("/jury", get(handler::list_jury).post(handler::add_jury))
        .route(
            "/organizers",
            get(handler::list_organizers).post(handler::add_organizer),
        )
        // Case pool
        .route("/cases", get(handler::list_cases).post(handler::create_case))
        .route(
            "/cases/{id}",
            get(handler::get_case)
                .put(handler::update_case)
                .delete(handler::delete_case),
        )
        .route("/cases/files/{stored_name}", get(handler::download_case_file))
        .route("/assign-cases", post(handler::assign_cases))
        // Teams
        .route("/teams", get(handler::list_teams))
        .route("/teams/{name}", get(handler::get_team))
        .route(
            "/teams/{name}/members",
            get(handler::list_team_members).post(handler::add_team_member),
        )
        .route(
            "/teams/{name}/members/{username}",
            delete(handler::remove_team_member),
        )
}
