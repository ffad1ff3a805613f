//! Hackboard - Hackathon Administration Backend
//!
//! This library provides the HTTP API used to run a hackathon: participant
//! accounts and roles, teams and their submitted artifacts, the pool of
//! case assignments and the jury's scoring.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs
//! - **Storage**: Case document files

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_utils;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Room for multipart framing and the `data` part on top of the document
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the application router with all layers applied
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().storage.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        models::SystemRole,
        services::AuthService,
        test_utils::{lazy_state, test_config, test_user},
    };

    fn bearer(role: SystemRole) -> String {
        let config = test_config("postgres://unused", "redis://unused");
        let user = test_user(7, "tester", role);
        let (token, _) = AuthService::generate_access_token(&user, &config).unwrap();
        format!("Bearer {}", token)
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        let app = super::create_router(lazy_state());
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let request = Request::get("/api/v1/health").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let app = super::create_router(lazy_state());
        let request = Request::get("/api/v1/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        for uri in [
            "/api/v1/users/me",
            "/api/v1/teams/mine",
            "/api/v1/admin/cases",
            "/api/v1/jury/reviews/pending",
        ] {
            let request = Request::get(uri).body(Body::empty()).unwrap();
            assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        let request = Request::get("/api/v1/admin/cases")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_routes_reject_other_roles() {
        for role in [SystemRole::User, SystemRole::Jury, SystemRole::Organizer] {
            let request = Request::post("/api/v1/admin/assign-cases")
                .header(header::AUTHORIZATION, bearer(role))
                .body(Body::empty())
                .unwrap();
            assert_eq!(status_of(request).await, StatusCode::FORBIDDEN, "{role:?}");
        }
    }

    #[tokio::test]
    async fn test_jury_routes_reject_admin() {
        let request = Request::get("/api/v1/jury/reviews/done")
            .header(header::AUTHORIZATION, bearer(SystemRole::Admin))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::FORBIDDEN);
    }

    async fn review_rejection(body: &'static str) -> (StatusCode, serde_json::Value) {
        let app = super::create_router(lazy_state());
        let request = Request::post("/api/v1/jury/teams/alpha/review")
            .header(header::AUTHORIZATION, bearer(SystemRole::Jury))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_review_field_is_validation_error() {
        let (status, body) = review_rejection(
            r#"{"criterion_1":5,"criterion_2":5,"criterion_3":5,"criterion_4":5,"criterion_5":5,"score":50}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("score"));
    }

    #[tokio::test]
    async fn test_missing_or_mistyped_criterion_is_validation_error() {
        for payload in [
            r#"{"criterion_1":5,"criterion_2":5,"criterion_3":5,"criterion_4":5}"#,
            r#"{"criterion_1":5,"criterion_2":5,"criterion_3":"high","criterion_4":5,"criterion_5":5}"#,
            r#"{"criterion_1":5,"#,
        ] {
            let (status, body) = review_rejection(payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{payload}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::get("/api/v1/scoreboard").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }
}
