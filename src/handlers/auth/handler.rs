//! Authentication handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    extractors::AppJson,
    error::AppResult,
    handlers::users::response::{MessageResponse, UserResponse},
    middleware::auth::AuthenticatedUser,
    services::{AuthService, UserService},
    state::AppState,
};

use super::{
    request::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest},
    response::{AuthResponse, RefreshResponse, RegisterResponse},
};

/// Register a new participant
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let user = AuthService::register(&mut tx, payload.registration()).await?;
    tx.commit().await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with username and password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let mut conn = state.db().acquire().await?;
    let mut redis = state.redis().await?;

    let (user, tokens) = AuthService::login(
        &mut conn,
        &mut redis,
        state.config(),
        &payload.username,
        &payload.password,
        payload.role,
    )
    .await?;

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
        user: user.into(),
    }))
}

/// Refresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let mut conn = state.db().acquire().await?;
    let mut redis = state.redis().await?;

    let tokens =
        AuthService::refresh_token(&mut conn, &mut redis, state.config(), &payload.refresh_token)
            .await?;

    Ok(Json(RefreshResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
    }))
}

/// Logout (invalidate refresh tokens)
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    payload: Option<AppJson<LogoutRequest>>,
) -> AppResult<Json<MessageResponse>> {
    let payload = payload.map(|AppJson(p)| p).unwrap_or_default();

    let mut redis = state.redis().await?;
    AuthService::logout(
        &mut redis,
        auth_user.id,
        payload.refresh_token.as_deref(),
        payload.all_sessions.unwrap_or(false),
    )
    .await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let mut conn = state.db().acquire().await?;
    let user = UserService::get_user_by_id(&mut conn, auth_user.id).await?;

    Ok(Json(user.into()))
}
