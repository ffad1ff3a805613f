//! User handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    extractors::AppJson,
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::UserChanges,
    services::UserService,
    state::AppState,
};

use super::{
    request::{ChangePasswordRequest, UpdateProfileRequest},
    response::{MessageResponse, UserResponse},
};

/// Get own profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserResponse>> {
    let mut conn = state.db().acquire().await?;
    let user = UserService::get_user_by_id(&mut conn, auth_user.id).await?;

    Ok(Json(user.into()))
}

/// Update own profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let changes = UserChanges {
        username: payload.username.as_deref(),
        email: payload.email.as_deref(),
        full_name: payload.full_name.as_deref(),
        university: payload.university.as_deref(),
        study_info: payload.study_info.as_deref(),
        phone: payload.phone.as_deref(),
        project_role: payload.project_role.as_deref(),
        password_hash: None,
    };

    let mut tx = state.db().begin().await?;
    let user = UserService::update_profile(&mut tx, auth_user.id, changes).await?;
    tx.commit().await?;

    Ok(Json(user.into()))
}

/// Delete own account
pub async fn delete_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.db().begin().await?;
    UserService::delete_account(&mut tx, auth_user.id).await?;
    tx.commit().await?;

    Ok(Json(MessageResponse::new("Account deleted")))
}

/// Change own password
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    UserService::change_password(
        &mut tx,
        auth_user.id,
        &payload.old_password,
        &payload.new_password,
    )
    .await?;
    tx.commit().await?;

    Ok(Json(MessageResponse::new("Password changed")))
}
