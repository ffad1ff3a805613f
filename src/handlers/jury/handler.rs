//! Jury handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    extractors::AppJson,
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{ReviewService, TeamService},
    state::AppState,
};

use super::{
    request::ReviewRequest,
    response::{JuryTeamResponse, ReviewQueueResponse, ReviewResponse},
};

/// Open a team's submission
pub async fn team_artifacts(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<JuryTeamResponse>> {
    auth_user.require_jury()?;

    let mut conn = state.db().acquire().await?;
    let view = TeamService::jury_view(&mut conn, &name).await?;

    Ok(Json(view.into()))
}

/// Score a team for the first time
pub async fn submit_review(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
    AppJson(payload): AppJson<ReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    auth_user.require_jury()?;
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let team = TeamService::get_team(&mut tx, &name).await?;
    let review = ReviewService::submit_review(
        &mut tx,
        auth_user.id,
        team.id,
        payload.scores(),
        payload.comment.as_deref(),
    )
    .await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(review.into())))
}

/// Replace the caller's scores for a team; an omitted comment is kept
pub async fn update_review(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
    AppJson(payload): AppJson<ReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    auth_user.require_jury()?;
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let team = TeamService::get_team(&mut tx, &name).await?;
    let review = ReviewService::update_review(
        &mut tx,
        auth_user.id,
        team.id,
        payload.scores(),
        payload.comment.as_deref(),
    )
    .await?;
    tx.commit().await?;

    Ok(Json(review.into()))
}

/// Teams with artifacts the caller has not reviewed yet
pub async fn pending_reviews(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ReviewQueueResponse>> {
    auth_user.require_jury()?;

    let mut conn = state.db().acquire().await?;
    let teams = ReviewService::list_pending(&mut conn, auth_user.id).await?;

    Ok(Json(ReviewQueueResponse {
        teams: teams.into_iter().map(Into::into).collect(),
    }))
}

/// Teams with artifacts the caller has already reviewed
pub async fn completed_reviews(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ReviewQueueResponse>> {
    auth_user.require_jury()?;

    let mut conn = state.db().acquire().await?;
    let teams = ReviewService::list_reviewed(&mut conn, auth_user.id).await?;

    Ok(Json(ReviewQueueResponse {
        teams: teams.into_iter().map(Into::into).collect(),
    }))
}
