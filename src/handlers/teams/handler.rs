//! Team handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    extractors::AppJson,
    error::AppResult,
    handlers::users::response::MessageResponse,
    middleware::auth::AuthenticatedUser,
    services::{team_service::LeaveOutcome, TeamService},
    state::AppState,
};

use super::{
    request::{CreateTeamRequest, InviteMemberRequest, SaveArtifactsRequest},
    response::{
        ArtifactsResponse, MemberAddedResponse, MyTeamResponse, MyTeamsResponse, TeamResponse,
        TeamRosterResponse,
    },
};

/// Create a team led by the caller
pub async fn create_team(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateTeamRequest>,
) -> AppResult<(StatusCode, Json<TeamResponse>)> {
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let team = TeamService::create_team(
        &mut tx,
        auth_user.id,
        payload.name.trim(),
        payload.description.as_deref(),
    )
    .await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Teams the caller leads or belongs to
pub async fn my_teams(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MyTeamsResponse>> {
    let mut conn = state.db().acquire().await?;
    let teams = TeamService::my_teams(&mut conn, auth_user.id).await?;

    Ok(Json(MyTeamsResponse {
        teams: teams
            .into_iter()
            .map(|(team, case)| MyTeamResponse {
                team: team.into(),
                case: case.map(Into::into),
            })
            .collect(),
    }))
}

/// Team with its lead and members
pub async fn get_team(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<TeamRosterResponse>> {
    let mut conn = state.db().acquire().await?;
    let roster = TeamService::roster(&mut conn, &name).await?;

    Ok(Json(roster.into()))
}

/// Lead adds a member
pub async fn invite_member(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
    AppJson(payload): AppJson<InviteMemberRequest>,
) -> AppResult<(StatusCode, Json<MemberAddedResponse>)> {
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let member = TeamService::invite(&mut tx, auth_user.id, &name, &payload.username).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberAddedResponse {
            message: format!("User '{}' added to team '{}'", member.username, name),
            member: member.into(),
        }),
    ))
}

/// Leave a team, or dissolve it when the caller is the lead
pub async fn leave_team(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.db().begin().await?;
    let outcome = TeamService::leave(&mut tx, auth_user.id, &name).await?;
    tx.commit().await?;

    let message = match outcome {
        LeaveOutcome::Left => format!("You left team '{}'", name),
        LeaveOutcome::Dissolved => format!("You were the team lead; team '{}' was deleted", name),
    };

    Ok(Json(MessageResponse::new(message)))
}

pub async fn get_artifacts(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<ArtifactsResponse>> {
    let mut conn = state.db().acquire().await?;
    let artifacts = TeamService::get_artifacts(&mut conn, &name).await?;

    Ok(Json(artifacts.into()))
}

/// Create or replace the team's artifacts (lead only)
pub async fn save_artifacts(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
    AppJson(payload): AppJson<SaveArtifactsRequest>,
) -> AppResult<Json<ArtifactsResponse>> {
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let artifacts =
        TeamService::save_artifacts(&mut tx, auth_user.id, &name, &payload.links()).await?;
    tx.commit().await?;

    Ok(Json(artifacts.into()))
}
