//! Admin handler implementations

use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    extractors::AppJson,
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    handlers::{
        teams::{
            request::InviteMemberRequest,
            response::{MemberAddedResponse, TeamDetailResponse, TeamRosterResponse},
        },
        users::{
            request::ListUsersQuery,
            response::{MessageResponse, UserResponse, UsersListResponse},
        },
    },
    middleware::auth::AuthenticatedUser,
    models::SystemRole,
    services::{
        case_service::{CaseChanges, Upload},
        AssignmentService, CaseService, TeamService, UserService,
    },
    state::AppState,
};

use super::{
    request::{CreateCaseData, CreateUserRequest, UpdateCaseData, UsernameRequest},
    response::{
        AssignmentResponse, CaseDeletedResponse, CaseMutationResponse, CaseResponse,
        CasesListResponse, TeamsListResponse, UserListResponse,
    },
};

// ----------------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------------

/// List users, optionally filtered by role or search term
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UsersListResponse>> {
    auth_user.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let mut conn = state.db().acquire().await?;
    let (users, total) = UserService::list_users(
        &mut conn,
        page,
        per_page,
        query.search.as_deref(),
        query.role,
    )
    .await?;

    Ok(Json(UsersListResponse {
        users: users.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page,
    }))
}

/// Create an account with a role the caller may grant
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let creator_role = auth_user.require_role(&[SystemRole::Admin, SystemRole::Organizer])?;
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let user =
        UserService::create_user_as(&mut tx, creator_role, payload.registration(), payload.role)
            .await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let user = UserService::get_user_by_username(&mut conn, &username).await?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    auth_user.require_admin()?;

    let mut tx = state.db().begin().await?;
    UserService::delete_user_by_username(&mut tx, auth_user.id, &username).await?;
    tx.commit().await?;

    Ok(Json(MessageResponse::new(format!("User '{}' deleted", username))))
}

async fn list_role(
    state: &AppState,
    auth_user: &AuthenticatedUser,
    role: SystemRole,
) -> AppResult<Json<UserListResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let users = UserService::list_by_role(&mut conn, role).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

async fn promote(
    state: &AppState,
    auth_user: &AuthenticatedUser,
    payload: UsernameRequest,
    role: SystemRole,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let user = UserService::promote(&mut tx, &payload.username, role).await?;
    tx.commit().await?;

    Ok(Json(user.into()))
}

pub async fn list_jury(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserListResponse>> {
    list_role(&state, &auth_user, SystemRole::Jury).await
}

/// Promote an existing user to jury
pub async fn add_jury(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<UsernameRequest>,
) -> AppResult<Json<UserResponse>> {
    promote(&state, &auth_user, payload, SystemRole::Jury).await
}

pub async fn list_organizers(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserListResponse>> {
    list_role(&state, &auth_user, SystemRole::Organizer).await
}

/// Promote an existing user to organizer
pub async fn add_organizer(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<UsernameRequest>,
) -> AppResult<Json<UserResponse>> {
    promote(&state, &auth_user, payload, SystemRole::Organizer).await
}

// ----------------------------------------------------------------------------
// Cases
// ----------------------------------------------------------------------------

/// Parsed `multipart/form-data` case form
struct CaseForm<T> {
    data: Option<T>,
    upload: Option<Upload>,
}

/// Read the `data` JSON part and the `file` part of a case form
async fn read_case_form<T: DeserializeOwned>(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> AppResult<CaseForm<T>> {
    let mut data = None;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("data") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read 'data': {e}")))?;
                let parsed = serde_json::from_str::<T>(&text)
                    .map_err(|e| AppError::Validation(format!("Invalid JSON in 'data': {e}")))?;
                data = Some(parsed);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
                let contents = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                if contents.len() > max_file_bytes {
                    return Err(AppError::Validation(format!(
                        "File exceeds the {} byte upload limit",
                        max_file_bytes
                    )));
                }
                upload = Some(Upload {
                    filename,
                    contents: contents.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(CaseForm { data, upload })
}

pub async fn list_cases(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<CasesListResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let cases = CaseService::list(&mut conn).await?;

    Ok(Json(CasesListResponse {
        cases: cases.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<CaseResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let case = CaseService::get(&mut conn, id).await?;

    Ok(Json(case.into()))
}

/// Create a case from a multipart form with `data` and `file` parts
pub async fn create_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<CaseMutationResponse>)> {
    auth_user.require_admin()?;

    let max_bytes = state.config().storage.max_upload_bytes();
    let form = read_case_form::<CreateCaseData>(multipart, max_bytes).await?;
    let data = form
        .data
        .ok_or_else(|| AppError::Validation("Field 'data' (JSON string) is required".into()))?;
    data.validate()?;

    let mut tx = state.db().begin().await?;
    let case = CaseService::create(
        &mut tx,
        state.documents(),
        data.title.trim(),
        data.description.trim(),
        form.upload,
    )
    .await?;

    if let Err(err) = tx.commit().await {
        CaseService::discard_document(state.documents(), &case.stored_filename).await;
        return Err(err.into());
    }

    Ok((
        StatusCode::CREATED,
        Json(CaseMutationResponse {
            message: "Case created".to_string(),
            case: case.into(),
            warning: None,
        }),
    ))
}

/// Update a case; a new `file` part replaces the stored document
pub async fn update_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<CaseMutationResponse>> {
    auth_user.require_admin()?;

    let max_bytes = state.config().storage.max_upload_bytes();
    let form = read_case_form::<UpdateCaseData>(multipart, max_bytes).await?;
    let data = form.data.unwrap_or_default();
    data.validate()?;

    let mut tx = state.db().begin().await?;
    let update = CaseService::update(
        &mut tx,
        state.documents(),
        id,
        CaseChanges {
            title: data.title.as_deref().map(str::trim),
            description: data.description.as_deref().map(str::trim),
        },
        form.upload,
    )
    .await?;

    if let Err(err) = tx.commit().await {
        if update.replaced_document.is_some() {
            CaseService::discard_document(state.documents(), &update.case.stored_filename).await;
        }
        return Err(err.into());
    }

    let warning = match &update.replaced_document {
        Some(old) => CaseService::discard_document(state.documents(), old).await,
        None => None,
    };

    Ok(Json(CaseMutationResponse {
        message: "Case updated".to_string(),
        case: update.case.into(),
        warning,
    }))
}

/// Delete a case; a failure to remove its document is only a warning
pub async fn delete_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<CaseDeletedResponse>> {
    auth_user.require_admin()?;

    let mut tx = state.db().begin().await?;
    let deletion = CaseService::delete(&mut tx, id).await?;
    tx.commit().await?;

    let warning =
        CaseService::discard_document(state.documents(), &deletion.case.stored_filename).await;

    Ok(Json(CaseDeletedResponse {
        message: "Case deleted".to_string(),
        unassigned_teams: deletion.unassigned_teams,
        warning,
    }))
}

/// Download a case document under its original filename
pub async fn download_case_file(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(stored_name): Path<String>,
) -> AppResult<Response> {
    let mut conn = state.db().acquire().await?;
    let (case, contents) = CaseService::download(&mut conn, state.documents(), &stored_name).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&case.stored_filename))
        .header(header::CONTENT_LENGTH, contents.len().to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&case.original_filename),
        )
        .body(Body::from(contents))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {e}")))
}

fn content_type_for(stored_filename: &str) -> &'static str {
    if stored_filename.ends_with(".pdf") {
        "application/pdf"
    } else if stored_filename.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else {
        "application/octet-stream"
    }
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 `filename*`
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|&c| (c.is_ascii_graphic() || c == ' ') && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_safe = ascii_safe.trim();
    let ascii_name = if ascii_safe.is_empty() {
        "download"
    } else {
        ascii_safe
    };

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect();

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}

/// Distribute cases evenly over all teams, replacing previous assignments
pub async fn assign_cases(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<AssignmentResponse>> {
    auth_user.require_admin()?;

    let mut tx = state.db().begin().await?;
    let summary = AssignmentService::assign_cases_evenly(&mut tx).await?;
    tx.commit().await?;

    Ok(Json(AssignmentResponse {
        message: "Cases assigned".to_string(),
        summary,
    }))
}

// ----------------------------------------------------------------------------
// Teams
// ----------------------------------------------------------------------------

pub async fn list_teams(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<TeamsListResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let details = TeamService::list_details(&mut conn).await?;

    Ok(Json(TeamsListResponse {
        teams: details.into_iter().map(Into::into).collect(),
    }))
}

/// Team with lead, members, case, artifacts and raw reviews
pub async fn get_team(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<TeamDetailResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let detail = TeamService::detail(&mut conn, &name).await?;

    Ok(Json(detail.into()))
}

pub async fn list_team_members(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<TeamRosterResponse>> {
    auth_user.require_admin()?;

    let mut conn = state.db().acquire().await?;
    let roster = TeamService::roster(&mut conn, &name).await?;

    Ok(Json(roster.into()))
}

pub async fn add_team_member(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(name): Path<String>,
    AppJson(payload): AppJson<InviteMemberRequest>,
) -> AppResult<(StatusCode, Json<MemberAddedResponse>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let mut tx = state.db().begin().await?;
    let member = TeamService::admin_add_member(&mut tx, &name, &payload.username).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberAddedResponse {
            message: format!("User '{}' added to team '{}'", member.username, name),
            member: member.into(),
        }),
    ))
}

pub async fn remove_team_member(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((name, username)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    auth_user.require_admin()?;

    let mut tx = state.db().begin().await?;
    TeamService::admin_remove_member(&mut tx, &name, &username).await?;
    tx.commit().await?;

    Ok(Json(MessageResponse::new(format!(
        "User '{}' removed from team '{}'",
        username, name
    ))))
}
