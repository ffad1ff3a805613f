//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    handlers::{teams::response::TeamDetailResponse, users::response::UserResponse},
    models::HackathonCase,
    services::assignment_service::AssignmentSummary,
};

/// Case as shown to admins
#[derive(Debug, Serialize)]
pub struct CaseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub stored_filename: String,
    pub original_filename: String,
    /// Relative download URL of the case document
    pub download_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HackathonCase> for CaseResponse {
    fn from(case: HackathonCase) -> Self {
        Self {
            download_url: format!("/api/v1/admin/cases/files/{}", case.stored_filename),
            id: case.id,
            title: case.title,
            description: case.description,
            stored_filename: case.stored_filename,
            original_filename: case.original_filename,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CasesListResponse {
    pub cases: Vec<CaseResponse>,
}

/// Case create/update result
#[derive(Debug, Serialize)]
pub struct CaseMutationResponse {
    pub message: String,
    pub case: CaseResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Case deletion result
#[derive(Debug, Serialize)]
pub struct CaseDeletedResponse {
    pub message: String,
    /// Teams left without a case until assignment runs again
    pub unassigned_teams: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Result of an assignment run
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: AssignmentSummary,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct TeamsListResponse {
    pub teams: Vec<TeamDetailResponse>,
}
