//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::User;

/// Full profile of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub university: String,
    pub study_info: String,
    pub phone: String,
    pub role: String,
    pub project_role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            university: user.university,
            study_info: user.study_info,
            phone: user.phone,
            role: user.role,
            project_role: user.project_role,
            created_at: user.created_at,
        }
    }
}

/// Paginated user list
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
