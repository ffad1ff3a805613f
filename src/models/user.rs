//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::SystemRole;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub university: String,
    pub study_info: String,
    pub phone: String,
    pub role: String,
    pub project_role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Parsed system role, if the stored value is known
    pub fn system_role(&self) -> Option<SystemRole> {
        SystemRole::from_str(&self.role)
    }

    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.system_role() == Some(SystemRole::Admin)
    }

    /// Check if user sits on the jury
    pub fn is_jury(&self) -> bool {
        self.system_role() == Some(SystemRole::Jury)
    }
}

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub university: &'a str,
    pub study_info: &'a str,
    pub phone: &'a str,
    pub role: SystemRole,
    pub project_role: Option<&'a str>,
}

/// Profile fields a user may change; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub full_name: Option<&'a str>,
    pub university: Option<&'a str>,
    pub study_info: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub project_role: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}
