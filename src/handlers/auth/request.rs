//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH},
    models::SystemRole,
    services::auth_service::Registration,
    utils::validation::{validate_not_blank, validate_phone, validate_username},
};

/// User registration request; also used by admins creating accounts
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(
        length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub university: String,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub study_info: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(max = 100))]
    pub project_role: Option<String>,
}

impl RegisterRequest {
    pub fn registration(&self) -> Registration<'_> {
        Registration {
            username: &self.username,
            email: &self.email,
            password: &self.password,
            full_name: self.full_name.trim(),
            university: self.university.trim(),
            study_info: self.study_info.trim(),
            phone: &self.phone,
            project_role: self.project_role.as_deref(),
        }
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// When set, login only succeeds for accounts holding this role
    pub role: Option<SystemRole>,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoutRequest {
    /// Refresh token of the session to end
    pub refresh_token: Option<String>,
    /// Invalidate all sessions if true
    pub all_sessions: Option<bool>,
}
