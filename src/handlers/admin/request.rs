//! Admin request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        MAX_CASE_DESCRIPTION_LENGTH, MAX_CASE_TITLE_LENGTH, MAX_PASSWORD_LENGTH,
        MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
    },
    models::SystemRole,
    services::auth_service::Registration,
    utils::validation::{validate_not_blank, validate_phone, validate_username},
};

/// Create an account with an explicit role
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
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

    pub role: SystemRole,
}

impl CreateUserRequest {
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

/// Reference to an existing user by username
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UsernameRequest {
    #[validate(length(min = 1))]
    pub username: String,
}

/// `data` part of a case creation form
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCaseData {
    #[validate(
        length(min = 1, max = MAX_CASE_TITLE_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = MAX_CASE_DESCRIPTION_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub description: String,
}

/// `data` part of a case update form; every field is optional
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCaseData {
    #[validate(
        length(min = 1, max = MAX_CASE_TITLE_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = MAX_CASE_DESCRIPTION_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub description: Option<String>,
}
