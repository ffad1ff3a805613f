//! User service

use sqlx::PgConnection;
use tracing::info;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{SystemRole, User, UserChanges},
    services::auth_service::{AuthService, Registration},
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user_by_id(conn: &mut PgConnection, id: i64) -> AppResult<User> {
        UserRepository::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Get user by username
    pub async fn get_user_by_username(conn: &mut PgConnection, username: &str) -> AppResult<User> {
        UserRepository::find_by_username(conn, username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// List users with pagination
    pub async fn list_users(
        conn: &mut PgConnection,
        page: u32,
        per_page: u32,
        search: Option<&str>,
        role: Option<SystemRole>,
    ) -> AppResult<(Vec<User>, i64)> {
        let offset = (page.saturating_sub(1) as i64) * per_page as i64;
        let limit = per_page as i64;

        UserRepository::list(conn, offset, limit, search, role.map(|r| r.as_str())).await
    }

    /// Update own profile; the password is changed only via `change_password`
    pub async fn update_profile(
        conn: &mut PgConnection,
        user_id: i64,
        changes: UserChanges<'_>,
    ) -> AppResult<User> {
        let changes = UserChanges {
            password_hash: None,
            ..changes
        };

        if let Some(username) = changes.username {
            if let Some(existing) = UserRepository::find_by_username(conn, username).await? {
                if existing.id != user_id {
                    return Err(AppError::AlreadyExists("Username already taken".to_string()));
                }
            }
        }

        UserRepository::update(conn, user_id, &changes).await
    }

    /// Change password after verifying the old one
    pub async fn change_password(
        conn: &mut PgConnection,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = Self::get_user_by_id(conn, user_id).await?;

        if !AuthService::verify_password(old_password, &user.password_hash)? {
            return Err(AppError::Validation("Old password is incorrect".to_string()));
        }

        let password_hash = AuthService::hash_password(new_password)?;
        UserRepository::update(
            conn,
            user_id,
            &UserChanges {
                password_hash: Some(&password_hash),
                ..Default::default()
            },
        )
        .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Delete own account
    pub async fn delete_account(conn: &mut PgConnection, user_id: i64) -> AppResult<()> {
        if !UserRepository::delete(conn, user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        info!(user_id, "Account deleted");
        Ok(())
    }

    /// Create an account on behalf of an admin or organizer
    pub async fn create_user_as(
        conn: &mut PgConnection,
        creator_role: SystemRole,
        registration: Registration<'_>,
        role: SystemRole,
    ) -> AppResult<User> {
        if !creator_role.can_create(role) {
            return Err(AppError::Forbidden(format!(
                "Role '{}' cannot create users with role '{}'",
                creator_role, role
            )));
        }

        AuthService::create_account(conn, registration, role).await
    }

    /// Delete another user by username
    pub async fn delete_user_by_username(
        conn: &mut PgConnection,
        requester_id: i64,
        username: &str,
    ) -> AppResult<()> {
        let user = Self::get_user_by_username(conn, username).await?;

        if user.id == requester_id {
            return Err(AppError::Validation(
                "Use the profile endpoint to delete your own account".to_string(),
            ));
        }

        UserRepository::delete(conn, user.id).await?;
        info!(user_id = user.id, username = %user.username, "User deleted by admin");
        Ok(())
    }

    pub async fn list_by_role(conn: &mut PgConnection, role: SystemRole) -> AppResult<Vec<User>> {
        UserRepository::list_by_role(conn, role).await
    }

    /// Give an existing user the jury or organizer role
    pub async fn promote(
        conn: &mut PgConnection,
        username: &str,
        role: SystemRole,
    ) -> AppResult<User> {
        if !matches!(role, SystemRole::Jury | SystemRole::Organizer) {
            return Err(AppError::Validation(format!("Cannot promote to role '{}'", role)));
        }

        let user = Self::get_user_by_username(conn, username).await?;

        if user.system_role() == Some(role) {
            return Err(AppError::Conflict(format!(
                "User '{}' already has role '{}'",
                user.username, role
            )));
        }
        if user.is_admin() {
            return Err(AppError::Forbidden("Cannot change the role of an admin".to_string()));
        }

        let user = UserRepository::update_role(conn, user.id, role).await?;
        info!(user_id = user.id, role = %role, "User promoted");
        Ok(user)
    }
}
