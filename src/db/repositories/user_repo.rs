//! User repository

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{NewUser, SystemRole, User, UserChanges},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(conn: &mut PgConnection, user: &NewUser<'_>) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                username, email, password_hash, full_name, university,
                study_info, phone, role, project_role
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.full_name)
        .bind(user.university)
        .bind(user.study_info)
        .bind(user.phone)
        .bind(user.role.as_str())
        .bind(user.project_role)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(user)
    }

    /// Check whether a username or email is already taken
    pub async fn exists_with_username_or_email(
        conn: &mut PgConnection,
        username: &str,
        email: &str,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)"#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists)
    }

    /// Update profile fields; `None` keeps the current value
    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        changes: &UserChanges<'_>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                full_name = COALESCE($4, full_name),
                university = COALESCE($5, university),
                study_info = COALESCE($6, study_info),
                phone = COALESCE($7, phone),
                project_role = COALESCE($8, project_role),
                password_hash = COALESCE($9, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.full_name)
        .bind(changes.university)
        .bind(changes.study_info)
        .bind(changes.phone)
        .bind(changes.project_role)
        .bind(changes.password_hash)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Update user role
    pub async fn update_role(
        conn: &mut PgConnection,
        id: i64,
        role: SystemRole,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Delete a user; memberships, reviews and led teams cascade
    pub async fn delete(conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List users with pagination
    pub async fn list(
        conn: &mut PgConnection,
        offset: i64,
        limit: i64,
        search: Option<&str>,
        role: Option<&str>,
    ) -> AppResult<(Vec<User>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE
                ($1::text IS NULL OR username ILIKE $1 OR full_name ILIKE $1)
                AND ($2::text IS NULL OR role = $2)
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(&search_pattern)
        .bind(role)
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE
                ($1::text IS NULL OR username ILIKE $1 OR full_name ILIKE $1)
                AND ($2::text IS NULL OR role = $2)
            "#,
        )
        .bind(&search_pattern)
        .bind(role)
        .fetch_one(&mut *conn)
        .await?;

        Ok((users, count))
    }

    /// List every user holding a role
    pub async fn list_by_role(conn: &mut PgConnection, role: SystemRole) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE role = $1 ORDER BY id"#)
            .bind(role.as_str())
            .fetch_all(&mut *conn)
            .await?;

        Ok(users)
    }

    /// Fetch users by IDs, ordered by ID
    pub async fn find_many(conn: &mut PgConnection, ids: &[i64]) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE id = ANY($1) ORDER BY id"#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await?;

        Ok(users)
    }
}
