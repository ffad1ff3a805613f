//! Hackathon case repository

use sqlx::PgConnection;

use crate::{error::AppResult, models::HackathonCase};

/// Repository for case database operations
pub struct CaseRepository;

impl CaseRepository {
    pub async fn create(
        conn: &mut PgConnection,
        title: &str,
        description: &str,
        stored_filename: &str,
        original_filename: &str,
    ) -> AppResult<HackathonCase> {
        let case = sqlx::query_as::<_, HackathonCase>(
            r#"
            INSERT INTO hackathon_cases (title, description, stored_filename, original_filename)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(stored_filename)
        .bind(original_filename)
        .fetch_one(&mut *conn)
        .await?;

        Ok(case)
    }

    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> AppResult<Option<HackathonCase>> {
        let case = sqlx::query_as::<_, HackathonCase>(r#"SELECT * FROM hackathon_cases WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(case)
    }

    pub async fn find_by_stored_filename(
        conn: &mut PgConnection,
        stored_filename: &str,
    ) -> AppResult<Option<HackathonCase>> {
        let case = sqlx::query_as::<_, HackathonCase>(
            r#"SELECT * FROM hackathon_cases WHERE stored_filename = $1"#,
        )
        .bind(stored_filename)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(case)
    }

    /// All cases in ascending ID order
    pub async fn list(conn: &mut PgConnection) -> AppResult<Vec<HackathonCase>> {
        let cases = sqlx::query_as::<_, HackathonCase>(r#"SELECT * FROM hackathon_cases ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;

        Ok(cases)
    }

    /// IDs of all cases in ascending order
    pub async fn list_ids(conn: &mut PgConnection) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(r#"SELECT id FROM hackathon_cases ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;

        Ok(ids)
    }

    /// Update text fields and optionally swap the stored document
    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
        document: Option<(&str, &str)>,
    ) -> AppResult<HackathonCase> {
        let (stored, original) = match document {
            Some((stored, original)) => (Some(stored), Some(original)),
            None => (None, None),
        };

        let case = sqlx::query_as::<_, HackathonCase>(
            r#"
            UPDATE hackathon_cases
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                stored_filename = COALESCE($4, stored_filename),
                original_filename = COALESCE($5, original_filename),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(stored)
        .bind(original)
        .fetch_one(&mut *conn)
        .await?;

        Ok(case)
    }

    /// Delete a case; its team assignments cascade
    pub async fn delete(conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM hackathon_cases WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
