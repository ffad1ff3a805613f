//! Artifact review repository

use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::{ArtifactReview, Criteria, TeamReviewRow},
};

/// Repository for jury review operations
pub struct ReviewRepository;

impl ReviewRepository {
    pub async fn find(
        conn: &mut PgConnection,
        jury_id: i64,
        team_id: i64,
    ) -> AppResult<Option<ArtifactReview>> {
        let review = sqlx::query_as::<_, ArtifactReview>(
            r#"SELECT * FROM artifact_reviews WHERE jury_id = $1 AND team_id = $2"#,
        )
        .bind(jury_id)
        .bind(team_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(review)
    }

    /// Insert a review; a second review by the same juror is `DuplicateReview`
    pub async fn insert(
        conn: &mut PgConnection,
        jury_id: i64,
        team_id: i64,
        criteria: Criteria,
        comment: Option<&str>,
    ) -> AppResult<ArtifactReview> {
        let [c1, c2, c3, c4, c5] = criteria.values();

        sqlx::query_as::<_, ArtifactReview>(
            r#"
            INSERT INTO artifact_reviews (
                jury_id, team_id, criterion_1, criterion_2, criterion_3,
                criterion_4, criterion_5, comment
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(jury_id)
        .bind(team_id)
        .bind(c1)
        .bind(c2)
        .bind(c3)
        .bind(c4)
        .bind(c5)
        .bind(comment)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateReview
            }
            other => other.into(),
        })
    }

    /// Overwrite the scores; a `None` comment keeps the stored one
    pub async fn update(
        conn: &mut PgConnection,
        review_id: i64,
        criteria: Criteria,
        comment: Option<&str>,
    ) -> AppResult<ArtifactReview> {
        let [c1, c2, c3, c4, c5] = criteria.values();

        let review = sqlx::query_as::<_, ArtifactReview>(
            r#"
            UPDATE artifact_reviews
            SET
                criterion_1 = $2,
                criterion_2 = $3,
                criterion_3 = $4,
                criterion_4 = $5,
                criterion_5 = $6,
                comment = COALESCE($7, comment),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(review_id)
        .bind(c1)
        .bind(c2)
        .bind(c3)
        .bind(c4)
        .bind(c5)
        .bind(comment)
        .fetch_one(&mut *conn)
        .await?;

        Ok(review)
    }

    /// IDs of teams this juror has already reviewed
    pub async fn reviewed_team_ids(conn: &mut PgConnection, jury_id: i64) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"SELECT team_id FROM artifact_reviews WHERE jury_id = $1 ORDER BY team_id"#,
        )
        .bind(jury_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(ids)
    }

    /// Every review of a team with the reviewer's username, oldest first
    pub async fn for_team(conn: &mut PgConnection, team_id: i64) -> AppResult<Vec<TeamReviewRow>> {
        let rows = sqlx::query_as::<_, TeamReviewRow>(
            r#"
            SELECT
                r.id, r.jury_id, u.username AS jury_username,
                r.criterion_1, r.criterion_2, r.criterion_3, r.criterion_4, r.criterion_5,
                r.comment
            FROM artifact_reviews r
            INNER JOIN users u ON u.id = r.jury_id
            WHERE r.team_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(team_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }
}
