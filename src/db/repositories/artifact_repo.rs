//! Team artifact repository

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{ArtifactLinks, TeamArtifacts},
};

pub struct ArtifactRepository;

impl ArtifactRepository {
    pub async fn find(conn: &mut PgConnection, team_id: i64) -> AppResult<Option<TeamArtifacts>> {
        let artifacts = sqlx::query_as::<_, TeamArtifacts>(
            r#"SELECT * FROM team_artifacts WHERE team_id = $1"#,
        )
        .bind(team_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(artifacts)
    }

    /// Create the record on first write, otherwise replace every link
    pub async fn upsert(
        conn: &mut PgConnection,
        team_id: i64,
        links: &ArtifactLinks<'_>,
    ) -> AppResult<TeamArtifacts> {
        let artifacts = sqlx::query_as::<_, TeamArtifacts>(
            r#"
            INSERT INTO team_artifacts (
                team_id, github_url, figma_url, hosting_url, presentation_url, extra_links
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (team_id) DO UPDATE SET
                github_url = EXCLUDED.github_url,
                figma_url = EXCLUDED.figma_url,
                hosting_url = EXCLUDED.hosting_url,
                presentation_url = EXCLUDED.presentation_url,
                extra_links = EXCLUDED.extra_links,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(links.github_url)
        .bind(links.figma_url)
        .bind(links.hosting_url)
        .bind(links.presentation_url)
        .bind(links.extra_links)
        .fetch_one(&mut *conn)
        .await?;

        Ok(artifacts)
    }
}
