//! Jury review aggregation

use std::collections::HashSet;

use sqlx::PgConnection;
use tracing::info;

use crate::{
    db::repositories::{ReviewRepository, TeamRepository},
    error::{AppError, AppResult},
    models::{ArtifactReview, Criteria, Team, TeamReviewRow},
};

/// Teams with artifacts, split by whether a given juror reviewed them
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReviewPartition<T> {
    pub pending: Vec<T>,
    pub reviewed: Vec<T>,
}

/// Split `teams` into pending and reviewed, preserving input order
pub fn partition_by_review<T, F>(teams: Vec<T>, reviewed_ids: &HashSet<i64>, id: F) -> ReviewPartition<T>
where
    F: Fn(&T) -> i64,
{
    let (reviewed, pending) = teams
        .into_iter()
        .partition(|team| reviewed_ids.contains(&id(team)));

    ReviewPartition { pending, reviewed }
}

pub struct ReviewService;

impl ReviewService {
    /// Record a juror's first review of a team
    pub async fn submit_review(
        conn: &mut PgConnection,
        jury_id: i64,
        team_id: i64,
        criteria: [i32; 5],
        comment: Option<&str>,
    ) -> AppResult<ArtifactReview> {
        let criteria = Criteria::new(criteria)?;

        Self::team_exists(conn, team_id).await?;

        if ReviewRepository::find(conn, jury_id, team_id).await?.is_some() {
            return Err(AppError::DuplicateReview);
        }

        // A concurrent insert is still caught by the unique constraint
        let review = ReviewRepository::insert(conn, jury_id, team_id, criteria, comment).await?;

        info!(jury_id, team_id, review_id = review.id, "Review submitted");
        Ok(review)
    }

    /// Overwrite a juror's existing review
    pub async fn update_review(
        conn: &mut PgConnection,
        jury_id: i64,
        team_id: i64,
        criteria: [i32; 5],
        comment: Option<&str>,
    ) -> AppResult<ArtifactReview> {
        let criteria = Criteria::new(criteria)?;

        Self::team_exists(conn, team_id).await?;

        let existing = ReviewRepository::find(conn, jury_id, team_id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;

        let review = ReviewRepository::update(conn, existing.id, criteria, comment).await?;

        info!(jury_id, team_id, review_id = review.id, "Review updated");
        Ok(review)
    }

    /// Pending and reviewed teams for one juror, from one read of the team set
    pub async fn partition_for_jury(
        conn: &mut PgConnection,
        jury_id: i64,
    ) -> AppResult<ReviewPartition<Team>> {
        let teams = TeamRepository::list_with_artifacts(conn).await?;
        let reviewed_ids: HashSet<i64> = ReviewRepository::reviewed_team_ids(conn, jury_id)
            .await?
            .into_iter()
            .collect();

        Ok(partition_by_review(teams, &reviewed_ids, |team| team.id))
    }

    /// Teams with artifacts not yet reviewed by this juror, ascending ID
    pub async fn list_pending(conn: &mut PgConnection, jury_id: i64) -> AppResult<Vec<Team>> {
        Ok(Self::partition_for_jury(conn, jury_id).await?.pending)
    }

    /// Teams with artifacts already reviewed by this juror, ascending ID
    pub async fn list_reviewed(conn: &mut PgConnection, jury_id: i64) -> AppResult<Vec<Team>> {
        Ok(Self::partition_for_jury(conn, jury_id).await?.reviewed)
    }

    /// Every review of a team, oldest first; no score is computed
    pub async fn team_reviews(conn: &mut PgConnection, team_id: i64) -> AppResult<Vec<TeamReviewRow>> {
        ReviewRepository::for_team(conn, team_id).await
    }

    async fn team_exists(conn: &mut PgConnection, team_id: i64) -> AppResult<()> {
        TeamRepository::find_by_id(conn, team_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let teams = vec![1_i64, 2, 3, 5, 8];
        let reviewed: HashSet<i64> = [2, 8, 42].into_iter().collect();

        let split = partition_by_review(teams.clone(), &reviewed, |id| *id);

        assert_eq!(split.pending, vec![1, 3, 5]);
        assert_eq!(split.reviewed, vec![2, 8]);

        let mut union: Vec<i64> = split.pending.iter().chain(&split.reviewed).copied().collect();
        union.sort_unstable();
        assert_eq!(union, teams);
    }

    #[test]
    fn test_partition_without_reviews() {
        let split = partition_by_review(vec![4_i64, 7], &HashSet::new(), |id| *id);
        assert_eq!(split.pending, vec![4, 7]);
        assert!(split.reviewed.is_empty());
    }

    #[test]
    fn test_partition_of_empty_set() {
        let split = partition_by_review(Vec::<i64>::new(), &HashSet::from([1]), |id| *id);
        assert_eq!(split, ReviewPartition::default());
    }
}
