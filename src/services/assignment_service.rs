//! Case assignment engine
//!
//! Cases are spread over teams round-robin: with teams and cases both sorted
//! by ascending ID, team `i` receives case `i mod case_count`. Every run
//! replaces all previous assignments, so the result depends only on the
//! current set of teams and cases.

use std::collections::BTreeSet;

use serde::Serialize;
use sqlx::PgConnection;
use tracing::info;

use crate::{
    constants::CASE_ASSIGNMENT_LOCK_KEY,
    db::repositories::{CaseRepository, TeamRepository},
    error::{AppError, AppResult},
    models::TeamCase,
};

/// Outcome of an assignment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentSummary {
    pub teams_assigned: usize,
    pub cases_used: usize,
    pub assignments: Vec<TeamCase>,
}

/// Compute the round-robin plan without touching storage.
///
/// Both slices must already be in ascending order.
pub fn plan_assignments(team_ids: &[i64], case_ids: &[i64]) -> AppResult<Vec<TeamCase>> {
    if case_ids.is_empty() {
        return Err(AppError::NoCasesAvailable);
    }
    if team_ids.is_empty() {
        return Err(AppError::NoTeamsAvailable);
    }

    Ok(team_ids
        .iter()
        .enumerate()
        .map(|(i, &team_id)| TeamCase {
            team_id,
            case_id: case_ids[i % case_ids.len()],
        })
        .collect())
}

pub struct AssignmentService;

impl AssignmentService {
    /// Replace every team's case with a fresh even distribution.
    ///
    /// Must run inside a transaction; the advisory lock is released on commit
    /// or rollback, so concurrent callers are applied one after another.
    pub async fn assign_cases_evenly(conn: &mut PgConnection) -> AppResult<AssignmentSummary> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(CASE_ASSIGNMENT_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        let case_ids = CaseRepository::list_ids(conn).await?;
        let team_ids = TeamRepository::list_ids(conn).await?;

        let plan = plan_assignments(&team_ids, &case_ids)?;

        let cleared = TeamRepository::clear_assignments(conn).await?;
        for assignment in &plan {
            TeamRepository::insert_assignment(conn, *assignment).await?;
        }

        let summary = summarize(plan);
        info!(
            teams_assigned = summary.teams_assigned,
            cases_used = summary.cases_used,
            previous_assignments = cleared,
            "Cases assigned"
        );

        Ok(summary)
    }
}

fn summarize(assignments: Vec<TeamCase>) -> AssignmentSummary {
    let cases_used = assignments
        .iter()
        .map(|a| a.case_id)
        .collect::<BTreeSet<_>>()
        .len();

    AssignmentSummary {
        teams_assigned: assignments.len(),
        cases_used,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn counts(plan: &[TeamCase]) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for a in plan {
            *counts.entry(a.case_id).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_three_teams_two_cases() {
        let plan = plan_assignments(&[1, 2, 3], &[10, 20]).unwrap();

        assert_eq!(
            plan,
            vec![
                TeamCase { team_id: 1, case_id: 10 },
                TeamCase { team_id: 2, case_id: 20 },
                TeamCase { team_id: 3, case_id: 10 },
            ]
        );
        assert_eq!(counts(&plan), BTreeMap::from([(10, 2), (20, 1)]));
    }

    #[test]
    fn test_every_team_gets_exactly_one_case() {
        let teams: Vec<i64> = (1..=17).collect();
        let plan = plan_assignments(&teams, &[3, 5, 8, 13]).unwrap();

        let assigned: Vec<i64> = plan.iter().map(|a| a.team_id).collect();
        assert_eq!(assigned, teams);
    }

    #[test]
    fn test_counts_differ_by_at_most_one() {
        for team_count in 1..=25_i64 {
            for case_count in 1..=7_i64 {
                let teams: Vec<i64> = (1..=team_count).collect();
                let cases: Vec<i64> = (100..100 + case_count).collect();
                let plan = plan_assignments(&teams, &cases).unwrap();

                let used = counts(&plan);
                let max = used.values().max().copied().unwrap();
                let min = used.values().min().copied().unwrap();
                assert!(max - min <= 1, "teams={team_count} cases={case_count}");
                assert_eq!(used.len() as i64, team_count.min(case_count));
            }
        }
    }

    #[test]
    fn test_more_cases_than_teams_uses_lowest_ids() {
        let plan = plan_assignments(&[4, 9], &[1, 2, 3]).unwrap();
        assert_eq!(
            plan,
            vec![
                TeamCase { team_id: 4, case_id: 1 },
                TeamCase { team_id: 9, case_id: 2 },
            ]
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = plan_assignments(&[2, 5, 7, 11], &[1, 6]).unwrap();
        let b = plan_assignments(&[2, 5, 7, 11], &[1, 6]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(
            plan_assignments(&[1, 2], &[]),
            Err(AppError::NoCasesAvailable)
        ));
        assert!(matches!(
            plan_assignments(&[], &[1]),
            Err(AppError::NoTeamsAvailable)
        ));
        // Missing cases are reported first when both are empty
        assert!(matches!(
            plan_assignments(&[], &[]),
            Err(AppError::NoCasesAvailable)
        ));
    }

    #[test]
    fn test_summary_counts_distinct_cases() {
        let summary = summarize(plan_assignments(&[1, 2, 3], &[10, 20]).unwrap());
        assert_eq!(summary.teams_assigned, 3);
        assert_eq!(summary.cases_used, 2);
    }
}

#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::test_utils::{seed_case, seed_team, test_pool};

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_assignment_is_persisted_and_replaced() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let t1 = seed_team(&mut conn, "alpha").await;
        let t2 = seed_team(&mut conn, "beta").await;
        let t3 = seed_team(&mut conn, "gamma").await;
        let c1 = seed_case(&mut conn, "First").await;
        let c2 = seed_case(&mut conn, "Second").await;

        let mut tx = pool.begin().await.unwrap();
        let summary = AssignmentService::assign_cases_evenly(&mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let expected = vec![
            TeamCase { team_id: t1.id, case_id: c1.id },
            TeamCase { team_id: t2.id, case_id: c2.id },
            TeamCase { team_id: t3.id, case_id: c1.id },
        ];
        assert_eq!(summary.assignments, expected);
        assert_eq!(TeamRepository::assignments(&mut conn).await.unwrap(), expected);

        // A second run with one more case replaces everything
        let c3 = seed_case(&mut conn, "Third").await;
        let mut tx = pool.begin().await.unwrap();
        AssignmentService::assign_cases_evenly(&mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let case_ids: Vec<i64> = TeamRepository::assignments(&mut conn)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.case_id)
            .collect();
        assert_eq!(case_ids, vec![c1.id, c2.id, c3.id]);
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_no_cases() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        seed_team(&mut conn, "solo").await;

        let mut tx = pool.begin().await.unwrap();
        let err = AssignmentService::assign_cases_evenly(&mut tx).await.unwrap_err();
        assert!(matches!(err, AppError::NoCasesAvailable));
        drop(tx);

        assert!(TeamRepository::assignments(&mut conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_no_teams() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        seed_case(&mut conn, "Lonely").await;

        let mut tx = pool.begin().await.unwrap();
        let err = AssignmentService::assign_cases_evenly(&mut tx).await.unwrap_err();
        assert!(matches!(err, AppError::NoTeamsAvailable));
    }
}
