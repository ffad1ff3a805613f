//! Team repository
//!
//! Covers teams, their memberships and the team to case assignment table.

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::{HackathonCase, Team, TeamCase, User},
};

/// Repository for team database operations
pub struct TeamRepository;

impl TeamRepository {
    /// Create a new team led by `lead_id`
    pub async fn create(
        conn: &mut PgConnection,
        name: &str,
        description: Option<&str>,
        lead_id: i64,
    ) -> AppResult<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, description, lead_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(lead_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(team)
    }

    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> AppResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(team)
    }

    pub async fn find_by_name(conn: &mut PgConnection, name: &str) -> AppResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams WHERE name = $1"#)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(team)
    }

    /// All teams in ascending ID order
    pub async fn list_all(conn: &mut PgConnection) -> AppResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;

        Ok(teams)
    }

    /// IDs of all teams in ascending order
    pub async fn list_ids(conn: &mut PgConnection) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(r#"SELECT id FROM teams ORDER BY id"#)
            .fetch_all(&mut *conn)
            .await?;

        Ok(ids)
    }

    /// Teams that have an artifacts record, in ascending ID order
    pub async fn list_with_artifacts(conn: &mut PgConnection) -> AppResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.* FROM teams t
            INNER JOIN team_artifacts a ON a.team_id = t.id
            ORDER BY t.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(teams)
    }

    /// Teams the user leads or belongs to, in ascending ID order
    pub async fn list_for_user(conn: &mut PgConnection, user_id: i64) -> AppResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.* FROM teams t
            WHERE t.lead_id = $1
               OR EXISTS (
                   SELECT 1 FROM team_members m
                   WHERE m.team_id = t.id AND m.user_id = $1
               )
            ORDER BY t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(teams)
    }

    /// Delete a team; members, artifacts, reviews and assignment cascade
    pub async fn delete(conn: &mut PgConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM teams WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Non-lead members in join order
    pub async fn members(conn: &mut PgConnection, team_id: i64) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            INNER JOIN team_members m ON m.user_id = u.id
            WHERE m.team_id = $1
            ORDER BY m.joined_at, u.id
            "#,
        )
        .bind(team_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(users)
    }

    pub async fn is_member(conn: &mut PgConnection, team_id: i64, user_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2)"#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists)
    }

    pub async fn add_member(conn: &mut PgConnection, team_id: i64, user_id: i64) -> AppResult<()> {
        sqlx::query(r#"INSERT INTO team_members (team_id, user_id) VALUES ($1, $2)"#)
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn remove_member(
        conn: &mut PgConnection,
        team_id: i64,
        user_id: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM team_members WHERE team_id = $1 AND user_id = $2"#)
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The case currently assigned to a team
    pub async fn case_for_team(
        conn: &mut PgConnection,
        team_id: i64,
    ) -> AppResult<Option<HackathonCase>> {
        let case = sqlx::query_as::<_, HackathonCase>(
            r#"
            SELECT c.* FROM hackathon_cases c
            INNER JOIN team_cases tc ON tc.case_id = c.id
            WHERE tc.team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(case)
    }

    /// Names of teams assigned to a case, in ascending team ID order
    pub async fn team_names_for_case(conn: &mut PgConnection, case_id: i64) -> AppResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.name FROM teams t
            INNER JOIN team_cases tc ON tc.team_id = t.id
            WHERE tc.case_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(case_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(names)
    }

    /// Remove every existing case assignment
    pub async fn clear_assignments(conn: &mut PgConnection) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM team_cases"#)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert_assignment(conn: &mut PgConnection, assignment: TeamCase) -> AppResult<()> {
        sqlx::query(r#"INSERT INTO team_cases (team_id, case_id) VALUES ($1, $2)"#)
            .bind(assignment.team_id)
            .bind(assignment.case_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Current assignment table in ascending team ID order
    pub async fn assignments(conn: &mut PgConnection) -> AppResult<Vec<TeamCase>> {
        let rows = sqlx::query_as::<_, TeamCase>(
            r#"SELECT team_id, case_id FROM team_cases ORDER BY team_id"#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }
}
