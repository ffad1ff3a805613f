//! Team registry service

use sqlx::PgConnection;
use tracing::info;

use crate::{
    db::repositories::{ArtifactRepository, ReviewRepository, TeamRepository, UserRepository},
    error::{AppError, AppResult},
    models::{ArtifactLinks, HackathonCase, Team, TeamArtifacts, TeamReviewRow, User},
};

/// A team with its lead and non-lead members
#[derive(Debug)]
pub struct TeamRoster {
    pub team: Team,
    pub lead: User,
    pub members: Vec<User>,
}

/// Everything known about a team, as shown to admins
#[derive(Debug)]
pub struct TeamDetail {
    pub roster: TeamRoster,
    pub case: Option<HackathonCase>,
    pub artifacts: Option<TeamArtifacts>,
    pub reviews: Vec<TeamReviewRow>,
}

/// What the jury sees when opening a team's submission
#[derive(Debug)]
pub struct JuryTeamView {
    pub team: Team,
    pub artifacts: TeamArtifacts,
    pub members: Vec<User>,
    pub case: Option<HackathonCase>,
}

/// Result of a user leaving a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    /// The lead left, so the team was deleted
    Dissolved,
}

pub struct TeamService;

impl TeamService {
    /// Create a team; the creator becomes its lead
    pub async fn create_team(
        conn: &mut PgConnection,
        lead_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Team> {
        if TeamRepository::find_by_name(conn, name).await?.is_some() {
            return Err(AppError::Conflict(format!("Team '{}' already exists", name)));
        }

        let team = TeamRepository::create(conn, name, description, lead_id)
            .await
            .map_err(|err| match err {
                AppError::AlreadyExists(_) => {
                    AppError::Conflict(format!("Team '{}' already exists", name))
                }
                other => other,
            })?;

        info!(team_id = team.id, lead_id, name = %team.name, "Team created");
        Ok(team)
    }

    pub async fn get_team(conn: &mut PgConnection, name: &str) -> AppResult<Team> {
        TeamRepository::find_by_name(conn, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team '{}' not found", name)))
    }

    pub async fn roster(conn: &mut PgConnection, name: &str) -> AppResult<TeamRoster> {
        let team = Self::get_team(conn, name).await?;
        Self::roster_of(conn, team).await
    }

    async fn roster_of(conn: &mut PgConnection, team: Team) -> AppResult<TeamRoster> {
        let lead = UserRepository::find_by_id(conn, team.lead_id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("team {} has no lead", team.id)))?;
        let members = TeamRepository::members(conn, team.id).await?;

        Ok(TeamRoster { team, lead, members })
    }

    /// Lead adds a user to the team
    pub async fn invite(
        conn: &mut PgConnection,
        requester_id: i64,
        name: &str,
        username: &str,
    ) -> AppResult<User> {
        let team = Self::get_team(conn, name).await?;
        if !team.is_led_by(requester_id) {
            return Err(AppError::Forbidden(
                "Only the team lead can invite members".to_string(),
            ));
        }

        Self::add_member(conn, &team, username).await
    }

    /// Admin adds a user to any team
    pub async fn admin_add_member(
        conn: &mut PgConnection,
        name: &str,
        username: &str,
    ) -> AppResult<User> {
        let team = Self::get_team(conn, name).await?;
        Self::add_member(conn, &team, username).await
    }

    async fn add_member(conn: &mut PgConnection, team: &Team, username: &str) -> AppResult<User> {
        let user = UserRepository::find_by_username(conn, username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if team.is_led_by(user.id) || TeamRepository::is_member(conn, team.id, user.id).await? {
            return Err(AppError::Conflict(format!(
                "User '{}' is already in team '{}'",
                user.username, team.name
            )));
        }

        TeamRepository::add_member(conn, team.id, user.id).await?;
        info!(team_id = team.id, user_id = user.id, "Member added");
        Ok(user)
    }

    /// Admin removes a non-lead member
    pub async fn admin_remove_member(
        conn: &mut PgConnection,
        name: &str,
        username: &str,
    ) -> AppResult<()> {
        let team = Self::get_team(conn, name).await?;
        let user = UserRepository::find_by_username(conn, username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if team.is_led_by(user.id) {
            return Err(AppError::Validation(
                "The team lead cannot be removed; delete the team instead".to_string(),
            ));
        }
        if !TeamRepository::remove_member(conn, team.id, user.id).await? {
            return Err(AppError::Validation(format!(
                "User '{}' is not a member of team '{}'",
                user.username, team.name
            )));
        }

        info!(team_id = team.id, user_id = user.id, "Member removed");
        Ok(())
    }

    /// Leave a team; when the lead leaves the team is dissolved
    pub async fn leave(conn: &mut PgConnection, user_id: i64, name: &str) -> AppResult<LeaveOutcome> {
        let team = Self::get_team(conn, name).await?;

        if team.is_led_by(user_id) {
            TeamRepository::delete(conn, team.id).await?;
            info!(team_id = team.id, "Team dissolved by its lead");
            return Ok(LeaveOutcome::Dissolved);
        }

        if !TeamRepository::remove_member(conn, team.id, user_id).await? {
            return Err(AppError::Validation(format!(
                "You are not a member of team '{}'",
                team.name
            )));
        }

        info!(team_id = team.id, user_id, "Member left team");
        Ok(LeaveOutcome::Left)
    }

    /// Teams the user leads or belongs to, with their assigned case
    pub async fn my_teams(
        conn: &mut PgConnection,
        user_id: i64,
    ) -> AppResult<Vec<(Team, Option<HackathonCase>)>> {
        let teams = TeamRepository::list_for_user(conn, user_id).await?;

        let mut result = Vec::with_capacity(teams.len());
        for team in teams {
            let case = TeamRepository::case_for_team(conn, team.id).await?;
            result.push((team, case));
        }
        Ok(result)
    }

    pub async fn get_artifacts(conn: &mut PgConnection, name: &str) -> AppResult<TeamArtifacts> {
        let team = Self::get_team(conn, name).await?;
        ArtifactRepository::find(conn, team.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Artifacts not found".to_string()))
    }

    /// Lead creates or replaces the team's artifact links
    pub async fn save_artifacts(
        conn: &mut PgConnection,
        requester_id: i64,
        name: &str,
        links: &ArtifactLinks<'_>,
    ) -> AppResult<TeamArtifacts> {
        let team = Self::get_team(conn, name).await?;
        if !team.is_led_by(requester_id) {
            return Err(AppError::Forbidden(
                "Only the team lead can edit artifacts".to_string(),
            ));
        }

        let artifacts = ArtifactRepository::upsert(conn, team.id, links).await?;
        info!(team_id = team.id, "Artifacts saved");
        Ok(artifacts)
    }

    pub async fn detail(conn: &mut PgConnection, name: &str) -> AppResult<TeamDetail> {
        let team = Self::get_team(conn, name).await?;
        Self::detail_of(conn, team).await
    }

    /// Details of every team in ascending ID order
    pub async fn list_details(conn: &mut PgConnection) -> AppResult<Vec<TeamDetail>> {
        let teams = TeamRepository::list_all(conn).await?;

        let mut details = Vec::with_capacity(teams.len());
        for team in teams {
            details.push(Self::detail_of(conn, team).await?);
        }
        Ok(details)
    }

    async fn detail_of(conn: &mut PgConnection, team: Team) -> AppResult<TeamDetail> {
        let case = TeamRepository::case_for_team(conn, team.id).await?;
        let artifacts = ArtifactRepository::find(conn, team.id).await?;
        let reviews = ReviewRepository::for_team(conn, team.id).await?;
        let roster = Self::roster_of(conn, team).await?;

        Ok(TeamDetail {
            roster,
            case,
            artifacts,
            reviews,
        })
    }

    /// Submission view for jury; a team without artifacts is not reviewable
    pub async fn jury_view(conn: &mut PgConnection, name: &str) -> AppResult<JuryTeamView> {
        let team = Self::get_team(conn, name).await?;
        let artifacts = ArtifactRepository::find(conn, team.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Artifacts not found for this team".to_string()))?;
        let members = TeamRepository::members(conn, team.id).await?;
        let case = TeamRepository::case_for_team(conn, team.id).await?;

        Ok(JuryTeamView {
            team,
            artifacts,
            members,
            case,
        })
    }
}

#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::{
        models::{Criteria, SystemRole},
        test_utils::{seed_user, test_pool},
    };

    /// Team "crew" led by `lead`, with artifacts and one jury review
    async fn reviewed_team(conn: &mut PgConnection, lead: &User) -> Team {
        let jury = seed_user(conn, "judge", SystemRole::Jury).await;
        let team = TeamService::create_team(conn, lead.id, "crew", None).await.unwrap();

        let links = ArtifactLinks {
            github_url: Some("https://github.com/crew/app"),
            ..Default::default()
        };
        TeamService::save_artifacts(conn, lead.id, "crew", &links).await.unwrap();

        let criteria = Criteria::new([7, 7, 7, 7, 7]).unwrap();
        ReviewRepository::insert(conn, jury.id, team.id, criteria, None)
            .await
            .unwrap();

        assert!(ArtifactRepository::find(conn, team.id).await.unwrap().is_some());
        assert_eq!(ReviewRepository::for_team(conn, team.id).await.unwrap().len(), 1);
        team
    }

    async fn assert_team_data_gone(conn: &mut PgConnection, team_id: i64) {
        assert!(TeamRepository::find_by_id(conn, team_id).await.unwrap().is_none());
        assert!(ArtifactRepository::find(conn, team_id).await.unwrap().is_none());
        assert!(ReviewRepository::for_team(conn, team_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_dissolving_team_removes_artifacts_and_reviews() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let lead = seed_user(&mut conn, "lead", SystemRole::User).await;
        let team = reviewed_team(&mut conn, &lead).await;

        let mut tx = pool.begin().await.unwrap();
        assert_eq!(
            TeamService::leave(&mut tx, lead.id, "crew").await.unwrap(),
            LeaveOutcome::Dissolved
        );
        tx.commit().await.unwrap();

        assert_team_data_gone(&mut conn, team.id).await;
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_deleting_lead_removes_team_artifacts_and_reviews() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let lead = seed_user(&mut conn, "lead", SystemRole::User).await;
        let team = reviewed_team(&mut conn, &lead).await;

        assert!(UserRepository::delete(&mut conn, lead.id).await.unwrap());

        assert_team_data_gone(&mut conn, team.id).await;
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_membership_flow() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let lead = seed_user(&mut conn, "lead", SystemRole::User).await;
        let member = seed_user(&mut conn, "member", SystemRole::User).await;
        let outsider = seed_user(&mut conn, "outsider", SystemRole::User).await;

        TeamService::create_team(&mut conn, lead.id, "crew", Some("demo")).await.unwrap();
        assert!(matches!(
            TeamService::create_team(&mut conn, outsider.id, "crew", None).await,
            Err(AppError::Conflict(_))
        ));

        assert!(matches!(
            TeamService::invite(&mut conn, outsider.id, "crew", "member").await,
            Err(AppError::Forbidden(_))
        ));
        TeamService::invite(&mut conn, lead.id, "crew", "member").await.unwrap();
        assert!(matches!(
            TeamService::admin_add_member(&mut conn, "crew", "member").await,
            Err(AppError::Conflict(_))
        ));

        let roster = TeamService::roster(&mut conn, "crew").await.unwrap();
        assert_eq!(roster.lead.id, lead.id);
        assert_eq!(roster.members.len(), 1);
        assert_eq!(roster.members[0].id, member.id);

        assert_eq!(
            TeamService::leave(&mut conn, member.id, "crew").await.unwrap(),
            LeaveOutcome::Left
        );
        assert_eq!(
            TeamService::leave(&mut conn, lead.id, "crew").await.unwrap(),
            LeaveOutcome::Dissolved
        );
        assert!(matches!(
            TeamService::get_team(&mut conn, "crew").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_artifacts_are_replaced_whole() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let lead = seed_user(&mut conn, "lead", SystemRole::User).await;
        TeamService::create_team(&mut conn, lead.id, "crew", None).await.unwrap();

        assert!(matches!(
            TeamService::get_artifacts(&mut conn, "crew").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            TeamService::jury_view(&mut conn, "crew").await,
            Err(AppError::NotFound(_))
        ));

        let first = ArtifactLinks {
            github_url: Some("https://github.com/crew/app"),
            figma_url: Some("https://figma.com/file/crew"),
            ..Default::default()
        };
        TeamService::save_artifacts(&mut conn, lead.id, "crew", &first).await.unwrap();

        let second = ArtifactLinks {
            hosting_url: Some("https://crew.example.com"),
            ..Default::default()
        };
        let saved = TeamService::save_artifacts(&mut conn, lead.id, "crew", &second)
            .await
            .unwrap();
        assert_eq!(saved.github_url, None);
        assert_eq!(saved.hosting_url.as_deref(), Some("https://crew.example.com"));

        let view = TeamService::jury_view(&mut conn, "crew").await.unwrap();
        assert!(view.case.is_none());
        assert!(view.members.is_empty());
    }
}
