//! Team response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{Criteria, HackathonCase, Team, TeamArtifacts, TeamReviewRow, User},
    services::team_service::{TeamDetail, TeamRoster},
};

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub lead_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            lead_id: team.lead_id,
            created_at: team.created_at,
        }
    }
}

/// Team lead reference
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
}

impl From<User> for LeadResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
        }
    }
}

/// Member as listed within a team
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub university: String,
    pub project_role: Option<String>,
}

impl From<User> for MemberResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            university: user.university,
            project_role: user.project_role,
        }
    }
}

/// Case as seen by teams and jury
#[derive(Debug, Serialize)]
pub struct CaseSummaryResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub original_filename: String,
    pub download_url: String,
}

impl From<HackathonCase> for CaseSummaryResponse {
    fn from(case: HackathonCase) -> Self {
        Self {
            download_url: format!("/api/v1/admin/cases/files/{}", case.stored_filename),
            id: case.id,
            title: case.title,
            description: case.description,
            original_filename: case.original_filename,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtifactsResponse {
    pub team_id: i64,
    pub github_url: Option<String>,
    pub figma_url: Option<String>,
    pub hosting_url: Option<String>,
    pub presentation_url: Option<String>,
    pub extra_links: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamArtifacts> for ArtifactsResponse {
    fn from(a: TeamArtifacts) -> Self {
        Self {
            team_id: a.team_id,
            github_url: a.github_url,
            figma_url: a.figma_url,
            hosting_url: a.hosting_url,
            presentation_url: a.presentation_url,
            extra_links: a.extra_links,
            updated_at: a.updated_at,
        }
    }
}

/// Team with lead and members
#[derive(Debug, Serialize)]
pub struct TeamRosterResponse {
    pub team: TeamResponse,
    pub lead: LeadResponse,
    pub members: Vec<MemberResponse>,
}

impl From<TeamRoster> for TeamRosterResponse {
    fn from(roster: TeamRoster) -> Self {
        Self {
            team: roster.team.into(),
            lead: roster.lead.into(),
            members: roster.members.into_iter().map(Into::into).collect(),
        }
    }
}

/// One of the caller's teams
#[derive(Debug, Serialize)]
pub struct MyTeamResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub case: Option<CaseSummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct MyTeamsResponse {
    pub teams: Vec<MyTeamResponse>,
}

/// Scores of one review, named as stored
#[derive(Debug, Serialize)]
pub struct CriteriaResponse {
    pub criterion_1: i32,
    pub criterion_2: i32,
    pub criterion_3: i32,
    pub criterion_4: i32,
    pub criterion_5: i32,
}

impl From<Criteria> for CriteriaResponse {
    fn from(criteria: Criteria) -> Self {
        let [criterion_1, criterion_2, criterion_3, criterion_4, criterion_5] = criteria.values();
        Self {
            criterion_1,
            criterion_2,
            criterion_3,
            criterion_4,
            criterion_5,
        }
    }
}

/// A raw review in the aggregation view
#[derive(Debug, Serialize)]
pub struct TeamReviewResponse {
    pub jury_id: i64,
    pub jury_username: String,
    pub criteria: CriteriaResponse,
    pub comment: Option<String>,
}

impl From<TeamReviewRow> for TeamReviewResponse {
    fn from(row: TeamReviewRow) -> Self {
        Self {
            jury_id: row.jury_id,
            jury_username: row.jury_username,
            criteria: CriteriaResponse {
                criterion_1: row.criterion_1,
                criterion_2: row.criterion_2,
                criterion_3: row.criterion_3,
                criterion_4: row.criterion_4,
                criterion_5: row.criterion_5,
            },
            comment: row.comment,
        }
    }
}

/// Complete team view for admins
#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub lead: LeadResponse,
    pub members: Vec<MemberResponse>,
    pub case: Option<CaseSummaryResponse>,
    pub artifacts: Option<ArtifactsResponse>,
    pub reviews: Vec<TeamReviewResponse>,
}

impl From<TeamDetail> for TeamDetailResponse {
    fn from(detail: TeamDetail) -> Self {
        let TeamRoster { team, lead, members } = detail.roster;
        Self {
            id: team.id,
            name: team.name,
            description: team.description,
            lead: lead.into(),
            members: members.into_iter().map(Into::into).collect(),
            case: detail.case.map(Into::into),
            artifacts: detail.artifacts.map(Into::into),
            reviews: detail.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberAddedResponse {
    pub message: String,
    pub member: MemberResponse,
}
