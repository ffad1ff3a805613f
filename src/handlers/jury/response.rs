//! Jury response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    handlers::teams::response::{
        ArtifactsResponse, CaseSummaryResponse, CriteriaResponse, MemberResponse, TeamResponse,
    },
    models::ArtifactReview,
    services::team_service::JuryTeamView,
};

/// A team's submission as opened by a juror
#[derive(Debug, Serialize)]
pub struct JuryTeamResponse {
    pub team: TeamResponse,
    pub artifacts: ArtifactsResponse,
    pub members: Vec<MemberResponse>,
    pub case: Option<CaseSummaryResponse>,
}

impl From<JuryTeamView> for JuryTeamResponse {
    fn from(view: JuryTeamView) -> Self {
        Self {
            team: view.team.into(),
            artifacts: view.artifacts.into(),
            members: view.members.into_iter().map(Into::into).collect(),
            case: view.case.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub team_id: i64,
    pub jury_id: i64,
    #[serde(flatten)]
    pub criteria: CriteriaResponse,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArtifactReview> for ReviewResponse {
    fn from(review: ArtifactReview) -> Self {
        Self {
            criteria: CriteriaResponse::from(review.criteria()),
            id: review.id,
            team_id: review.team_id,
            jury_id: review.jury_id,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Teams in one review bucket of the caller
#[derive(Debug, Serialize)]
pub struct ReviewQueueResponse {
    pub teams: Vec<TeamResponse>,
}
