//! Team artifact model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team's submission bundle; one row per team
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamArtifacts {
    pub team_id: i64,
    pub github_url: Option<String>,
    pub figma_url: Option<String>,
    pub hosting_url: Option<String>,
    pub presentation_url: Option<String>,
    pub extra_links: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Link set written by the team lead
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactLinks<'a> {
    pub github_url: Option<&'a str>,
    pub figma_url: Option<&'a str>,
    pub hosting_url: Option<&'a str>,
    pub presentation_url: Option<&'a str>,
    pub extra_links: Option<&'a str>,
}
