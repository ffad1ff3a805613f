//! Team request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_ARTIFACT_URL_LENGTH, MAX_TEAM_DESCRIPTION_LENGTH, MAX_TEAM_NAME_LENGTH},
    models::ArtifactLinks,
    utils::validation::validate_not_blank,
};

/// Create team request
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamRequest {
    #[validate(
        length(min = 1, max = MAX_TEAM_NAME_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = MAX_TEAM_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
}

/// Add a member by username
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct InviteMemberRequest {
    #[validate(length(min = 1))]
    pub username: String,
}

/// Full replacement of a team's artifact links
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SaveArtifactsRequest {
    #[validate(url, length(max = MAX_ARTIFACT_URL_LENGTH))]
    pub github_url: Option<String>,

    #[validate(url, length(max = MAX_ARTIFACT_URL_LENGTH))]
    pub figma_url: Option<String>,

    #[validate(url, length(max = MAX_ARTIFACT_URL_LENGTH))]
    pub hosting_url: Option<String>,

    #[validate(url, length(max = MAX_ARTIFACT_URL_LENGTH))]
    pub presentation_url: Option<String>,

    #[validate(length(max = 2000))]
    pub extra_links: Option<String>,
}

impl SaveArtifactsRequest {
    pub fn links(&self) -> ArtifactLinks<'_> {
        ArtifactLinks {
            github_url: self.github_url.as_deref(),
            figma_url: self.figma_url.as_deref(),
            hosting_url: self.hosting_url.as_deref(),
            presentation_url: self.presentation_url.as_deref(),
            extra_links: self.extra_links.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_team_name_rejected() {
        let request = CreateTeamRequest {
            name: "   ".to_string(),
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_artifact_urls_validated() {
        let ok = SaveArtifactsRequest {
            github_url: Some("https://github.com/team/repo".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = SaveArtifactsRequest {
            figma_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_unknown_artifact_field_rejected() {
        let parsed = serde_json::from_str::<SaveArtifactsRequest>(r#"{"gitlab_url":"https://x.y"}"#);
        assert!(parsed.is_err());
    }
}
