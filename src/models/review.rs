//! Artifact review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    constants::{CRITERIA_COUNT, MAX_CRITERION_SCORE, MIN_CRITERION_SCORE},
    error::{AppError, AppResult},
};

/// One jury member's scoring of one team; unique on (jury_id, team_id)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArtifactReview {
    pub id: i64,
    pub jury_id: i64,
    pub team_id: i64,
    pub criterion_1: i32,
    pub criterion_2: i32,
    pub criterion_3: i32,
    pub criterion_4: i32,
    pub criterion_5: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArtifactReview {
    pub fn criteria(&self) -> Criteria {
        Criteria([
            self.criterion_1,
            self.criterion_2,
            self.criterion_3,
            self.criterion_4,
            self.criterion_5,
        ])
    }
}

/// Five scores, each guaranteed to be within the accepted range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criteria([i32; CRITERIA_COUNT]);

impl Criteria {
    /// Validate raw scores; the first out-of-range value is reported (1-based)
    pub fn new(values: [i32; CRITERIA_COUNT]) -> AppResult<Self> {
        for (index, &value) in values.iter().enumerate() {
            if !(MIN_CRITERION_SCORE..=MAX_CRITERION_SCORE).contains(&value) {
                return Err(AppError::InvalidCriterionValue {
                    criterion: index + 1,
                    value,
                });
            }
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> [i32; CRITERIA_COUNT] {
        self.0
    }
}

/// A review as exposed in a team's aggregation view
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamReviewRow {
    pub id: i64,
    pub jury_id: i64,
    pub jury_username: String,
    pub criterion_1: i32,
    pub criterion_2: i32,
    pub criterion_3: i32,
    pub criterion_4: i32,
    pub criterion_5: i32,
    pub comment: Option<String>,
}
