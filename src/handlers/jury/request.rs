//! Jury request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{CRITERIA_COUNT, MAX_REVIEW_COMMENT_LENGTH};

/// Scores for a team; range checks happen when building `Criteria`
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReviewRequest {
    pub criterion_1: i32,
    pub criterion_2: i32,
    pub criterion_3: i32,
    pub criterion_4: i32,
    pub criterion_5: i32,

    #[validate(length(max = MAX_REVIEW_COMMENT_LENGTH))]
    pub comment: Option<String>,
}

impl ReviewRequest {
    pub fn scores(&self) -> [i32; CRITERIA_COUNT] {
        [
            self.criterion_1,
            self.criterion_2,
            self.criterion_3,
            self.criterion_4,
            self.criterion_5,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_keep_order() {
        let request: ReviewRequest = serde_json::from_str(
            r#"{"criterion_1":1,"criterion_2":2,"criterion_3":3,"criterion_4":4,"criterion_5":5}"#,
        )
        .unwrap();
        assert_eq!(request.scores(), [1, 2, 3, 4, 5]);
        assert!(request.comment.is_none());
    }

    #[test]
    fn test_missing_criterion_rejected() {
        let result = serde_json::from_str::<ReviewRequest>(
            r#"{"criterion_1":1,"criterion_2":2,"criterion_3":3,"criterion_4":4}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<ReviewRequest>(
            r#"{"criterion_1":1,"criterion_2":2,"criterion_3":3,"criterion_4":4,"criterion_5":5,"score":50}"#,
        );
        assert!(result.is_err());
    }
}
