//! Team model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Team database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// The only member with edit rights over membership, artifacts and case
    pub lead_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn is_led_by(&self, user_id: i64) -> bool {
        self.lead_id == user_id
    }
}

/// Case assignment of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TeamCase {
    pub team_id: i64,
    pub case_id: i64,
}
