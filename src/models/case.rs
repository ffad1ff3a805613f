//! Hackathon case model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A problem statement teams work on
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HackathonCase {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Generated name of the document in storage
    pub stored_filename: String,
    /// Name the document was uploaded with, used for downloads
    pub original_filename: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
