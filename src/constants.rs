//! Application-wide constants
//!
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Advisory lock key serializing case assignment runs
pub const CASE_ASSIGNMENT_LOCK_KEY: i64 = 0x4841_434B_4153_5347;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Length of generated refresh tokens
pub const REFRESH_TOKEN_LENGTH: usize = 48;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 50;

// =============================================================================
// USER ROLES
// =============================================================================

/// System role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const ORGANIZER: &str = "organizer";
    pub const JURY: &str = "jury";
    pub const USER: &str = "user";

    /// All system roles
    pub const ALL: &[&str] = &[ADMIN, ORGANIZER, JURY, USER];
}

// =============================================================================
// REVIEWS
// =============================================================================

/// Number of scoring criteria per review
pub const CRITERIA_COUNT: usize = 5;

/// Lowest accepted criterion score
pub const MIN_CRITERION_SCORE: i32 = 1;

/// Highest accepted criterion score
pub const MAX_CRITERION_SCORE: i32 = 10;

/// Maximum review comment length
pub const MAX_REVIEW_COMMENT_LENGTH: u64 = 10_000;

// =============================================================================
// CASE DOCUMENTS
// =============================================================================

/// File extensions accepted for case documents
pub const ALLOWED_DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Default maximum upload size in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: usize = 20;

/// Maximum case title length
pub const MAX_CASE_TITLE_LENGTH: u64 = 256;

/// Maximum case description length
pub const MAX_CASE_DESCRIPTION_LENGTH: u64 = 65535;

// =============================================================================
// TEAMS
// =============================================================================

/// Maximum team name length
pub const MAX_TEAM_NAME_LENGTH: u64 = 100;

/// Maximum team description length
pub const MAX_TEAM_DESCRIPTION_LENGTH: u64 = 255;

/// Maximum length of a single artifact link
pub const MAX_ARTIFACT_URL_LENGTH: u64 = 255;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
