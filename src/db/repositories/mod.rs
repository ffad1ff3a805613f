//! Database repositories
//!
//! Repositories handle all direct database interactions. Every function takes
//! a `&mut PgConnection` so callers decide the transaction boundary.

pub mod artifact_repo;
pub mod case_repo;
pub mod review_repo;
pub mod team_repo;
pub mod user_repo;

pub use artifact_repo::ArtifactRepository;
pub use case_repo::CaseRepository;
pub use review_repo::ReviewRepository;
pub use team_repo::TeamRepository;
pub use user_repo::UserRepository;
