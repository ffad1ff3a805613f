//! Business logic services

pub mod assignment_service;
pub mod auth_service;
pub mod case_service;
pub mod review_service;
pub mod team_service;
pub mod user_service;

pub use assignment_service::AssignmentService;
pub use auth_service::AuthService;
pub use case_service::CaseService;
pub use review_service::ReviewService;
pub use team_service::TeamService;
pub use user_service::UserService;
