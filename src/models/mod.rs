//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod artifact;
pub mod case;
pub mod review;
pub mod role;
pub mod team;
pub mod user;

pub use artifact::*;
pub use case::*;
pub use review::*;
pub use role::*;
pub use team::*;
pub use user::*;
