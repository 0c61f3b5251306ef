//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod admin_repo;
pub mod contribution_repo;
pub mod member_repo;

pub use admin_repo::AdminRepo;
pub use contribution_repo::ContributionRepo;
pub use member_repo::MemberRepo;
