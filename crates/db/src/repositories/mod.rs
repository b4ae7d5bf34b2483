//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod faq_repo;
pub mod favorite_repo;
pub mod import_repo;
pub mod version_repo;
pub mod vote_repo;

pub use faq_repo::FaqRepo;
pub use favorite_repo::FavoriteRepo;
pub use import_repo::ImportRepo;
pub use version_repo::VersionRepo;
pub use vote_repo::VoteRepo;
