//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&Store` as the first argument.

pub mod attendee_repo;
pub mod claim_repo;
pub mod order_repo;
pub mod photo_repo;
pub mod project_repo;
pub mod question_repo;

pub use attendee_repo::AttendeeRepo;
pub use claim_repo::{ClaimOutcome, ClaimRepo};
pub use order_repo::OrderRepo;
pub use photo_repo::PhotoRepo;
pub use project_repo::ProjectRepo;
pub use question_repo::QuestionRepo;

use cafe_core::error::CoreError;
use cafe_core::types::RecordId;

use crate::error::RepoError;

pub(crate) fn not_found(entity: &'static str, id: RecordId) -> RepoError {
    RepoError::Core(CoreError::NotFound {
        entity,
        id: id.to_string(),
    })
}
