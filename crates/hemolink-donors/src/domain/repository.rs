//! Repository abstraction for the Donor context.

use async_trait::async_trait;
use hemolink_core::error::DomainError;

use super::aggregates::Donor;

/// State repository for donors.
#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Allocates the next surrogate key.
    async fn next_id(&self) -> Result<i64, DomainError>;

    /// Loads a donor by id, or `None` when it does not exist.
    async fn find_by_id(&self, donor_id: i64) -> Result<Option<Donor>, DomainError>;

    /// Persists a newly registered donor.
    async fn insert(&self, donor: &Donor) -> Result<(), DomainError>;

    /// Persists the current state of an existing donor.
    async fn update(&self, donor: &Donor) -> Result<(), DomainError>;
}
