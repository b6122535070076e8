//! Repository abstraction for the Donor Matching context.

use async_trait::async_trait;
use hemolink_core::error::DomainError;

use super::aggregates::DonorMatch;

/// State repository for donor matches.
///
/// The pending-event buffer is not part of persisted state; implementations
/// store and return aggregates with an empty buffer.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Allocates the next surrogate key.
    async fn next_id(&self) -> Result<i64, DomainError>;

    /// Loads a match by id, or `None` when it does not exist.
    async fn find_by_id(&self, match_id: i64) -> Result<Option<DonorMatch>, DomainError>;

    /// Lists all matches proposed for a blood request.
    async fn list_by_request(&self, request_id: i64) -> Result<Vec<DonorMatch>, DomainError>;

    /// Persists a newly proposed match.
    async fn insert(&self, donor_match: &DonorMatch) -> Result<(), DomainError>;

    /// Persists the current state of an existing match.
    async fn update(&self, donor_match: &DonorMatch) -> Result<(), DomainError>;
}
