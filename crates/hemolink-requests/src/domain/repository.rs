//! Repository abstraction for the Blood Request context.

use async_trait::async_trait;
use hemolink_core::error::DomainError;

use super::address::Address;
use super::aggregates::BloodRequest;

/// State repository for blood requests and their addresses.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Allocates the next surrogate key for a request.
    async fn next_id(&self) -> Result<i64, DomainError>;

    /// Loads a request by id, or `None` when it does not exist.
    async fn find_by_id(&self, request_id: i64) -> Result<Option<BloodRequest>, DomainError>;

    /// Lists open requests, ordered by creation.
    async fn list_open(&self) -> Result<Vec<BloodRequest>, DomainError>;

    /// Persists a newly opened request.
    async fn insert(&self, request: &BloodRequest) -> Result<(), DomainError>;

    /// Persists the current state of an existing request.
    async fn update(&self, request: &BloodRequest) -> Result<(), DomainError>;

    /// Allocates the next surrogate key for an address.
    async fn next_address_id(&self) -> Result<i64, DomainError>;

    /// Persists an address.
    async fn insert_address(&self, address: &Address) -> Result<(), DomainError>;

    /// Loads an address by id.
    async fn find_address(&self, address_id: i64) -> Result<Option<Address>, DomainError>;
}
