//! In-memory repositories.
//!
//! Used by integration tests and local runs without a database. Keys are
//! allocated from a process-local counter; stored aggregates always carry
//! an empty event buffer.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use hemolink_content::domain::aggregates::Post;
use hemolink_content::domain::repository::PostRepository;
use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::error::DomainError;
use hemolink_donors::domain::aggregates::Donor;
use hemolink_donors::domain::repository::DonorRepository;
use hemolink_matching::domain::aggregates::DonorMatch;
use hemolink_matching::domain::repository::MatchRepository;
use hemolink_requests::domain::address::Address;
use hemolink_requests::domain::aggregates::BloodRequest;
use hemolink_requests::domain::repository::RequestRepository;
use hemolink_scheduling::domain::aggregates::Appointment;
use hemolink_scheduling::domain::repository::AppointmentRepository;

fn poisoned() -> DomainError {
    DomainError::Infrastructure("repository lock poisoned".to_string())
}

/// In-memory donor repository.
#[derive(Debug, Default)]
pub struct MemoryDonorRepository {
    rows: Mutex<HashMap<i64, Donor>>,
    next: AtomicI64,
}

impl MemoryDonorRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonorRepository for MemoryDonorRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_by_id(&self, donor_id: i64) -> Result<Option<Donor>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .get(&donor_id)
            .cloned())
    }

    async fn insert(&self, donor: &Donor) -> Result<(), DomainError> {
        let mut stored = donor.clone();
        stored.clear_events();
        self.rows
            .lock()
            .map_err(|_| poisoned())?
            .insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, donor: &Donor) -> Result<(), DomainError> {
        self.insert(donor).await
    }
}

/// In-memory blood request repository, including addresses.
#[derive(Debug, Default)]
pub struct MemoryRequestRepository {
    rows: Mutex<HashMap<i64, BloodRequest>>,
    addresses: Mutex<HashMap<i64, Address>>,
    next: AtomicI64,
    next_address: AtomicI64,
}

impl MemoryRequestRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestRepository for MemoryRequestRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_by_id(&self, request_id: i64) -> Result<Option<BloodRequest>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .get(&request_id)
            .cloned())
    }

    async fn list_open(&self) -> Result<Vec<BloodRequest>, DomainError> {
        use hemolink_requests::domain::aggregates::RequestStatus;
        let mut open: Vec<BloodRequest> = self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .filter(|r| r.status() == RequestStatus::Open)
            .cloned()
            .collect();
        open.sort_by_key(|r| r.id);
        Ok(open)
    }

    async fn insert(&self, request: &BloodRequest) -> Result<(), DomainError> {
        let mut stored = request.clone();
        stored.clear_events();
        self.rows
            .lock()
            .map_err(|_| poisoned())?
            .insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, request: &BloodRequest) -> Result<(), DomainError> {
        self.insert(request).await
    }

    async fn next_address_id(&self) -> Result<i64, DomainError> {
        Ok(self.next_address.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn insert_address(&self, address: &Address) -> Result<(), DomainError> {
        self.addresses
            .lock()
            .map_err(|_| poisoned())?
            .insert(address.id, address.clone());
        Ok(())
    }

    async fn find_address(&self, address_id: i64) -> Result<Option<Address>, DomainError> {
        Ok(self
            .addresses
            .lock()
            .map_err(|_| poisoned())?
            .get(&address_id)
            .cloned())
    }
}

/// In-memory donor match repository.
#[derive(Debug, Default)]
pub struct MemoryMatchRepository {
    rows: Mutex<HashMap<i64, DonorMatch>>,
    next: AtomicI64,
}

impl MemoryMatchRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for MemoryMatchRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_by_id(&self, match_id: i64) -> Result<Option<DonorMatch>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .get(&match_id)
            .cloned())
    }

    async fn list_by_request(&self, request_id: i64) -> Result<Vec<DonorMatch>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .filter(|m| m.request_id == request_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, donor_match: &DonorMatch) -> Result<(), DomainError> {
        let mut stored = donor_match.clone();
        stored.clear_events();
        self.rows
            .lock()
            .map_err(|_| poisoned())?
            .insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, donor_match: &DonorMatch) -> Result<(), DomainError> {
        self.insert(donor_match).await
    }
}

/// In-memory appointment repository.
#[derive(Debug, Default)]
pub struct MemoryAppointmentRepository {
    rows: Mutex<HashMap<i64, Appointment>>,
    next: AtomicI64,
}

impl MemoryAppointmentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for MemoryAppointmentRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_by_id(&self, appointment_id: i64) -> Result<Option<Appointment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .get(&appointment_id)
            .cloned())
    }

    async fn list_by_request(&self, request_id: i64) -> Result<Vec<Appointment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .filter(|a| a.request_id == request_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let mut stored = appointment.clone();
        stored.clear_events();
        self.rows
            .lock()
            .map_err(|_| poisoned())?
            .insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        self.insert(appointment).await
    }
}

/// In-memory post repository.
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    rows: Mutex<HashMap<i64, Post>>,
    next: AtomicI64,
}

impl MemoryPostRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn next_id(&self) -> Result<i64, DomainError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_by_id(&self, post_id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .get(&post_id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| poisoned())?
            .values()
            .any(|p| p.slug == slug))
    }

    async fn insert(&self, post: &Post) -> Result<(), DomainError> {
        let mut stored = post.clone();
        stored.clear_events();
        self.rows
            .lock()
            .map_err(|_| poisoned())?
            .insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        self.insert(post).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hemolink_core::blood::BloodType;
    use hemolink_test_support::FixedClock;
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = MemoryDonorRepository::new();
        let a = repo.next_id().await.unwrap();
        let b = repo.next_id().await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_stored_aggregates_have_empty_buffers() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap());
        let repo = MemoryDonorRepository::new();
        let id = repo.next_id().await.unwrap();
        let donor = Donor::register(
            id,
            7,
            "Amal Perera".to_string(),
            BloodType::ONegative,
            None,
            Uuid::new_v4(),
            &clock,
        )
        .unwrap();
        assert_eq!(donor.pending_events().len(), 1);

        repo.insert(&donor).await.unwrap();

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert!(stored.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = MemoryPostRepository::new();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(repo.find_by_slug("nope").await.unwrap().is_none());
        assert!(!repo.slug_exists("nope").await.unwrap());
    }
}
