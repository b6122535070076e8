//! Shared application state.

use std::sync::Arc;

use hemolink_content::domain::repository::PostRepository;
use hemolink_core::clock::Clock;
use hemolink_core::publisher::EventPublisher;
use hemolink_donors::domain::repository::DonorRepository;
use hemolink_matching::domain::repository::MatchRepository;
use hemolink_requests::domain::repository::RequestRepository;
use hemolink_scheduling::domain::repository::AppointmentRepository;

/// Application state shared across all request handlers.
///
/// Repositories and the publisher are behind trait objects so the same
/// routes serve both the Postgres-backed server and in-memory test apps.
#[derive(Clone)]
pub struct AppState {
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Domain event publisher.
    pub publisher: Arc<dyn EventPublisher>,
    /// Donor repository.
    pub donors: Arc<dyn DonorRepository>,
    /// Blood request repository.
    pub requests: Arc<dyn RequestRepository>,
    /// Donor match repository.
    pub matches: Arc<dyn MatchRepository>,
    /// Appointment repository.
    pub appointments: Arc<dyn AppointmentRepository>,
    /// Post repository.
    pub posts: Arc<dyn PostRepository>,
}
