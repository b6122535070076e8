//! Query handlers for the Donor Matching context.

use chrono::{DateTime, Utc};
use hemolink_core::error::DomainError;
use serde::Serialize;

use crate::domain::aggregates::DonorMatch;
use crate::domain::repository::MatchRepository;

/// Read-only view of a donor match.
#[derive(Debug, Serialize)]
pub struct MatchView {
    /// The match identifier.
    pub match_id: i64,
    /// The blood request this match belongs to.
    pub request_id: i64,
    /// The proposed donor.
    pub donor_id: i64,
    /// Optional compatibility score.
    pub compatibility_score: Option<f64>,
    /// Distance in kilometers.
    pub distance_km: f64,
    /// Lifecycle status ("PROPOSED", "CONTACTED", ...).
    pub status: &'static str,
    /// When the donor was contacted, if ever.
    pub contacted_at: Option<DateTime<Utc>>,
    /// The donor's recorded response, if any.
    pub response: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&DonorMatch> for MatchView {
    fn from(donor_match: &DonorMatch) -> Self {
        Self {
            match_id: donor_match.id,
            request_id: donor_match.request_id,
            donor_id: donor_match.donor_id,
            compatibility_score: donor_match.compatibility_score,
            distance_km: donor_match.distance_km,
            status: donor_match.status().as_str(),
            contacted_at: donor_match.contacted_at,
            response: donor_match.response.clone(),
            created_at: donor_match.created_at,
        }
    }
}

/// Retrieves a match by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the match does not exist.
pub async fn get_match_by_id(
    match_id: i64,
    repo: &dyn MatchRepository,
) -> Result<MatchView, DomainError> {
    let donor_match = repo
        .find_by_id(match_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "match",
            id: match_id,
        })?;
    Ok(MatchView::from(&donor_match))
}

/// Lists all matches proposed for a blood request, ordered by id.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` on a storage failure.
pub async fn list_matches_for_request(
    request_id: i64,
    repo: &dyn MatchRepository,
) -> Result<Vec<MatchView>, DomainError> {
    let mut matches = repo.list_by_request(request_id).await?;
    matches.sort_by_key(|m| m.id);
    Ok(matches.iter().map(MatchView::from).collect())
}
