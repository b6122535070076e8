//! Query handlers for the Donor context.

use chrono::{DateTime, NaiveDate, Utc};
use hemolink_core::blood::BloodType;
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use serde::Serialize;

use crate::domain::repository::DonorRepository;

/// Read-only view of a donor.
#[derive(Debug, Serialize)]
pub struct DonorView {
    /// The donor identifier.
    pub donor_id: i64,
    /// The backing user account.
    pub user_id: i64,
    /// Full name.
    pub full_name: String,
    /// Blood type.
    pub blood_type: BloodType,
    /// Contact phone number, if given.
    pub phone: Option<String>,
    /// Next date the donor may donate, when deferred.
    pub next_eligible_on: Option<NaiveDate>,
    /// Whether the donor may donate today.
    pub eligible: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Retrieves a donor by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the donor does not exist.
pub async fn get_donor_by_id(
    donor_id: i64,
    repo: &dyn DonorRepository,
    clock: &dyn Clock,
) -> Result<DonorView, DomainError> {
    let donor = repo
        .find_by_id(donor_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "donor",
            id: donor_id,
        })?;
    Ok(DonorView {
        donor_id: donor.id,
        user_id: donor.user_id,
        full_name: donor.full_name.clone(),
        blood_type: donor.blood_type,
        phone: donor.phone.clone(),
        next_eligible_on: donor.next_eligible_on(),
        eligible: donor.is_eligible(clock),
        created_at: donor.created_at,
    })
}
