//! Query handlers for the Blood Request context.

use chrono::{DateTime, Utc};
use hemolink_core::blood::BloodType;
use hemolink_core::error::DomainError;
use serde::Serialize;

use crate::domain::address::{Address, GeocodingResult};
use crate::domain::aggregates::BloodRequest;
use crate::domain::repository::RequestRepository;

/// Read-only view of a blood request.
#[derive(Debug, Serialize)]
pub struct RequestView {
    /// The request identifier.
    pub request_id: i64,
    /// The requesting user.
    pub requester_id: i64,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Requested quantity in units.
    pub quantity_units: i32,
    /// Latitude of the place of need.
    pub latitude: f64,
    /// Longitude of the place of need.
    pub longitude: f64,
    /// Stored address backing the location, if any.
    pub address_id: Option<i64>,
    /// Lifecycle status ("OPEN", "FULFILLED", "CANCELLED").
    pub status: &'static str,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&BloodRequest> for RequestView {
    fn from(request: &BloodRequest) -> Self {
        Self {
            request_id: request.id,
            requester_id: request.requester_id,
            blood_type: request.blood_type,
            quantity_units: request.quantity_units,
            latitude: request.location.latitude(),
            longitude: request.location.longitude(),
            address_id: request.address_id,
            status: request.status().as_str(),
            created_at: request.created_at,
        }
    }
}

/// Retrieves a request by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the request does not exist.
pub async fn get_request_by_id(
    request_id: i64,
    repo: &dyn RequestRepository,
) -> Result<RequestView, DomainError> {
    let request = repo
        .find_by_id(request_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "request",
            id: request_id,
        })?;
    Ok(RequestView::from(&request))
}

/// Read-only view of a stored address.
#[derive(Debug, Serialize)]
pub struct AddressView {
    /// The address identifier.
    pub address_id: i64,
    /// Street line.
    pub line: String,
    /// District, where present.
    pub district: Option<String>,
    /// City.
    pub city: String,
    /// Province or state.
    pub province: Option<String>,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Geocoding provider output, when the address has been geocoded.
    pub geocoding: Option<GeocodingResult>,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            address_id: address.id,
            line: address.line.clone(),
            district: address.district.clone(),
            city: address.city.clone(),
            province: address.province.clone(),
            country: address.country.clone(),
            postal_code: address.postal_code.clone(),
            geocoding: address.geocoding.clone(),
            latitude: address.location.latitude(),
            longitude: address.location.longitude(),
            created_at: address.created_at,
        }
    }
}

/// Retrieves an address by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the address does not exist.
pub async fn get_address_by_id(
    address_id: i64,
    repo: &dyn RequestRepository,
) -> Result<AddressView, DomainError> {
    let address = repo
        .find_address(address_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "address",
            id: address_id,
        })?;
    Ok(AddressView::from(&address))
}

/// Lists open requests, ordered by id.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` on a storage failure.
pub async fn list_open_requests(
    repo: &dyn RequestRepository,
) -> Result<Vec<RequestView>, DomainError> {
    let mut requests = repo.list_open().await?;
    requests.sort_by_key(|r| r.id);
    Ok(requests.iter().map(RequestView::from).collect())
}
