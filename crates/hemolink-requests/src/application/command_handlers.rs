//! Command handlers for the Blood Request context.

use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::publisher::EventPublisher;
use hemolink_dispatch::drain_and_publish;

use crate::domain::address::Address;
use crate::domain::aggregates::{BloodRequest, RequestStatus};
use crate::domain::commands::{CancelRequest, CreateAddress, FulfillRequest, OpenRequest};
use crate::domain::repository::RequestRepository;

/// Result of a successfully handled request command.
#[derive(Debug)]
pub struct RequestCommandResult {
    /// The request affected by the command.
    pub request_id: i64,
    /// The request status after the command.
    pub status: RequestStatus,
    /// How many domain events were published.
    pub events_published: usize,
}

async fn load(repo: &dyn RequestRepository, request_id: i64) -> Result<BloodRequest, DomainError> {
    repo.find_by_id(request_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "request",
            id: request_id,
        })
}

/// Handles `OpenRequest`: allocates an id, builds the aggregate, persists
/// it, and publishes the opening event.
///
/// # Errors
///
/// Returns `DomainError` on a broken rule, persistence failure, or a
/// subscriber failure during publish.
pub async fn handle_open_request(
    command: &OpenRequest,
    repo: &dyn RequestRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<RequestCommandResult, DomainError> {
    // A dangling address_id would break the FK on persistence.
    if let Some(address_id) = command.address_id {
        repo.find_address(address_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "address",
                id: address_id,
            })?;
    }

    let request_id = repo.next_id().await?;
    let mut request = BloodRequest::open(
        request_id,
        command.requester_id,
        command.blood_type,
        command.quantity_units,
        command.latitude,
        command.longitude,
        command.address_id,
        command.correlation_id,
        clock,
    )?;

    repo.insert(&request).await?;
    let events_published = drain_and_publish(&mut request, publisher).await?;

    Ok(RequestCommandResult {
        request_id,
        status: request.status(),
        events_published,
    })
}

/// Result of a successfully handled address command.
#[derive(Debug)]
pub struct AddressCommandResult {
    /// The stored address.
    pub address_id: i64,
}

/// Handles `CreateAddress`: allocates an id, validates the fields, and
/// persists the address. Addresses buffer no domain events.
///
/// # Errors
///
/// Returns `DomainError::Validation` for blank required fields or
/// out-of-range coordinates, or `Infrastructure` on a storage failure.
pub async fn handle_create_address(
    command: &CreateAddress,
    repo: &dyn RequestRepository,
    clock: &dyn Clock,
) -> Result<AddressCommandResult, DomainError> {
    let address_id = repo.next_address_id().await?;
    let address = Address::new(
        address_id,
        command.line.clone(),
        command.district.clone(),
        command.city.clone(),
        command.province.clone(),
        command.country.clone(),
        command.postal_code.clone(),
        command.geocoding.clone(),
        command.latitude,
        command.longitude,
        clock,
    )?;

    repo.insert_address(&address).await?;

    Ok(AddressCommandResult { address_id })
}

/// Handles `FulfillRequest`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown request, `RuleViolation`
/// when the request is not OPEN, or a persistence/publish failure.
pub async fn handle_fulfill_request(
    command: &FulfillRequest,
    repo: &dyn RequestRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<RequestCommandResult, DomainError> {
    let mut request = load(repo, command.request_id).await?;
    request.fulfill(command.correlation_id, clock)?;

    repo.update(&request).await?;
    let events_published = drain_and_publish(&mut request, publisher).await?;

    Ok(RequestCommandResult {
        request_id: command.request_id,
        status: request.status(),
        events_published,
    })
}

/// Handles `CancelRequest`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown request, `RuleViolation`
/// when the request is not OPEN, or a persistence/publish failure.
pub async fn handle_cancel_request(
    command: &CancelRequest,
    repo: &dyn RequestRepository,
    publisher: &dyn EventPublisher,
    clock: &dyn Clock,
) -> Result<RequestCommandResult, DomainError> {
    let mut request = load(repo, command.request_id).await?;
    request.cancel(command.reason.clone(), command.correlation_id, clock)?;

    repo.update(&request).await?;
    let events_published = drain_and_publish(&mut request, publisher).await?;

    Ok(RequestCommandResult {
        request_id: command.request_id,
        status: request.status(),
        events_published,
    })
}
