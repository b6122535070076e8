//! Aggregate roots for the Blood Request context.

use chrono::{DateTime, Utc};
use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::blood::BloodType;
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::event::{DomainEvent, EventMetadata};
use hemolink_core::rule::check_rule;
use uuid::Uuid;

use super::address::GeoLocation;
use super::events::{
    RequestCancelled, RequestEvent, RequestEventKind, RequestFulfilled, RequestOpened,
};
use super::rules::{RequestIsOpen, RequestMustHaveLocation, RequestMustHaveValidQuantity};

/// Lifecycle status of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// Accepting matches.
    Open,
    /// Enough blood was collected. Terminal.
    Fulfilled,
    /// Withdrawn by the requester. Terminal.
    Cancelled,
}

impl RequestStatus {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Fulfilled => "FULFILLED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "FULFILLED" => Ok(Self::Fulfilled),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "unknown request status: {other}"
            ))),
        }
    }
}

/// The aggregate root for a blood request.
#[derive(Debug, Clone)]
pub struct BloodRequest {
    /// Aggregate identifier.
    pub id: i64,
    /// The requesting user.
    pub requester_id: i64,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Requested quantity in units.
    pub quantity_units: i32,
    /// Where the blood is needed.
    pub location: GeoLocation,
    /// Stored address backing the location, when one exists.
    pub address_id: Option<i64>,
    /// Current lifecycle status.
    pub(crate) status: RequestStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    pending_events: Vec<RequestEvent>,
}

impl BloodRequest {
    /// Opens a blood request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` for a non-positive quantity or
    /// out-of-range coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: i64,
        requester_id: i64,
        blood_type: BloodType,
        quantity_units: i32,
        latitude: f64,
        longitude: f64,
        address_id: Option<i64>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        check_rule(&RequestMustHaveValidQuantity { quantity_units })?;
        check_rule(&RequestMustHaveLocation {
            latitude,
            longitude,
        })?;
        let location = GeoLocation::new(latitude, longitude)?;

        let mut request = Self {
            id,
            requester_id,
            blood_type,
            quantity_units,
            location,
            address_id,
            status: RequestStatus::Open,
            created_at: clock.now(),
            updated_at: None,
            pending_events: Vec::new(),
        };
        request.push_event(
            RequestEventKind::Opened(RequestOpened {
                request_id: id,
                requester_id,
                blood_type,
                quantity_units,
            }),
            correlation_id,
            clock,
        );
        Ok(request)
    }

    /// Rebuilds a request from trusted persisted state.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        requester_id: i64,
        blood_type: BloodType,
        quantity_units: i32,
        location: GeoLocation,
        address_id: Option<i64>,
        status: RequestStatus,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            requester_id,
            blood_type,
            quantity_units,
            location,
            address_id,
            status,
            created_at,
            updated_at,
            pending_events: Vec::new(),
        }
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Marks the request fulfilled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the request is OPEN.
    pub fn fulfill(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        check_rule(&RequestIsOpen {
            status: self.status,
        })?;

        self.status = RequestStatus::Fulfilled;
        self.updated_at = Some(clock.now());
        self.push_event(
            RequestEventKind::Fulfilled(RequestFulfilled { request_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Cancels the request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the request is OPEN.
    pub fn cancel(
        &mut self,
        reason: Option<String>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&RequestIsOpen {
            status: self.status,
        })?;

        self.status = RequestStatus::Cancelled;
        self.updated_at = Some(clock.now());
        self.push_event(
            RequestEventKind::Cancelled(RequestCancelled {
                request_id: self.id,
                reason,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn push_event(&mut self, kind: RequestEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let mut event = RequestEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: String::new(),
                aggregate_id: self.id,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        event.metadata.event_type = event.event_type().to_owned();
        self.pending_events.push(event);
    }
}

impl AggregateRoot for BloodRequest {
    type Event = RequestEvent;

    fn aggregate_id(&self) -> i64 {
        self.id
    }

    fn pending_events(&self) -> &[Self::Event] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.pending_events)
    }

    fn clear_events(&mut self) {
        self.pending_events.clear();
    }
}
