//! Domain events for the Blood Request context.

use hemolink_core::blood::BloodType;
use hemolink_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type name for `RequestOpened`.
pub const REQUEST_OPENED_EVENT_TYPE: &str = "request.opened";
/// Event type name for `RequestFulfilled`.
pub const REQUEST_FULFILLED_EVENT_TYPE: &str = "request.fulfilled";
/// Event type name for `RequestCancelled`.
pub const REQUEST_CANCELLED_EVENT_TYPE: &str = "request.cancelled";

/// Emitted when a blood request is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOpened {
    /// The request identifier.
    pub request_id: i64,
    /// The requesting user.
    pub requester_id: i64,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Requested quantity in units.
    pub quantity_units: i32,
}

/// Emitted when a request is fulfilled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFulfilled {
    /// The request identifier.
    pub request_id: i64,
}

/// Emitted when a request is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCancelled {
    /// The request identifier.
    pub request_id: i64,
    /// Free-text reason, if one was given.
    pub reason: Option<String>,
}

/// Event payload variants for the Blood Request context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestEventKind {
    /// A request has been opened.
    Opened(RequestOpened),
    /// A request has been fulfilled.
    Fulfilled(RequestFulfilled),
    /// A request has been cancelled.
    Cancelled(RequestCancelled),
}

/// Domain event envelope for the Blood Request context.
#[derive(Debug, Clone)]
pub struct RequestEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: RequestEventKind,
}

impl DomainEvent for RequestEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            RequestEventKind::Opened(_) => REQUEST_OPENED_EVENT_TYPE,
            RequestEventKind::Fulfilled(_) => REQUEST_FULFILLED_EVENT_TYPE,
            RequestEventKind::Cancelled(_) => REQUEST_CANCELLED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).expect("RequestEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
