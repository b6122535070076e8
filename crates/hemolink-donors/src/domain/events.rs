//! Domain events for the Donor context.

use chrono::NaiveDate;
use hemolink_core::blood::BloodType;
use hemolink_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type name for `DonorRegistered`.
pub const DONOR_REGISTERED_EVENT_TYPE: &str = "donor.registered";
/// Event type name for `DonationRecorded`.
pub const DONATION_RECORDED_EVENT_TYPE: &str = "donor.donation_recorded";

/// Emitted when a donor registers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorRegistered {
    /// The donor identifier.
    pub donor_id: i64,
    /// The backing user account.
    pub user_id: i64,
    /// The donor's blood type.
    pub blood_type: BloodType,
}

/// Emitted when a completed donation is recorded against a donor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRecorded {
    /// The donor identifier.
    pub donor_id: i64,
    /// The date of the donation.
    pub donated_on: NaiveDate,
    /// When the donor becomes eligible again.
    pub next_eligible_on: NaiveDate,
}

/// Event payload variants for the Donor context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DonorEventKind {
    /// A donor has registered.
    Registered(DonorRegistered),
    /// A donation has been recorded.
    DonationRecorded(DonationRecorded),
}

/// Domain event envelope for the Donor context.
#[derive(Debug, Clone)]
pub struct DonorEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: DonorEventKind,
}

impl DomainEvent for DonorEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            DonorEventKind::Registered(_) => DONOR_REGISTERED_EVENT_TYPE,
            DonorEventKind::DonationRecorded(_) => DONATION_RECORDED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).expect("DonorEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
