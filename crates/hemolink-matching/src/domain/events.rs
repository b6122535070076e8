//! Domain events for the Donor Matching context.

use hemolink_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type name for `MatchProposed`.
pub const MATCH_PROPOSED_EVENT_TYPE: &str = "match.proposed";
/// Event type name for `MatchContacted`.
pub const MATCH_CONTACTED_EVENT_TYPE: &str = "match.contacted";
/// Event type name for `MatchAccepted`.
pub const MATCH_ACCEPTED_EVENT_TYPE: &str = "match.accepted";
/// Event type name for `MatchDeclined`.
pub const MATCH_DECLINED_EVENT_TYPE: &str = "match.declined";
/// Event type name for `MatchWentUnanswered`.
pub const MATCH_NO_ANSWER_EVENT_TYPE: &str = "match.no_answer";

/// Emitted when a donor is proposed for a blood request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProposed {
    /// The match identifier.
    pub match_id: i64,
    /// The blood request being matched.
    pub request_id: i64,
    /// The proposed donor.
    pub donor_id: i64,
    /// Distance between donor and request, in kilometers.
    pub distance_km: f64,
}

/// Emitted when the donor has been contacted about a proposed match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContacted {
    /// The match identifier.
    pub match_id: i64,
    /// The contacted donor.
    pub donor_id: i64,
}

/// Emitted when the donor accepts a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAccepted {
    /// The match identifier.
    pub match_id: i64,
    /// The blood request being matched.
    pub request_id: i64,
    /// The accepting donor.
    pub donor_id: i64,
}

/// Emitted when the donor declines a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDeclined {
    /// The match identifier.
    pub match_id: i64,
    /// The declining donor.
    pub donor_id: i64,
    /// Free-text reason, if the donor gave one.
    pub reason: Option<String>,
}

/// Emitted when a contacted donor never responded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWentUnanswered {
    /// The match identifier.
    pub match_id: i64,
    /// The unresponsive donor.
    pub donor_id: i64,
}

/// Event payload variants for the Donor Matching context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEventKind {
    /// A donor has been proposed for a request.
    Proposed(MatchProposed),
    /// The donor has been contacted.
    Contacted(MatchContacted),
    /// The donor accepted.
    Accepted(MatchAccepted),
    /// The donor declined.
    Declined(MatchDeclined),
    /// The donor never answered.
    NoAnswer(MatchWentUnanswered),
}

/// Domain event envelope for the Donor Matching context.
#[derive(Debug, Clone)]
pub struct MatchEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: MatchEventKind,
}

impl DomainEvent for MatchEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            MatchEventKind::Proposed(_) => MATCH_PROPOSED_EVENT_TYPE,
            MatchEventKind::Contacted(_) => MATCH_CONTACTED_EVENT_TYPE,
            MatchEventKind::Accepted(_) => MATCH_ACCEPTED_EVENT_TYPE,
            MatchEventKind::Declined(_) => MATCH_DECLINED_EVENT_TYPE,
            MatchEventKind::NoAnswer(_) => MATCH_NO_ANSWER_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("MatchEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
