//! Aggregate roots for the Donor Matching context.

use chrono::{DateTime, Utc};
use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::event::EventMetadata;
use hemolink_core::rule::check_rule;
use uuid::Uuid;

use super::events::{
    MatchAccepted, MatchContacted, MatchDeclined, MatchEvent, MatchEventKind, MatchProposed,
    MatchWentUnanswered,
};
use super::rules::{
    MatchCanBeAccepted, MatchCanBeContacted, MatchCanBeDeclined, MatchCanBeMarkedNoAnswer,
};
use hemolink_core::event::DomainEvent;

/// Lifecycle status of a donor match.
///
/// Transitions are strictly ordered: only PROPOSED may become CONTACTED, and
/// only CONTACTED may become one of the three terminal responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// A donor has been proposed for the request; nobody has reached out yet.
    Proposed,
    /// The donor has been contacted and a response is awaited.
    Contacted,
    /// The donor accepted. Terminal.
    Accepted,
    /// The donor declined. Terminal.
    Declined,
    /// The donor never answered. Terminal.
    NoAnswer,
}

impl MatchStatus {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "PROPOSED",
            Self::Contacted => "CONTACTED",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::NoAnswer => "NO_ANSWER",
        }
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROPOSED" => Ok(Self::Proposed),
            "CONTACTED" => Ok(Self::Contacted),
            "ACCEPTED" => Ok(Self::Accepted),
            "DECLINED" => Ok(Self::Declined),
            "NO_ANSWER" => Ok(Self::NoAnswer),
            other => Err(DomainError::Validation(format!(
                "unknown match status: {other}"
            ))),
        }
    }
}

/// The aggregate root for a donor-to-request match.
#[derive(Debug, Clone)]
pub struct DonorMatch {
    /// Aggregate identifier.
    pub id: i64,
    /// The blood request this match belongs to.
    pub request_id: i64,
    /// The proposed donor.
    pub donor_id: i64,
    /// Optional compatibility score in `[0, 1]`.
    pub compatibility_score: Option<f64>,
    /// Distance between donor and request, in kilometers.
    pub distance_km: f64,
    /// Current lifecycle status.
    pub(crate) status: MatchStatus,
    /// When the donor was contacted, if ever.
    pub contacted_at: Option<DateTime<Utc>>,
    /// The donor's recorded response text, if any.
    pub response: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Pending events awaiting the next flush.
    pending_events: Vec<MatchEvent>,
}

impl DonorMatch {
    /// Proposes a donor for a blood request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the distance is negative or the
    /// compatibility score falls outside `[0, 1]`.
    pub fn propose(
        id: i64,
        request_id: i64,
        donor_id: i64,
        compatibility_score: Option<f64>,
        distance_km: f64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        if distance_km < 0.0 {
            return Err(DomainError::Validation(format!(
                "distance must not be negative, got {distance_km}"
            )));
        }
        if let Some(score) = compatibility_score
            && !(0.0..=1.0).contains(&score)
        {
            return Err(DomainError::Validation(format!(
                "compatibility score must be within [0, 1], got {score}"
            )));
        }

        let mut donor_match = Self {
            id,
            request_id,
            donor_id,
            compatibility_score,
            distance_km,
            status: MatchStatus::Proposed,
            contacted_at: None,
            response: None,
            created_at: clock.now(),
            updated_at: None,
            pending_events: Vec::new(),
        };
        donor_match.push_event(
            MatchEventKind::Proposed(MatchProposed {
                match_id: id,
                request_id,
                donor_id,
                distance_km,
            }),
            correlation_id,
            clock,
        );
        Ok(donor_match)
    }

    /// Rebuilds a match from trusted persisted state. Bypasses construction
    /// validation; only the storage layer calls this.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        request_id: i64,
        donor_id: i64,
        compatibility_score: Option<f64>,
        distance_km: f64,
        status: MatchStatus,
        contacted_at: Option<DateTime<Utc>>,
        response: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            request_id,
            donor_id,
            compatibility_score,
            distance_km,
            status,
            contacted_at,
            response,
            created_at,
            updated_at,
            pending_events: Vec::new(),
        }
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Records that the donor has been contacted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the match is PROPOSED.
    pub fn mark_contacted(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&MatchCanBeContacted {
            status: self.status,
        })?;

        self.status = MatchStatus::Contacted;
        self.contacted_at = Some(clock.now());
        self.updated_at = Some(clock.now());
        self.push_event(
            MatchEventKind::Contacted(MatchContacted {
                match_id: self.id,
                donor_id: self.donor_id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records the donor's acceptance.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the match is CONTACTED.
    pub fn accept(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        check_rule(&MatchCanBeAccepted {
            status: self.status,
        })?;

        self.status = MatchStatus::Accepted;
        self.response = Some("ACCEPT".to_string());
        self.updated_at = Some(clock.now());
        self.push_event(
            MatchEventKind::Accepted(MatchAccepted {
                match_id: self.id,
                request_id: self.request_id,
                donor_id: self.donor_id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records the donor's refusal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the match is CONTACTED.
    pub fn decline(
        &mut self,
        reason: Option<String>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&MatchCanBeDeclined {
            status: self.status,
        })?;

        self.status = MatchStatus::Declined;
        self.response = Some("DECLINE".to_string());
        self.updated_at = Some(clock.now());
        self.push_event(
            MatchEventKind::Declined(MatchDeclined {
                match_id: self.id,
                donor_id: self.donor_id,
                reason,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Records that the contacted donor never responded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` unless the match is CONTACTED.
    pub fn mark_no_answer(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&MatchCanBeMarkedNoAnswer {
            status: self.status,
        })?;

        self.status = MatchStatus::NoAnswer;
        self.response = Some("NO_ANSWER".to_string());
        self.updated_at = Some(clock.now());
        self.push_event(
            MatchEventKind::NoAnswer(MatchWentUnanswered {
                match_id: self.id,
                donor_id: self.donor_id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn push_event(&mut self, kind: MatchEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let mut event = MatchEvent {
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

impl AggregateRoot for DonorMatch {
    type Event = MatchEvent;

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
