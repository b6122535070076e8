//! Commands for the Donor Matching context.

use hemolink_core::command::Command;
use uuid::Uuid;

/// Command to propose a donor for a blood request.
#[derive(Debug, Clone)]
pub struct ProposeMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The blood request to match.
    pub request_id: i64,
    /// The donor being proposed.
    pub donor_id: i64,
    /// Optional compatibility score in `[0, 1]`.
    pub compatibility_score: Option<f64>,
    /// Distance between donor and request, in kilometers.
    pub distance_km: f64,
}

impl Command for ProposeMatch {
    fn command_type(&self) -> &'static str {
        "matching.propose_match"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record that a donor has been contacted.
#[derive(Debug, Clone)]
pub struct MarkMatchContacted {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The match identifier.
    pub match_id: i64,
}

impl Command for MarkMatchContacted {
    fn command_type(&self) -> &'static str {
        "matching.mark_contacted"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record a donor's acceptance.
#[derive(Debug, Clone)]
pub struct AcceptMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The match identifier.
    pub match_id: i64,
}

impl Command for AcceptMatch {
    fn command_type(&self) -> &'static str {
        "matching.accept_match"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record a donor's refusal.
#[derive(Debug, Clone)]
pub struct DeclineMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The match identifier.
    pub match_id: i64,
    /// Free-text reason, if the donor gave one.
    pub reason: Option<String>,
}

impl Command for DeclineMatch {
    fn command_type(&self) -> &'static str {
        "matching.decline_match"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record that a contacted donor never responded.
#[derive(Debug, Clone)]
pub struct MarkMatchNoAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The match identifier.
    pub match_id: i64,
}

impl Command for MarkMatchNoAnswer {
    fn command_type(&self) -> &'static str {
        "matching.mark_no_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
