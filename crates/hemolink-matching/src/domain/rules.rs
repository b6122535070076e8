//! Business rules for the Donor Matching context.
//!
//! All four transition guards use the same rule-object mechanism so that a
//! broken precondition always surfaces as a `RuleViolation` with a stable
//! message, before any state changes.

use hemolink_core::rule::BusinessRule;

use super::aggregates::MatchStatus;

/// A donor may only be contacted about a match that is still proposed.
#[derive(Debug, Clone, Copy)]
pub struct MatchCanBeContacted {
    /// Current match status.
    pub status: MatchStatus,
}

impl BusinessRule for MatchCanBeContacted {
    fn message(&self) -> String {
        "only a proposed match can be contacted".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != MatchStatus::Proposed
    }
}

/// A match may only be accepted after the donor has been contacted.
#[derive(Debug, Clone, Copy)]
pub struct MatchCanBeAccepted {
    /// Current match status.
    pub status: MatchStatus,
}

impl BusinessRule for MatchCanBeAccepted {
    fn message(&self) -> String {
        "only a contacted match can be accepted".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != MatchStatus::Contacted
    }
}

/// A match may only be declined after the donor has been contacted.
#[derive(Debug, Clone, Copy)]
pub struct MatchCanBeDeclined {
    /// Current match status.
    pub status: MatchStatus,
}

impl BusinessRule for MatchCanBeDeclined {
    fn message(&self) -> String {
        "only a contacted match can be declined".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != MatchStatus::Contacted
    }
}

/// A match may only go unanswered after the donor has been contacted.
#[derive(Debug, Clone, Copy)]
pub struct MatchCanBeMarkedNoAnswer {
    /// Current match status.
    pub status: MatchStatus,
}

impl BusinessRule for MatchCanBeMarkedNoAnswer {
    fn message(&self) -> String {
        "only a contacted match can be marked unanswered".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != MatchStatus::Contacted
    }
}

#[cfg(test)]
mod tests {
    use hemolink_core::rule::BusinessRule;

    use super::*;

    #[test]
    fn test_can_be_contacted_only_from_proposed() {
        assert!(
            !MatchCanBeContacted {
                status: MatchStatus::Proposed
            }
            .is_broken()
        );
        for status in [
            MatchStatus::Contacted,
            MatchStatus::Accepted,
            MatchStatus::Declined,
            MatchStatus::NoAnswer,
        ] {
            assert!(MatchCanBeContacted { status }.is_broken());
        }
    }

    #[test]
    fn test_responses_only_from_contacted() {
        for status in [
            MatchStatus::Proposed,
            MatchStatus::Accepted,
            MatchStatus::Declined,
            MatchStatus::NoAnswer,
        ] {
            assert!(MatchCanBeAccepted { status }.is_broken());
            assert!(MatchCanBeDeclined { status }.is_broken());
            assert!(MatchCanBeMarkedNoAnswer { status }.is_broken());
        }
        assert!(
            !MatchCanBeAccepted {
                status: MatchStatus::Contacted
            }
            .is_broken()
        );
        assert!(
            !MatchCanBeDeclined {
                status: MatchStatus::Contacted
            }
            .is_broken()
        );
        assert!(
            !MatchCanBeMarkedNoAnswer {
                status: MatchStatus::Contacted
            }
            .is_broken()
        );
    }

    #[test]
    fn test_is_broken_is_pure() {
        let rule = MatchCanBeAccepted {
            status: MatchStatus::Proposed,
        };
        assert_eq!(rule.is_broken(), rule.is_broken());
    }
}
