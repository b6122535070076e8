//! Business rule abstraction.
//!
//! A rule is a small predicate object encapsulating a single invariant.
//! Behavior methods check their rules before mutating state, so a broken
//! invariant surfaces before any change is applied.

use crate::error::DomainError;

/// A single-purpose domain invariant.
///
/// Implementations are stateless predicates over constructor-injected data:
/// `is_broken` is a pure function of the rule's fields.
pub trait BusinessRule {
    /// Human-readable description of the violated invariant.
    fn message(&self) -> String;

    /// Returns true when the invariant does not hold.
    fn is_broken(&self) -> bool;
}

/// Checks a rule, failing with the rule's message when it is broken.
///
/// # Errors
///
/// Returns `DomainError::RuleViolation` carrying the rule's message when
/// `is_broken()` is true.
pub fn check_rule(rule: &dyn BusinessRule) -> Result<(), DomainError> {
    if rule.is_broken() {
        return Err(DomainError::RuleViolation(rule.message()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysBroken;

    impl BusinessRule for AlwaysBroken {
        fn message(&self) -> String {
            "the sky must not fall".to_string()
        }

        fn is_broken(&self) -> bool {
            true
        }
    }

    struct NeverBroken;

    impl BusinessRule for NeverBroken {
        fn message(&self) -> String {
            "unused".to_string()
        }

        fn is_broken(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_check_rule_fails_with_rule_message_when_broken() {
        let result = check_rule(&AlwaysBroken);

        match result.unwrap_err() {
            DomainError::RuleViolation(msg) => assert_eq!(msg, "the sky must not fall"),
            other => panic!("expected RuleViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_check_rule_passes_when_not_broken() {
        assert!(check_rule(&NeverBroken).is_ok());
    }

    #[test]
    fn test_is_broken_is_pure() {
        let rule = AlwaysBroken;
        assert_eq!(rule.is_broken(), rule.is_broken());
    }
}
