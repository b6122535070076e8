//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Domain code never catches these; they propagate to the application layer
/// and from there to the HTTP error mapper.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An aggregate or stored entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },

    /// A behavior method's precondition rule is broken. Raised before any
    /// state mutation occurs.
    #[error("rule violation: {0}")]
    RuleViolation(String),

    /// Out-of-range or malformed input rejected at construction time.
    #[error("validation error: {0}")]
    Validation(String),

    /// A persistence or subscriber plumbing error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
