//! Unified error types for the domain layer
//!
//! Every fallible counter, health, and sheet operation returns [`DomainError`].
//! The engine maps each kind to a user-facing reply; the domain never formats
//! platform-specific responses.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A variant-specific numeric rule was broken while constructing a value
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A mutation would drive a value below zero
    #[error("{field} cannot be negative (got {value})")]
    NegativeValue { field: &'static str, value: i64 },

    /// A bedlam update would exceed the counter's permanent value
    #[error("Bedlam {bedlam} cannot exceed the permanent value {perm}")]
    BedlamExceedsMax { bedlam: i64, perm: u32 },

    /// The archetype needs an explicit counter name
    #[error("A name is required for {0} counters")]
    MissingRequiredName(&'static str),

    /// The archetype is not part of the catalog
    #[error("Unknown counter archetype: {0}")]
    UnknownArchetype(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("{entity_type} not found: {name}")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates an invariant violation for values that can never be valid.
    ///
    /// Construction-time failures use this kind; runtime mutations clamp
    /// or reject with a more specific kind instead.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create a negative value error for the named field
    pub fn negative(field: &'static str, value: i64) -> Self {
        Self::NegativeValue { field, value }
    }

    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a value is well-formed but not acceptable here:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    /// - The operation does not apply to this counter variant
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Counter name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
