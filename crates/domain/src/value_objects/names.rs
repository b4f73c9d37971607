//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within the hard length cap
//! - Trimmed of leading/trailing whitespace
//!
//! Deployment-specific (tighter) limits are checked by the engine before a
//! name ever reaches these constructors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Hard cap for name fields (CharacterName, counter names)
pub const MAX_NAME_LENGTH: usize = 200;

/// Trim and validate a name for the given entity kind.
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{kind} name cannot be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{kind} name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("Character", &name.into()).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used as the storage key.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_name_is_trimmed() {
        let name = CharacterName::new("  Silver Fang  ").expect("valid name");
        assert_eq!(name.as_str(), "Silver Fang");
        assert_eq!(name.key(), "silver fang");
    }

    #[test]
    fn character_name_rejects_blank() {
        assert!(matches!(
            CharacterName::new("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn character_name_rejects_overlong() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(CharacterName::new(long).is_err());
    }

    #[test]
    fn character_name_serde_validates() {
        let parsed: Result<CharacterName, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: CharacterName = serde_json::from_str("\"Mari\"").expect("valid json");
        assert_eq!(parsed.as_str(), "Mari");
    }
}
