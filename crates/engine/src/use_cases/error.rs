//! Error type shared by the sheet use cases.

use sheetkeeper_domain::DomainError;

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while running a sheet command.
///
/// The `Display` text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("You have no character named {0}")]
    CharacterNotFound(String),

    #[error("You already have a character named {0}")]
    CharacterExists(String),

    #[error("You cannot have more than {max} {what}")]
    LimitReached { what: &'static str, max: usize },

    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl SheetError {
    /// Whether the error comes from storage rather than from the user's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Repo(_))
    }
}
