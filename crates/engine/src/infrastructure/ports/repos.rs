//! Repository port traits for database access.

use async_trait::async_trait;
use sheetkeeper_domain::{CharacterSheet, UserId};

use super::error::RepoError;

// =============================================================================
// Character Sheet Storage
// =============================================================================

/// Document store for character sheets, keyed by owner and case-insensitive name.
///
/// Whole sheets are read and written; the last `save` for a key wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, user_id: &UserId, name: &str) -> Result<Option<CharacterSheet>, RepoError>;

    /// All of a user's sheets, ordered by name ignoring case.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CharacterSheet>, RepoError>;

    async fn count_for_user(&self, user_id: &UserId) -> Result<usize, RepoError>;

    /// Insert or replace the sheet stored under its owner and name.
    async fn save(&self, sheet: &CharacterSheet) -> Result<(), RepoError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, user_id: &UserId, name: &str) -> Result<bool, RepoError>;
}
