//! Read-modify-write access to stored character sheets.

use std::sync::Arc;

use sheetkeeper_domain::{CharacterSheet, UserId};

use crate::infrastructure::ports::{CharacterRepo, ClockPort};

use super::error::SheetError;
use super::validation::lookup_key;

/// Loads a sheet, applies a change and saves it back.
///
/// Nothing is written when the change fails. Concurrent writers to the same
/// sheet are not coordinated; the last save wins.
#[derive(Clone)]
pub struct SheetStore {
    repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl SheetStore {
    pub fn new(repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub fn repo(&self) -> &Arc<dyn CharacterRepo> {
        &self.repo
    }

    pub fn clock(&self) -> &Arc<dyn ClockPort> {
        &self.clock
    }

    pub async fn load(&self, user_id: &UserId, name: &str) -> Result<CharacterSheet, SheetError> {
        self.repo
            .get(user_id, &lookup_key(name))
            .await?
            .ok_or_else(|| SheetError::CharacterNotFound(name.trim().to_string()))
    }

    /// Apply `change` to the named sheet and persist the result.
    pub async fn modify<T, F>(
        &self,
        user_id: &UserId,
        name: &str,
        change: F,
    ) -> Result<(CharacterSheet, T), SheetError>
    where
        F: FnOnce(&mut CharacterSheet) -> Result<T, SheetError>,
    {
        let mut sheet = self.load(user_id, name).await?;
        let value = change(&mut sheet)?;
        sheet.touch(self.clock.now());
        self.repo.save(&sheet).await?;
        Ok((sheet, value))
    }
}
