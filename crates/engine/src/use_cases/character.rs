//! Character lifecycle use cases: create, delete, list and show.

use sheetkeeper_domain::{
    common::keep_escaped, CharacterName, CharacterSheet, CharacterTemplate, HealthKind,
    HealthTrack, RenderOptions, UserId,
};

use crate::infrastructure::config::Limits;

use super::error::SheetError;
use super::outcome::MutationOutcome;
use super::sheets::SheetStore;
use super::validation::{lookup_key, stored_name};

/// Render every counter group followed by every health track.
pub(crate) fn render_sheet(sheet: &CharacterSheet, options: RenderOptions) -> String {
    [sheet.render_counters(keep_escaped, options), sheet.render_health()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub struct CharacterOps {
    sheets: SheetStore,
    limits: Limits,
    pretty_max_perm: u32,
}

impl CharacterOps {
    pub fn new(sheets: SheetStore, limits: Limits, pretty_max_perm: u32) -> Self {
        Self {
            sheets,
            limits,
            pretty_max_perm,
        }
    }

    /// Create a character for `user_id`.
    ///
    /// Without a template the sheet starts with a single normal health track.
    pub async fn create(
        &self,
        user_id: &UserId,
        name: &str,
        template: Option<CharacterTemplate>,
    ) -> Result<MutationOutcome, SheetError> {
        let name = CharacterName::new(stored_name(
            name,
            self.limits.max_name_length,
            "Character name",
        )?)?;

        let repo = self.sheets.repo();
        if repo.count_for_user(user_id).await? >= self.limits.max_characters_per_user {
            return Err(SheetError::LimitReached {
                what: "characters",
                max: self.limits.max_characters_per_user,
            });
        }
        if repo.get(user_id, name.as_str()).await?.is_some() {
            return Err(SheetError::CharacterExists(name.to_string()));
        }

        let now = self.sheets.clock().now();
        let sheet = match template {
            Some(template) => CharacterSheet::from_template(user_id.clone(), name, template, now)?,
            None => {
                let mut sheet = CharacterSheet::new(user_id.clone(), name, now);
                sheet.add_health_track(HealthTrack::new(HealthKind::Normal))?;
                sheet
            }
        };
        repo.save(&sheet).await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            template = ?template,
            "Character created"
        );

        Ok(MutationOutcome::new(format!("Created character {}", sheet.name()))
            .with_details(render_sheet(&sheet, RenderOptions::plain())))
    }

    pub async fn delete(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<MutationOutcome, SheetError> {
        if !self.sheets.repo().delete(user_id, &lookup_key(name)).await? {
            return Err(SheetError::CharacterNotFound(name.trim().to_string()));
        }
        tracing::info!(user_id = %user_id, character = %name.trim(), "Character deleted");
        Ok(MutationOutcome::new(format!(
            "Removed character {}",
            lookup_key(name)
        )))
    }

    /// Stored names of the user's characters, ordered ignoring case.
    pub async fn names(&self, user_id: &UserId) -> Result<Vec<String>, SheetError> {
        Ok(self
            .sheets
            .repo()
            .list_for_user(user_id)
            .await?
            .iter()
            .map(|sheet| sheet.name().to_string())
            .collect())
    }

    pub async fn list(&self, user_id: &UserId) -> Result<MutationOutcome, SheetError> {
        let names = self.names(user_id).await?;
        if names.is_empty() {
            return Ok(MutationOutcome::new("You have no characters yet"));
        }
        Ok(MutationOutcome::new(format!("Your characters ({})", names.len()))
            .with_details(names.join("\n")))
    }

    /// Render a character's counters and health.
    pub async fn show(
        &self,
        user_id: &UserId,
        name: &str,
        pretty: bool,
    ) -> Result<MutationOutcome, SheetError> {
        let sheet = self.sheets.load(user_id, name).await?;
        let options = if pretty {
            RenderOptions::pretty()
        } else {
            RenderOptions::plain()
        }
        .with_pretty_max_perm(self.pretty_max_perm);

        Ok(MutationOutcome::new(format!("**{}**", sheet.name()))
            .with_details(render_sheet(&sheet, options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn ops(repo: MockCharacterRepo) -> CharacterOps {
        let sheets = SheetStore::new(Arc::new(repo), Arc::new(FixedClock(now())));
        CharacterOps::new(sheets, Limits::default(), 15)
    }

    fn sheet(name: &str) -> CharacterSheet {
        CharacterSheet::new(
            UserId::new("user-1"),
            CharacterName::new(name).unwrap(),
            now(),
        )
    }

    #[tokio::test]
    async fn create_saves_template_sheet() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_count_for_user().returning(|_| Ok(0));
        repo.expect_get().returning(|_, _| Ok(None));
        repo.expect_save()
            .withf(|sheet| {
                sheet.name().as_str() == "Nadia"
                    && sheet.counter("blood_pool").is_some()
                    && sheet.health(HealthKind::Normal).is_some()
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = ops(repo)
            .create(&UserId::new("user-1"), " Nadia ", Some(CharacterTemplate::Vampire))
            .await
            .unwrap();

        assert_eq!(outcome.message, "Created character Nadia");
        assert!(outcome.details.unwrap().contains("**General**"));
    }

    #[tokio::test]
    async fn create_without_template_gets_normal_health() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_count_for_user().returning(|_| Ok(0));
        repo.expect_get().returning(|_, _| Ok(None));
        repo.expect_save()
            .withf(|sheet| sheet.counters().is_empty() && sheet.health_tracks().len() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let result = ops(repo).create(&UserId::new("user-1"), "Bram", None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_count_for_user().returning(|_| Ok(1));
        repo.expect_get()
            .withf(|_, name| name == "Nadia")
            .returning(|_, _| Ok(Some(sheet("Nadia"))));
        repo.expect_save().never();

        let result = ops(repo).create(&UserId::new("user-1"), "Nadia", None).await;
        assert!(matches!(result, Err(SheetError::CharacterExists(_))));
    }

    #[tokio::test]
    async fn create_enforces_per_user_limit() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_count_for_user().returning(|_| Ok(10));
        repo.expect_save().never();

        let result = ops(repo).create(&UserId::new("user-1"), "Nadia", None).await;
        assert!(matches!(
            result,
            Err(SheetError::LimitReached { what: "characters", max: 10 })
        ));
    }

    #[tokio::test]
    async fn create_rejects_long_names_before_touching_storage() {
        let repo = MockCharacterRepo::new();
        let long_name = "x".repeat(101);

        let result = ops(repo).create(&UserId::new("user-1"), &long_name, None).await;
        assert!(matches!(result, Err(SheetError::TooLong { max: 100, .. })));
    }

    #[tokio::test]
    async fn delete_missing_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_delete().returning(|_, _| Ok(false));

        let result = ops(repo).delete(&UserId::new("user-1"), "Ghost").await;
        assert!(matches!(result, Err(SheetError::CharacterNotFound(name)) if name == "Ghost"));
    }

    #[tokio::test]
    async fn list_reports_empty_roster() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_list_for_user().returning(|_| Ok(vec![]));

        let outcome = ops(repo).list(&UserId::new("user-1")).await.unwrap();
        assert_eq!(outcome.message, "You have no characters yet");
        assert_eq!(outcome.details, None);
    }

    #[tokio::test]
    async fn list_names_every_character() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_list_for_user()
            .returning(|_| Ok(vec![sheet("Bram"), sheet("Nadia")]));

        let outcome = ops(repo).list(&UserId::new("user-1")).await.unwrap();
        assert_eq!(outcome.details.as_deref(), Some("Bram\nNadia"));
    }

    #[tokio::test]
    async fn show_renders_pretty_sheet() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|user, _| {
            Ok(Some(
                CharacterSheet::from_template(
                    user.clone(),
                    CharacterName::new("Nadia").unwrap(),
                    CharacterTemplate::Mortal,
                    now(),
                )
                .unwrap(),
            ))
        });

        let outcome = ops(repo)
            .show(&UserId::new("user-1"), "nadia", true)
            .await
            .unwrap();
        let details = outcome.details.unwrap();
        assert!(details.starts_with("**Tempers**\nwillpower\n:asterisk: :asterisk: :asterisk:"));
        assert!(details.contains("**Health**\n:white_large_square: Bruised"));
    }

    #[tokio::test]
    async fn repo_errors_propagate() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_, _| {
            Err(RepoError::Database {
                operation: "get",
                message: "Database unavailable".to_string(),
            })
        });

        let result = ops(repo).show(&UserId::new("user-1"), "Nadia", false).await;
        assert!(matches!(result, Err(SheetError::Repo(_))));
    }
}
