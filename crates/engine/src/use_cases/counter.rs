//! Counter use cases: add, update and remove counters on a character.

use sheetkeeper_domain::{
    common::keep_escaped, Archetype, CharacterSheet, Counter, CounterCategory, CounterFactory,
    CounterVariant, DomainError, RenderOptions, UserId,
};

use crate::infrastructure::config::Limits;

use super::error::SheetError;
use super::outcome::MutationOutcome;
use super::sheets::SheetStore;
use super::validation::{lookup_key, stored_comment, stored_name};

/// Arguments for a counter created from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCounter {
    pub name: String,
    pub temp: i64,
    pub perm: i64,
    pub category: CounterCategory,
    pub variant: CounterVariant,
    pub bedlam: i64,
    pub comment: Option<String>,
}

impl NewCounter {
    pub fn new(name: impl Into<String>, temp: i64, perm: i64) -> Self {
        Self {
            name: name.into(),
            temp,
            perm,
            category: CounterCategory::General,
            variant: CounterVariant::default(),
            bedlam: 0,
            comment: None,
        }
    }
}

pub struct CounterOps {
    sheets: SheetStore,
    limits: Limits,
}

impl CounterOps {
    pub fn new(sheets: SheetStore, limits: Limits) -> Self {
        Self { sheets, limits }
    }

    pub async fn add_custom(
        &self,
        user_id: &UserId,
        character: &str,
        new: NewCounter,
    ) -> Result<MutationOutcome, SheetError> {
        let name = stored_name(&new.name, self.limits.max_name_length, "Counter name")?;
        let comment = stored_comment(new.comment.as_deref(), self.limits.max_comment_length)?;
        let counter = Counter::builder(name, new.temp, new.perm, new.category)
            .variant(new.variant)
            .bedlam(new.bedlam)
            .comment(comment)
            .build()?;

        self.add(user_id, character, counter).await
    }

    pub async fn add_predefined(
        &self,
        user_id: &UserId,
        character: &str,
        archetype: Archetype,
        perm: i64,
        override_name: Option<&str>,
        comment: Option<&str>,
    ) -> Result<MutationOutcome, SheetError> {
        let override_name = override_name
            .map(|name| stored_name(name, self.limits.max_name_length, "Counter name"))
            .transpose()?;
        let comment = stored_comment(comment, self.limits.max_comment_length)?;
        let counter = CounterFactory::create(archetype, perm, comment, override_name)?;

        self.add(user_id, character, counter).await
    }

    async fn add(
        &self,
        user_id: &UserId,
        character: &str,
        counter: Counter,
    ) -> Result<MutationOutcome, SheetError> {
        let max = self.limits.max_counters_per_character;
        let (sheet, ()) = self
            .sheets
            .modify(user_id, character, |sheet| {
                if sheet.counters().len() >= max {
                    return Err(SheetError::LimitReached {
                        what: "counters on one character",
                        max,
                    });
                }
                Ok(sheet.add_counter(counter.clone())?)
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            counter = %counter.name(),
            variant = %counter.variant(),
            "Counter added"
        );
        Ok(
            MutationOutcome::new(format!("Added {} to {}", counter.name(), sheet.name()))
                .with_details(counter.render(keep_escaped, RenderOptions::plain())),
        )
    }

    pub async fn set_temp(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        value: i64,
    ) -> Result<MutationOutcome, SheetError> {
        self.update(user_id, character, counter, "temp", |c| c.set_temp(value))
            .await
    }

    pub async fn set_perm(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        value: i64,
    ) -> Result<MutationOutcome, SheetError> {
        self.update(user_id, character, counter, "perm", |c| c.set_perm(value))
            .await
    }

    pub async fn set_bedlam(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        value: i64,
    ) -> Result<MutationOutcome, SheetError> {
        self.update(user_id, character, counter, "bedlam", |c| {
            c.set_bedlam(value)
        })
        .await
    }

    /// Spend (negative) or regain (positive) temp.
    pub async fn adjust_temp(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        delta: i64,
    ) -> Result<MutationOutcome, SheetError> {
        self.update(user_id, character, counter, "temp", |c| c.adjust_temp(delta))
            .await
    }

    /// Replace a counter's comment; `None` or blank text clears it.
    pub async fn set_comment(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        comment: Option<&str>,
    ) -> Result<MutationOutcome, SheetError> {
        let comment = stored_comment(comment, self.limits.max_comment_length)?;
        self.update(user_id, character, counter, "comment", |c| {
            c.set_comment(comment);
            Ok(())
        })
        .await
    }

    pub async fn rename(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        new_name: &str,
    ) -> Result<MutationOutcome, SheetError> {
        let new_name = stored_name(new_name, self.limits.max_name_length, "Counter name")?;
        let old_name = lookup_key(counter);
        let (sheet, ()) = self
            .sheets
            .modify(user_id, character, |sheet| {
                Ok(sheet.rename_counter(&old_name, &new_name)?)
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            from = %old_name,
            to = %new_name,
            "Counter renamed"
        );
        Ok(MutationOutcome::new(format!(
            "Renamed {old_name} to {new_name} on {}",
            sheet.name()
        )))
    }

    pub async fn delete(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
    ) -> Result<MutationOutcome, SheetError> {
        let key = lookup_key(counter);
        let (sheet, removed) = self
            .sheets
            .modify(user_id, character, |sheet| Ok(sheet.remove_counter(&key)?))
            .await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            counter = %removed.name(),
            "Counter removed"
        );
        Ok(MutationOutcome::new(format!(
            "Removed {} from {}",
            removed.name(),
            sheet.name()
        )))
    }

    /// Stored counter names on a character, ordered ignoring case.
    pub async fn names(
        &self,
        user_id: &UserId,
        character: &str,
    ) -> Result<Vec<String>, SheetError> {
        let sheet = self.sheets.load(user_id, character).await?;
        let mut names: Vec<String> = sheet
            .counters()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        names.sort_by_key(|n| n.to_lowercase());
        Ok(names)
    }

    async fn update<F>(
        &self,
        user_id: &UserId,
        character: &str,
        counter: &str,
        field: &'static str,
        change: F,
    ) -> Result<MutationOutcome, SheetError>
    where
        F: FnOnce(&mut Counter) -> Result<(), DomainError>,
    {
        let key = lookup_key(counter);
        let (sheet, updated) = self
            .sheets
            .modify(user_id, character, |sheet: &mut CharacterSheet| {
                let target = sheet.require_counter_mut(&key)?;
                change(target)?;
                Ok(target.clone())
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            counter = %updated.name(),
            field,
            temp = updated.temp(),
            perm = updated.perm(),
            "Counter updated"
        );
        Ok(
            MutationOutcome::new(format!("Updated {} of {}", field, updated.name()))
                .with_details(updated.render(keep_escaped, RenderOptions::plain())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockCharacterRepo;
    use chrono::{TimeZone, Utc};
    use sheetkeeper_domain::{CharacterName, CharacterTemplate};
    use std::sync::{Arc, Mutex};

    fn now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn changeling() -> CharacterSheet {
        CharacterSheet::from_template(
            UserId::new("user-1"),
            CharacterName::new("Nadia").unwrap(),
            CharacterTemplate::Changeling,
            now(),
        )
        .unwrap()
    }

    /// Repo holding one sheet; saves are captured for inspection.
    fn repo_with(sheet: CharacterSheet) -> (MockCharacterRepo, Arc<Mutex<Vec<CharacterSheet>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .withf(|_, name| name.eq_ignore_ascii_case("nadia"))
            .returning(move |_, _| Ok(Some(sheet.clone())));
        let sink = saved.clone();
        repo.expect_save().returning(move |sheet| {
            sink.lock().unwrap().push(sheet.clone());
            Ok(())
        });
        (repo, saved)
    }

    fn ops(repo: MockCharacterRepo) -> CounterOps {
        ops_with_limits(repo, Limits::default())
    }

    fn ops_with_limits(repo: MockCharacterRepo, limits: Limits) -> CounterOps {
        let sheets = SheetStore::new(Arc::new(repo), Arc::new(FixedClock(now())));
        CounterOps::new(sheets, limits)
    }

    fn user() -> UserId {
        UserId::new("user-1")
    }

    #[tokio::test]
    async fn set_temp_clamps_and_saves() {
        let (repo, saved) = repo_with(changeling());

        let outcome = ops(repo)
            .set_temp(&user(), "Nadia", "Glamour", 12)
            .await
            .unwrap();

        assert_eq!(outcome.details.as_deref(), Some("glamour:\n4/4"));
        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].counter("glamour").map(|c| c.temp()), Some(4));
    }

    #[tokio::test]
    async fn negative_temp_is_rejected_and_nothing_is_saved() {
        let (repo, saved) = repo_with(changeling());

        let result = ops(repo).set_temp(&user(), "Nadia", "glamour", -1).await;

        assert!(matches!(
            result,
            Err(SheetError::Domain(DomainError::NegativeValue { field: "temp", .. }))
        ));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_bedlam_above_perm_is_rejected() {
        let (repo, saved) = repo_with(changeling());

        let result = ops(repo).set_bedlam(&user(), "Nadia", "willpower", 5).await;

        assert!(matches!(
            result,
            Err(SheetError::Domain(DomainError::BedlamExceedsMax { bedlam: 5, perm: 4 }))
        ));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_bedlam_updates_overlay() {
        let (repo, saved) = repo_with(changeling());

        ops(repo)
            .set_bedlam(&user(), "Nadia", "willpower", 2)
            .await
            .unwrap();

        let saved = saved.lock().unwrap();
        assert_eq!(saved[0].counter("willpower").map(|c| c.bedlam()), Some(2));
        assert_eq!(saved[0].updated_at(), now());
    }

    #[tokio::test]
    async fn adjust_temp_spends_points() {
        let (repo, saved) = repo_with(changeling());

        ops(repo)
            .adjust_temp(&user(), "Nadia", "glamour", -3)
            .await
            .unwrap();

        assert_eq!(
            saved.lock().unwrap()[0].counter("glamour").map(|c| c.temp()),
            Some(1)
        );
    }

    #[tokio::test]
    async fn set_perm_lowers_capped_temp() {
        let (repo, saved) = repo_with(changeling());

        ops(repo).set_perm(&user(), "Nadia", "glamour", 2).await.unwrap();

        let saved = saved.lock().unwrap();
        let glamour = saved[0].counter("glamour").unwrap();
        assert_eq!((glamour.temp(), glamour.perm()), (2, 2));
    }

    #[tokio::test]
    async fn unknown_counter_is_not_found() {
        let (repo, saved) = repo_with(changeling());

        let result = ops(repo).set_temp(&user(), "Nadia", "Rage", 1).await;

        assert!(matches!(result, Err(SheetError::Domain(ref e)) if e.is_not_found()));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_, _| Ok(None));
        repo.expect_save().never();

        let result = ops(repo).set_temp(&user(), "Bram", "glamour", 1).await;
        assert!(matches!(result, Err(SheetError::CharacterNotFound(_))));
    }

    #[tokio::test]
    async fn add_predefined_requires_name_for_items() {
        let (repo, saved) = repo_with(changeling());

        let result = ops(repo)
            .add_predefined(&user(), "Nadia", Archetype::ItemWithCharges, 3, None, None)
            .await;

        assert!(matches!(
            result,
            Err(SheetError::Domain(DomainError::MissingRequiredName(_)))
        ));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_predefined_escapes_names_and_comments() {
        let (repo, saved) = repo_with(changeling());

        let outcome = ops(repo)
            .add_predefined(
                &user(),
                "Nadia",
                Archetype::ItemWithCharges,
                3,
                Some("*Wand*"),
                Some("from the_market"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.message, "Added \\*Wand\\* to Nadia");
        let saved = saved.lock().unwrap();
        let wand = saved[0].counter("\\*wand\\*").unwrap();
        assert_eq!(wand.comment(), Some("from the\\_market"));
    }

    #[tokio::test]
    async fn add_custom_rejects_duplicates() {
        let (repo, _) = repo_with(changeling());

        let result = ops(repo)
            .add_custom(&user(), "Nadia", NewCounter::new("GLAMOUR", 1, 1))
            .await;

        assert!(matches!(
            result,
            Err(SheetError::Domain(DomainError::Constraint(_)))
        ));
    }

    #[tokio::test]
    async fn add_custom_enforces_counter_limit() {
        let (repo, saved) = repo_with(changeling());
        let limits = Limits {
            max_counters_per_character: 4,
            ..Limits::default()
        };

        let result = ops_with_limits(repo, limits)
            .add_custom(&user(), "Nadia", NewCounter::new("Dross", 1, 1))
            .await;

        assert!(matches!(result, Err(SheetError::LimitReached { max: 4, .. })));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_custom_validates_invariants() {
        let (repo, _) = repo_with(changeling());
        let new = NewCounter {
            variant: CounterVariant::PermIsMaximum,
            ..NewCounter::new("Dross", 6, 5)
        };

        let result = ops(repo).add_custom(&user(), "Nadia", new).await;

        assert!(matches!(
            result,
            Err(SheetError::Domain(DomainError::InvariantViolation(_)))
        ));
    }

    #[tokio::test]
    async fn rename_and_delete() {
        let (repo, saved) = repo_with(changeling());
        let ops = ops(repo);

        ops.rename(&user(), "Nadia", "glamour", "Glamour")
            .await
            .unwrap();
        let outcome = ops.delete(&user(), "Nadia", "banality").await.unwrap();

        assert_eq!(outcome.message, "Removed banality from Nadia");
        let saved = saved.lock().unwrap();
        assert!(saved[0].counter("glamour").is_some_and(|c| c.name() == "Glamour"));
        assert!(saved[1].counter("banality").is_none());
    }

    #[tokio::test]
    async fn comment_can_be_cleared() {
        let (repo, saved) = repo_with(changeling());
        let ops = ops(repo);

        ops.set_comment(&user(), "Nadia", "glamour", Some("borrowed"))
            .await
            .unwrap();
        ops.set_comment(&user(), "Nadia", "glamour", None)
            .await
            .unwrap();

        let saved = saved.lock().unwrap();
        assert_eq!(saved[0].counter("glamour").unwrap().comment(), Some("borrowed"));
        assert_eq!(saved[1].counter("glamour").unwrap().comment(), None);
    }
}
