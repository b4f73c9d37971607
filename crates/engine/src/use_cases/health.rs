//! Health use cases: track management, damage and healing.

use sheetkeeper_domain::{
    DamageSeverity, DomainError, HealthKind, HealthLevel, HealthTrack, UserId,
};

use super::error::SheetError;
use super::outcome::MutationOutcome;
use super::sheets::SheetStore;

pub struct HealthOps {
    sheets: SheetStore,
}

impl HealthOps {
    pub fn new(sheets: SheetStore) -> Self {
        Self { sheets }
    }

    /// Add a health track of `kind`; `levels` defaults to the standard track.
    pub async fn add_track(
        &self,
        user_id: &UserId,
        character: &str,
        kind: HealthKind,
        levels: Option<Vec<HealthLevel>>,
    ) -> Result<MutationOutcome, SheetError> {
        let track = match levels {
            Some(levels) => HealthTrack::with_levels(kind, levels)?,
            None => HealthTrack::new(kind),
        };
        let rendered = track.render();
        let (sheet, ()) = self
            .sheets
            .modify(user_id, character, |sheet| Ok(sheet.add_health_track(track)?))
            .await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            kind = %kind,
            "Health track added"
        );
        Ok(MutationOutcome::new(format!(
            "Added {} to {}",
            kind.display_name(),
            sheet.name()
        ))
        .with_details(rendered))
    }

    pub async fn remove_track(
        &self,
        user_id: &UserId,
        character: &str,
        kind: HealthKind,
    ) -> Result<MutationOutcome, SheetError> {
        let (sheet, _) = self
            .sheets
            .modify(user_id, character, |sheet| {
                Ok(sheet.remove_health_track(kind)?)
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            kind = %kind,
            "Health track removed"
        );
        Ok(MutationOutcome::new(format!(
            "Removed {} from {}",
            kind.display_name(),
            sheet.name()
        )))
    }

    /// Apply damage. Levels the track has no room for are reported in the
    /// message; everything that fit is still saved.
    pub async fn damage(
        &self,
        user_id: &UserId,
        character: &str,
        kind: HealthKind,
        levels: i64,
        severity: DamageSeverity,
    ) -> Result<MutationOutcome, SheetError> {
        if levels < 0 {
            return Err(DomainError::negative("levels", levels).into());
        }
        let (sheet, overflow) = self
            .sheets
            .modify(user_id, character, |sheet| {
                Ok(sheet.require_health_mut(kind)?.add_damage(levels, severity))
            })
            .await?;

        let track = sheet.health(kind);
        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            kind = %kind,
            levels,
            severity = %severity,
            penalty = ?track.and_then(HealthTrack::current_penalty),
            overflow = overflow.is_some(),
            "Damage applied"
        );

        let message = match overflow {
            Some(overflow) => overflow,
            None => format!("{} took {levels} {severity} damage", sheet.name()),
        };
        Ok(MutationOutcome::new(message)
            .with_details(track.map(HealthTrack::render).unwrap_or_default()))
    }

    /// Heal `levels` wounds, least severe first.
    pub async fn heal(
        &self,
        user_id: &UserId,
        character: &str,
        kind: HealthKind,
        levels: i64,
    ) -> Result<MutationOutcome, SheetError> {
        if levels < 0 {
            return Err(DomainError::negative("levels", levels).into());
        }
        let (sheet, ()) = self
            .sheets
            .modify(user_id, character, |sheet| {
                sheet.require_health_mut(kind)?.remove_damage(levels);
                Ok(())
            })
            .await?;

        let track = sheet.health(kind);
        tracing::info!(
            user_id = %user_id,
            character = %sheet.name(),
            kind = %kind,
            levels,
            "Damage healed"
        );
        Ok(
            MutationOutcome::new(format!("{} healed {levels} levels", sheet.name()))
                .with_details(track.map(HealthTrack::render).unwrap_or_default()),
        )
    }

    /// Render every health track of a character.
    pub async fn show(
        &self,
        user_id: &UserId,
        character: &str,
    ) -> Result<MutationOutcome, SheetError> {
        let sheet = self.sheets.load(user_id, character).await?;
        if sheet.health_tracks().is_empty() {
            return Ok(MutationOutcome::new(format!("{} has no health tracks", sheet.name())));
        }
        Ok(MutationOutcome::new(format!("**{}**", sheet.name()))
            .with_details(sheet.render_health()))
    }
}
