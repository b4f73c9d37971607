//! Character sheet aggregate - one user's character with its counters and health
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: counters and tracks are reached through name/kind lookups
//! - **Unique keys**: counter names are unique ignoring case, one health track per kind
//! - **Timestamps are passed in**: the aggregate never reads the clock itself

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::names_match;
use crate::entities::{CharacterTemplate, Counter, HealthTrack};
use crate::error::DomainError;
use crate::ids::{CharacterId, UserId};
use crate::rendering::render_counters;
use crate::value_objects::{CharacterName, HealthKind, RenderOptions};

/// A character sheet owned by one user.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use sheetkeeper_domain::{CharacterName, CharacterSheet, CharacterTemplate, UserId};
///
/// let name = CharacterName::new("Nadia").unwrap();
/// let sheet = CharacterSheet::from_template(
///     UserId::new("42"),
///     name,
///     CharacterTemplate::Vampire,
///     Utc::now(),
/// )
/// .unwrap();
///
/// assert!(sheet.counter("blood_pool").is_some());
/// assert_eq!(sheet.health_tracks().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CharacterSheetWireFormat", into = "CharacterSheetWireFormat")]
pub struct CharacterSheet {
    id: CharacterId,
    user_id: UserId,
    name: CharacterName,
    counters: Vec<Counter>,
    health: Vec<HealthTrack>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CharacterSheet {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Empty sheet with no counters and no health tracks.
    pub fn new(user_id: UserId, name: CharacterName, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            user_id,
            name,
            counters: Vec::new(),
            health: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sheet seeded with a template's counters and health tracks.
    pub fn from_template(
        user_id: UserId,
        name: CharacterName,
        template: CharacterTemplate,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let mut sheet = Self::new(user_id, name, now);
        for counter in template.counters()? {
            sheet.add_counter(counter)?;
        }
        for kind in template.health_kinds() {
            sheet.add_health_track(HealthTrack::new(*kind))?;
        }
        Ok(sheet)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    #[inline]
    pub fn health_tracks(&self) -> &[HealthTrack] {
        &self.health
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Counters
    // =========================================================================

    pub fn counter(&self, name: &str) -> Option<&Counter> {
        self.counters.iter().find(|c| names_match(c.name(), name))
    }

    pub fn counter_mut(&mut self, name: &str) -> Option<&mut Counter> {
        self.counters.iter_mut().find(|c| names_match(c.name(), name))
    }

    /// Like [`counter_mut`](Self::counter_mut) but a missing counter is an error.
    pub fn require_counter_mut(&mut self, name: &str) -> Result<&mut Counter, DomainError> {
        self.counter_mut(name)
            .ok_or_else(|| DomainError::not_found("Counter", name))
    }

    /// # Errors
    ///
    /// `Constraint` if a counter with the same name (ignoring case) exists.
    pub fn add_counter(&mut self, counter: Counter) -> Result<(), DomainError> {
        if self.counter(counter.name()).is_some() {
            return Err(DomainError::constraint(format!(
                "{} already has a counter named {}",
                self.name,
                counter.name()
            )));
        }
        self.counters.push(counter);
        Ok(())
    }

    pub fn remove_counter(&mut self, name: &str) -> Result<Counter, DomainError> {
        let index = self
            .counters
            .iter()
            .position(|c| names_match(c.name(), name))
            .ok_or_else(|| DomainError::not_found("Counter", name))?;
        Ok(self.counters.remove(index))
    }

    /// Rename a counter, keeping names unique.
    ///
    /// Changing only the case of a counter's own name is allowed.
    pub fn rename_counter(&mut self, name: &str, new_name: &str) -> Result<(), DomainError> {
        if !names_match(name, new_name) && self.counter(new_name).is_some() {
            return Err(DomainError::constraint(format!(
                "{} already has a counter named {}",
                self.name,
                new_name.trim()
            )));
        }
        self.require_counter_mut(name)?.rename(new_name)
    }

    // =========================================================================
    // Health
    // =========================================================================

    pub fn health(&self, kind: HealthKind) -> Option<&HealthTrack> {
        self.health.iter().find(|t| t.kind() == kind)
    }

    pub fn health_mut(&mut self, kind: HealthKind) -> Option<&mut HealthTrack> {
        self.health.iter_mut().find(|t| t.kind() == kind)
    }

    pub fn require_health_mut(
        &mut self,
        kind: HealthKind,
    ) -> Result<&mut HealthTrack, DomainError> {
        self.health_mut(kind)
            .ok_or_else(|| DomainError::not_found("Health track", kind.display_name()))
    }

    /// # Errors
    ///
    /// `Constraint` if the sheet already has a track of that kind.
    pub fn add_health_track(&mut self, track: HealthTrack) -> Result<(), DomainError> {
        if self.health(track.kind()).is_some() {
            return Err(DomainError::constraint(format!(
                "{} already has a {} track",
                self.name,
                track.kind().display_name()
            )));
        }
        self.health.push(track);
        self.health.sort_by_key(|t| t.kind() != HealthKind::Normal);
        Ok(())
    }

    pub fn remove_health_track(&mut self, kind: HealthKind) -> Result<HealthTrack, DomainError> {
        let index = self
            .health
            .iter()
            .position(|t| t.kind() == kind)
            .ok_or_else(|| DomainError::not_found("Health track", kind.display_name()))?;
        Ok(self.health.remove(index))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render_counters<F>(&self, unescape: F, options: RenderOptions) -> String
    where
        F: Fn(&str) -> String,
    {
        render_counters(&self.counters, unescape, options)
    }

    /// Every health track under its own heading, normal track first.
    pub fn render_health(&self) -> String {
        self.health
            .iter()
            .map(|t| format!("**{}**\n{}", t.kind().display_name(), t.render()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Record a modification time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

// ============================================================================
// Serde wire format
// ============================================================================

#[derive(Serialize, Deserialize)]
struct CharacterSheetWireFormat {
    id: CharacterId,
    user_id: UserId,
    name: CharacterName,
    #[serde(default)]
    counters: Vec<Counter>,
    #[serde(default)]
    health: Vec<HealthTrack>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CharacterSheetWireFormat> for CharacterSheet {
    type Error = DomainError;

    fn try_from(wire: CharacterSheetWireFormat) -> Result<Self, Self::Error> {
        let mut sheet = CharacterSheet {
            id: wire.id,
            user_id: wire.user_id,
            name: wire.name,
            counters: Vec::with_capacity(wire.counters.len()),
            health: Vec::with_capacity(wire.health.len()),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        };
        for counter in wire.counters {
            sheet.add_counter(counter)?;
        }
        for track in wire.health {
            sheet.add_health_track(track)?;
        }
        Ok(sheet)
    }
}

impl From<CharacterSheet> for CharacterSheetWireFormat {
    fn from(sheet: CharacterSheet) -> Self {
        Self {
            id: sheet.id,
            user_id: sheet.user_id,
            name: sheet.name,
            counters: sheet.counters,
            health: sheet.health,
            created_at: sheet.created_at,
            updated_at: sheet.updated_at,
        }
    }
}
