//! Sheetkeeper domain: counters, health tracks and character sheets.
//!
//! Pure and synchronous. Every operation takes a record, mutates it in place or
//! returns a [`DomainError`], and performs no I/O.

pub mod common;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod rendering;
pub mod value_objects;

pub use aggregates::CharacterSheet;
pub use entities::{
    Archetype, CharacterTemplate, Counter, CounterBuilder, CounterFactory, HealthTrack,
};
pub use error::DomainError;
pub use ids::{CharacterId, UserId};
pub use rendering::render_counters;
pub use value_objects::{
    CharacterName, CounterCategory, CounterVariant, DamageSeverity, HealthKind, HealthLevel,
    RenderOptions, DEFAULT_PRETTY_MAX_PERM, MAX_NAME_LENGTH, UNMARKED_GLYPH,
};
