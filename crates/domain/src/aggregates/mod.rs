//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//!
//! Aggregates stay pure: persistence and the read-modify-write cycle belong to
//! the engine's repositories.

pub mod character_sheet;

pub use character_sheet::CharacterSheet;
