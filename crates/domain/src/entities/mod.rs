//! Domain entities - objects owned by a character sheet

mod character_template;
mod counter;
mod counter_factory;
mod health;

pub use character_template::CharacterTemplate;
pub use counter::{Counter, CounterBuilder};
pub use counter_factory::{Archetype, CounterFactory};
pub use health::HealthTrack;
