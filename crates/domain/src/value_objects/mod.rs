//! Value objects - Immutable objects defined by their attributes

mod category;
mod counter_variant;
mod damage;
mod names;
mod render_options;

pub use category::CounterCategory;
pub use counter_variant::CounterVariant;
pub use damage::{DamageSeverity, HealthKind, HealthLevel, UNMARKED_GLYPH};
pub use names::{CharacterName, MAX_NAME_LENGTH};
pub(crate) use names::validate_name;
pub use render_options::{RenderOptions, DEFAULT_PRETTY_MAX_PERM};
