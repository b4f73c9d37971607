//! Use cases - User story orchestration.
//!
//! Each module contains the operations for one area of a character sheet.
//! Every mutation loads the sheet, applies a domain operation and saves it
//! only when that operation succeeded.

pub mod character;
pub mod counter;
pub mod error;
pub mod health;
pub mod outcome;
pub mod sheets;
pub mod validation;

pub use character::CharacterOps;
pub use counter::{CounterOps, NewCounter};
pub use error::SheetError;
pub use health::HealthOps;
pub use outcome::MutationOutcome;
pub use sheets::SheetStore;
