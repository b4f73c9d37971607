//! Sheetkeeper Engine library.
//!
//! Everything outside the pure domain model.
//!
//! ## Structure
//!
//! - `use_cases/` - Sheet operations (load, apply domain change, save)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - Slash-command parsing, dispatch and autocomplete
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
