//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::EngineConfig,
    ports::{CharacterRepo, ClockPort},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the repository ports and use cases. Passed to the command dispatcher.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub config: EngineConfig,
}

/// Container for the port traits the use cases are built on.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub clock: Arc<dyn ClockPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: use_cases::CharacterOps,
    pub counter: use_cases::CounterOps,
    pub health: use_cases::HealthOps,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        config: EngineConfig,
    ) -> Self {
        let sheets = use_cases::SheetStore::new(character_repo.clone(), clock.clone());

        let use_cases = UseCases {
            character: use_cases::CharacterOps::new(
                sheets.clone(),
                config.limits,
                config.pretty_max_perm,
            ),
            counter: use_cases::CounterOps::new(sheets.clone(), config.limits),
            health: use_cases::HealthOps::new(sheets),
        };

        Self {
            repositories: Repositories {
                character: character_repo,
                clock,
            },
            use_cases,
            config,
        }
    }
}
