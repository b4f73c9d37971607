//! Counter category - the grouping tag used when a sheet is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Classification tag for a counter.
///
/// Closed set with an `Other` fallback: unknown tags in stored documents
/// deserialize to `Other` instead of failing the whole sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterCategory {
    /// Willpower, rage, glamour and other spendable tempers
    Tempers,
    /// Glory, honor, wisdom
    Reknown,
    /// Pools that are neither tempers nor renown (mana, blood)
    General,
    Health,
    Xp,
    /// Charged items and talismans
    Items,
    /// Long-running extended rolls
    Projects,
    #[serde(other)]
    Other,
}

impl CounterCategory {
    /// Render order for sheet output. Every category appears exactly once.
    pub const CANONICAL_ORDER: [CounterCategory; 8] = [
        Self::Tempers,
        Self::Reknown,
        Self::General,
        Self::Health,
        Self::Xp,
        Self::Items,
        Self::Projects,
        Self::Other,
    ];

    /// Storage/command key (e.g., "tempers").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tempers => "tempers",
            Self::Reknown => "reknown",
            Self::General => "general",
            Self::Health => "health",
            Self::Xp => "xp",
            Self::Items => "items",
            Self::Projects => "projects",
            Self::Other => "other",
        }
    }

    /// Group heading shown above the category's counters.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tempers => "Tempers",
            Self::Reknown => "Reknown",
            Self::General => "General",
            Self::Health => "Health",
            Self::Xp => "XP",
            Self::Items => "Items",
            Self::Projects => "Projects",
            Self::Other => "Other",
        }
    }

    /// Position in [`Self::CANONICAL_ORDER`].
    pub fn rank(&self) -> usize {
        Self::CANONICAL_ORDER
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::CANONICAL_ORDER.len())
    }
}

impl fmt::Display for CounterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CounterCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tempers" => Ok(Self::Tempers),
            "reknown" | "renown" => Ok(Self::Reknown),
            "general" => Ok(Self::General),
            "health" => Ok(Self::Health),
            "xp" => Ok(Self::Xp),
            "items" => Ok(Self::Items),
            "projects" => Ok(Self::Projects),
            "other" => Ok(Self::Other),
            other => Err(DomainError::parse(format!("Unknown counter category: {other}"))),
        }
    }
}
