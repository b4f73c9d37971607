//! Damage severities, health levels, and health track kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Damage severity, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSeverity {
    Bashing,
    Lethal,
    Aggravated,
}

impl DamageSeverity {
    /// The only tier eligible for upgrading when a track overflows.
    pub const LOWEST: DamageSeverity = DamageSeverity::Bashing;

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bashing => "Bashing",
            Self::Lethal => "Lethal",
            Self::Aggravated => "Aggravated",
        }
    }

    /// Glyph shown in a wounded health slot.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Bashing => ":blue_square:",
            Self::Lethal => ":orange_square:",
            Self::Aggravated => ":red_square:",
        }
    }
}

impl fmt::Display for DamageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DamageSeverity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bashing" | "b" => Ok(Self::Bashing),
            "lethal" | "l" => Ok(Self::Lethal),
            "aggravated" | "agg" | "a" => Ok(Self::Aggravated),
            other => Err(DomainError::parse(format!("Unknown damage type: {other}"))),
        }
    }
}

/// Glyph for a slot with no damage.
pub const UNMARKED_GLYPH: &str = ":white_large_square:";

/// A named wound level and its dice penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    Bruised,
    Hurt,
    Injured,
    Wounded,
    Mauled,
    Crippled,
    Incapacitated,
}

impl HealthLevel {
    /// Standard seven-slot track, filled top to bottom.
    pub const DEFAULT_TRACK: [HealthLevel; 7] = [
        Self::Bruised,
        Self::Hurt,
        Self::Injured,
        Self::Wounded,
        Self::Mauled,
        Self::Crippled,
        Self::Incapacitated,
    ];

    /// Dice penalty while this is the worst wounded level.
    ///
    /// `None` is the incapacitation sentinel: the character cannot act at all.
    pub fn penalty(&self) -> Option<i32> {
        match self {
            Self::Bruised => Some(0),
            Self::Hurt | Self::Injured => Some(-1),
            Self::Wounded | Self::Mauled => Some(-2),
            Self::Crippled => Some(-5),
            Self::Incapacitated => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bruised => "Bruised",
            Self::Hurt => "Hurt",
            Self::Injured => "Injured",
            Self::Wounded => "Wounded",
            Self::Mauled => "Mauled",
            Self::Crippled => "Crippled",
            Self::Incapacitated => "Incapacitated",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for HealthLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::DEFAULT_TRACK
            .into_iter()
            .find(|l| l.display_name().to_lowercase() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown health level: {s}")))
    }
}

/// Distinguishes a character's health tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthKind {
    #[default]
    Normal,
    /// Secondary track for damage that only exists in the Dreaming
    Chimerical,
}

impl HealthKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Chimerical => "chimerical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Health",
            Self::Chimerical => "Chimerical Health",
        }
    }
}

impl fmt::Display for HealthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HealthKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "chimerical" => Ok(Self::Chimerical),
            other => Err(DomainError::parse(format!("Unknown health type: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered() {
        assert!(DamageSeverity::Bashing < DamageSeverity::Lethal);
        assert!(DamageSeverity::Lethal < DamageSeverity::Aggravated);
        assert_eq!(DamageSeverity::LOWEST, DamageSeverity::Bashing);
    }

    #[test]
    fn severity_parses_short_forms() {
        assert_eq!("agg".parse::<DamageSeverity>(), Ok(DamageSeverity::Aggravated));
        assert_eq!("L".parse::<DamageSeverity>(), Ok(DamageSeverity::Lethal));
        assert!("fire".parse::<DamageSeverity>().is_err());
    }

    #[test]
    fn incapacitated_has_no_penalty() {
        assert_eq!(HealthLevel::Incapacitated.penalty(), None);
        assert_eq!(HealthLevel::Crippled.penalty(), Some(-5));
        assert_eq!(HealthLevel::Bruised.penalty(), Some(0));
    }

    #[test]
    fn default_track_has_seven_levels() {
        assert_eq!(HealthLevel::DEFAULT_TRACK.len(), 7);
        assert_eq!(HealthLevel::DEFAULT_TRACK[0], HealthLevel::Bruised);
        assert_eq!(HealthLevel::DEFAULT_TRACK[6], HealthLevel::Incapacitated);
    }

    #[test]
    fn health_kind_round_trips_through_str() {
        assert_eq!("Chimerical".parse::<HealthKind>(), Ok(HealthKind::Chimerical));
        assert_eq!(HealthKind::Normal.to_string(), "normal");
    }
}
