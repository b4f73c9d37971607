//! Character templates - starting counters and health tracks per game line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{Archetype, Counter, CounterFactory};
use crate::error::DomainError;
use crate::value_objects::HealthKind;

/// A game line a new character can be seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterTemplate {
    #[default]
    Mortal,
    Vampire,
    Werewolf,
    Mage,
    Changeling,
}

impl CharacterTemplate {
    pub const ALL: [CharacterTemplate; 5] = [
        Self::Mortal,
        Self::Vampire,
        Self::Werewolf,
        Self::Mage,
        Self::Changeling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mortal => "mortal",
            Self::Vampire => "vampire",
            Self::Werewolf => "werewolf",
            Self::Mage => "mage",
            Self::Changeling => "changeling",
        }
    }

    /// Archetypes and starting perm seeded by this template.
    pub fn archetypes(&self) -> &'static [(Archetype, i64)] {
        match self {
            Self::Mortal => &[(Archetype::Willpower, 3)],
            Self::Vampire => &[(Archetype::Willpower, 5), (Archetype::BloodPool, 10)],
            Self::Werewolf => &[
                (Archetype::Willpower, 3),
                (Archetype::Rage, 3),
                (Archetype::Gnosis, 3),
                (Archetype::Glory, 3),
                (Archetype::Honor, 3),
                (Archetype::Wisdom, 3),
            ],
            Self::Mage => &[(Archetype::Willpower, 5), (Archetype::Mana, 5)],
            Self::Changeling => &[
                (Archetype::WillpowerFae, 4),
                (Archetype::Glamour, 4),
                (Archetype::Banality, 3),
                (Archetype::Nightmare, 0),
            ],
        }
    }

    pub fn health_kinds(&self) -> &'static [HealthKind] {
        match self {
            Self::Changeling => &[HealthKind::Normal, HealthKind::Chimerical],
            _ => &[HealthKind::Normal],
        }
    }

    /// Instantiate the template's counters.
    pub fn counters(&self) -> Result<Vec<Counter>, DomainError> {
        self.archetypes()
            .iter()
            .map(|(archetype, perm)| CounterFactory::create(*archetype, *perm, None, None))
            .collect()
    }
}

impl fmt::Display for CharacterTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CharacterTemplate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown character template: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::CounterVariant;

    #[test]
    fn every_template_builds() {
        for template in CharacterTemplate::ALL {
            let counters = template.counters().expect("template counters");
            assert_eq!(counters.len(), template.archetypes().len());
            assert!(template.health_kinds().contains(&HealthKind::Normal));
        }
    }

    #[test]
    fn changeling_gets_bedlam_willpower_and_chimerical_health() {
        let counters = CharacterTemplate::Changeling.counters().expect("counters");
        let willpower = counters
            .iter()
            .find(|c| c.name() == "willpower")
            .expect("willpower");
        assert_eq!(willpower.variant(), CounterVariant::PermIsMaximumBedlam);
        assert_eq!(
            CharacterTemplate::Changeling.health_kinds(),
            &[HealthKind::Normal, HealthKind::Chimerical]
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Werewolf".parse::<CharacterTemplate>(), Ok(CharacterTemplate::Werewolf));
        assert!("hunter".parse::<CharacterTemplate>().is_err());
    }
}
