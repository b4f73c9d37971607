//! Predefined counter archetypes and the factory that instantiates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::some_if_not_blank;
use crate::entities::Counter;
use crate::error::DomainError;
use crate::value_objects::{CounterCategory, CounterVariant};

/// One entry of the fixed archetype catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Willpower,
    Mana,
    BloodPool,
    WillpowerFae,
    Glamour,
    Nightmare,
    Banality,
    Glory,
    Honor,
    Wisdom,
    Rage,
    Gnosis,
    ItemWithCharges,
    ProjectRoll,
}

/// How the factory seeds `temp` from the requested `perm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TempSeed {
    Full,
    Empty,
}

impl Archetype {
    pub const ALL: [Archetype; 14] = [
        Self::Willpower,
        Self::Mana,
        Self::BloodPool,
        Self::WillpowerFae,
        Self::Glamour,
        Self::Nightmare,
        Self::Banality,
        Self::Glory,
        Self::Honor,
        Self::Wisdom,
        Self::Rage,
        Self::Gnosis,
        Self::ItemWithCharges,
        Self::ProjectRoll,
    ];

    /// Nightmare always starts empty on a ten-point track.
    const NIGHTMARE_PERM: i64 = 10;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Willpower => "willpower",
            Self::Mana => "mana",
            Self::BloodPool => "blood_pool",
            Self::WillpowerFae => "willpower_fae",
            Self::Glamour => "glamour",
            Self::Nightmare => "nightmare",
            Self::Banality => "banality",
            Self::Glory => "glory",
            Self::Honor => "honor",
            Self::Wisdom => "wisdom",
            Self::Rage => "rage",
            Self::Gnosis => "gnosis",
            Self::ItemWithCharges => "item_with_charges",
            Self::ProjectRoll => "project_roll",
        }
    }

    /// Name given to the counter when no override is supplied.
    ///
    /// `None` means the caller must name the counter.
    pub fn default_name(&self) -> Option<&'static str> {
        match self {
            Self::WillpowerFae => Some("willpower"),
            Self::ItemWithCharges | Self::ProjectRoll => None,
            other => Some(other.as_str()),
        }
    }

    pub fn requires_name(&self) -> bool {
        self.default_name().is_none()
    }

    pub fn variant(&self) -> CounterVariant {
        match self {
            Self::Willpower
            | Self::Mana
            | Self::BloodPool
            | Self::Glamour
            | Self::Gnosis
            | Self::Nightmare
            | Self::ItemWithCharges => CounterVariant::PermIsMaximum,
            Self::WillpowerFae => CounterVariant::PermIsMaximumBedlam,
            Self::Banality
            | Self::Rage
            | Self::Glory
            | Self::Honor
            | Self::Wisdom
            | Self::ProjectRoll => CounterVariant::PermNotMaximum,
        }
    }

    pub fn category(&self) -> CounterCategory {
        match self {
            Self::Willpower
            | Self::WillpowerFae
            | Self::Glamour
            | Self::Gnosis
            | Self::Nightmare
            | Self::Banality
            | Self::Rage => CounterCategory::Tempers,
            Self::Mana | Self::BloodPool => CounterCategory::General,
            Self::Glory | Self::Honor | Self::Wisdom => CounterCategory::Reknown,
            Self::ItemWithCharges => CounterCategory::Items,
            Self::ProjectRoll => CounterCategory::Projects,
        }
    }

    fn temp_seed(&self) -> TempSeed {
        match self {
            Self::Nightmare | Self::Glory | Self::Honor | Self::Wisdom | Self::ProjectRoll => {
                TempSeed::Empty
            }
            _ => TempSeed::Full,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| DomainError::UnknownArchetype(s.to_string()))
    }
}

/// Builds counters from the archetype catalog.
pub struct CounterFactory;

impl CounterFactory {
    /// Create a counter for `archetype` with the given `perm`.
    ///
    /// # Errors
    ///
    /// - `NegativeValue` if `perm < 0`
    /// - `MissingRequiredName` if the archetype has no default name and
    ///   `override_name` is absent or blank
    pub fn create(
        archetype: Archetype,
        perm: i64,
        comment: Option<String>,
        override_name: Option<String>,
    ) -> Result<Counter, DomainError> {
        if perm < 0 {
            return Err(DomainError::negative("perm", perm));
        }

        let name = match override_name.and_then(some_if_not_blank) {
            Some(name) => name,
            None => archetype
                .default_name()
                .ok_or(DomainError::MissingRequiredName(archetype.as_str()))?
                .to_string(),
        };

        let perm = match archetype {
            Archetype::Nightmare => Archetype::NIGHTMARE_PERM,
            _ => perm,
        };
        let temp = match archetype.temp_seed() {
            TempSeed::Full => perm,
            TempSeed::Empty => 0,
        };

        Counter::builder(name, temp, perm, archetype.category())
            .variant(archetype.variant())
            .comment(comment)
            .build()
    }

    /// Like [`create`](Self::create), looking the archetype up by catalog key.
    ///
    /// # Errors
    ///
    /// `UnknownArchetype` if `key` is not in the catalog.
    pub fn create_by_key(
        key: &str,
        perm: i64,
        comment: Option<String>,
        override_name: Option<String>,
    ) -> Result<Counter, DomainError> {
        Self::create(key.parse()?, perm, comment, override_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn willpower_starts_full() {
        let c = CounterFactory::create(Archetype::Willpower, 6, None, None).expect("created");
        assert_eq!(c.name(), "willpower");
        assert_eq!((c.temp(), c.perm()), (6, 6));
        assert_eq!(c.variant(), CounterVariant::PermIsMaximum);
        assert_eq!(c.category(), CounterCategory::Tempers);
    }

    #[test]
    fn blood_pool_is_general() {
        let c = CounterFactory::create(Archetype::BloodPool, 10, None, None).expect("created");
        assert_eq!(c.name(), "blood_pool");
        assert_eq!(c.category(), CounterCategory::General);
    }

    #[test]
    fn willpower_fae_uses_plain_willpower_name_with_bedlam() {
        let c = CounterFactory::create(Archetype::WillpowerFae, 4, None, None).expect("created");
        assert_eq!(c.name(), "willpower");
        assert_eq!(c.variant(), CounterVariant::PermIsMaximumBedlam);
        assert_eq!((c.temp(), c.perm(), c.bedlam()), (4, 4, 0));
    }

    #[test]
    fn nightmare_ignores_requested_perm() {
        let c = CounterFactory::create(Archetype::Nightmare, 3, None, None).expect("created");
        assert_eq!((c.temp(), c.perm()), (0, 10));
    }

    #[test]
    fn renown_starts_empty() {
        for archetype in [Archetype::Glory, Archetype::Honor, Archetype::Wisdom] {
            let c = CounterFactory::create(archetype, 5, None, None).expect("created");
            assert_eq!((c.temp(), c.perm()), (0, 5));
            assert_eq!(c.category(), CounterCategory::Reknown);
            assert_eq!(c.variant(), CounterVariant::PermNotMaximum);
        }
    }

    #[test]
    fn rage_starts_full_without_cap() {
        let c = CounterFactory::create(Archetype::Rage, 3, None, None).expect("created");
        assert_eq!((c.temp(), c.perm()), (3, 3));
        assert_eq!(c.variant(), CounterVariant::PermNotMaximum);
    }

    #[test]
    fn item_with_charges_requires_a_name() {
        let err = CounterFactory::create(Archetype::ItemWithCharges, 3, None, None).unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredName("item_with_charges"));

        let err = CounterFactory::create(Archetype::ProjectRoll, 3, None, Some("  ".into()))
            .unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredName("project_roll"));
    }

    #[test]
    fn named_item_is_created() {
        let c = CounterFactory::create(
            Archetype::ItemWithCharges,
            3,
            Some("wand of sparks".into()),
            Some("Wand".into()),
        )
        .expect("created");
        assert_eq!(c.name(), "Wand");
        assert_eq!(c.category(), CounterCategory::Items);
        assert_eq!(c.temp(), 3);
        assert_eq!(c.comment(), Some("wand of sparks"));
    }

    #[test]
    fn project_roll_starts_empty() {
        let c = CounterFactory::create(Archetype::ProjectRoll, 8, None, Some("Chantry".into()))
            .expect("created");
        assert_eq!((c.temp(), c.perm()), (0, 8));
        assert_eq!(c.category(), CounterCategory::Projects);
    }

    #[test]
    fn override_name_keeps_rules() {
        let c = CounterFactory::create(Archetype::Mana, 4, None, Some("Quintessence".into()))
            .expect("created");
        assert_eq!(c.name(), "Quintessence");
        assert_eq!(c.variant(), CounterVariant::PermIsMaximum);
        assert_eq!(c.category(), CounterCategory::General);
    }

    #[test]
    fn negative_perm_is_rejected_first() {
        let err = CounterFactory::create(Archetype::ItemWithCharges, -1, None, None).unwrap_err();
        assert!(matches!(err, DomainError::NegativeValue { field: "perm", value: -1 }));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = CounterFactory::create_by_key("humanity", 5, None, None).unwrap_err();
        assert_eq!(err, DomainError::UnknownArchetype("humanity".to_string()));
    }

    #[test]
    fn only_items_and_projects_require_names() {
        let required: Vec<Archetype> = Archetype::ALL
            .into_iter()
            .filter(Archetype::requires_name)
            .collect();
        assert_eq!(required, vec![Archetype::ItemWithCharges, Archetype::ProjectRoll]);
    }

    #[test]
    fn keys_parse_loosely() {
        assert_eq!("Blood Pool".parse::<Archetype>(), Ok(Archetype::BloodPool));
        assert_eq!("willpower-fae".parse::<Archetype>(), Ok(Archetype::WillpowerFae));
        for archetype in Archetype::ALL {
            assert_eq!(archetype.to_string().parse::<Archetype>(), Ok(archetype));
        }
    }
}
