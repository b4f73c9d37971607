//! Counter variant - the tag that selects a counter's mutation rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Selects how `temp` and `perm` relate for a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterVariant {
    /// One tracked quantity exposed as both temp and perm
    #[default]
    SingleNumber,
    /// temp is bounded to `[0, perm]`
    PermIsMaximum,
    /// As `PermIsMaximum`, plus a bedlam overlay bounded to `[0, perm]`
    PermIsMaximumBedlam,
    /// temp and perm are independent; perm is a track length
    PermNotMaximum,
    Xp,
    Health,
}

impl CounterVariant {
    pub const ALL: [CounterVariant; 6] = [
        Self::SingleNumber,
        Self::PermIsMaximum,
        Self::PermIsMaximumBedlam,
        Self::PermNotMaximum,
        Self::Xp,
        Self::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleNumber => "single_number",
            Self::PermIsMaximum => "perm_is_maximum",
            Self::PermIsMaximumBedlam => "perm_is_maximum_bedlam",
            Self::PermNotMaximum => "perm_not_maximum",
            Self::Xp => "xp",
            Self::Health => "health",
        }
    }

    /// Whether `perm` caps `temp` for this variant.
    pub fn perm_is_cap(&self) -> bool {
        matches!(self, Self::PermIsMaximum | Self::PermIsMaximumBedlam)
    }

    /// Whether the bedlam overlay is meaningful for this variant.
    pub fn has_bedlam(&self) -> bool {
        matches!(self, Self::PermIsMaximumBedlam)
    }
}

impl fmt::Display for CounterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CounterVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == key)
            .ok_or_else(|| DomainError::parse(format!("Unknown counter type: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_capped_variants_cap_temp() {
        assert!(CounterVariant::PermIsMaximum.perm_is_cap());
        assert!(CounterVariant::PermIsMaximumBedlam.perm_is_cap());
        assert!(!CounterVariant::PermNotMaximum.perm_is_cap());
        assert!(!CounterVariant::SingleNumber.perm_is_cap());
    }

    #[test]
    fn from_str_matches_storage_keys() {
        for variant in CounterVariant::ALL {
            assert_eq!(variant.as_str().parse::<CounterVariant>(), Ok(variant));
        }
        assert!("perm_is_minimum".parse::<CounterVariant>().is_err());
    }

    #[test]
    fn default_is_single_number() {
        assert_eq!(CounterVariant::default(), CounterVariant::SingleNumber);
    }
}
