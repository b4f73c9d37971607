//! Health track - an ordered wound ledger with severity upgrades
//!
//! Slots fill from the least severe level (`Bruised`) downwards. The damage
//! list is kept most-severe-first, so the front always holds the worst wounds
//! and healing removes from the back.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{DamageSeverity, HealthKind, HealthLevel, UNMARKED_GLYPH};

/// A wound/damage tracker.
///
/// # Invariants
///
/// - `levels` is never empty
/// - `damage.len() <= levels.len()`
/// - `damage` is ordered most severe first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HealthTrackWireFormat", into = "HealthTrackWireFormat")]
pub struct HealthTrack {
    kind: HealthKind,
    levels: Vec<HealthLevel>,
    damage: Vec<DamageSeverity>,
}

impl HealthTrack {
    /// Undamaged track with the standard seven levels.
    pub fn new(kind: HealthKind) -> Self {
        Self {
            kind,
            levels: HealthLevel::DEFAULT_TRACK.to_vec(),
            damage: Vec::new(),
        }
    }

    /// Undamaged track with a custom level sequence.
    pub fn with_levels(kind: HealthKind, levels: Vec<HealthLevel>) -> Result<Self, DomainError> {
        if levels.is_empty() {
            return Err(DomainError::validation("A health track needs at least one level"));
        }
        Ok(Self {
            kind,
            levels,
            damage: Vec::new(),
        })
    }

    /// Replace the recorded damage.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if there are more damage entries than levels.
    pub fn with_damage(mut self, mut damage: Vec<DamageSeverity>) -> Result<Self, DomainError> {
        if damage.len() > self.levels.len() {
            return Err(DomainError::invariant(format!(
                "{} damage entries do not fit a track of {} levels",
                damage.len(),
                self.levels.len()
            )));
        }
        sort_most_severe_first(&mut damage);
        self.damage = damage;
        Ok(self)
    }

    #[inline]
    pub fn kind(&self) -> HealthKind {
        self.kind
    }

    #[inline]
    pub fn levels(&self) -> &[HealthLevel] {
        &self.levels
    }

    #[inline]
    pub fn damage(&self) -> &[DamageSeverity] {
        &self.damage
    }

    pub fn capacity(&self) -> usize {
        self.levels.len() - self.damage.len()
    }

    /// Apply `levels` wounds of `severity`.
    ///
    /// Empty slots are filled first. Any overflow upgrades `Bashing` entries,
    /// front to back, one per remaining level. Whatever is still left cannot
    /// be taken and is reported in the returned message; the track keeps
    /// everything that did fit.
    ///
    /// The list is re-sorted afterwards so the front always holds the most
    /// severe wounds. Only the per-severity counts are observable.
    pub fn add_damage(&mut self, levels: i64, severity: DamageSeverity) -> Option<String> {
        if levels <= 0 {
            return None;
        }
        let levels = usize::try_from(levels).unwrap_or(usize::MAX);

        let to_fill = levels.min(self.capacity());
        self.damage.extend(std::iter::repeat(severity).take(to_fill));

        let mut remaining = levels - to_fill;
        for entry in self.damage.iter_mut() {
            if remaining == 0 {
                break;
            }
            if *entry == DamageSeverity::LOWEST {
                *entry = severity;
                remaining -= 1;
            }
        }
        sort_most_severe_first(&mut self.damage);

        (remaining > 0).then(|| {
            format!(
                "{remaining} additional levels of {severity} damage could not be taken \
                 (no room left in health track)."
            )
        })
    }

    /// Heal `levels` wounds from the least severe end.
    pub fn remove_damage(&mut self, levels: i64) {
        if levels <= 0 {
            return;
        }
        let levels = usize::try_from(levels).unwrap_or(usize::MAX);
        let keep = self.damage.len().saturating_sub(levels);
        self.damage.truncate(keep);
    }

    /// Penalty of the deepest wounded level; `Some(0)` when unhurt.
    ///
    /// `None` means the character is incapacitated.
    pub fn current_penalty(&self) -> Option<i32> {
        match self.damage.len() {
            0 => Some(0),
            wounded => self.levels[wounded - 1].penalty(),
        }
    }

    pub fn is_incapacitated(&self) -> bool {
        self.current_penalty().is_none()
    }

    /// One line per level: slot glyph, level name and any nonzero penalty.
    pub fn render(&self) -> String {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let glyph = self
                    .damage
                    .get(i)
                    .map_or(UNMARKED_GLYPH, DamageSeverity::glyph);
                match level.penalty() {
                    Some(penalty) if penalty != 0 => format!("{glyph} {level} ({penalty})"),
                    _ => format!("{glyph} {level}"),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn sort_most_severe_first(damage: &mut [DamageSeverity]) {
    damage.sort_by(|a, b| b.cmp(a));
}

// ============================================================================
// Serde wire format
// ============================================================================

#[derive(Serialize, Deserialize)]
struct HealthTrackWireFormat {
    #[serde(default, rename = "health_type")]
    kind: HealthKind,
    #[serde(default = "default_levels")]
    levels: Vec<HealthLevel>,
    #[serde(default)]
    damage: Vec<DamageSeverity>,
}

fn default_levels() -> Vec<HealthLevel> {
    HealthLevel::DEFAULT_TRACK.to_vec()
}

impl TryFrom<HealthTrackWireFormat> for HealthTrack {
    type Error = DomainError;

    fn try_from(wire: HealthTrackWireFormat) -> Result<Self, Self::Error> {
        HealthTrack::with_levels(wire.kind, wire.levels)?.with_damage(wire.damage)
    }
}

impl From<HealthTrack> for HealthTrackWireFormat {
    fn from(track: HealthTrack) -> Self {
        Self {
            kind: track.kind,
            levels: track.levels,
            damage: track.damage,
        }
    }
}
