//! Attack range classification.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. both entities on the grid
//! 2. not closer than the minimum range
//! 3. not farther than the maximum range
//! 4. line of sight (ranged attacks only)
//!
//! Beyond the optimal range a ranged attack takes a penalty per extra cell.

use crate::error::{CombatError, ErrorSeverity};
use crate::grid::{CombatGrid, GridPosition};
use crate::los::{Sight, sight_between};
use crate::state::EntityId;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RangeType {
    /// Adjacent attacks. Never checks line of sight.
    Melee,
    /// Polearms and similar short-range weapons. Never checks line of sight.
    Reach,
    /// Projectiles and spells. Requires line of sight.
    Ranged,
}

impl RangeType {
    pub const fn requires_line_of_sight(self) -> bool {
        matches!(self, Self::Ranged)
    }
}

/// Range description of a weapon or ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeProfile {
    pub range_type: RangeType,
    pub max_range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_range: u32,
    /// Distance up to which no penalty applies. `None` disables falloff.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optimal_range: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default = "default_penalty_per_unit"))]
    pub penalty_per_unit: u32,
}

#[cfg(feature = "serde")]
fn default_penalty_per_unit() -> u32 {
    RangeProfile::DEFAULT_PENALTY_PER_UNIT
}

impl RangeProfile {
    pub const DEFAULT_PENALTY_PER_UNIT: u32 = 1;

    pub const fn new(range_type: RangeType, max_range: u32) -> Self {
        Self {
            range_type,
            max_range,
            min_range: 0,
            optimal_range: None,
            penalty_per_unit: Self::DEFAULT_PENALTY_PER_UNIT,
        }
    }

    pub const fn melee() -> Self {
        Self::new(RangeType::Melee, 1)
    }

    pub const fn reach() -> Self {
        Self::new(RangeType::Reach, 2)
    }

    pub const fn ranged(max_range: u32) -> Self {
        Self::new(RangeType::Ranged, max_range)
    }

    pub const fn with_min_range(mut self, min_range: u32) -> Self {
        self.min_range = min_range;
        self
    }

    pub const fn with_optimal_range(mut self, optimal_range: u32) -> Self {
        self.optimal_range = Some(optimal_range);
        self
    }

    pub const fn with_penalty_per_unit(mut self, penalty_per_unit: u32) -> Self {
        self.penalty_per_unit = penalty_per_unit;
        self
    }

    /// Penalty at `distance`: `max(0, distance - optimal) * penalty_per_unit`.
    pub fn penalty_at(&self, distance: u32) -> u32 {
        match self.optimal_range {
            Some(optimal) => distance.saturating_sub(optimal).saturating_mul(self.penalty_per_unit),
            None => 0,
        }
    }
}

/// Why an attack cannot reach its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeFailure {
    #[error("entity {entity} is not on the grid")]
    NotOnGrid { entity: EntityId },

    #[error("target too close (distance {distance}, minimum {min_range})")]
    TooClose { distance: u32, min_range: u32 },

    #[error("target out of range (distance {distance}, maximum {max_range})")]
    OutOfRange { distance: u32, max_range: u32 },

    #[error("No Line of Sight")]
    NoLineOfSight { distance: u32, blocker: GridPosition },
}

impl RangeFailure {
    /// Distance between the entities, when both were on the grid.
    pub const fn distance(&self) -> Option<u32> {
        match self {
            Self::NotOnGrid { .. } => None,
            Self::TooClose { distance, .. }
            | Self::OutOfRange { distance, .. }
            | Self::NoLineOfSight { distance, .. } => Some(*distance),
        }
    }

    pub const fn blocker(&self) -> Option<GridPosition> {
        match self {
            Self::NoLineOfSight { blocker, .. } => Some(*blocker),
            _ => None,
        }
    }
}

impl CombatError for RangeFailure {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotOnGrid { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnGrid { .. } => "RANGE_NOT_ON_GRID",
            Self::TooClose { .. } => "RANGE_TOO_CLOSE",
            Self::OutOfRange { .. } => "RANGE_OUT_OF_RANGE",
            Self::NoLineOfSight { .. } => "RANGE_NO_LINE_OF_SIGHT",
        }
    }
}

/// A successful range check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeCheck {
    pub distance: u32,
    pub penalty: u32,
    /// No penalty and within the optimal range.
    pub is_optimal: bool,
}

/// Checks a raw range value of the given type.
pub fn check_range(
    grid: &CombatGrid,
    attacker: EntityId,
    defender: EntityId,
    range: u32,
    range_type: RangeType,
) -> Result<RangeCheck, RangeFailure> {
    check_full_range(grid, attacker, defender, &RangeProfile::new(range_type, range))
}

/// Checks a full range profile including minimum and optimal range.
pub fn check_full_range(
    grid: &CombatGrid,
    attacker: EntityId,
    defender: EntityId,
    profile: &RangeProfile,
) -> Result<RangeCheck, RangeFailure> {
    let from = grid
        .position_of(attacker)
        .ok_or(RangeFailure::NotOnGrid { entity: attacker })?;
    let to = grid
        .position_of(defender)
        .ok_or(RangeFailure::NotOnGrid { entity: defender })?;
    let distance = from.distance_to(to);

    if distance < profile.min_range {
        return Err(RangeFailure::TooClose {
            distance,
            min_range: profile.min_range,
        });
    }
    if distance > profile.max_range {
        return Err(RangeFailure::OutOfRange {
            distance,
            max_range: profile.max_range,
        });
    }
    if profile.range_type.requires_line_of_sight() {
        if let Sight::Blocked(blocker) = sight_between(grid, from, to) {
            return Err(RangeFailure::NoLineOfSight { distance, blocker });
        }
    }

    let penalty = profile.penalty_at(distance);
    let within_optimal = profile.optimal_range.is_none_or(|optimal| distance <= optimal);
    let check = RangeCheck {
        distance,
        penalty,
        is_optimal: penalty == 0 && within_optimal,
    };
    tracing::debug!(%attacker, %defender, range_type = %profile.range_type, ?check, "range check");
    Ok(check)
}
