//! Identifiers and meters shared across the engine.

use std::fmt;

/// Unique identifier for any entity placed on a grid or enrolled in an
/// encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of an encounter a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opposing(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Hit point meter. `current` never exceeds `maximum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub current: u32,
    pub maximum: u32,
}

impl Health {
    /// Meter clamped so that `current <= maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Remaining health as a fraction in `[0.0, 1.0]`. Zero-maximum meters
    /// report `0.0`.
    pub fn fraction(&self) -> f32 {
        if self.maximum == 0 {
            0.0
        } else {
            self.current as f32 / self.maximum as f32
        }
    }

    /// Remaining health in whole percent, rounded down.
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            0
        } else {
            ((u64::from(self.current) * 100) / u64::from(self.maximum)) as u32
        }
    }

    /// Health below the maximum; zero for a meter built over-full by hand.
    pub const fn missing(&self) -> u32 {
        self.maximum.saturating_sub(self.current)
    }

    /// Subtracts damage, saturating at zero. Returns the amount removed.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current);
        self.current -= dealt;
        dealt
    }

    /// Restores health, capped at the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.missing());
        self.current += restored;
        restored
    }
}
