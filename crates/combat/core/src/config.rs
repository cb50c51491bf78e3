use crate::ai::AiPolicy;
use crate::dice::{DicePool, DiceType};

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CombatConfig {
    /// Width of a grid created without explicit dimensions.
    pub grid_width: u32,
    /// Height of a grid created without explicit dimensions.
    pub grid_height: u32,
    /// Standard die rolled for initiative before the participant modifier.
    pub initiative_dice: DicePool,
    /// Thresholds and fallbacks consulted by the AI decision engine.
    pub ai: AiPolicy,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Largest accepted grid side. Keeps cell labels within two letters.
    pub const MAX_GRID_DIMENSION: u32 = 702;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_WIDTH: u32 = 8;
    pub const DEFAULT_GRID_HEIGHT: u32 = 8;
    pub const DEFAULT_INITIATIVE_DICE: DicePool = DicePool::single(DiceType::D10);

    pub fn new() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
            initiative_dice: Self::DEFAULT_INITIATIVE_DICE,
            ai: AiPolicy::default(),
        }
    }

    pub fn with_grid_size(mut self, width: u32, height: u32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_initiative_dice(mut self, dice: DicePool) -> Self {
        self.initiative_dice = dice;
        self
    }

    pub fn with_ai_policy(mut self, ai: AiPolicy) -> Self {
        self.ai = ai;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
