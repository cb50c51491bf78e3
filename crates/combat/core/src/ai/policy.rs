//! Behavior tags and the tunable thresholds the decision engine consults.

use crate::state::Health;

/// Behavior tag carried by monsters.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AiBehavior {
    /// Attacks the weakest enemy.
    #[default]
    Aggressive,
    /// Aggressive until badly hurt, then takes the configured fallback.
    Defensive,
    /// Heals wounded allies when able, otherwise aggressive.
    Support,
    /// Flees when badly hurt, otherwise aggressive.
    Cowardly,
    /// Attacks an enemy picked by an injected roll.
    Chaotic,
}

/// Action kinds an AI decision can produce.
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
pub enum AiAction {
    Attack,
    Heal,
    Defend,
    Flee,
    Wait,
}

/// Named, overridable thresholds for the decision engine.
///
/// Thresholds are whole percentages of maximum health; "below" is strict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AiPolicy {
    /// Defensive combatants below this health switch to `defensive_fallback`.
    pub defensive_threshold_percent: u32,
    pub defensive_fallback: AiAction,
    /// Support combatants heal allies below this health.
    pub support_heal_threshold_percent: u32,
    /// Cowardly combatants flee below this health.
    pub cowardly_flee_threshold_percent: u32,
}

impl AiPolicy {
    pub const DEFAULT_DEFENSIVE_THRESHOLD_PERCENT: u32 = 30;
    pub const DEFAULT_DEFENSIVE_FALLBACK: AiAction = AiAction::Defend;
    pub const DEFAULT_SUPPORT_HEAL_THRESHOLD_PERCENT: u32 = 50;
    pub const DEFAULT_COWARDLY_FLEE_THRESHOLD_PERCENT: u32 = 25;

    pub const fn new() -> Self {
        Self {
            defensive_threshold_percent: Self::DEFAULT_DEFENSIVE_THRESHOLD_PERCENT,
            defensive_fallback: Self::DEFAULT_DEFENSIVE_FALLBACK,
            support_heal_threshold_percent: Self::DEFAULT_SUPPORT_HEAL_THRESHOLD_PERCENT,
            cowardly_flee_threshold_percent: Self::DEFAULT_COWARDLY_FLEE_THRESHOLD_PERCENT,
        }
    }
}

impl Default for AiPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `health` is strictly below `percent` of its maximum.
pub fn is_below(health: Health, percent: u32) -> bool {
    u64::from(health.current) * 100 < u64::from(health.maximum) * u64::from(percent)
}
