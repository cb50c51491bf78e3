//! Damage types, resistance tables and damage resolution.

use std::collections::BTreeMap;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances and damage calculation.
///
/// Different damage types may have different resistance values on
/// combatants.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Physical damage (melee, projectiles). Used when no type is given.
    #[default]
    Physical,
    /// Fire damage (burns, explosions).
    Fire,
    /// Cold damage (ice, frost).
    Cold,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Poison damage (toxins, venom).
    Poison,
    /// Necrotic damage (decay, life drain).
    Necrotic,
    /// Radiant damage (holy light).
    Radiant,
    /// Psychic damage (mental assault).
    Psychic,
    /// Arcane damage (pure magic).
    Arcane,
}

impl DamageType {
    /// Title-cased name for descriptions.
    pub fn title(self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Fire => "Fire",
            Self::Cold => "Cold",
            Self::Lightning => "Lightning",
            Self::Poison => "Poison",
            Self::Necrotic => "Necrotic",
            Self::Radiant => "Radiant",
            Self::Psychic => "Psychic",
            Self::Arcane => "Arcane",
        }
    }
}

// ============================================================================
// Resistances
// ============================================================================

/// Percentage at or above which a combatant takes no damage.
pub const IMMUNITY_THRESHOLD: i32 = 100;

/// Resistance percentages per damage type.
///
/// Positive values resist, negative values are vulnerabilities, values of
/// [`IMMUNITY_THRESHOLD`] or more grant immunity. Unset types are 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DamageResistances(BTreeMap<DamageType, i32>);

impl DamageResistances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, damage_type: DamageType, percent: i32) -> Self {
        self.set(damage_type, percent);
        self
    }

    /// Sets a percentage; zero removes the entry.
    pub fn set(&mut self, damage_type: DamageType, percent: i32) {
        if percent == 0 {
            self.0.remove(&damage_type);
        } else {
            self.0.insert(damage_type, percent);
        }
    }

    pub fn get(&self, damage_type: DamageType) -> i32 {
        self.0.get(&damage_type).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, i32)> + '_ {
        self.0.iter().map(|(damage_type, percent)| (*damage_type, *percent))
    }

    /// Human-readable entry such as `"Fire: 50% (Resistant)"`.
    pub fn describe(&self, damage_type: DamageType) -> String {
        let percent = self.get(damage_type);
        format!("{}: {}% ({})", damage_type.title(), percent, label_for(percent))
    }
}

impl FromIterator<(DamageType, i32)> for DamageResistances {
    fn from_iter<I: IntoIterator<Item = (DamageType, i32)>>(iter: I) -> Self {
        let mut resistances = Self::new();
        for (damage_type, percent) in iter {
            resistances.set(damage_type, percent);
        }
        resistances
    }
}

/// Label for a raw resistance percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum ResistanceLabel {
    Immune,
    Resistant,
    Normal,
    Vulnerable,
}

pub fn label_for(percent: i32) -> ResistanceLabel {
    match percent {
        p if p >= IMMUNITY_THRESHOLD => ResistanceLabel::Immune,
        p if p > 0 => ResistanceLabel::Resistant,
        0 => ResistanceLabel::Normal,
        _ => ResistanceLabel::Vulnerable,
    }
}

// ============================================================================
// Damage Resolution
// ============================================================================

/// Outcome of running damage through a resistance table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResolution {
    pub damage_type: DamageType,
    /// Incoming damage after clamping negatives to zero.
    pub base: u32,
    pub final_damage: u32,
    /// Resistance percentage that applied.
    pub resistance: i32,
    pub was_resisted: bool,
    pub was_vulnerable: bool,
    pub was_immune: bool,
}

/// Applies the resistance for `damage_type` (physical when `None`) to `base`.
///
/// # Formula
///
/// ```text
/// base  = max(0, base)
/// final = round(base * (100 - r) / 100)   (halves round up)
/// final = 0 when r >= 100
/// ```
pub fn resolve_damage(
    base: i32,
    damage_type: Option<DamageType>,
    resistances: &DamageResistances,
) -> DamageResolution {
    let damage_type = damage_type.unwrap_or_default();
    let base = base.max(0) as u32;
    let resistance = resistances.get(damage_type);

    let resolution = if resistance >= IMMUNITY_THRESHOLD {
        DamageResolution {
            damage_type,
            base,
            final_damage: 0,
            resistance,
            was_resisted: false,
            was_vulnerable: false,
            was_immune: true,
        }
    } else {
        let scaled = i64::from(base) * (100 - i64::from(resistance));
        let final_damage = ((scaled + 50) / 100).clamp(0, i64::from(u32::MAX)) as u32;
        DamageResolution {
            damage_type,
            base,
            final_damage,
            resistance,
            was_resisted: resistance > 0,
            was_vulnerable: resistance < 0,
            was_immune: false,
        }
    };

    tracing::debug!(
        damage_type = %damage_type,
        base,
        resistance,
        final_damage = resolution.final_damage,
        "resolved damage"
    );
    resolution
}
