//! Damage and hazard resolution.

pub mod damage;
pub mod hazard;

pub use damage::{
    DamageResistances, DamageResolution, DamageType, IMMUNITY_THRESHOLD, ResistanceLabel,
    label_for, resolve_damage,
};
pub use hazard::{
    HAZARD_PREFIX, HazardDamage, HazardDefinition, HazardOracle, HazardTrigger, hazard_at,
    resolve_hazard,
};
