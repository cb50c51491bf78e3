//! Deterministic turn-based combat resolution.
//!
//! `combat-core` turns a room grid, a roster of combatants and player
//! commands into initiative order, movement, range and line-of-sight checks,
//! target resolution, AI decisions and damage outcomes. Every random outcome
//! is drawn from an explicitly injected [`dice::RandomSource`], so the same
//! seed and the same call sequence reproduce identical results.
//!
//! The crate is synchronous and performs no I/O. Content (monsters, terrain
//! catalogs, room layouts) is supplied through the oracle traits
//! [`grid::LayoutOracle`] and [`combat::HazardOracle`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod dice;
pub mod encounter;
pub mod error;
pub mod grid;
pub mod los;
pub mod range;
pub mod state;
pub mod targeting;

pub use ai::{AiAction, AiBehavior, AiContext, AiDecision, AiPolicy, decide};
pub use combat::{
    DamageResistances, DamageResolution, DamageType, HazardDamage, HazardDefinition, HazardOracle,
    HazardTrigger, ResistanceLabel, label_for, resolve_damage, resolve_hazard,
};
pub use config::CombatConfig;
pub use dice::{
    AdvantageRecord, AdvantageType, DiceFormatError, DicePool, DiceRollResult, DiceRoller,
    DiceType, RandomSource, RngState, SeededRng,
};
pub use encounter::{
    CombatEncounter, Combatant, DamageApplied, EncounterError, EncounterOutcome, EncounterState,
    InitiativeRoll, Monster, Participant, Player, TurnAdvance,
};
pub use error::{CombatError, ErrorSeverity};
pub use grid::{
    Cell, CombatGrid, CoverDamage, CoverDefinition, CoverObject, CoverType, GridError, GridPosition,
    LayoutEntry, LayoutOracle, LayoutReport, MoveOutcome, RoomLayout, TerrainDefinition,
    TerrainType, build_grid,
};
pub use los::{
    BresenhamLine, Sight, has_line_of_sight, line_between, line_of_sight, sight_between,
    visible_positions,
};
pub use range::{RangeCheck, RangeFailure, RangeProfile, RangeType, check_full_range, check_range};
pub use state::{EntityId, Health, Side};
pub use targeting::{TargetError, TargetResolution, resolve_target, target_list};
