//! Environmental hazard damage.

use crate::dice::{DicePool, DiceRollResult, DiceRoller, RandomSource};
use crate::grid::{CombatGrid, GridPosition, TerrainType};

use super::damage::{DamageResistances, DamageResolution, DamageType, resolve_damage};

/// Prefix used by terrain definition ids that name a hazard.
pub const HAZARD_PREFIX: &str = "hazard:";

/// Hazard definition supplied by content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardDefinition {
    pub id: String,
    pub name: String,
    pub damage: DicePool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub damage_on_enter: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_per_turn: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl HazardDefinition {
    pub const fn triggers_on(&self, trigger: HazardTrigger) -> bool {
        match trigger {
            HazardTrigger::Enter => self.damage_on_enter,
            HazardTrigger::TurnStart => self.damage_per_turn,
        }
    }
}

/// Lookup of hazard definitions by identifier.
pub trait HazardOracle: Send + Sync {
    fn hazard(&self, id: &str) -> Option<HazardDefinition>;
}

/// When hazard damage is being considered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HazardTrigger {
    /// The combatant just moved into the cell.
    Enter,
    /// The combatant starts its turn in the cell.
    TurnStart,
}

/// Damage dealt by a hazard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HazardDamage {
    pub hazard_id: String,
    pub name: String,
    pub trigger: HazardTrigger,
    pub roll: DiceRollResult,
    pub damage: DamageResolution,
}

/// Looks up the hazard for a cell's terrain definition id. Ids may carry the
/// [`HAZARD_PREFIX`]; the bare name is tried first, then the full id.
pub fn hazard_at(
    grid: &CombatGrid,
    position: GridPosition,
    hazards: &(impl HazardOracle + ?Sized),
) -> Option<HazardDefinition> {
    let cell = grid.cell(position)?;
    if cell.terrain != TerrainType::Hazardous {
        return None;
    }
    let Some(id) = cell.terrain_id.as_deref() else {
        tracing::debug!(%position, "hazardous cell has no terrain definition id");
        return None;
    };

    let bare = id
        .get(..HAZARD_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(HAZARD_PREFIX))
        .map(|_| &id[HAZARD_PREFIX.len()..]);
    let found = bare
        .and_then(|name| hazards.hazard(name))
        .or_else(|| hazards.hazard(id));
    if found.is_none() {
        tracing::warn!(%position, id, "unknown hazard definition");
    }
    found
}

/// Rolls hazard damage for a combatant at `position`.
///
/// Returns `None` when the cell is not a known hazard or the hazard does not
/// fire on `trigger`. No dice are rolled in that case.
pub fn resolve_hazard<R: RandomSource>(
    grid: &CombatGrid,
    position: GridPosition,
    trigger: HazardTrigger,
    hazards: &(impl HazardOracle + ?Sized),
    roller: &mut DiceRoller<R>,
    resistances: &DamageResistances,
) -> Option<HazardDamage> {
    let hazard = hazard_at(grid, position, hazards)?;
    if !hazard.triggers_on(trigger) {
        tracing::debug!(hazard = %hazard.name, %trigger, "hazard does not fire on trigger");
        return None;
    }

    let roll = roller.roll(&hazard.damage);
    let damage = resolve_damage(roll.total, Some(hazard.damage_type), resistances);
    tracing::debug!(
        hazard = %hazard.name,
        %position,
        %trigger,
        rolled = roll.total,
        dealt = damage.final_damage,
        "hazard damage"
    );

    Some(HazardDamage {
        hazard_id: hazard.id,
        name: hazard.name,
        trigger,
        roll,
        damage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DiceType;

    struct Hazards;

    impl HazardOracle for Hazards {
        fn hazard(&self, id: &str) -> Option<HazardDefinition> {
            match id {
                "fire" => Some(HazardDefinition {
                    id: "fire".into(),
                    name: "Burning Floor".into(),
                    damage: DicePool::new(2, DiceType::D6, 0),
                    damage_type: DamageType::Fire,
                    damage_on_enter: true,
                    damage_per_turn: true,
                }),
                "spikes" => Some(HazardDefinition {
                    id: "spikes".into(),
                    name: "Spike Pit".into(),
                    damage: DicePool::new(1, DiceType::D4, 1),
                    damage_type: DamageType::Physical,
                    damage_on_enter: true,
                    damage_per_turn: false,
                }),
                _ => None,
            }
        }
    }

    fn hazard_grid(id: &str) -> (CombatGrid, GridPosition) {
        let mut grid = CombatGrid::new(4, 4);
        let spot = GridPosition::new(2, 2);
        grid.set_terrain(spot, TerrainType::Hazardous).unwrap();
        grid.set_terrain_id(spot, Some(id.to_string())).unwrap();
        (grid, spot)
    }

    #[test]
    fn prefixed_and_bare_ids_resolve() {
        let (grid, spot) = hazard_grid("HAZARD:fire");
        assert_eq!(hazard_at(&grid, spot, &Hazards).unwrap().name, "Burning Floor");
        let (grid, spot) = hazard_grid("spikes");
        assert_eq!(hazard_at(&grid, spot, &Hazards).unwrap().name, "Spike Pit");
    }

    #[test]
    fn rolls_and_resists_damage() {
        let (grid, spot) = hazard_grid("hazard:fire");
        let resistances = DamageResistances::new().with(DamageType::Fire, 100);
        let mut roller = DiceRoller::seeded(3);
        let hit = resolve_hazard(
            &grid,
            spot,
            HazardTrigger::TurnStart,
            &Hazards,
            &mut roller,
            &resistances,
        )
        .unwrap();
        assert!((2..=12).contains(&hit.roll.total));
        assert!(hit.damage.was_immune);
        assert_eq!(hit.damage.final_damage, 0);
    }

    #[test]
    fn disabled_trigger_rolls_nothing() {
        let (grid, spot) = hazard_grid("hazard:spikes");
        let mut roller = DiceRoller::seeded(3);
        let hit = resolve_hazard(
            &grid,
            spot,
            HazardTrigger::TurnStart,
            &Hazards,
            &mut roller,
            &DamageResistances::new(),
        );
        assert!(hit.is_none());
        assert_eq!(roller.rng().draws(), 0);
    }

    #[test]
    fn non_hazard_cells_deal_nothing() {
        let (grid, _) = hazard_grid("hazard:fire");
        let mut roller = DiceRoller::seeded(3);
        let normal = GridPosition::new(0, 0);
        assert!(
            resolve_hazard(
                &grid,
                normal,
                HazardTrigger::Enter,
                &Hazards,
                &mut roller,
                &DamageResistances::new()
            )
            .is_none()
        );
        let (grid, spot) = hazard_grid("hazard:quicksand");
        assert!(hazard_at(&grid, spot, &Hazards).is_none());
    }
}
