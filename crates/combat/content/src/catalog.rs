//! Terrain, cover and hazard catalogs.

use combat_core::{
    CoverDefinition, HazardDefinition, HazardOracle, LayoutOracle, TerrainDefinition,
};

/// Every definition a room layout or hazard lookup can reference.
///
/// Serves both [`LayoutOracle`] and [`HazardOracle`], so one loaded catalog
/// can build a room and resolve the hazards on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Catalog {
    pub terrain: Vec<TerrainDefinition>,
    pub cover: Vec<CoverDefinition>,
    pub hazards: Vec<HazardDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_terrain(mut self, definition: TerrainDefinition) -> Self {
        self.terrain.push(definition);
        self
    }

    #[must_use]
    pub fn with_cover(mut self, definition: CoverDefinition) -> Self {
        self.cover.push(definition);
        self
    }

    #[must_use]
    pub fn with_hazard(mut self, definition: HazardDefinition) -> Self {
        self.hazards.push(definition);
        self
    }

    /// First identifier defined more than once within a section.
    pub fn duplicate_id(&self) -> Option<&str> {
        fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
            let mut seen = std::collections::BTreeSet::new();
            ids.into_iter().find(|id| !seen.insert(*id))
        }

        first_duplicate(self.terrain.iter().map(|d| d.id.as_str()))
            .or_else(|| first_duplicate(self.cover.iter().map(|d| d.id.as_str())))
            .or_else(|| first_duplicate(self.hazards.iter().map(|d| d.id.as_str())))
    }
}

impl LayoutOracle for Catalog {
    fn terrain(&self, id: &str) -> Option<TerrainDefinition> {
        self.terrain.iter().find(|d| d.id == id).cloned()
    }

    fn cover(&self, id: &str) -> Option<CoverDefinition> {
        self.cover.iter().find(|d| d.id == id).cloned()
    }
}

impl HazardOracle for Catalog {
    fn hazard(&self, id: &str) -> Option<HazardDefinition> {
        self.hazards.iter().find(|d| d.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        CoverType, DamageResistances, DamageType, DicePool, DiceRoller, DiceType, GridPosition,
        HazardTrigger, LayoutEntry, RoomLayout, TerrainType, build_grid, resolve_hazard,
    };

    fn catalog() -> Catalog {
        Catalog::new()
            .with_terrain(TerrainDefinition {
                id: "hazard:fire".into(),
                name: "Burning Floor".into(),
                terrain: TerrainType::Hazardous,
                passable: true,
            })
            .with_terrain(TerrainDefinition {
                id: "wall".into(),
                name: "Stone Wall".into(),
                terrain: TerrainType::Normal,
                passable: false,
            })
            .with_cover(CoverDefinition {
                id: "crate".into(),
                name: "Wooden Crate".into(),
                kind: CoverType::Partial,
                defense_bonus: 2,
                hit_points: 10,
            })
            .with_hazard(HazardDefinition {
                id: "fire".into(),
                name: "Burning Floor".into(),
                damage: DicePool::new(1, DiceType::D6, 0),
                damage_type: DamageType::Fire,
                damage_on_enter: true,
                damage_per_turn: true,
            })
    }

    #[test]
    fn builds_room_and_resolves_hazard() {
        let catalog = catalog();
        let layout = RoomLayout {
            room_id: "test".into(),
            width: 4,
            height: 4,
            terrain: vec![
                LayoutEntry::new("hazard:fire", ["B2"]),
                LayoutEntry::new("wall", ["D1", "D2"]),
            ],
            cover: vec![LayoutEntry::new("crate", ["A4"])],
        };
        let (grid, report) = build_grid(&layout, &catalog);
        assert!(report.is_clean());
        assert_eq!(report.applied, 4);
        assert!(!grid.is_passable(GridPosition::new(3, 0)));
        assert_eq!(grid.cover_at(GridPosition::new(0, 3)).unwrap().name, "Wooden Crate");

        let mut roller = DiceRoller::seeded(8);
        let hit = resolve_hazard(
            &grid,
            GridPosition::new(1, 1),
            HazardTrigger::Enter,
            &catalog,
            &mut roller,
            &DamageResistances::new(),
        )
        .unwrap();
        assert_eq!(hit.hazard_id, "fire");
        assert!((1..=6).contains(&hit.damage.final_damage));
    }

    #[test]
    fn detects_duplicate_ids() {
        assert_eq!(catalog().duplicate_id(), None);
        let doubled = catalog().with_cover(CoverDefinition {
            id: "crate".into(),
            name: "Another Crate".into(),
            kind: CoverType::Full,
            defense_bonus: 4,
            hit_points: 20,
        });
        assert_eq!(doubled.duplicate_id(), Some("crate"));
    }
}
