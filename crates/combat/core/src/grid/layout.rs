//! Room layouts: building a [`CombatGrid`] from labelled terrain and cover
//! entries resolved through a [`LayoutOracle`].

use super::{CombatGrid, CoverObject, CoverType, GridPosition, TerrainType};

/// Terrain definition supplied by content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainDefinition {
    pub id: String,
    pub name: String,
    pub terrain: TerrainType,
    #[cfg_attr(feature = "serde", serde(default = "default_passable"))]
    pub passable: bool,
}

#[cfg(feature = "serde")]
fn default_passable() -> bool {
    true
}

/// Cover definition supplied by content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverDefinition {
    pub id: String,
    pub name: String,
    pub kind: CoverType,
    pub defense_bonus: i32,
    pub hit_points: u32,
}

impl CoverDefinition {
    /// Fresh cover object at full hit points.
    pub fn instantiate(&self) -> CoverObject {
        CoverObject::new(self.name.clone(), self.kind, self.defense_bonus, self.hit_points)
    }
}

/// Lookup of terrain and cover definitions by identifier.
pub trait LayoutOracle: Send + Sync {
    fn terrain(&self, id: &str) -> Option<TerrainDefinition>;
    fn cover(&self, id: &str) -> Option<CoverDefinition>;
}

/// A set of cells sharing one terrain or cover identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutEntry {
    /// Cell labels such as `"A1"`.
    pub cells: Vec<String>,
    pub id: String,
}

impl LayoutEntry {
    pub fn new(id: impl Into<String>, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Room geometry with optional terrain and cover placements.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomLayout {
    pub room_id: String,
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub terrain: Vec<LayoutEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover: Vec<LayoutEntry>,
}

/// Why a layout entry or cell was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    UnknownTerrain,
    UnknownCover,
    MalformedLabel,
    OutOfBounds,
}

/// A skipped entry (`cell` is `None`) or a skipped cell within an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub id: String,
    pub cell: Option<String>,
    pub reason: SkipReason,
}

/// Summary of a [`build_grid`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Number of cells that received terrain or cover.
    pub applied: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl LayoutReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, room_id: &str, id: &str, cell: Option<&str>, reason: SkipReason) {
        tracing::warn!(room = room_id, id, cell, %reason, "skipped layout entry");
        self.skipped.push(SkippedEntry {
            id: id.to_string(),
            cell: cell.map(str::to_string),
            reason,
        });
    }
}

fn resolve_cells<'a>(
    grid: &'a CombatGrid,
    layout: &'a RoomLayout,
    entry: &'a LayoutEntry,
    report: &'a mut LayoutReport,
) -> impl Iterator<Item = GridPosition> + 'a {
    entry.cells.iter().filter_map(move |label| {
        let Some(position) = GridPosition::from_label(label) else {
            report.skip(&layout.room_id, &entry.id, Some(label), SkipReason::MalformedLabel);
            return None;
        };
        if !grid.contains(position) {
            report.skip(&layout.room_id, &entry.id, Some(label), SkipReason::OutOfBounds);
            return None;
        }
        Some(position)
    })
}

/// Builds the grid for a room.
///
/// Unknown identifiers skip their whole entry; malformed or out-of-bounds
/// labels skip that cell only. Nothing here fails the layout as a whole.
///
/// # Panics
///
/// Panics if the layout has a zero dimension (see [`CombatGrid::new`]).
pub fn build_grid(
    layout: &RoomLayout,
    oracle: &(impl LayoutOracle + ?Sized),
) -> (CombatGrid, LayoutReport) {
    let mut grid = CombatGrid::new(layout.width, layout.height);
    let mut report = LayoutReport::default();

    for entry in &layout.terrain {
        let Some(definition) = oracle.terrain(&entry.id) else {
            report.skip(&layout.room_id, &entry.id, None, SkipReason::UnknownTerrain);
            continue;
        };
        let cells: Vec<_> = resolve_cells(&grid, layout, entry, &mut report).collect();
        for position in cells {
            if let Some(cell) = grid.index(position).map(|index| &mut grid.cells[index]) {
                cell.terrain = definition.terrain;
                cell.passable = definition.passable;
                cell.terrain_id = Some(definition.id.clone());
                report.applied += 1;
            }
        }
    }

    for entry in &layout.cover {
        let Some(definition) = oracle.cover(&entry.id) else {
            report.skip(&layout.room_id, &entry.id, None, SkipReason::UnknownCover);
            continue;
        };
        let cells: Vec<_> = resolve_cells(&grid, layout, entry, &mut report).collect();
        for position in cells {
            if let Some(cell) = grid.index(position).map(|index| &mut grid.cells[index]) {
                cell.cover = Some(definition.instantiate());
                report.applied += 1;
            }
        }
    }

    tracing::debug!(
        room = %layout.room_id,
        applied = report.applied,
        skipped = report.skipped.len(),
        "built room grid"
    );
    (grid, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Catalog;

    impl LayoutOracle for Catalog {
        fn terrain(&self, id: &str) -> Option<TerrainDefinition> {
            match id {
                "rubble" => Some(TerrainDefinition {
                    id: id.into(),
                    name: "Rubble".into(),
                    terrain: TerrainType::Difficult,
                    passable: true,
                }),
                "pillar" => Some(TerrainDefinition {
                    id: id.into(),
                    name: "Pillar".into(),
                    terrain: TerrainType::Normal,
                    passable: false,
                }),
                "hazard:fire" => Some(TerrainDefinition {
                    id: id.into(),
                    name: "Burning Floor".into(),
                    terrain: TerrainType::Hazardous,
                    passable: true,
                }),
                _ => None,
            }
        }

        fn cover(&self, id: &str) -> Option<CoverDefinition> {
            (id == "crate").then(|| CoverDefinition {
                id: id.into(),
                name: "Crate".into(),
                kind: CoverType::Partial,
                defense_bonus: 2,
                hit_points: 8,
            })
        }
    }

    fn layout() -> RoomLayout {
        RoomLayout {
            room_id: "hall".into(),
            width: 4,
            height: 3,
            terrain: vec![
                LayoutEntry::new("rubble", ["A1", "b1"]),
                LayoutEntry::new("pillar", ["C2"]),
                LayoutEntry::new("lava", ["D3"]),
                LayoutEntry::new("hazard:fire", ["D3", "Q9", "3D"]),
            ],
            cover: vec![
                LayoutEntry::new("crate", ["A3"]),
                LayoutEntry::new("sandbags", ["B3"]),
            ],
        }
    }

    #[test]
    fn applies_known_entries() {
        let (grid, report) = build_grid(&layout(), &Catalog);
        assert_eq!(grid.terrain_at(GridPosition::new(0, 0)), Some(TerrainType::Difficult));
        assert_eq!(grid.terrain_at(GridPosition::new(1, 0)), Some(TerrainType::Difficult));
        assert!(!grid.is_passable(GridPosition::new(2, 1)));
        let hazard = grid.cell(GridPosition::new(3, 2)).unwrap();
        assert_eq!(hazard.terrain, TerrainType::Hazardous);
        assert_eq!(hazard.terrain_id.as_deref(), Some("hazard:fire"));
        assert_eq!(grid.cover_at(GridPosition::new(0, 2)).unwrap().name, "Crate");
        assert_eq!(report.applied, 5);
    }

    #[test]
    fn reports_skipped_entries_and_cells() {
        let (_, report) = build_grid(&layout(), &Catalog);
        let reasons: Vec<_> = report
            .skipped
            .iter()
            .map(|skip| (skip.id.as_str(), skip.cell.as_deref(), skip.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("lava", None, SkipReason::UnknownTerrain),
                ("hazard:fire", Some("Q9"), SkipReason::OutOfBounds),
                ("hazard:fire", Some("3D"), SkipReason::MalformedLabel),
                ("sandbags", None, SkipReason::UnknownCover),
            ]
        );
        assert!(!report.is_clean());
    }
}
