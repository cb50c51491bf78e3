//! Combat grid: bounded cells with terrain, cover and entity occupancy.
//!
//! The grid is the single source of truth for where every entity stands
//! during an encounter. Every mutation of occupancy goes through
//! [`CombatGrid::place`], [`CombatGrid::remove`] or [`CombatGrid::move_entity`],
//! which enforce the occupancy rules:
//!
//! - an entity occupies at most one cell
//! - a cell holds at most one entity
//! - entities only enter in-bounds, passable cells
//!
//! Failed operations leave the grid untouched.

mod cell;
mod layout;
mod position;

use std::collections::BTreeMap;

pub use cell::{Cell, CoverObject, CoverType, TerrainType};
pub use layout::{
    CoverDefinition, LayoutEntry, LayoutOracle, LayoutReport, RoomLayout, SkipReason,
    SkippedEntry, TerrainDefinition, build_grid,
};
pub use position::GridPosition;

use crate::config::CombatConfig;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::EntityId;

/// Errors raised by grid placement and movement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position {position} is outside the grid")]
    OutOfBounds { position: GridPosition },

    #[error("position {position} is impassable")]
    Impassable { position: GridPosition },

    #[error("position {position} is occupied by entity {occupant}")]
    Occupied {
        position: GridPosition,
        occupant: EntityId,
    },

    #[error("entity {entity} is already placed at {position}")]
    AlreadyPlaced {
        entity: EntityId,
        position: GridPosition,
    },

    #[error("entity {entity} is not on the grid")]
    NotPlaced { entity: EntityId },
}

impl CombatError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Impassable { .. } | Self::Occupied { .. } => ErrorSeverity::Recoverable,
            Self::OutOfBounds { .. } | Self::AlreadyPlaced { .. } | Self::NotPlaced { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            Self::Impassable { .. } => "GRID_IMPASSABLE",
            Self::Occupied { .. } => "GRID_OCCUPIED",
            Self::AlreadyPlaced { .. } => "GRID_ALREADY_PLACED",
            Self::NotPlaced { .. } => "GRID_NOT_PLACED",
        }
    }
}

/// Result of a successful [`CombatGrid::move_entity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub from: GridPosition,
    pub to: GridPosition,
    /// Movement cost of the destination terrain.
    pub cost: u32,
    /// Whether the destination is hazardous terrain.
    pub entered_hazard: bool,
}

/// Result of damaging cover with [`CombatGrid::damage_cover`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverDamage {
    pub name: String,
    pub remaining: u32,
    pub destroyed: bool,
}

/// Fixed-size grid for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    positions: BTreeMap<EntityId, GridPosition>,
    occupants: BTreeMap<GridPosition, EntityId>,
}

impl CombatGrid {
    /// Creates an all-normal, fully passable grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds
    /// [`CombatConfig::MAX_GRID_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {width}x{height}"
        );
        assert!(
            width <= CombatConfig::MAX_GRID_DIMENSION && height <= CombatConfig::MAX_GRID_DIMENSION,
            "grid dimensions {width}x{height} exceed the maximum of {}",
            CombatConfig::MAX_GRID_DIMENSION
        );
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            positions: BTreeMap::new(),
            occupants: BTreeMap::new(),
        }
    }

    /// Creates a grid with the configured default dimensions.
    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.grid_width, config.grid_height)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: GridPosition) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn cell(&self, position: GridPosition) -> Option<&Cell> {
        self.index(position).map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, position: GridPosition) -> Result<&mut Cell, GridError> {
        match self.index(position) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(GridError::OutOfBounds { position }),
        }
    }

    /// Whether the position is in bounds and passable.
    pub fn is_passable(&self, position: GridPosition) -> bool {
        self.cell(position).is_some_and(|cell| cell.passable)
    }

    /// Whether the cell blocks line of sight. Out-of-bounds cells do not.
    pub fn blocks_sight(&self, position: GridPosition) -> bool {
        self.cell(position).is_some_and(Cell::blocks_sight)
    }

    pub fn terrain_at(&self, position: GridPosition) -> Option<TerrainType> {
        self.cell(position).map(|cell| cell.terrain)
    }

    pub fn cover_at(&self, position: GridPosition) -> Option<&CoverObject> {
        self.cell(position).and_then(|cell| cell.cover.as_ref())
    }

    // ===== scenario setup =====

    pub fn set_terrain(&mut self, position: GridPosition, terrain: TerrainType) -> Result<(), GridError> {
        self.cell_mut(position)?.terrain = terrain;
        Ok(())
    }

    /// Sets passability. Entities already standing in the cell stay there.
    pub fn set_passable(&mut self, position: GridPosition, passable: bool) -> Result<(), GridError> {
        self.cell_mut(position)?.passable = passable;
        Ok(())
    }

    pub fn set_cover(
        &mut self,
        position: GridPosition,
        cover: Option<CoverObject>,
    ) -> Result<(), GridError> {
        self.cell_mut(position)?.cover = cover;
        Ok(())
    }

    pub fn set_terrain_id(
        &mut self,
        position: GridPosition,
        terrain_id: Option<String>,
    ) -> Result<(), GridError> {
        self.cell_mut(position)?.terrain_id = terrain_id;
        Ok(())
    }

    /// Damages the cover in a cell, removing it once its hit points reach
    /// zero. Returns `None` when the cell has no cover.
    pub fn damage_cover(&mut self, position: GridPosition, amount: u32) -> Option<CoverDamage> {
        let index = self.index(position)?;
        let cell = &mut self.cells[index];
        let cover = cell.cover.as_mut()?;
        cover.hit_points = cover.hit_points.saturating_sub(amount);
        let outcome = CoverDamage {
            name: cover.name.clone(),
            remaining: cover.hit_points,
            destroyed: cover.is_destroyed(),
        };
        if outcome.destroyed {
            tracing::debug!(%position, cover = %outcome.name, "cover destroyed");
            cell.cover = None;
        }
        Some(outcome)
    }

    // ===== occupancy =====

    fn check_enterable(&self, position: GridPosition, mover: EntityId) -> Result<(), GridError> {
        let cell = self.cell(position).ok_or(GridError::OutOfBounds { position })?;
        if !cell.passable {
            return Err(GridError::Impassable { position });
        }
        match self.occupants.get(&position) {
            Some(occupant) if *occupant != mover => Err(GridError::Occupied {
                position,
                occupant: *occupant,
            }),
            _ => Ok(()),
        }
    }

    /// Places an entity that is not yet on the grid.
    pub fn place(&mut self, entity: EntityId, position: GridPosition) -> Result<(), GridError> {
        if let Some(current) = self.positions.get(&entity) {
            return Err(GridError::AlreadyPlaced {
                entity,
                position: *current,
            });
        }
        self.check_enterable(position, entity)?;

        self.positions.insert(entity, position);
        self.occupants.insert(position, entity);
        tracing::debug!(%entity, %position, "placed entity");
        Ok(())
    }

    /// Removes an entity, returning the position it occupied.
    pub fn remove(&mut self, entity: EntityId) -> Option<GridPosition> {
        let position = self.positions.remove(&entity)?;
        self.occupants.remove(&position);
        tracing::debug!(%entity, %position, "removed entity");
        Some(position)
    }

    /// Moves a placed entity to a destination that satisfies the placement
    /// rules. Moving onto the entity's own cell is allowed and costs the
    /// cell's terrain cost.
    pub fn move_entity(&mut self, entity: EntityId, to: GridPosition) -> Result<MoveOutcome, GridError> {
        let from = self
            .position_of(entity)
            .ok_or(GridError::NotPlaced { entity })?;
        self.check_enterable(to, entity)?;

        let terrain = self.terrain_at(to).unwrap_or_default();
        self.occupants.remove(&from);
        self.positions.insert(entity, to);
        self.occupants.insert(to, entity);

        let outcome = MoveOutcome {
            from,
            to,
            cost: terrain.movement_cost(),
            entered_hazard: terrain == TerrainType::Hazardous,
        };
        tracing::debug!(%entity, %from, %to, cost = outcome.cost, "moved entity");
        Ok(outcome)
    }

    pub fn position_of(&self, entity: EntityId) -> Option<GridPosition> {
        self.positions.get(&entity).copied()
    }

    pub fn occupant_at(&self, position: GridPosition) -> Option<EntityId> {
        self.occupants.get(&position).copied()
    }

    pub fn is_placed(&self, entity: EntityId) -> bool {
        self.positions.contains_key(&entity)
    }

    /// Placed entities in identifier order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, GridPosition)> + '_ {
        self.positions.iter().map(|(entity, position)| (*entity, *position))
    }

    /// Chebyshev distance between two placed entities, `None` if either is
    /// not on the grid.
    pub fn distance(&self, a: EntityId, b: EntityId) -> Option<u32> {
        let from = self.position_of(a)?;
        let to = self.position_of(b)?;
        Some(from.distance_to(to))
    }

    /// Whether both entities are placed and within distance one.
    pub fn are_adjacent(&self, a: EntityId, b: EntityId) -> bool {
        self.distance(a, b).is_some_and(|distance| distance <= 1)
    }

    /// Renders the grid row by row. Occupied cells use the glyph returned by
    /// `occupant`; other cells use [`Cell::glyph`].
    pub fn render_with(&self, occupant: impl Fn(EntityId) -> char) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height as i32 {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width as i32 {
                let position = GridPosition::new(x, y);
                let glyph = match self.occupant_at(position) {
                    Some(entity) => occupant(entity),
                    None => self.cells[y as usize * self.width as usize + x as usize].glyph(),
                };
                out.push(glyph);
            }
        }
        out
    }
}

impl Default for CombatGrid {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: EntityId = EntityId(1);
    const GOBLIN: EntityId = EntityId(2);

    #[test]
    fn default_grid_is_eight_by_eight() {
        let grid = CombatGrid::default();
        assert_eq!((grid.width(), grid.height()), (8, 8));
        assert!(grid.contains(GridPosition::new(7, 7)));
        assert!(!grid.contains(GridPosition::new(8, 0)));
        assert!(!grid.contains(GridPosition::new(0, -1)));
    }

    #[test]
    #[should_panic(expected = "grid dimensions must be positive")]
    fn zero_sized_grid_panics() {
        let _ = CombatGrid::new(0, 4);
    }

    #[test]
    fn placement_rules() {
        let mut grid = CombatGrid::new(4, 4);
        let wall = GridPosition::new(1, 1);
        grid.set_passable(wall, false).unwrap();

        assert_eq!(
            grid.place(HERO, GridPosition::new(4, 0)),
            Err(GridError::OutOfBounds {
                position: GridPosition::new(4, 0)
            })
        );
        assert_eq!(
            grid.place(HERO, wall),
            Err(GridError::Impassable { position: wall })
        );
        grid.place(HERO, GridPosition::new(0, 0)).unwrap();
        assert_eq!(
            grid.place(GOBLIN, GridPosition::new(0, 0)),
            Err(GridError::Occupied {
                position: GridPosition::new(0, 0),
                occupant: HERO
            })
        );
        assert!(matches!(
            grid.place(HERO, GridPosition::new(2, 2)),
            Err(GridError::AlreadyPlaced { .. })
        ));
        assert_eq!(grid.position_of(HERO), Some(GridPosition::new(0, 0)));
        assert_eq!(grid.position_of(GOBLIN), None);
    }

    #[test]
    fn failed_placement_has_no_side_effect() {
        let mut grid = CombatGrid::new(3, 3);
        let before = grid.clone();
        assert!(grid.place(HERO, GridPosition::new(9, 9)).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn remove_frees_the_cell() {
        let mut grid = CombatGrid::new(3, 3);
        grid.place(HERO, GridPosition::new(1, 1)).unwrap();
        assert_eq!(grid.remove(HERO), Some(GridPosition::new(1, 1)));
        assert_eq!(grid.remove(HERO), None);
        grid.place(GOBLIN, GridPosition::new(1, 1)).unwrap();
        assert_eq!(grid.occupant_at(GridPosition::new(1, 1)), Some(GOBLIN));
    }

    #[test]
    fn distance_and_adjacency() {
        let mut grid = CombatGrid::new(8, 8);
        grid.place(HERO, GridPosition::new(2, 2)).unwrap();
        grid.place(GOBLIN, GridPosition::new(3, 3)).unwrap();
        assert_eq!(grid.distance(HERO, GOBLIN), Some(1));
        assert!(grid.are_adjacent(HERO, GOBLIN));
        assert_eq!(grid.distance(HERO, EntityId(99)), None);
        assert!(!grid.are_adjacent(HERO, EntityId(99)));
    }

    #[test]
    fn move_reports_cost_and_hazard() {
        let mut grid = CombatGrid::new(5, 5);
        grid.set_terrain(GridPosition::new(1, 0), TerrainType::Difficult).unwrap();
        grid.set_terrain(GridPosition::new(2, 0), TerrainType::Hazardous).unwrap();
        grid.place(HERO, GridPosition::new(0, 0)).unwrap();

        let step = grid.move_entity(HERO, GridPosition::new(1, 0)).unwrap();
        assert_eq!(step.cost, 2);
        assert!(!step.entered_hazard);

        let step = grid.move_entity(HERO, GridPosition::new(2, 0)).unwrap();
        assert_eq!(step.from, GridPosition::new(1, 0));
        assert_eq!(step.cost, 1);
        assert!(step.entered_hazard);
        assert_eq!(grid.occupant_at(GridPosition::new(1, 0)), None);
    }

    #[test]
    fn move_rejects_occupied_destination_without_side_effects() {
        let mut grid = CombatGrid::new(5, 5);
        grid.place(HERO, GridPosition::new(0, 0)).unwrap();
        grid.place(GOBLIN, GridPosition::new(1, 0)).unwrap();
        assert!(matches!(
            grid.move_entity(HERO, GridPosition::new(1, 0)),
            Err(GridError::Occupied { .. })
        ));
        assert_eq!(grid.position_of(HERO), Some(GridPosition::new(0, 0)));
        assert_eq!(
            grid.move_entity(EntityId(7), GridPosition::new(2, 2)),
            Err(GridError::NotPlaced { entity: EntityId(7) })
        );
    }

    #[test]
    fn cover_is_destroyed_at_zero_hit_points() {
        let mut grid = CombatGrid::new(3, 3);
        let spot = GridPosition::new(1, 1);
        grid.set_cover(spot, Some(CoverObject::new("barrel", CoverType::Partial, 2, 5)))
            .unwrap();

        let hit = grid.damage_cover(spot, 3).unwrap();
        assert_eq!(hit.remaining, 2);
        assert!(!hit.destroyed);

        let hit = grid.damage_cover(spot, 10).unwrap();
        assert!(hit.destroyed);
        assert!(grid.cover_at(spot).is_none());
        assert!(grid.damage_cover(spot, 1).is_none());
    }

    #[test]
    fn cover_never_blocks_movement() {
        let mut grid = CombatGrid::new(3, 3);
        let spot = GridPosition::new(1, 1);
        grid.set_cover(spot, Some(CoverObject::new("wall", CoverType::Full, 4, 20)))
            .unwrap();
        grid.place(HERO, spot).unwrap();
        assert!(!grid.blocks_sight(spot));
    }

    #[test]
    fn render_uses_terrain_and_occupant_glyphs() {
        let mut grid = CombatGrid::new(3, 2);
        grid.set_passable(GridPosition::new(1, 0), false).unwrap();
        grid.set_terrain(GridPosition::new(2, 0), TerrainType::Difficult).unwrap();
        grid.set_terrain(GridPosition::new(0, 1), TerrainType::Hazardous).unwrap();
        grid.set_cover(
            GridPosition::new(2, 1),
            Some(CoverObject::new("crate", CoverType::Partial, 2, 5)),
        )
        .unwrap();
        grid.place(HERO, GridPosition::new(1, 1)).unwrap();

        let map = grid.render_with(|_| '@');
        assert_eq!(map, ".#~\n^@[");
    }

    #[test]
    fn error_codes() {
        let err = GridError::NotPlaced { entity: HERO };
        assert_eq!(err.error_code(), "GRID_NOT_PLACED");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(
            GridError::Occupied {
                position: GridPosition::ORIGIN,
                occupant: GOBLIN
            }
            .severity()
            .is_recoverable()
        );
    }
}
