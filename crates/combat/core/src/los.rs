//! Line of sight over a [`CombatGrid`].
//!
//! Sight is traced with an integer Bresenham walk. The rules:
//!
//! - entities within distance one always see each other, no walk is made
//! - the walk excludes both endpoints, so the cells the viewer and the
//!   target stand on never block
//! - only impassable cells block; occupants and cover never do
//! - the blocker reported is the first impassable cell from source to target

use std::iter::FusedIterator;

use crate::grid::{CombatGrid, GridError, GridPosition};
use crate::state::EntityId;

/// Outcome of a line-of-sight query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sight {
    Clear,
    /// Blocked at the first impassable cell along the walk.
    Blocked(GridPosition),
}

impl Sight {
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Clear)
    }

    pub const fn blocker(self) -> Option<GridPosition> {
        match self {
            Self::Clear => None,
            Self::Blocked(position) => Some(position),
        }
    }
}

/// Cells on the Bresenham line from `start` to `end`, both inclusive.
///
/// Finite and order-preserving; clone it or build a new one to walk again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BresenhamLine {
    current: GridPosition,
    end: GridPosition,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl BresenhamLine {
    pub fn new(start: GridPosition, end: GridPosition) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = GridPosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let cell = self.current;
        if cell == self.end {
            self.done = true;
            return Some(cell);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.current.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }
        Some(cell)
    }
}

impl FusedIterator for BresenhamLine {}

/// Ordered cells from `from` to `to`, both inclusive.
pub fn line_between(from: GridPosition, to: GridPosition) -> BresenhamLine {
    BresenhamLine::new(from, to)
}

/// Sight between two cells, independent of occupancy.
pub fn sight_between(grid: &CombatGrid, from: GridPosition, to: GridPosition) -> Sight {
    if from.is_adjacent_to(to) {
        return Sight::Clear;
    }
    line_between(from, to)
        .filter(|cell| *cell != from && *cell != to)
        .find(|cell| grid.blocks_sight(*cell))
        .map_or(Sight::Clear, Sight::Blocked)
}

/// Sight between two placed entities.
pub fn line_of_sight(grid: &CombatGrid, from: EntityId, to: EntityId) -> Result<Sight, GridError> {
    let source = grid
        .position_of(from)
        .ok_or(GridError::NotPlaced { entity: from })?;
    let target = grid
        .position_of(to)
        .ok_or(GridError::NotPlaced { entity: to })?;

    let sight = sight_between(grid, source, target);
    tracing::debug!(%from, %to, ?sight, "line of sight");
    Ok(sight)
}

/// Whether two entities are placed and can see each other.
pub fn has_line_of_sight(grid: &CombatGrid, from: EntityId, to: EntityId) -> bool {
    line_of_sight(grid, from, to).is_ok_and(Sight::is_clear)
}

/// Passable cells within `radius` of `origin` that `origin` can see, in
/// row-major order. The origin itself is excluded.
pub fn visible_positions(grid: &CombatGrid, origin: GridPosition, radius: u32) -> Vec<GridPosition> {
    let reach = radius.min(i32::MAX as u32) as i32;
    let min_x = origin.x.saturating_sub(reach).max(0);
    let min_y = origin.y.saturating_sub(reach).max(0);
    let max_x = origin.x.saturating_add(reach).min(grid.width() as i32 - 1);
    let max_y = origin.y.saturating_add(reach).min(grid.height() as i32 - 1);

    let mut visible = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let cell = GridPosition::new(x, y);
            if cell == origin || !grid.is_passable(cell) {
                continue;
            }
            if sight_between(grid, origin, cell).is_clear() {
                visible.push(cell);
            }
        }
    }
    visible
}
