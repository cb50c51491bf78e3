//! Per-cell terrain and cover.

/// Terrain classification of a cell.
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
pub enum TerrainType {
    #[default]
    Normal,
    /// Costs double movement.
    Difficult,
    /// May damage whoever enters or starts a turn on it.
    Hazardous,
}

impl TerrainType {
    /// Movement points spent entering a cell of this terrain.
    pub const fn movement_cost(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Difficult => 2,
            Self::Hazardous => 1,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Normal => '.',
            Self::Difficult => '~',
            Self::Hazardous => '^',
        }
    }
}

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
pub enum CoverType {
    Partial,
    Full,
}

impl CoverType {
    pub const fn glyph(self) -> char {
        match self {
            Self::Partial => '[',
            Self::Full => ']',
        }
    }
}

/// Destructible cover standing in a cell.
///
/// Cover grants a defense bonus to whoever uses it. It never blocks movement
/// or line of sight.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverObject {
    pub name: String,
    pub kind: CoverType,
    pub defense_bonus: i32,
    pub hit_points: u32,
}

impl CoverObject {
    pub fn new(name: impl Into<String>, kind: CoverType, defense_bonus: i32, hit_points: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            defense_bonus,
            hit_points,
        }
    }

    pub const fn is_destroyed(&self) -> bool {
        self.hit_points == 0
    }
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: TerrainType,
    pub passable: bool,
    pub cover: Option<CoverObject>,
    /// Identifier of the terrain definition this cell was built from, such as
    /// `hazard:fire`.
    pub terrain_id: Option<String>,
}

impl Cell {
    pub const fn blocks_sight(&self) -> bool {
        !self.passable
    }

    /// Map glyph ignoring occupants.
    pub fn glyph(&self) -> char {
        if !self.passable {
            return '#';
        }
        match &self.cover {
            Some(cover) => cover.kind.glyph(),
            None => self.terrain.glyph(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            terrain: TerrainType::Normal,
            passable: true,
            cover: None,
            terrain_id: None,
        }
    }
}
