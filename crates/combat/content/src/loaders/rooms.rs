//! Room layout loader.

use std::path::Path;

use combat_core::RoomLayout;

use crate::loaders::{LoadResult, check_dimensions, read_file};

/// Loader for room layouts from RON files.
pub struct RoomLoader;

impl RoomLoader {
    /// Load a room layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<RoomLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a room layout from a RON string.
    ///
    /// Only the dimensions are validated here. Unknown identifiers and bad
    /// cell labels are reported by [`combat_core::build_grid`] instead.
    pub fn parse(content: &str) -> LoadResult<RoomLayout> {
        let layout: RoomLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse room layout RON: {}", e))?;

        check_dimensions(&format!("Room `{}`", layout.room_id), layout.width, layout.height)?;
        Ok(layout)
    }
}
