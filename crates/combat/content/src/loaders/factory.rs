//! Content factory for building combat inputs from data files.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, CombatGrid, LayoutReport, RoomLayout, build_grid};

use crate::catalog::Catalog;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, MonsterLoader, RoomLoader};
use crate::monsters::MonsterCatalog;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── monsters.ron
/// ├── catalog.ron
/// └── rooms/
///     ├── guard_room.ron
///     └── burning_hall.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`, or the defaults when
    /// the file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        let path = self.data_dir.join("monsters.ron");
        MonsterLoader::load(&path)
    }

    /// Load terrain, cover and hazard definitions from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let path = self.data_dir.join("catalog.ron");
        CatalogLoader::load(&path)
    }

    /// Load a room layout from `rooms/{room_id}.ron`.
    pub fn load_room(&self, room_id: &str) -> LoadResult<RoomLayout> {
        let path = self.rooms_dir().join(format!("{}.ron", room_id));
        let layout = RoomLoader::load(&path)?;
        anyhow::ensure!(
            layout.room_id == room_id,
            "Room file {} declares room_id `{}`",
            path.display(),
            layout.room_id
        );
        Ok(layout)
    }

    /// Load a room layout and build its grid against `catalog`.
    pub fn build_room(
        &self,
        room_id: &str,
        catalog: &Catalog,
    ) -> LoadResult<(CombatGrid, LayoutReport)> {
        let layout = self.load_room(room_id)?;
        Ok(build_grid(&layout, catalog))
    }

    /// Identifiers of every room under `rooms/`, sorted.
    pub fn room_ids(&self) -> LoadResult<Vec<String>> {
        let dir = self.rooms_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn rooms_dir(&self) -> PathBuf {
        self.data_dir.join("rooms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{EntityId, GridPosition, TerrainType};
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContentFactory) {
        let temp_dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(temp_dir.path());
        std::fs::create_dir(temp_dir.path().join("rooms")).unwrap();
        std::fs::write(
            temp_dir.path().join("catalog.ron"),
            r#"(terrain: [(id: "mud", name: "Mud", terrain: Difficult)])"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("monsters.ron"),
            r#"(monsters: [(id: "slime", name: "Slime", max_health: 40, initiative_modifier: -2, behavior: Chaotic)])"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("rooms").join("bog.ron"),
            r#"(room_id: "bog", width: 3, height: 3, terrain: [(cells: ["B2", "Z9"], id: "mud")])"#,
        )
        .unwrap();
        (temp_dir, factory)
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let (_temp, factory) = setup();
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
    }

    #[test]
    fn builds_rooms_from_catalog() {
        let (_temp, factory) = setup();
        let catalog = factory.load_catalog().unwrap();
        let (grid, report) = factory.build_room("bog", &catalog).unwrap();

        assert_eq!(grid.terrain_at(GridPosition::new(1, 1)), Some(TerrainType::Difficult));
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(factory.room_ids().unwrap(), vec!["bog"]);
    }

    #[test]
    fn spawns_loaded_monsters() {
        let (_temp, factory) = setup();
        let monsters = factory.load_monsters().unwrap();
        let slime = monsters.spawn("slime", EntityId(4)).unwrap();
        assert_eq!(slime.initiative_modifier, -2);
    }

    #[test]
    fn room_id_must_match_file_name() {
        let (temp, factory) = setup();
        std::fs::write(
            temp.path().join("rooms").join("swamp.ron"),
            r#"(room_id: "bog", width: 3, height: 3)"#,
        )
        .unwrap();
        assert!(factory.load_room("swamp").is_err());
        assert!(factory.load_room("missing").is_err());
    }
}
