//! Content loaders for reading combat data from files.
//!
//! This module provides loaders that convert RON/TOML files into the
//! catalogs, templates and layouts the combat core consumes.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod monsters;
pub mod rooms;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use monsters::MonsterLoader;
pub use rooms::RoomLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects grid dimensions the core would refuse to build.
pub(crate) fn check_dimensions(what: &str, width: u32, height: u32) -> LoadResult<()> {
    let max = combat_core::CombatConfig::MAX_GRID_DIMENSION;
    anyhow::ensure!(
        (1..=max).contains(&width) && (1..=max).contains(&height),
        "{} dimensions {}x{} must be between 1 and {}",
        what,
        width,
        height,
        max
    );
    Ok(())
}
