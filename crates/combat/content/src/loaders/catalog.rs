//! Terrain, cover and hazard catalog loader.

use std::path::Path;

use crate::catalog::Catalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for definition catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a catalog from a RON string. Every section is optional, but
    /// identifiers must be unique within a section.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let catalog: Catalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        if let Some(id) = catalog.duplicate_id() {
            anyhow::bail!("Duplicate catalog id `{}`", id);
        }

        tracing::debug!(
            terrain = catalog.terrain.len(),
            cover = catalog.cover.len(),
            hazards = catalog.hazards.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
