//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, check_dimensions, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults, so an empty file yields
    /// [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        check_dimensions("Grid", config.grid_width, config.grid_height)?;
        for (name, percent) in [
            ("defensive_threshold_percent", config.ai.defensive_threshold_percent),
            ("support_heal_threshold_percent", config.ai.support_heal_threshold_percent),
            ("cowardly_flee_threshold_percent", config.ai.cowardly_flee_threshold_percent),
        ] {
            anyhow::ensure!(percent <= 100, "AI threshold {} is {}%, above 100%", name, percent);
        }

        Ok(config)
    }
}
