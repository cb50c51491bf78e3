//! Monster template loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::monsters::MonsterCatalog;

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load a monster catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a monster catalog from a RON string.
    ///
    /// Template identifiers must be unique and every template must have
    /// positive maximum health.
    pub fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let catalog: MonsterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for monster in &catalog.monsters {
            anyhow::ensure!(
                seen.insert(monster.id.as_str()),
                "Duplicate monster id `{}`",
                monster.id
            );
            anyhow::ensure!(
                monster.max_health > 0,
                "Monster `{}` must have positive max_health",
                monster.id
            );
        }

        tracing::debug!(count = catalog.len(), "loaded monster templates");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AiBehavior, DamageType, EntityId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MONSTERS: &str = r#"
        (
            monsters: [
                (
                    id: "goblin",
                    name: "Goblin",
                    max_health: 30,
                    initiative_modifier: 1,
                    behavior: Cowardly,
                ),
                (
                    id: "goblin_shaman",
                    name: "Goblin Shaman",
                    max_health: 25,
                    initiative_modifier: 2,
                    behavior: Support,
                    heal_amount: Some(10),
                    resistances: { Poison: 50 },
                ),
            ],
        )
    "#;

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MONSTERS.as_bytes()).unwrap();

        let catalog = MonsterLoader::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let shaman = catalog.spawn("goblin_shaman", EntityId(3)).unwrap();
        assert_eq!(shaman.behavior, AiBehavior::Support);
        assert_eq!(shaman.heal_amount, Some(10));
        assert_eq!(shaman.resistances.get(DamageType::Poison), 50);

        let goblin = catalog.get("goblin").unwrap();
        assert_eq!(goblin.heal_amount, None);
        assert!(goblin.resistances.is_empty());
    }

    #[test]
    fn rejects_duplicates_and_empty_health() {
        let duplicate = r#"(monsters: [
            (id: "orc", name: "Orc", max_health: 45),
            (id: "orc", name: "Orc", max_health: 45),
        ])"#;
        assert!(MonsterLoader::parse(duplicate).is_err());

        let lifeless = r#"(monsters: [(id: "ghost", name: "Ghost", max_health: 0)])"#;
        assert!(MonsterLoader::parse(lifeless).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let error = MonsterLoader::load(&dir.path().join("monsters.ron")).unwrap_err();
        assert!(error.to_string().contains("Failed to read file"));
    }
}
