//! Monster templates.

use combat_core::{AiBehavior, DamageResistances, EntityId, Monster};

/// Template a [`Monster`] is spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterDefinition {
    /// Content identifier such as `"goblin_shaman"`.
    pub id: String,
    pub name: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiative_modifier: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: AiBehavior,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_amount: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: DamageResistances,
}

impl MonsterDefinition {
    /// Creates a fresh monster at full health.
    pub fn spawn(&self, id: EntityId) -> Monster {
        let monster = Monster::new(
            id,
            self.name.clone(),
            self.max_health,
            self.initiative_modifier,
            self.behavior,
        )
        .with_resistances(self.resistances.clone());

        match self.heal_amount {
            Some(amount) => monster.with_healing(amount),
            None => monster,
        }
    }
}

/// Monster templates keyed by their content identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterCatalog {
    pub monsters: Vec<MonsterDefinition>,
}

impl MonsterCatalog {
    pub fn new(monsters: Vec<MonsterDefinition>) -> Self {
        Self { monsters }
    }

    pub fn get(&self, id: &str) -> Option<&MonsterDefinition> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    /// Spawns the template `template` as entity `id`.
    pub fn spawn(&self, template: &str, id: EntityId) -> Option<Monster> {
        let monster = self.get(template).map(|definition| definition.spawn(id));
        if monster.is_none() {
            tracing::warn!(template, "unknown monster template");
        }
        monster
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}
