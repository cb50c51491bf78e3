//! Players and monsters that can join an encounter.

use crate::ai::AiBehavior;
use crate::combat::DamageResistances;
use crate::state::{EntityId, Health, Side};

/// Player character as seen by the combat engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub health: Health,
    /// Added to the initiative roll.
    pub finesse: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: DamageResistances,
}

impl Player {
    pub fn new(id: EntityId, name: impl Into<String>, max_health: u32, finesse: i32) -> Self {
        Self {
            id,
            name: name.into(),
            health: Health::full(max_health),
            finesse,
            resistances: DamageResistances::default(),
        }
    }
}

/// Monster instance spawned from a definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: EntityId,
    /// Base name shared by every monster of the same kind.
    pub name: String,
    pub health: Health,
    /// Fixed per-monster initiative modifier.
    pub initiative_modifier: i32,
    pub behavior: AiBehavior,
    /// Healing applied by a Heal action, if the monster can heal.
    pub heal_amount: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: DamageResistances,
}

impl Monster {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        max_health: u32,
        initiative_modifier: i32,
        behavior: AiBehavior,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            health: Health::full(max_health),
            initiative_modifier,
            behavior,
            heal_amount: None,
            resistances: DamageResistances::default(),
        }
    }

    #[must_use]
    pub fn with_healing(mut self, heal_amount: u32) -> Self {
        self.heal_amount = Some(heal_amount);
        self
    }

    #[must_use]
    pub fn with_resistances(mut self, resistances: DamageResistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn can_heal(&self) -> bool {
        self.heal_amount.is_some_and(|amount| amount > 0)
    }
}

/// Anything that can be enrolled in an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Participant {
    Player(Player),
    Monster(Monster),
}

impl Participant {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Player(player) => player.id,
            Self::Monster(monster) => monster.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Player(player) => &player.name,
            Self::Monster(monster) => &monster.name,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::Player(_) => Side::Player,
            Self::Monster(_) => Side::Enemy,
        }
    }

    /// Finesse for players, the fixed modifier for monsters.
    pub fn initiative_modifier(&self) -> i32 {
        match self {
            Self::Player(player) => player.finesse,
            Self::Monster(monster) => monster.initiative_modifier,
        }
    }

    pub fn health(&self) -> Health {
        match self {
            Self::Player(player) => player.health,
            Self::Monster(monster) => monster.health,
        }
    }

    pub(crate) fn health_mut(&mut self) -> &mut Health {
        match self {
            Self::Player(player) => &mut player.health,
            Self::Monster(monster) => &mut monster.health,
        }
    }

    pub fn resistances(&self) -> &DamageResistances {
        match self {
            Self::Player(player) => &player.resistances,
            Self::Monster(monster) => &monster.resistances,
        }
    }

    pub fn as_monster(&self) -> Option<&Monster> {
        match self {
            Self::Monster(monster) => Some(monster),
            Self::Player(_) => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Self::Player(player) => Some(player),
            Self::Monster(_) => None,
        }
    }
}

impl From<Player> for Participant {
    fn from(player: Player) -> Self {
        Self::Player(player)
    }
}

impl From<Monster> for Participant {
    fn from(monster: Monster) -> Self {
        Self::Monster(monster)
    }
}
