//! Per-decision snapshot handed to the decision engine.

use crate::encounter::{CombatEncounter, Combatant};
use crate::grid::CombatGrid;
use crate::los::has_line_of_sight;
use crate::state::EntityId;

/// Everything one AI decision may look at.
///
/// Built fresh for every decision and never cached. The only randomness a
/// decision can use is the explicitly injected [`AiContext::roll`].
#[derive(Clone, Debug)]
pub struct AiContext<'a> {
    /// The combatant making the decision.
    pub actor: &'a Combatant,

    /// Read-only access to the live encounter.
    pub encounter: &'a CombatEncounter,

    /// Living combatants on the actor's side, excluding the actor.
    pub allies: Vec<&'a Combatant>,

    /// Living combatants on the opposing side the actor is aware of.
    pub enemies: Vec<&'a Combatant>,

    pub round: u32,

    /// Pre-drawn random value for behaviors that pick at random.
    pub roll: Option<u32>,
}

impl<'a> AiContext<'a> {
    /// Snapshot for `actor`, aware of every living enemy.
    ///
    /// # Panics
    ///
    /// Panics if `actor` is not in the encounter.
    pub fn new(encounter: &'a CombatEncounter, actor: EntityId) -> Self {
        let Some(combatant) = encounter.get(actor) else {
            panic!("AI context requested for entity {actor}, which is not in the encounter");
        };
        Self {
            actor: combatant,
            encounter,
            allies: encounter.allies_of(actor),
            enemies: encounter.enemies_of(actor),
            round: encounter.round(),
            roll: None,
        }
    }

    /// Injects the random value used by chaotic behavior.
    #[must_use]
    pub fn with_roll(mut self, roll: u32) -> Self {
        self.roll = Some(roll);
        self
    }

    /// Narrows enemies to those placed on `grid` with clear line of sight
    /// from the actor. An actor that is not on the grid sees nobody.
    #[must_use]
    pub fn with_visibility(mut self, grid: &CombatGrid) -> Self {
        let actor = self.actor.id();
        self.enemies
            .retain(|enemy| has_line_of_sight(grid, actor, enemy.id()));
        self
    }

    pub fn actor_id(&self) -> EntityId {
        self.actor.id()
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }
}
