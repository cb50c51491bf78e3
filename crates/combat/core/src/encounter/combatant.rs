use crate::ai::AiBehavior;
use crate::state::{EntityId, Health, Side};

use super::initiative::InitiativeRoll;
use super::participant::Participant;

/// A participant enrolled in an encounter.
///
/// Defeat is permanent: a combatant whose health reaches zero stays in the
/// list for display but is excluded from targeting and turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    participant: Participant,
    display_name: String,
    initiative: InitiativeRoll,
    /// Join order, used for numbering and initiative ties.
    order: usize,
    defeated: bool,
}

impl Combatant {
    pub(crate) fn new(participant: Participant, initiative: InitiativeRoll, order: usize) -> Self {
        let display_name = participant.name().to_string();
        let defeated = !participant.health().is_alive();
        Self {
            participant,
            display_name,
            initiative,
            order,
            defeated,
        }
    }

    pub fn id(&self) -> EntityId {
        self.participant.id()
    }

    /// Base name without any occurrence number.
    pub fn name(&self) -> &str {
        self.participant.name()
    }

    /// Name shown to players, e.g. `"Goblin 2"`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub(crate) fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub(crate) fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participant
    }

    pub fn initiative(&self) -> &InitiativeRoll {
        &self.initiative
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn side(&self) -> Side {
        self.participant.side()
    }

    pub fn is_player(&self) -> bool {
        self.side() == Side::Player
    }

    pub fn health(&self) -> Health {
        self.participant.health()
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    pub(crate) fn mark_defeated(&mut self) {
        self.defeated = true;
    }

    /// Behavior tag for monsters, `None` for players.
    pub fn behavior(&self) -> Option<AiBehavior> {
        self.participant.as_monster().map(|monster| monster.behavior)
    }

    /// Amount a Heal action restores, when this combatant can heal.
    pub fn heal_amount(&self) -> Option<u32> {
        self.participant
            .as_monster()
            .filter(|monster| monster.can_heal())
            .and_then(|monster| monster.heal_amount)
    }
}
