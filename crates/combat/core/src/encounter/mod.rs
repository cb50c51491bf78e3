//! Encounter state machine: initiative, rounds and turn progression.
//!
//! ```text
//! Created --start()--> Started --advance_turn()...--> Ended(outcome)
//! ```
//!
//! Combatants join while the encounter is `Created`; each joins with an
//! initiative roll and the list is kept in initiative order. Once started,
//! combatants can only be damaged, healed, defeated or removed.

mod combatant;
mod initiative;
mod participant;

use std::collections::HashMap;

pub use combatant::Combatant;
pub use initiative::{InitiativeRoll, initiative_order, roll_initiative};
pub use participant::{Monster, Participant, Player};

use crate::config::CombatConfig;
use crate::dice::{DicePool, DiceRoller, RandomSource};
use crate::error::{CombatError, ErrorSeverity};
use crate::state::{EntityId, Side};

/// Errors raised by encounter operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("the encounter has already started")]
    AlreadyStarted,

    #[error("the encounter has not started")]
    NotStarted,

    #[error("the encounter has ended")]
    AlreadyEnded,

    #[error("the encounter needs at least one living {side} combatant")]
    MissingSide { side: Side },

    #[error("entity {id} is already in the encounter")]
    DuplicateCombatant { id: EntityId },

    #[error("entity {id} is not in the encounter")]
    UnknownCombatant { id: EntityId },
}

impl CombatError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "ENCOUNTER_ALREADY_STARTED",
            Self::NotStarted => "ENCOUNTER_NOT_STARTED",
            Self::AlreadyEnded => "ENCOUNTER_ALREADY_ENDED",
            Self::MissingSide { .. } => "ENCOUNTER_MISSING_SIDE",
            Self::DuplicateCombatant { .. } => "ENCOUNTER_DUPLICATE_COMBATANT",
            Self::UnknownCombatant { .. } => "ENCOUNTER_UNKNOWN_COMBATANT",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterOutcome {
    /// No living enemy remains.
    Victory,
    /// No living player remains.
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterState {
    Created,
    Started,
    Ended(EncounterOutcome),
}

/// Result of [`CombatEncounter::advance_turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAdvance {
    /// `combatant` acts next; `new_round` is set when the order wrapped.
    Next {
        combatant: EntityId,
        round: u32,
        new_round: bool,
    },
    Ended(EncounterOutcome),
}

/// Damage actually removed from a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageApplied {
    pub dealt: u32,
    pub remaining: u32,
    /// The combatant was defeated by this damage.
    pub defeated: bool,
}

/// One combat session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEncounter {
    combatants: Vec<Combatant>,
    state: EncounterState,
    round: u32,
    turn_index: usize,
    /// The combatant at `turn_index` replaced a removed current combatant.
    current_removed: bool,
    initiative_dice: DicePool,
    joined: usize,
}

impl CombatEncounter {
    pub fn new(initiative_dice: DicePool) -> Self {
        Self {
            combatants: Vec::new(),
            state: EncounterState::Created,
            round: 0,
            turn_index: 0,
            current_removed: false,
            initiative_dice,
            joined: 0,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.initiative_dice)
    }

    /// Builds an encounter from a roster, rolling initiative in roster order.
    pub fn assemble<R: RandomSource>(
        config: &CombatConfig,
        roster: impl IntoIterator<Item = Participant>,
        roller: &mut DiceRoller<R>,
    ) -> Result<Self, EncounterError> {
        let mut encounter = Self::from_config(config);
        for participant in roster {
            encounter.add(participant, roller)?;
        }
        Ok(encounter)
    }

    // ===== assembly =====

    /// Enrolls a participant, rolling its initiative immediately.
    pub fn add<R: RandomSource>(
        &mut self,
        participant: impl Into<Participant>,
        roller: &mut DiceRoller<R>,
    ) -> Result<EntityId, EncounterError> {
        match self.state {
            EncounterState::Created => {}
            EncounterState::Started => return Err(EncounterError::AlreadyStarted),
            EncounterState::Ended(_) => return Err(EncounterError::AlreadyEnded),
        }
        let participant = participant.into();
        let id = participant.id();
        if self.index_of(id).is_some() {
            return Err(EncounterError::DuplicateCombatant { id });
        }

        let initiative = roll_initiative(
            roller,
            &self.initiative_dice,
            participant.initiative_modifier(),
        );
        tracing::debug!(
            %id,
            name = participant.name(),
            roll = initiative.roll.total,
            modifier = initiative.modifier,
            total = initiative.total,
            "rolled initiative"
        );

        let combatant = Combatant::new(participant, initiative, self.joined);
        self.joined += 1;

        let position = self
            .combatants
            .partition_point(|existing| {
                initiative_order(
                    existing.initiative(),
                    existing.order(),
                    combatant.initiative(),
                    combatant.order(),
                )
                .is_lt()
            });
        self.combatants.insert(position, combatant);
        self.renumber();
        Ok(id)
    }

    /// Suffixes monsters that share a base name with their 1-based join
    /// order among that name. Unique names and players are left bare.
    fn renumber(&mut self) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for combatant in self.combatants.iter().filter(|c| !c.is_player()) {
            *counts.entry(combatant.name()).or_default() += 1;
        }
        let shared: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name.to_string())
            .collect();

        let mut by_join: Vec<usize> = (0..self.combatants.len()).collect();
        by_join.sort_by_key(|index| self.combatants[*index].order());

        let mut seen: HashMap<String, usize> = HashMap::new();
        for index in by_join {
            let combatant = &mut self.combatants[index];
            let name = combatant.name().to_string();
            let display = if !combatant.is_player() && shared.contains(&name) {
                let occurrence = seen.entry(name.clone()).or_default();
                *occurrence += 1;
                format!("{name} {occurrence}")
            } else {
                name
            };
            combatant.set_display_name(display);
        }
    }

    /// Starts the encounter.
    pub fn start(&mut self) -> Result<(), EncounterError> {
        match self.state {
            EncounterState::Created => {}
            EncounterState::Started => return Err(EncounterError::AlreadyStarted),
            EncounterState::Ended(_) => return Err(EncounterError::AlreadyEnded),
        }
        for side in [Side::Player, Side::Enemy] {
            if !self.has_living(side) {
                return Err(EncounterError::MissingSide { side });
            }
        }

        self.state = EncounterState::Started;
        self.round = 1;
        self.current_removed = false;
        self.turn_index = self
            .combatants
            .iter()
            .position(Combatant::is_alive)
            .unwrap_or_default();
        tracing::info!(
            combatants = self.combatants.len(),
            first = %self.combatants[self.turn_index].display_name(),
            "encounter started"
        );
        Ok(())
    }

    // ===== turn progression =====

    /// Moves to the next living combatant, or ends the encounter when one
    /// side has no living combatant left.
    pub fn advance_turn(&mut self) -> Result<TurnAdvance, EncounterError> {
        self.require_started()?;

        if let Some(outcome) = self.outcome() {
            self.state = EncounterState::Ended(outcome);
            tracing::info!(%outcome, round = self.round, "encounter ended");
            return Ok(TurnAdvance::Ended(outcome));
        }

        let len = self.combatants.len();
        let mut index = if self.current_removed {
            self.turn_index
        } else {
            self.turn_index + 1
        };
        self.current_removed = false;
        let mut new_round = false;
        loop {
            if index >= len {
                index = 0;
                self.round += 1;
                new_round = true;
            }
            if self.combatants[index].is_alive() {
                break;
            }
            index += 1;
        }
        self.turn_index = index;

        let combatant = self.combatants[index].id();
        if new_round {
            tracing::info!(round = self.round, "round advanced");
        }
        tracing::debug!(%combatant, round = self.round, "turn advanced");
        Ok(TurnAdvance::Next {
            combatant,
            round: self.round,
            new_round,
        })
    }

    /// Outcome implied by the current health of both sides, if any.
    pub fn outcome(&self) -> Option<EncounterOutcome> {
        if !self.has_living(Side::Player) {
            Some(EncounterOutcome::Defeat)
        } else if !self.has_living(Side::Enemy) {
            Some(EncounterOutcome::Victory)
        } else {
            None
        }
    }

    fn require_started(&self) -> Result<(), EncounterError> {
        match self.state {
            EncounterState::Started => Ok(()),
            EncounterState::Created => Err(EncounterError::NotStarted),
            EncounterState::Ended(_) => Err(EncounterError::AlreadyEnded),
        }
    }

    // ===== mutation =====

    /// Removes a combatant. After the start the current turn stays with the
    /// same combatant; removing the current combatant hands the turn to the
    /// next one on the following advance.
    pub fn remove(&mut self, id: EntityId) -> Result<Combatant, EncounterError> {
        let index = self
            .index_of(id)
            .ok_or(EncounterError::UnknownCombatant { id })?;
        let removed = self.combatants.remove(index);

        match self.state {
            EncounterState::Created => self.renumber(),
            EncounterState::Started => {
                if index < self.turn_index {
                    self.turn_index -= 1;
                } else if index == self.turn_index {
                    self.current_removed = true;
                }
            }
            EncounterState::Ended(_) => {}
        }
        tracing::debug!(%id, name = removed.display_name(), "removed combatant");
        Ok(removed)
    }

    /// Applies already-resolved damage to a combatant.
    pub fn apply_damage(&mut self, id: EntityId, amount: u32) -> Result<DamageApplied, EncounterError> {
        if let EncounterState::Ended(_) = self.state {
            return Err(EncounterError::AlreadyEnded);
        }
        let combatant = self.get_mut(id)?;
        let health = combatant.participant_mut().health_mut();
        let dealt = health.damage(amount);
        let remaining = health.current;

        let defeated = remaining == 0 && combatant.is_alive();
        if defeated {
            combatant.mark_defeated();
            tracing::info!(%id, name = combatant.display_name(), "combatant defeated");
        }
        Ok(DamageApplied {
            dealt,
            remaining,
            defeated,
        })
    }

    /// Heals a living combatant up to its maximum. Defeated combatants
    /// cannot be healed and report zero.
    pub fn heal(&mut self, id: EntityId, amount: u32) -> Result<u32, EncounterError> {
        if let EncounterState::Ended(_) = self.state {
            return Err(EncounterError::AlreadyEnded);
        }
        let combatant = self.get_mut(id)?;
        if combatant.is_defeated() {
            return Ok(0);
        }
        let restored = combatant.participant_mut().health_mut().heal(amount);
        tracing::debug!(%id, restored, "healed combatant");
        Ok(restored)
    }

    // ===== queries =====

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == EncounterState::Started
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Combatants in initiative order.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id() == id)
    }

    fn get_mut(&mut self, id: EntityId) -> Result<&mut Combatant, EncounterError> {
        self.combatants
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(EncounterError::UnknownCombatant { id })
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id() == id)
    }

    /// Combatant whose turn it is, while started.
    pub fn current(&self) -> Option<&Combatant> {
        if self.state != EncounterState::Started || self.current_removed {
            return None;
        }
        self.combatants.get(self.turn_index)
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    pub fn has_living(&self, side: Side) -> bool {
        self.living().any(|c| c.side() == side)
    }

    /// Living combatants on the opposing side of `actor`, in initiative order.
    pub fn enemies_of(&self, actor: EntityId) -> Vec<&Combatant> {
        let Some(side) = self.get(actor).map(Combatant::side) else {
            return Vec::new();
        };
        self.living().filter(|c| c.side() != side).collect()
    }

    /// Living combatants on the same side as `actor`, excluding `actor`.
    pub fn allies_of(&self, actor: EntityId) -> Vec<&Combatant> {
        let Some(side) = self.get(actor).map(Combatant::side) else {
            return Vec::new();
        };
        self.living()
            .filter(|c| c.side() == side && c.id() != actor)
            .collect()
    }
}
