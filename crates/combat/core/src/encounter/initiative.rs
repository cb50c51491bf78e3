//! Initiative rolls and turn ordering.
//!
//! Combatants act in descending initiative total. Equal totals fall back to
//! the higher modifier, then to the order in which combatants joined.

use std::cmp::Ordering;

use crate::dice::{DicePool, DiceRollResult, DiceRoller, RandomSource};

/// Initiative roll: one roll of the standard die plus a modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeRoll {
    pub roll: DiceRollResult,
    pub modifier: i32,
    pub total: i32,
}

impl InitiativeRoll {
    pub fn new(roll: DiceRollResult, modifier: i32) -> Self {
        let total = roll.total.saturating_add(modifier);
        Self {
            roll,
            modifier,
            total,
        }
    }
}

/// Rolls `dice` and adds `modifier`.
pub fn roll_initiative<R: RandomSource>(
    roller: &mut DiceRoller<R>,
    dice: &DicePool,
    modifier: i32,
) -> InitiativeRoll {
    InitiativeRoll::new(roller.roll(dice), modifier)
}

/// Turn order between two rolls whose combatants joined at `a_order` and
/// `b_order`. `Less` means `a` acts first.
pub fn initiative_order(a: &InitiativeRoll, a_order: usize, b: &InitiativeRoll, b_order: usize) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| b.modifier.cmp(&a.modifier))
        .then_with(|| a_order.cmp(&b_order))
}
