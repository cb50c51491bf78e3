//! Roll outcomes.

use super::pool::DicePool;

/// Faces at or above this value count as successes.
pub const SUCCESS_THRESHOLD: u32 = 8;

/// Faces equal to this value count as botches.
pub const BOTCH_FACE: u32 = 1;

/// Net successes at or above this value make a critical success.
pub const CRITICAL_SUCCESSES: u32 = 5;

/// How a pool is rolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdvantageType {
    /// Single roll.
    #[default]
    Normal,
    /// Roll twice, keep the higher total.
    Advantage,
    /// Roll twice, keep the lower total.
    Disadvantage,
}

/// Both totals of an advantage/disadvantage roll and which one was kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvantageRecord {
    pub kind: AdvantageType,
    /// Totals in roll order.
    pub totals: [i32; 2],
    /// Index into `totals` of the kept roll.
    pub kept: usize,
}

impl AdvantageRecord {
    /// Total that was discarded.
    pub fn discarded_total(&self) -> i32 {
        self.totals[1 - self.kept]
    }
}

/// Result of rolling a [`DicePool`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceRollResult {
    pub pool: DicePool,

    /// One face per die in the pool, in roll order.
    pub rolls: Vec<u32>,

    /// Extra faces produced by exploding dice, in roll order.
    pub explosion_rolls: Vec<u32>,

    /// Sum of all faces plus the pool modifier.
    pub total: i32,

    pub explosions: u32,

    /// Present when the pool was rolled with advantage or disadvantage.
    pub advantage: Option<AdvantageRecord>,
}

impl DiceRollResult {
    /// Every face rolled, explosions included.
    pub fn faces(&self) -> impl Iterator<Item = u32> + '_ {
        self.rolls.iter().chain(self.explosion_rolls.iter()).copied()
    }

    pub fn successes(&self) -> u32 {
        self.faces().filter(|face| *face >= SUCCESS_THRESHOLD).count() as u32
    }

    pub fn botches(&self) -> u32 {
        self.faces().filter(|face| *face == BOTCH_FACE).count() as u32
    }

    /// Successes minus botches, floored at zero.
    pub fn net_successes(&self) -> u32 {
        self.successes().saturating_sub(self.botches())
    }

    /// No successes and at least one botch.
    pub fn is_fumble(&self) -> bool {
        self.successes() == 0 && self.botches() > 0
    }

    pub fn is_critical(&self) -> bool {
        self.net_successes() >= CRITICAL_SUCCESSES
    }

    pub fn is_success(&self) -> bool {
        self.net_successes() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DiceType;

    fn result(rolls: Vec<u32>, explosion_rolls: Vec<u32>) -> DiceRollResult {
        let total = rolls.iter().chain(explosion_rolls.iter()).sum::<u32>() as i32;
        DiceRollResult {
            pool: DicePool::new(rolls.len() as u32, DiceType::D10, 0),
            explosions: explosion_rolls.len() as u32,
            rolls,
            explosion_rolls,
            total,
            advantage: None,
        }
    }

    #[test]
    fn counts_successes_and_botches() {
        let roll = result(vec![10, 8, 1, 5, 9], vec![]);
        assert_eq!(roll.successes(), 3);
        assert_eq!(roll.botches(), 1);
        assert_eq!(roll.net_successes(), 2);
        assert!(roll.is_success());
        assert!(!roll.is_fumble());
    }

    #[test]
    fn botches_never_drive_net_negative() {
        let roll = result(vec![1, 1, 9], vec![]);
        assert_eq!(roll.net_successes(), 0);
        assert!(!roll.is_fumble());
    }

    #[test]
    fn fumble_requires_zero_successes_and_a_botch() {
        assert!(result(vec![1, 3, 4], vec![]).is_fumble());
        assert!(!result(vec![2, 3, 4], vec![]).is_fumble());
    }

    #[test]
    fn explosions_count_toward_successes() {
        let roll = result(vec![10, 10, 9, 8], vec![10, 3]);
        assert_eq!(roll.successes(), 5);
        assert!(roll.is_critical());
    }

    #[test]
    fn advantage_record_reports_discarded_total() {
        let record = AdvantageRecord {
            kind: AdvantageType::Advantage,
            totals: [7, 12],
            kept: 1,
        };
        assert_eq!(record.discarded_total(), 7);
    }

    #[test]
    fn advantage_type_parses_case_insensitively() {
        assert_eq!(
            "Disadvantage".parse::<AdvantageType>().unwrap(),
            AdvantageType::Disadvantage
        );
        assert_eq!(AdvantageType::Advantage.to_string(), "advantage");
    }
}
