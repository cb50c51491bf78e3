//! Dice roller over an injected random source.

use super::pool::{DiceFormatError, DicePool};
use super::result::{AdvantageRecord, AdvantageType, DiceRollResult};
use super::rng::{RandomSource, SeededRng};

/// Rolls dice pools, drawing every face from one owned random source.
///
/// Two rollers built from sources with the same seed produce identical
/// results for the same sequence of calls.
#[derive(Clone, Debug)]
pub struct DiceRoller<R: RandomSource = SeededRng> {
    rng: R,
}

impl DiceRoller<SeededRng> {
    /// Roller backed by a fresh [`SeededRng`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededRng::new(seed))
    }
}

impl<R: RandomSource> DiceRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Rolls the pool once.
    pub fn roll(&mut self, pool: &DicePool) -> DiceRollResult {
        self.roll_with(pool, AdvantageType::Normal)
    }

    /// Rolls the pool, twice for advantage/disadvantage.
    ///
    /// With advantage the higher total is kept, with disadvantage the lower;
    /// on equal totals the first roll is kept.
    pub fn roll_with(&mut self, pool: &DicePool, advantage: AdvantageType) -> DiceRollResult {
        if advantage == AdvantageType::Normal {
            return self.roll_once(pool);
        }

        let first = self.roll_once(pool);
        let second = self.roll_once(pool);
        let keep_second = match advantage {
            AdvantageType::Advantage => second.total > first.total,
            AdvantageType::Disadvantage => second.total < first.total,
            AdvantageType::Normal => false,
        };

        let record = AdvantageRecord {
            kind: advantage,
            totals: [first.total, second.total],
            kept: usize::from(keep_second),
        };
        tracing::info!(
            pool = %pool,
            kind = %advantage,
            first = first.total,
            second = second.total,
            kept = record.kept,
            "resolved roll with advantage"
        );

        let mut kept = if keep_second { second } else { first };
        kept.advantage = Some(record);
        kept
    }

    /// Parses `notation` and rolls it.
    pub fn roll_notation(
        &mut self,
        notation: &str,
        advantage: AdvantageType,
    ) -> Result<DiceRollResult, DiceFormatError> {
        let pool: DicePool = notation.parse()?;
        Ok(self.roll_with(&pool, advantage))
    }

    /// Rolls the pool once and returns only the total.
    pub fn roll_total(&mut self, pool: &DicePool) -> i32 {
        self.roll_once(pool).total
    }

    fn roll_once(&mut self, pool: &DicePool) -> DiceRollResult {
        let faces = pool.faces();
        let mut rolls = Vec::with_capacity(pool.count() as usize);
        let mut explosion_rolls = Vec::new();

        for _ in 0..pool.count() {
            let mut face = self.rng.roll_die(faces);
            rolls.push(face);

            if !pool.is_exploding() {
                continue;
            }
            let mut exploded = 0u32;
            while face == faces && pool.max_explosions().is_none_or(|cap| exploded < cap) {
                face = self.rng.roll_die(faces);
                explosion_rolls.push(face);
                exploded += 1;
            }
        }

        let sum: i64 = rolls
            .iter()
            .chain(explosion_rolls.iter())
            .map(|face| i64::from(*face))
            .sum();
        let total = DicePool::clamp_total(sum + i64::from(pool.modifier()));

        tracing::debug!(pool = %pool, ?rolls, ?explosion_rolls, total, "rolled dice");

        DiceRollResult {
            pool: *pool,
            explosions: explosion_rolls.len() as u32,
            rolls,
            explosion_rolls,
            total,
            advantage: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DiceType;

    /// Replays a fixed sequence of faces.
    struct Scripted {
        faces: Vec<u32>,
        next: usize,
    }

    impl Scripted {
        fn new(faces: &[u32]) -> Self {
            Self {
                faces: faces.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
            let face = self.faces[self.next % self.faces.len()];
            self.next += 1;
            face.clamp(min, max)
        }

        fn seed(&self) -> u64 {
            0
        }

        fn draws(&self) -> u64 {
            self.next as u64
        }
    }

    #[test]
    fn totals_stay_in_bounds() {
        let mut roller = DiceRoller::seeded(42);
        let pool = DicePool::new(3, DiceType::D6, 5);
        for _ in 0..100 {
            let total = roller.roll_total(&pool);
            assert!((8..=23).contains(&total), "total {total} out of bounds");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let pool = DicePool::new(2, DiceType::D20, 1);
        let mut a = DiceRoller::seeded(99);
        let mut b = DiceRoller::seeded(99);
        for _ in 0..50 {
            assert_eq!(a.roll(&pool), b.roll(&pool));
        }
    }

    #[test]
    fn advantage_keeps_higher_total() {
        let mut roller = DiceRoller::new(Scripted::new(&[3, 11]));
        let result = roller.roll_with(&DicePool::single(DiceType::D20), AdvantageType::Advantage);
        assert_eq!(result.total, 11);
        let record = result.advantage.unwrap();
        assert_eq!(record.totals, [3, 11]);
        assert_eq!(record.kept, 1);
    }

    #[test]
    fn disadvantage_keeps_lower_total() {
        let mut roller = DiceRoller::new(Scripted::new(&[3, 11]));
        let result =
            roller.roll_with(&DicePool::single(DiceType::D20), AdvantageType::Disadvantage);
        assert_eq!(result.total, 3);
        assert_eq!(result.advantage.unwrap().kept, 0);
    }

    #[test]
    fn advantage_tie_keeps_first() {
        let mut roller = DiceRoller::new(Scripted::new(&[7, 7]));
        let result = roller.roll_with(&DicePool::single(DiceType::D20), AdvantageType::Advantage);
        assert_eq!(result.advantage.unwrap().kept, 0);
    }

    #[test]
    fn advantage_matches_max_of_two_seeded_rolls() {
        let pool = DicePool::new(2, DiceType::D8, 0);
        let mut plain = DiceRoller::seeded(5);
        let first = plain.roll_total(&pool);
        let second = plain.roll_total(&pool);

        let mut with_advantage = DiceRoller::seeded(5);
        let kept = with_advantage.roll_with(&pool, AdvantageType::Advantage);
        assert_eq!(kept.total, first.max(second));
    }

    #[test]
    fn exploding_dice_reroll_max_faces() {
        let mut roller = DiceRoller::new(Scripted::new(&[6, 6, 2, 4]));
        let pool = DicePool::new(2, DiceType::D6, 0).exploding();
        let result = roller.roll(&pool);
        assert_eq!(result.rolls, vec![6, 4]);
        assert_eq!(result.explosion_rolls, vec![6, 2]);
        assert_eq!(result.explosions, 2);
        assert_eq!(result.total, 18);
    }

    #[test]
    fn explosion_cap_is_respected() {
        let mut roller = DiceRoller::new(Scripted::new(&[6]));
        let pool = DicePool::new(1, DiceType::D6, 0)
            .with_max_explosions(3)
            .exploding();
        let result = roller.roll(&pool);
        assert_eq!(result.explosions, 3);
        assert_eq!(result.total, 24);
    }

    #[test]
    fn non_exploding_pool_never_explodes() {
        let mut roller = DiceRoller::new(Scripted::new(&[6]));
        let result = roller.roll(&DicePool::new(3, DiceType::D6, 0));
        assert_eq!(result.explosions, 0);
        assert_eq!(result.total, 18);
    }

    #[test]
    fn notation_errors_surface() {
        let mut roller = DiceRoller::seeded(1);
        assert!(roller.roll_notation("2d6+3", AdvantageType::Normal).is_ok());
        assert!(matches!(
            roller.roll_notation("two dice", AdvantageType::Normal),
            Err(DiceFormatError::MissingSeparator(_))
        ));
    }

    #[test]
    fn huge_notation_is_rejected_without_rolling() {
        let mut roller = DiceRoller::seeded(1);
        assert!(matches!(
            roller.roll_notation("3000000000d6", AdvantageType::Normal),
            Err(DiceFormatError::InvalidCount(_))
        ));
        assert_eq!(roller.rng().draws(), 0);

        let result = roller.roll_notation("4d6!1", AdvantageType::Normal).unwrap();
        assert!(result.pool.is_exploding());
        assert!(result.explosions <= 4);
    }
}
