//! Seeded dice: random source, pools, notation and roll results.
//!
//! Every face rolled in an encounter comes from one [`RandomSource`] owned by
//! a [`DiceRoller`]. There is no global generator.

mod pool;
mod result;
mod rng;
mod roller;

pub use pool::{DiceFormatError, DicePool, DiceType};
pub use result::{
    AdvantageRecord, AdvantageType, BOTCH_FACE, CRITICAL_SUCCESSES, DiceRollResult,
    SUCCESS_THRESHOLD,
};
pub use rng::{RandomSource, RngState, SeededRng};
pub use roller::DiceRoller;
