//! Dice pools and dice notation.

use std::fmt;
use std::str::FromStr;

use crate::error::{CombatError, ErrorSeverity};

/// Die type, identified by its face count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiceType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
    /// Any other face count.
    Custom(u32),
}

impl DiceType {
    /// Number of faces on this die.
    pub const fn faces(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(faces) => faces,
        }
    }

    /// Maps a face count to the matching standard die, or [`DiceType::Custom`].
    pub const fn from_faces(faces: u32) -> Self {
        match faces {
            4 => Self::D4,
            6 => Self::D6,
            8 => Self::D8,
            10 => Self::D10,
            12 => Self::D12,
            20 => Self::D20,
            100 => Self::D100,
            other => Self::Custom(other),
        }
    }
}

impl fmt::Display for DiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces())
    }
}

/// Errors produced when parsing dice notation such as `"2d6+3"`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceFormatError {
    #[error("dice notation is empty")]
    Empty,

    #[error("dice notation `{0}` is missing the `d` separator")]
    MissingSeparator(String),

    #[error("dice notation `{0}` has an invalid dice count")]
    InvalidCount(String),

    #[error("dice notation `{0}` has an invalid number of sides")]
    InvalidSides(String),

    #[error("dice notation `{0}` has an invalid modifier")]
    InvalidModifier(String),

    #[error("dice notation `{0}` has an invalid explosion cap")]
    InvalidExplosion(String),
}

impl CombatError for DiceFormatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "DICE_EMPTY_NOTATION",
            Self::MissingSeparator(_) => "DICE_MISSING_SEPARATOR",
            Self::InvalidCount(_) => "DICE_INVALID_COUNT",
            Self::InvalidSides(_) => "DICE_INVALID_SIDES",
            Self::InvalidModifier(_) => "DICE_INVALID_MODIFIER",
            Self::InvalidExplosion(_) => "DICE_INVALID_EXPLOSION",
        }
    }
}

/// Immutable description of a roll: `count` dice of one type plus a modifier.
///
/// Exploding pools reroll any die that lands on its maximum face and add the
/// reroll, up to `max_explosions` extra dice per original die (unlimited when
/// unset).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DicePool {
    count: u32,
    die: DiceType,
    modifier: i32,
    exploding: bool,
    max_explosions: Option<u32>,
}

impl DicePool {
    /// Most dice a single pool may roll.
    pub const MAX_COUNT: u32 = 100;
    /// Most faces a single die may have.
    pub const MAX_FACES: u32 = 1000;

    /// Creates a non-exploding pool.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero or above [`Self::MAX_COUNT`], or the die has
    /// no faces or more than [`Self::MAX_FACES`].
    pub const fn new(count: u32, die: DiceType, modifier: i32) -> Self {
        assert!(
            count > 0 && count <= Self::MAX_COUNT,
            "dice pool count must be between 1 and DicePool::MAX_COUNT"
        );
        assert!(
            die.faces() > 0 && die.faces() <= Self::MAX_FACES,
            "dice faces must be between 1 and DicePool::MAX_FACES"
        );
        Self {
            count,
            die,
            modifier,
            exploding: false,
            max_explosions: None,
        }
    }

    /// A single die with no modifier.
    pub const fn single(die: DiceType) -> Self {
        Self::new(1, die, 0)
    }

    /// Enables exploding dice (builder pattern).
    ///
    /// # Panics
    ///
    /// Panics for one-faced dice without an explosion cap, which would
    /// explode forever.
    #[must_use]
    pub const fn exploding(mut self) -> Self {
        assert!(
            self.die.faces() > 1 || self.max_explosions.is_some(),
            "a one-faced die cannot explode without an explosion cap"
        );
        self.exploding = true;
        self
    }

    /// Caps the number of explosions per die (builder pattern).
    #[must_use]
    pub const fn with_max_explosions(mut self, max_explosions: u32) -> Self {
        self.max_explosions = Some(max_explosions);
        self
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    pub const fn die(&self) -> DiceType {
        self.die
    }

    pub const fn faces(&self) -> u32 {
        self.die.faces()
    }

    pub const fn modifier(&self) -> i32 {
        self.modifier
    }

    pub const fn is_exploding(&self) -> bool {
        self.exploding
    }

    pub const fn max_explosions(&self) -> Option<u32> {
        self.max_explosions
    }

    /// Lowest possible total without explosions.
    pub fn min_total(&self) -> i32 {
        Self::clamp_total(i64::from(self.count) + i64::from(self.modifier))
    }

    /// Highest possible total without explosions.
    pub fn max_total(&self) -> i32 {
        Self::clamp_total(i64::from(self.count) * i64::from(self.faces()) + i64::from(self.modifier))
    }

    /// Narrows an unbounded sum to the `i32` range used for totals.
    pub(crate) fn clamp_total(sum: i64) -> i32 {
        sum.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Canonical notation (`2d6+3`, `1d20-1`, `3d8`).
    pub fn notation(&self) -> String {
        match self.modifier {
            0 => format!("{}{}", self.count, self.die),
            m if m > 0 => format!("{}{}+{}", self.count, self.die, m),
            m => format!("{}{}{}", self.count, self.die, m),
        }
    }

    /// Parses `<count>d<sides>[(+|-)<modifier>][!<cap>]`.
    pub fn parse(notation: &str) -> Result<Self, DiceFormatError> {
        notation.parse()
    }
}

/// Notation followed by `!` for exploding pools and the explosion cap, if
/// any (`3d6!`, `2d10+1!2`). This form parses back to an equal pool.
impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())?;
        if self.exploding {
            f.write_str("!")?;
            if let Some(cap) = self.max_explosions {
                write!(f, "{cap}")?;
            }
        }
        Ok(())
    }
}

fn parse_digits(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}

fn parse_bounded(digits: &str, max: u32) -> Option<u32> {
    parse_digits(digits).filter(|n| (1..=max).contains(n))
}

impl FromStr for DicePool {
    type Err = DiceFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(DiceFormatError::Empty);
        }

        let (dice, explosion) = match text.split_once('!') {
            Some((dice, cap)) => (dice, Some(cap)),
            None => (text, None),
        };

        let (count_part, rest) = dice
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceFormatError::MissingSeparator(text.to_string()))?;

        let count = parse_bounded(count_part, Self::MAX_COUNT)
            .ok_or_else(|| DiceFormatError::InvalidCount(text.to_string()))?;

        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(index) => {
                let (sides, signed) = rest.split_at(index);
                let digits = &signed[1..];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DiceFormatError::InvalidModifier(text.to_string()));
                }
                let magnitude: i32 = digits
                    .parse()
                    .map_err(|_| DiceFormatError::InvalidModifier(text.to_string()))?;
                let modifier = if signed.starts_with('-') {
                    -magnitude
                } else {
                    magnitude
                };
                (sides, modifier)
            }
            None => (rest, 0),
        };

        let faces = parse_bounded(sides_part, Self::MAX_FACES)
            .ok_or_else(|| DiceFormatError::InvalidSides(text.to_string()))?;

        let pool = Self::new(count, DiceType::from_faces(faces), modifier);
        let Some(cap) = explosion else {
            return Ok(pool);
        };
        let pool = if cap.is_empty() {
            pool
        } else {
            let cap = parse_digits(cap)
                .ok_or_else(|| DiceFormatError::InvalidExplosion(text.to_string()))?;
            pool.with_max_explosions(cap)
        };
        if faces == 1 && pool.max_explosions.is_none() {
            return Err(DiceFormatError::InvalidExplosion(text.to_string()));
        }
        Ok(pool.exploding())
    }
}

impl TryFrom<String> for DicePool {
    type Error = DiceFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DicePool> for String {
    fn from(pool: DicePool) -> Self {
        pool.to_string()
    }
}
