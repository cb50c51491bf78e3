use std::fmt;

/// Discrete grid position expressed in cell coordinates.
///
/// `x` is the column and `y` the row, both zero-based. Positions outside a
/// grid are representable; bounds are checked by [`super::CombatGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    pub fn distance_to(self, other: Self) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx.max(dy) as u32
    }

    /// Distance of at most one, diagonals included. A position is adjacent
    /// to itself.
    pub fn is_adjacent_to(self, other: Self) -> bool {
        self.distance_to(other) <= 1
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Spreadsheet-style label such as `"B3"`: letters for the column
    /// (`A`..`Z`, `AA`..), a 1-based row number.
    ///
    /// Returns `None` for negative coordinates.
    pub fn label(self) -> Option<String> {
        if self.x < 0 || self.y < 0 {
            return None;
        }
        let mut letters = Vec::new();
        let mut column = self.x as u64 + 1;
        while column > 0 {
            let rem = ((column - 1) % 26) as u8;
            letters.push(char::from(b'A' + rem));
            column = (column - 1) / 26;
        }
        let column: String = letters.iter().rev().collect();
        Some(format!("{column}{}", i64::from(self.y) + 1))
    }

    /// Parses a cell label, case-insensitively. Malformed labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let split = label
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(label.len());
        let (letters, digits) = label.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut column: i64 = 0;
        for c in letters.bytes() {
            let value = i64::from(c.to_ascii_uppercase() - b'A' + 1);
            column = column.checked_mul(26)?.checked_add(value)?;
            if column > i64::from(i32::MAX) {
                return None;
            }
        }

        let row: i32 = digits.parse().ok()?;
        if row < 1 {
            return None;
        }
        Some(Self::new((column - 1) as i32, row - 1))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_distance() {
        let a = GridPosition::new(2, 2);
        assert_eq!(a.distance_to(GridPosition::new(6, 2)), 4);
        assert_eq!(a.distance_to(GridPosition::new(5, 5)), 3);
        assert_eq!(a.distance_to(GridPosition::new(1, 4)), 2);
        assert_eq!(a.distance_to(a), 0);
    }

    #[test]
    fn adjacency_includes_diagonals() {
        let a = GridPosition::new(3, 3);
        assert!(a.is_adjacent_to(GridPosition::new(4, 4)));
        assert!(!a.is_adjacent_to(GridPosition::new(5, 3)));
    }

    #[test]
    fn labels_round_trip_known_cells() {
        assert_eq!(GridPosition::from_label("A1"), Some(GridPosition::new(0, 0)));
        assert_eq!(GridPosition::from_label("b3"), Some(GridPosition::new(1, 2)));
        assert_eq!(GridPosition::from_label("Z10"), Some(GridPosition::new(25, 9)));
        assert_eq!(GridPosition::from_label("AA1"), Some(GridPosition::new(26, 0)));
        assert_eq!(GridPosition::new(27, 4).label().as_deref(), Some("AB5"));
        assert_eq!(GridPosition::new(-1, 0).label(), None);
    }

    #[test]
    fn malformed_labels_are_rejected() {
        for label in ["", "A", "12", "A0", "1A", "A1B", "A-1", "Ä1"] {
            assert_eq!(GridPosition::from_label(label), None, "{label}");
        }
    }
}
