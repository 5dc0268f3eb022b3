//! The [`Position`] type: a (row, column) grid coordinate.

use std::fmt;

/// A grid coordinate. Rows grow downward, columns grow rightward.
///
/// A position is only meaningful relative to a grid: it is valid when
/// `0 <= row < rows` and `0 <= column < columns`. Neighbor arithmetic may
/// produce negative coordinates, which every grid treats as out of bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, column: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Return a position shifted by (d_row, d_column).
    #[inline]
    pub const fn shift(self, d_row: i32, d_column: i32) -> Self {
        Self {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }

    /// Map a pointer location to the cell under it.
    ///
    /// `x` and `y` are pointer coordinates (pixels or terminal columns/rows);
    /// `cell_width` and `cell_height` are the on-screen size of one tile.
    /// Returns `None` for a non-positive cell size or a negative pointer.
    pub fn from_pixel(x: i32, y: i32, cell_width: i32, cell_height: i32) -> Option<Self> {
        if cell_width <= 0 || cell_height <= 0 || x < 0 || y < 0 {
            return None;
        }
        Some(Self::new(y / cell_height, x / cell_width))
    }

    /// The four orthogonal neighbours in search order: up, down, left, right.
    #[inline]
    pub const fn neighbors_4(self) -> [Position; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.row, p.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn position_round_trip() {
        let p = Position::new(4, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
