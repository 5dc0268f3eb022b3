//! The [`TileState`] classification.

use std::fmt;

/// What a single grid cell holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    Empty,
    /// Impassable.
    Wall,
    Start,
    Destination,
}

impl TileState {
    /// All variants, in declaration order.
    pub const ALL: [TileState; 4] = [Self::Empty, Self::Wall, Self::Start, Self::Destination];

    /// Whether a search may step onto this tile.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Whether this is one of the two singleton endpoint states.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::Destination)
    }

    /// ASCII symbol used by [`TileGrid::parse`](crate::TileGrid::parse) and
    /// the grid's `Display` output.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::Destination => 'D',
        }
    }

    /// Inverse of [`glyph`](TileState::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'D' => Some(Self::Destination),
            _ => None,
        }
    }
}

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::Destination => "destination",
        };
        f.write_str(name)
    }
}
