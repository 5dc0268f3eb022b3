use thiserror::Error;

use crate::geom::Position;

/// Errors produced by [`TileGrid`](crate::TileGrid) construction and edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid was requested with a non-positive row or column count.
    #[error("invalid grid dimension: {rows} x {columns}")]
    InvalidDimension { rows: i32, columns: i32 },

    /// A position outside the grid was addressed.
    #[error("position {pos} is outside a {rows} x {columns} grid")]
    OutOfBounds { pos: Position, rows: i32, columns: i32 },

    /// Layout lines have different lengths.
    #[error("layout line {line} has {found} tiles, expected {expected}")]
    InconsistentRows {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A layout character that names no tile.
    #[error("layout contains invalid tile \u{201c}{ch}\u{201d} at {pos}")]
    InvalidTile { ch: char, pos: Position },

    /// A layout names a second start or destination.
    #[error("layout has more than one {ch} tile (second at {pos})")]
    DuplicateEndpoint { ch: char, pos: Position },
}
