//! **tilepath-core**: the tile grid that pathfinding runs on.
//!
//! This crate provides the [`Position`] coordinate type, the closed
//! [`TileState`] classification, and [`TileGrid`], which keeps at most one
//! start and one destination cell in sync with its recorded endpoints.

pub mod error;
pub mod geom;
pub mod grid;
pub mod tile;

pub use error::GridError;
pub use geom::Position;
pub use grid::{GridIter, TileGrid};
pub use tile::TileState;
