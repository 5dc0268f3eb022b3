//! Observable shortest-path search on a [`TileGrid`](tilepath_core::TileGrid).
//!
//! Both stages are lazy iterators so a renderer can draw every step as it
//! happens:
//!
//! - [`PathFinder::search`] yields each cell as breadth-first search
//!   discovers it, then hands back a [`SearchResult`].
//! - [`PathReconstructor::reconstruct`] walks the result's parent links and
//!   yields the interior cells of the route, destination side first.
//!
//! Neighbors are always explored up, down, left, right, so the discovery
//! order and the route chosen among equal-length alternatives are
//! deterministic.

mod bfs;
mod error;
mod reconstruct;
mod result;

pub use bfs::{Discovery, PathFinder};
pub use error::{Endpoint, SearchError};
pub use reconstruct::{PathReconstructor, Route};
pub use result::{Parent, SearchResult};
