use std::fmt;

use thiserror::Error;
use tilepath_core::Position;

/// One of the two grid endpoints a search needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors produced by [`PathFinder`](crate::PathFinder) and
/// [`PathReconstructor`](crate::PathReconstructor).
///
/// An unreachable destination is not an error: it is reported through
/// [`SearchResult::found`](crate::SearchResult::found).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The grid has no recorded start or destination.
    #[error("no {0} tile is set")]
    MissingEndpoint(Endpoint),

    /// Reconstruction was requested for a search that did not reach the
    /// destination.
    #[error("no path was found")]
    NoPathFound,

    /// The parent table has no usable link for `at`. A table built by
    /// [`PathFinder`](crate::PathFinder) never triggers this.
    #[error("parent table has no link for {at}")]
    BrokenPathLink { at: Position },
}
