use std::borrow::Borrow;
use std::iter::FusedIterator;

use tilepath_core::Position;

use crate::error::SearchError;
use crate::result::{Parent, SearchResult};

/// Entry point for walking a successful search back to its start.
#[derive(Copy, Clone, Debug, Default)]
pub struct PathReconstructor;

impl PathReconstructor {
    /// Walk the parent links of `result` from the destination back toward
    /// the start.
    ///
    /// The returned [`Route`] yields the interior cells of the shortest
    /// route, starting with the destination's neighbour and ending with the
    /// start's neighbour. Neither endpoint is yielded.
    pub fn reconstruct(result: &SearchResult) -> Result<Route<&SearchResult>, SearchError> {
        Route::new(result)
    }

    /// Like [`reconstruct`](Self::reconstruct), but the route takes
    /// ownership of the result so it can outlive the caller's frame.
    pub fn reconstruct_owned(result: SearchResult) -> Result<Route<SearchResult>, SearchError> {
        Route::new(result)
    }
}

/// Interior cells of a route, destination side first.
///
/// A missing or cyclic parent link ends the route with a single
/// [`SearchError::BrokenPathLink`] item.
#[derive(Debug)]
pub struct Route<R> {
    result: R,
    end: Position,
    /// Links left before the walk must have reached the start.
    remaining: usize,
    done: bool,
}

impl<R: Borrow<SearchResult>> Route<R> {
    fn new(result: R) -> Result<Self, SearchError> {
        let r: &SearchResult = result.borrow();
        if !r.found() {
            return Err(SearchError::NoPathFound);
        }
        let (end, remaining) = (r.destination(), r.discovered());
        Ok(Self {
            result,
            end,
            remaining,
            done: false,
        })
    }

    /// The search result being walked.
    pub fn result(&self) -> &SearchResult {
        self.result.borrow()
    }

    fn broken(&mut self) -> Option<Result<Position, SearchError>> {
        self.done = true;
        log::warn!("route: broken parent link at {}", self.end);
        Some(Err(SearchError::BrokenPathLink { at: self.end }))
    }
}

impl<R: Borrow<SearchResult>> Iterator for Route<R> {
    type Item = Result<Position, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.remaining == 0 {
            return self.broken();
        }
        self.remaining -= 1;

        let result: &SearchResult = self.result.borrow();
        let (start, link) = (result.start(), result.parent(self.end));
        match link {
            Some(Parent::Via(parent)) if parent == start => {
                self.done = true;
                None
            }
            Some(Parent::Via(parent)) => {
                self.end = parent;
                Some(Ok(parent))
            }
            // Only the start links to the origin, and the walk stops before
            // reaching it.
            Some(Parent::Origin) | None => self.broken(),
        }
    }
}

impl<R: Borrow<SearchResult>> FusedIterator for Route<R> {}
