use std::iter::FusedIterator;

use tilepath_core::{Position, TileGrid, TileState};

use crate::error::{Endpoint, SearchError};
use crate::reconstruct::PathReconstructor;
use crate::result::{Parent, SearchResult};

/// Entry point for breadth-first search on a [`TileGrid`].
#[derive(Copy, Clone, Debug, Default)]
pub struct PathFinder;

impl PathFinder {
    /// Start a breadth-first search from the grid's start to its
    /// destination.
    ///
    /// The returned [`Discovery`] yields every newly discovered cell, one per
    /// call to `next`. The destination itself is never yielded. The grid's
    /// tiles are captured now, so later edits do not affect this search.
    pub fn search(grid: &TileGrid) -> Result<Discovery, SearchError> {
        let start = grid
            .start()
            .ok_or(SearchError::MissingEndpoint(Endpoint::Start))?;
        let destination = grid
            .destination()
            .ok_or(SearchError::MissingEndpoint(Endpoint::Destination))?;
        log::debug!("bfs: searching {start} -> {destination}");
        Ok(Discovery::new(grid, start, destination))
    }

    /// Run a search to completion and return the full route, start side
    /// first, excluding both endpoints. `None` when the destination is
    /// unreachable.
    pub fn shortest_path(grid: &TileGrid) -> Result<Option<Vec<Position>>, SearchError> {
        let result = Self::search(grid)?.finish();
        if !result.found() {
            return Ok(None);
        }
        let mut path = PathReconstructor::reconstruct(&result)?.collect::<Result<Vec<_>, _>>()?;
        path.reverse();
        Ok(Some(path))
    }
}

/// A running breadth-first search, yielding cells in discovery order.
///
/// The frontier is expanded layer by layer. A cell is marked visited the
/// moment it joins the next layer, so it is discovered at most once. Walls
/// are marked visited but never yielded or expanded.
///
/// Dropping a `Discovery` abandons the search.
#[derive(Debug)]
pub struct Discovery {
    tiles: Vec<TileState>,
    visited: Vec<bool>,
    frontier: Vec<Position>,
    next_frontier: Vec<Position>,
    frontier_pos: usize,
    /// Cell being expanded and the index of its next neighbour.
    current: Option<(Position, usize)>,
    layer: usize,
    result: SearchResult,
    done: bool,
}

impl Discovery {
    fn new(grid: &TileGrid, start: Position, destination: Position) -> Self {
        let mut visited = vec![false; grid.len()];
        if let Some(i) = grid.index(start) {
            visited[i] = true;
        }
        Self {
            tiles: grid.cells().to_vec(),
            visited,
            frontier: vec![start],
            next_frontier: Vec::new(),
            frontier_pos: 0,
            current: None,
            layer: 0,
            result: SearchResult::new(start, destination, grid.rows(), grid.columns()),
            done: false,
        }
    }

    /// Whether the search has ended, either at the destination or by running
    /// out of frontier.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Distance from the start of the layer currently being discovered.
    #[inline]
    pub fn layer(&self) -> usize {
        self.layer + 1
    }

    /// The finished result, or `None` while cells remain to be discovered.
    pub fn result(&self) -> Option<&SearchResult> {
        self.done.then_some(&self.result)
    }

    /// Discover every remaining cell and return the result.
    pub fn finish(mut self) -> SearchResult {
        self.by_ref().for_each(drop);
        self.result
    }

    #[inline]
    fn idx(&self, pos: Position) -> Option<usize> {
        let (rows, columns) = (self.result.rows, self.result.columns);
        if pos.row < 0 || pos.column < 0 || pos.row >= rows || pos.column >= columns {
            return None;
        }
        Some(pos.row as usize * columns as usize + pos.column as usize)
    }

    fn stop(&mut self, found: bool) {
        self.done = true;
        self.result.found = found;
        self.frontier.clear();
        self.next_frontier.clear();
        self.current = None;
        log::debug!(
            "bfs: {} after {} layers, {} cells discovered",
            if found { "found" } else { "exhausted" },
            self.layer + 1,
            self.result.discovered()
        );
    }
}

impl Iterator for Discovery {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        loop {
            if self.done {
                return None;
            }

            if let Some((cur, k)) = self.current {
                let neighbors = cur.neighbors_4();
                let Some(&np) = neighbors.get(k) else {
                    self.current = None;
                    continue;
                };
                self.current = Some((cur, k + 1));

                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.visited[ni] {
                    continue;
                }
                self.visited[ni] = true;
                if self.tiles[ni] == TileState::Wall {
                    continue;
                }

                self.result.link(np, Parent::Via(cur));
                self.next_frontier.push(np);
                if np == self.result.destination {
                    self.stop(true);
                    return None;
                }
                log::trace!("bfs: discovered {np} in layer {}", self.layer + 1);
                return Some(np);
            }

            if let Some(&cur) = self.frontier.get(self.frontier_pos) {
                self.frontier_pos += 1;
                self.current = Some((cur, 0));
                continue;
            }

            if self.next_frontier.is_empty() {
                self.stop(false);
                return None;
            }
            self.frontier = std::mem::take(&mut self.next_frontier);
            self.frontier_pos = 0;
            self.layer += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let unvisited = self.visited.iter().filter(|v| !**v).count();
        (0, Some(unvisited))
    }
}

impl FusedIterator for Discovery {}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, column: i32) -> Position {
        Position::new(row, column)
    }

    fn open_3x3() -> TileGrid {
        let mut g = TileGrid::new(3, 3).unwrap();
        g.set_start(p(0, 0)).unwrap();
        g.set_destination(p(2, 2)).unwrap();
        g
    }

    #[test]
    fn missing_endpoints_fail_immediately() {
        let mut g = TileGrid::new(3, 3).unwrap();
        assert_eq!(
            PathFinder::search(&g).unwrap_err(),
            SearchError::MissingEndpoint(Endpoint::Start)
        );
        g.set_start(p(0, 0)).unwrap();
        assert_eq!(
            PathFinder::search(&g).unwrap_err(),
            SearchError::MissingEndpoint(Endpoint::Destination)
        );
        g.set_tile(p(0, 0), TileState::Wall).unwrap();
        g.set_destination(p(1, 1)).unwrap();
        assert_eq!(
            PathFinder::search(&g).unwrap_err(),
            SearchError::MissingEndpoint(Endpoint::Start)
        );
    }

    #[test]
    fn open_grid_discovery_order() {
        let g = open_3x3();
        let mut d = PathFinder::search(&g).unwrap();
        let seen: Vec<_> = d.by_ref().collect();
        // Every cell at distance 3 is discovered before the destination,
        // which only joins the frontier while layer 4 is expanded.
        assert_eq!(
            seen,
            vec![p(1, 0), p(0, 1), p(2, 0), p(1, 1), p(0, 2), p(2, 1), p(1, 2)]
        );
        let result = d.result().unwrap();
        assert!(result.found());
        assert_eq!(result.parent(p(2, 2)), Some(Parent::Via(p(2, 1))));
    }

    #[test]
    fn result_is_unavailable_until_exhausted() {
        let g = open_3x3();
        let mut d = PathFinder::search(&g).unwrap();
        assert_eq!(d.next(), Some(p(1, 0)));
        assert!(!d.is_finished());
        assert!(d.result().is_none());
        let result = d.finish();
        assert!(result.found());
    }

    #[test]
    fn iterator_is_fused() {
        let g = open_3x3();
        let mut d = PathFinder::search(&g).unwrap();
        d.by_ref().for_each(drop);
        assert_eq!(d.next(), None);
        assert_eq!(d.next(), None);
        assert!(d.is_finished());
    }

    #[test]
    fn walls_are_never_yielded() {
        let g = TileGrid::parse(
            "
            S#.
            .#.
            ..D
            ",
        )
        .unwrap();
        let seen: Vec<_> = PathFinder::search(&g).unwrap().collect();
        assert_eq!(seen, vec![p(1, 0), p(2, 0), p(2, 1)]);
        assert!(!seen.contains(&p(0, 1)));
        assert!(!seen.contains(&p(2, 2)));
    }

    #[test]
    fn enclosed_destination_is_not_found() {
        let g = TileGrid::parse(
            "
            S..#D
            ...##
            .....
            ",
        )
        .unwrap();
        let mut d = PathFinder::search(&g).unwrap();
        let seen: Vec<_> = d.by_ref().collect();
        let result = d.finish();
        assert!(!result.found());
        assert!(!result.is_discovered(p(0, 4)));
        // Every open cell outside the pocket is discovered exactly once.
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), seen.len());
        assert_eq!(seen.len(), g.count(TileState::Empty));
    }

    #[test]
    fn adjacent_destination_yields_nothing() {
        let g = TileGrid::parse("SD").unwrap();
        let mut d = PathFinder::search(&g).unwrap();
        assert_eq!(d.next(), None);
        assert!(d.result().unwrap().found());
    }

    #[test]
    fn search_ignores_later_edits() {
        let mut g = open_3x3();
        let d = PathFinder::search(&g).unwrap();
        g.set_tile(p(1, 0), TileState::Wall).unwrap();
        let seen: Vec<_> = d.collect();
        assert_eq!(seen[0], p(1, 0));
    }

    #[test]
    fn layers_grow_with_distance() {
        let g = TileGrid::parse("S...D").unwrap();
        let mut d = PathFinder::search(&g).unwrap();
        assert_eq!(d.next(), Some(p(0, 1)));
        assert_eq!(d.layer(), 1);
        assert_eq!(d.next(), Some(p(0, 2)));
        assert_eq!(d.layer(), 2);
    }

    #[test]
    fn shortest_path_runs_both_stages() {
        let g = open_3x3();
        assert_eq!(
            PathFinder::shortest_path(&g).unwrap(),
            Some(vec![p(1, 0), p(2, 0), p(2, 1)])
        );

        let blocked = TileGrid::parse("S#D").unwrap();
        assert_eq!(PathFinder::shortest_path(&blocked).unwrap(), None);
    }
}
