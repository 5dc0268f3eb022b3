use tilepath_core::Position;

/// How a discovered cell was reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parent {
    /// The cell is the search origin and has no parent.
    Origin,
    /// The cell was discovered from this neighbour.
    Via(Position),
}

/// Outcome of one breadth-first search.
///
/// The parent table is a flat row-major vector over the searched grid:
/// `None` marks an undiscovered cell, [`Parent::Origin`] the start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub(crate) found: bool,
    pub(crate) start: Position,
    pub(crate) destination: Position,
    pub(crate) rows: i32,
    pub(crate) columns: i32,
    pub(crate) parents: Vec<Option<Parent>>,
}

impl SearchResult {
    pub(crate) fn new(start: Position, destination: Position, rows: i32, columns: i32) -> Self {
        let mut result = Self {
            found: false,
            start,
            destination,
            rows,
            columns,
            parents: vec![None; rows as usize * columns as usize],
        };
        result.link(start, Parent::Origin);
        result
    }

    /// Whether the destination was reached.
    #[inline]
    pub fn found(&self) -> bool {
        self.found
    }

    /// The search origin.
    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    /// The search goal.
    #[inline]
    pub fn destination(&self) -> Position {
        self.destination
    }

    /// How `pos` was reached, or `None` if it was never discovered.
    pub fn parent(&self, pos: Position) -> Option<Parent> {
        self.idx(pos)
            .and_then(|i| self.parents.get(i).copied().flatten())
    }

    /// Whether `pos` has an entry in the parent table.
    pub fn is_discovered(&self, pos: Position) -> bool {
        self.parent(pos).is_some()
    }

    /// Number of cells in the parent table, the start included.
    pub fn discovered(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    pub(crate) fn link(&mut self, pos: Position, parent: Parent) {
        if let Some(slot) = self.idx(pos).and_then(|i| self.parents.get_mut(i)) {
            *slot = Some(parent);
        }
    }

    #[inline]
    fn idx(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.column < 0 || pos.row >= self.rows || pos.column >= self.columns {
            return None;
        }
        Some(pos.row as usize * self.columns as usize + pos.column as usize)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn search_result_round_trip() {
        let mut r = SearchResult::new(Position::ZERO, Position::new(0, 1), 1, 2);
        r.link(Position::new(0, 1), Parent::Via(Position::ZERO));
        r.found = true;
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }

    #[test]
    fn short_parent_table_reports_broken_link() {
        // Parent table shorter than rows x columns.
        let json = r#"{
            "found": true,
            "start": {"row": 0, "column": 0},
            "destination": {"row": 1, "column": 1},
            "rows": 2,
            "columns": 2,
            "parents": [{"Via": {"row": 0, "column": 0}}]
        }"#;
        let r: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.parent(Position::new(1, 1)), None);
        let items: Vec<_> = crate::PathReconstructor::reconstruct(&r).unwrap().collect();
        assert_eq!(
            items,
            vec![Err(crate::SearchError::BrokenPathLink {
                at: Position::new(1, 1)
            })]
        );
    }
}
