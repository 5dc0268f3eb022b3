//! The [`TileGrid`] type: a rows x columns matrix of [`TileState`]s.
//!
//! The grid records where its start and destination tiles are. Every edit
//! keeps those records in agreement with the matrix: there is at most one
//! `Start` and one `Destination` cell, and a recorded endpoint always points
//! at a cell holding exactly that state.

use std::fmt;

use crate::error::GridError;
use crate::geom::Position;
use crate::tile::TileState;

/// A rectangular grid of tiles with singleton start and destination cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    cells: Vec<TileState>,
    rows: i32,
    columns: i32,
    start: Option<Position>,
    destination: Option<Position>,
}

impl TileGrid {
    /// Create a grid of `rows` x `columns` empty tiles.
    pub fn new(rows: i32, columns: i32) -> Result<Self, GridError> {
        if rows <= 0 || columns <= 0 {
            return Err(GridError::InvalidDimension { rows, columns });
        }
        Ok(Self {
            cells: vec![TileState::Empty; rows as usize * columns as usize],
            rows,
            columns,
            start: None,
            destination: None,
        })
    }

    /// Build a grid from an ASCII layout, one line per row.
    ///
    /// `.` is empty, `#` a wall, `S` the start and `D` the destination.
    /// Leading and trailing blank lines and surrounding whitespace on each
    /// line are ignored.
    pub fn parse(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        let lines = &lines[..end];

        let expected = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Self::new(lines.len() as i32, expected as i32)?;

        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(GridError::InconsistentRows {
                    line: r,
                    expected,
                    found,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Position::new(r as i32, c as i32);
                let state = TileState::from_glyph(ch).ok_or(GridError::InvalidTile { ch, pos })?;
                let taken = match state {
                    TileState::Start => grid.start.is_some(),
                    TileState::Destination => grid.destination.is_some(),
                    _ => false,
                };
                if taken {
                    return Err(GridError::DuplicateEndpoint { ch, pos });
                }
                grid.set_tile(pos, state)?;
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `pos` addresses a cell of this grid.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.column >= 0 && pos.row < self.rows && pos.column < self.columns
    }

    /// Convert a position to a flat row-major index.
    #[inline]
    pub fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.row as usize * self.columns as usize + pos.column as usize)
    }

    /// The recorded start position, if any.
    #[inline]
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// The recorded destination position, if any.
    #[inline]
    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[TileState] {
        &self.cells
    }

    /// Set every tile to `Empty` and forget both endpoints. The backing
    /// storage is reused.
    pub fn reset(&mut self) {
        self.cells.fill(TileState::Empty);
        self.start = None;
        self.destination = None;
        log::debug!("grid reset ({} x {})", self.rows, self.columns);
    }

    /// Read the tile at `pos`.
    pub fn tile(&self, pos: Position) -> Result<TileState, GridError> {
        let i = self.checked_index(pos)?;
        Ok(self.cells[i])
    }

    /// Write `state` at `pos`.
    ///
    /// `Start` and `Destination` go through [`set_start`](Self::set_start)
    /// and [`set_destination`](Self::set_destination). Overwriting a recorded
    /// endpoint with anything else forgets that endpoint.
    pub fn set_tile(&mut self, pos: Position, state: TileState) -> Result<(), GridError> {
        match state {
            TileState::Start => self.set_start(pos),
            TileState::Destination => self.set_destination(pos),
            TileState::Empty | TileState::Wall => {
                let i = self.checked_index(pos)?;
                self.forget_endpoint_at(pos);
                self.cells[i] = state;
                Ok(())
            }
        }
    }

    /// Set the tile at `pos` back to `Empty`.
    pub fn clear_tile(&mut self, pos: Position) -> Result<(), GridError> {
        self.set_tile(pos, TileState::Empty)
    }

    /// Move the start to `pos`. A previous start elsewhere becomes `Empty`.
    pub fn set_start(&mut self, pos: Position) -> Result<(), GridError> {
        self.place_endpoint(pos, TileState::Start)
    }

    /// Move the destination to `pos`. A previous destination elsewhere
    /// becomes `Empty`.
    pub fn set_destination(&mut self, pos: Position) -> Result<(), GridError> {
        self.place_endpoint(pos, TileState::Destination)
    }

    /// Count tiles equal to `state`.
    pub fn count(&self, state: TileState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Iterate over `(Position, TileState)` pairs in row-major order.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter { grid: self, idx: 0 }
    }

    fn place_endpoint(&mut self, pos: Position, state: TileState) -> Result<(), GridError> {
        let i = self.checked_index(pos)?;
        let previous = match state {
            TileState::Start => self.start.take(),
            _ => self.destination.take(),
        };
        if let Some(old) = previous.filter(|&old| old != pos) {
            if let Some(oi) = self.index(old) {
                self.cells[oi] = TileState::Empty;
            }
        }
        // The target may hold the other endpoint.
        self.forget_endpoint_at(pos);
        self.cells[i] = state;
        match state {
            TileState::Start => self.start = Some(pos),
            _ => self.destination = Some(pos),
        }
        Ok(())
    }

    fn forget_endpoint_at(&mut self, pos: Position) {
        if self.start == Some(pos) {
            self.start = None;
        }
        if self.destination == Some(pos) {
            self.destination = None;
        }
    }

    fn checked_index(&self, pos: Position) -> Result<usize, GridError> {
        self.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            rows: self.rows,
            columns: self.columns,
        })
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns as usize) {
            for state in row {
                write!(f, "{}", state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Position, TileState)` pairs of a [`TileGrid`].
pub struct GridIter<'a> {
    grid: &'a TileGrid,
    idx: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (Position, TileState);

    fn next(&mut self) -> Option<Self::Item> {
        let state = *self.grid.cells.get(self.idx)?;
        let columns = self.grid.columns as usize;
        let pos = Position::new((self.idx / columns) as i32, (self.idx % columns) as i32);
        self.idx += 1;
        Some((pos, state))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.cells.len() - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a TileGrid {
    type Item = (Position, TileState);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}
