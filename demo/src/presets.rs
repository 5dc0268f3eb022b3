//! Starting layouts for the demo.

use clap::ValueEnum;
use tilepath_core::{GridError, Position, TileGrid, TileState};

/// A named starting layout, built for any grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// A blank grid with no endpoints.
    Empty,
    /// Start in the top-left corner, destination in the bottom-right.
    Corners,
    /// Vertical walls with alternating gaps between the corners.
    Maze,
    /// A destination sealed inside a ring of walls.
    Pocket,
}

impl Preset {
    /// Build a `rows` x `columns` grid with this layout. Parts of the
    /// layout that do not fit are left out.
    pub fn build(self, rows: i32, columns: i32) -> Result<TileGrid, GridError> {
        let mut grid = TileGrid::new(rows, columns)?;
        let last = Position::new(rows - 1, columns - 1);
        match self {
            Self::Empty => {}
            Self::Corners => {
                grid.set_start(Position::ZERO)?;
                grid.set_destination(last)?;
            }
            Self::Maze => {
                for (n, column) in (2..columns - 1).step_by(3).enumerate() {
                    // Gap at the bottom for even walls, at the top for odd.
                    let gap = if n % 2 == 0 { rows - 1 } else { 0 };
                    for row in (0..rows).filter(|&r| r != gap) {
                        grid.set_tile(Position::new(row, column), TileState::Wall)?;
                    }
                }
                grid.set_start(Position::ZERO)?;
                grid.set_destination(last)?;
            }
            Self::Pocket => {
                let centre = Position::new(rows / 2, columns / 2);
                for neighbor in centre.neighbors_4() {
                    if grid.contains(neighbor) {
                        grid.set_tile(neighbor, TileState::Wall)?;
                    }
                }
                grid.set_destination(centre)?;
                if centre != Position::ZERO && !centre.neighbors_4().contains(&Position::ZERO) {
                    grid.set_start(Position::ZERO)?;
                }
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_search::PathFinder;

    #[test]
    fn empty_has_no_endpoints() {
        let g = Preset::Empty.build(4, 5).unwrap();
        assert_eq!(g, TileGrid::new(4, 5).unwrap());
    }

    #[test]
    fn corners_route_has_manhattan_length() {
        let g = Preset::Corners.build(4, 6).unwrap();
        assert_eq!(g.start(), Some(Position::ZERO));
        assert_eq!(g.destination(), Some(Position::new(3, 5)));
        let path = PathFinder::shortest_path(&g).unwrap().unwrap();
        assert_eq!(path.len(), 3 + 5 - 1);
    }

    #[test]
    fn maze_is_solvable_and_longer_than_open_grid() {
        let g = Preset::Maze.build(6, 12).unwrap();
        assert!(g.count(TileState::Wall) > 0);
        let path = PathFinder::shortest_path(&g).unwrap().unwrap();
        assert!(path.len() > 5 + 11 - 1);
    }

    #[test]
    fn pocket_is_unreachable() {
        let g = Preset::Pocket.build(7, 9).unwrap();
        assert_eq!(g.destination(), Some(Position::new(3, 4)));
        assert_eq!(g.count(TileState::Wall), 4);
        assert_eq!(PathFinder::shortest_path(&g).unwrap(), None);
    }

    #[test]
    fn presets_fit_tiny_grids() {
        for preset in [Preset::Empty, Preset::Corners, Preset::Maze, Preset::Pocket] {
            assert!(preset.build(1, 1).is_ok());
            assert!(preset.build(2, 3).is_ok());
        }
        assert!(Preset::Maze.build(0, 3).is_err());
    }
}
