pub mod cell;
mod coordinate;
mod grid;

pub use cell::{Cell, CellUpdate};
pub use coordinate::{Coordinate, Direction};
use grid::Grid;

use crate::error::MazeError;

/// Which of the two wall flags of a cell a wall segment is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallFlag {
    Left,
    Upper,
}

pub struct Maze {
    grid: Grid,
    height: usize,
    width: usize,
}

impl Maze {
    /// Creates a maze with a `height` x `width` working rectangle.
    ///
    /// The cells are stored in a `(height + 2) x (width + 2)` grid whose outer ring is a border of
    /// permanently captured cells, so traversals never step off the array. The right border
    /// column carries `left_wall` and the bottom border row carries `upper_wall`; the upper walls
    /// of the first row and the left walls of the first column close the top and left sides.
    ///
    /// With `walls_inside` every internal wall starts present, ready to be carved by a generator.
    /// Without it the working rectangle is one open room, handy for building mazes by hand.
    pub fn new(height: usize, width: usize, walls_inside: bool) -> Self {
        let map_height = height + 2;
        let map_width = width + 2;
        let mut grid = Grid::new(map_height, map_width, Cell::BORDER);

        (1..=height).for_each(|row| {
            (1..=width).for_each(|col| {
                grid[Coordinate::new(row, col)] =
                    Cell::new(walls_inside || col == 1, walls_inside || row == 1, false);
            });
        });
        (1..=height).for_each(|row| {
            grid[Coordinate::new(row, map_width - 1)] = Cell::new(true, false, true);
        });
        (1..=width).for_each(|col| {
            grid[Coordinate::new(map_height - 1, col)] = Cell::new(false, true, true);
        });

        Maze {
            grid,
            height,
            width,
        }
    }

    /// Height of the working rectangle.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the working rectangle.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the whole grid, border included.
    pub fn map_height(&self) -> usize {
        self.grid.rows()
    }

    /// Width of the whole grid, border included.
    pub fn map_width(&self) -> usize {
        self.grid.cols()
    }

    /// Checks whether `coord` lies in the padded grid (`include_border`) or strictly inside the
    /// working rectangle.
    pub fn coordinate_in_bounds(&self, coord: Coordinate, include_border: bool) -> bool {
        if include_border {
            self.grid.contains(coord)
        } else {
            (1..=self.height).contains(&coord.row) && (1..=self.width).contains(&coord.col)
        }
    }

    /// Shorthand for a working-rectangle bounds check.
    pub fn is_in_bounds(&self, coord: Coordinate) -> bool {
        self.coordinate_in_bounds(coord, false)
    }

    fn out_of_bounds(&self, coord: Coordinate) -> MazeError {
        MazeError::OutOfBounds {
            coord,
            height: self.height,
            width: self.width,
        }
    }

    /// Fails with [`MazeError::OutOfBounds`] unless `coord` is a working cell.
    pub fn check_working(&self, coord: Coordinate) -> Result<(), MazeError> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(self.out_of_bounds(coord))
        }
    }

    pub fn get_cell(&self, coord: Coordinate) -> Result<Cell, MazeError> {
        self.grid
            .get(coord)
            .copied()
            .ok_or_else(|| self.out_of_bounds(coord))
    }

    pub fn set_cell(&mut self, coord: Coordinate, cell: Cell) -> Result<(), MazeError> {
        let err = self.out_of_bounds(coord);
        let slot = self.grid.get_mut(coord).ok_or(err)?;
        *slot = cell;
        Ok(())
    }

    /// Overwrites the fields present in `update`, leaving the others unchanged.
    pub fn update_cell(&mut self, coord: Coordinate, update: CellUpdate) -> Result<(), MazeError> {
        let err = self.out_of_bounds(coord);
        self.grid.get_mut(coord).ok_or(err)?.apply(update);
        Ok(())
    }

    /// Locates the cell and flag storing the wall between two adjacent cells.
    /// Walls belong to the lower cell of a vertical pair and to the right cell of a horizontal one.
    fn wall_owner(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<(Coordinate, WallFlag), MazeError> {
        let direction = Direction::between(from, to).ok_or(MazeError::NotAdjacent { from, to })?;
        let owner = match direction {
            Direction::Up => (from, WallFlag::Upper),
            Direction::Down => (to, WallFlag::Upper),
            Direction::Left => (from, WallFlag::Left),
            Direction::Right => (to, WallFlag::Left),
        };
        if !self.grid.contains(owner.0) {
            return Err(self.out_of_bounds(owner.0));
        }
        Ok(owner)
    }

    /// Checks if a wall blocks movement between two adjacent cells.
    pub fn wall_between(&self, from: Coordinate, to: Coordinate) -> Result<bool, MazeError> {
        let (owner, flag) = self.wall_owner(from, to)?;
        let cell = &self.grid[owner];
        Ok(match flag {
            WallFlag::Left => cell.left_wall,
            WallFlag::Upper => cell.upper_wall,
        })
    }

    /// Adds or removes the wall between two adjacent cells.
    pub fn set_wall_between(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        present: bool,
    ) -> Result<(), MazeError> {
        let (owner, flag) = self.wall_owner(from, to)?;
        let update = match flag {
            WallFlag::Left => CellUpdate::default().left_wall(present),
            WallFlag::Upper => CellUpdate::default().upper_wall(present),
        };
        self.grid[owner].apply(update);
        Ok(())
    }

    /// Removes the wall between two adjacent cells.
    ///
    /// # Returns
    /// `true` if a wall was removed, `false` if the passage was already open
    pub fn carve(&mut self, from: Coordinate, to: Coordinate) -> Result<bool, MazeError> {
        let had_wall = self.wall_between(from, to)?;
        if had_wall {
            self.set_wall_between(from, to, false)?;
        }
        Ok(had_wall)
    }

    /// Clears the visited marker on every working cell. The border stays captured.
    pub fn reset_captured(&mut self) {
        for coord in self.working_cells() {
            self.grid[coord].captured = false;
        }
    }

    pub fn is_captured(&self, coord: Coordinate) -> bool {
        self.grid.get(coord).is_none_or(|cell| cell.captured)
    }

    pub fn capture(&mut self, coord: Coordinate) {
        if let Some(cell) = self.grid.get_mut(coord) {
            cell.captured = true;
        }
    }

    /// Working cells in row-major order.
    pub fn working_cells(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let width = self.width;
        (1..=self.height).flat_map(move |row| (1..=width).map(move |col| Coordinate::new(row, col)))
    }

    /// Number of internal walls that have been carved away.
    /// A spanning-tree maze has exactly `height * width - 1` of them.
    pub fn open_passages(&self) -> usize {
        self.working_cells()
            .flat_map(|coord| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .map(move |direction| (coord, coord.step(direction)))
            })
            .filter(|&(_, to)| self.is_in_bounds(to))
            .filter(|&(from, to)| matches!(self.wall_between(from, to), Ok(false)))
            .count()
    }
}

impl std::ops::Index<Coordinate> for Maze {
    type Output = Cell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        &self.grid[coord]
    }
}

/// Get neighbors of a cell inside the working rectangle, in [`Direction::ALL`] order.
/// A neighbor is considered a cell that is one step away in the cardinal directions.
pub fn get_neighbors(coord: Coordinate, maze: &Maze) -> impl Iterator<Item = Coordinate> + '_ {
    Direction::ALL
        .into_iter()
        .map(move |direction| coord.step(direction))
        .filter(move |&c| maze.is_in_bounds(c))
}

/// Neighbors of a cell that can be entered from it without crossing a wall.
pub fn get_open_neighbors(coord: Coordinate, maze: &Maze) -> impl Iterator<Item = Coordinate> + '_ {
    get_neighbors(coord, maze).filter(move |&c| matches!(maze.wall_between(coord, c), Ok(false)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let maze = Maze::new(4, 7, true);
        assert_eq!(maze.height(), 4);
        assert_eq!(maze.width(), 7);
        assert_eq!(maze.map_height(), 6);
        assert_eq!(maze.map_width(), 9);
    }

    #[test]
    fn test_border_is_captured_and_closed() {
        let maze = Maze::new(3, 4, false);
        for row in 0..maze.map_height() {
            for col in 0..maze.map_width() {
                let coord = Coordinate::new(row, col);
                let cell = maze[coord];
                if maze.is_in_bounds(coord) {
                    assert!(!cell.captured);
                } else {
                    assert!(cell.captured, "border cell {} must be captured", coord);
                }
            }
        }
        // Right border column owns the right side walls
        for row in 1..=3 {
            assert!(maze[Coordinate::new(row, 5)].left_wall);
        }
        // Bottom border row owns the bottom walls
        for col in 1..=4 {
            assert!(maze[Coordinate::new(4, col)].upper_wall);
        }
        // Bottom corners carry nothing
        assert_eq!(maze[Coordinate::new(4, 0)], Cell::BORDER);
        assert_eq!(maze[Coordinate::new(4, 5)], Cell::BORDER);
        assert_eq!(maze[Coordinate::new(0, 5)], Cell::BORDER);
    }

    #[test]
    fn test_walls_inside() {
        let walled = Maze::new(3, 3, true);
        let open = Maze::new(3, 3, false);
        for coord in walled.working_cells() {
            assert!(walled[coord].left_wall && walled[coord].upper_wall);
        }
        // Only the perimeter is closed in an open maze
        assert_eq!(open[Coordinate::new(1, 1)], Cell::new(true, true, false));
        assert_eq!(open[Coordinate::new(1, 2)], Cell::new(false, true, false));
        assert_eq!(open[Coordinate::new(2, 1)], Cell::new(true, false, false));
        assert_eq!(open[Coordinate::new(2, 2)], Cell::OPEN);
        assert_eq!(open.open_passages(), 12);
        assert_eq!(walled.open_passages(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let maze = Maze::new(5, 5, true);
        assert!(!maze.is_in_bounds(Coordinate::new(0, 3)));
        assert!(!maze.is_in_bounds(Coordinate::new(6, 3)));
        assert!(!maze.is_in_bounds(Coordinate::new(3, 6)));
        assert!(maze.is_in_bounds(Coordinate::new(5, 5)));
        assert!(maze.coordinate_in_bounds(Coordinate::new(6, 6), true));
        assert!(maze.coordinate_in_bounds(Coordinate::new(0, 0), true));
        assert!(!maze.coordinate_in_bounds(Coordinate::new(7, 0), true));
        assert!(maze.check_working(Coordinate::new(1, 1)).is_ok());
        assert!(maze.check_working(Coordinate::new(0, 1)).is_err());
    }

    #[test]
    fn test_cell_access_fails_fast_out_of_bounds() {
        let mut maze = Maze::new(2, 2, true);
        let outside = Coordinate::new(4, 0);
        let expected = MazeError::OutOfBounds {
            coord: outside,
            height: 2,
            width: 2,
        };
        assert_eq!(maze.get_cell(outside), Err(expected.clone()));
        assert_eq!(maze.set_cell(outside, Cell::OPEN), Err(expected.clone()));
        assert_eq!(
            maze.update_cell(outside, CellUpdate::default().captured(true)),
            Err(expected)
        );
        // Border cells are still addressable
        assert_eq!(maze.get_cell(Coordinate::new(0, 0)), Ok(Cell::BORDER));
    }

    #[test]
    fn test_set_and_update_cell() {
        let mut maze = Maze::new(3, 3, false);
        let coord = Coordinate::new(2, 2);
        maze.set_cell(coord, Cell::new(true, false, true)).unwrap();
        assert_eq!(maze.get_cell(coord), Ok(Cell::new(true, false, true)));

        maze.update_cell(coord, CellUpdate::default().upper_wall(true))
            .unwrap();
        assert_eq!(maze.get_cell(coord), Ok(Cell::new(true, true, true)));

        maze.update_cell(coord, CellUpdate::default()).unwrap();
        assert_eq!(maze.get_cell(coord), Ok(Cell::new(true, true, true)));
    }

    #[test]
    fn test_wall_ownership() {
        let mut maze = Maze::new(3, 3, false);
        let center = Coordinate::new(2, 2);
        maze.update_cell(center, CellUpdate::default().walls(true))
            .unwrap();

        assert!(maze.wall_between(center, Coordinate::new(1, 2)).unwrap());
        assert!(maze.wall_between(center, Coordinate::new(2, 1)).unwrap());
        // Right and lower walls are owned by the neighbors, which are open
        assert!(!maze.wall_between(center, Coordinate::new(2, 3)).unwrap());
        assert!(!maze.wall_between(center, Coordinate::new(3, 2)).unwrap());
    }

    #[test]
    fn test_wall_between_is_symmetric() {
        let mut maze = Maze::new(4, 4, false);
        maze.update_cell(Coordinate::new(2, 3), CellUpdate::default().left_wall(true))
            .unwrap();
        maze.update_cell(Coordinate::new(4, 1), CellUpdate::default().upper_wall(true))
            .unwrap();
        for a in maze.working_cells() {
            for b in get_neighbors(a, &maze) {
                assert_eq!(maze.wall_between(a, b), maze.wall_between(b, a));
            }
        }
    }

    #[test]
    fn test_wall_between_non_adjacent() {
        let maze = Maze::new(3, 3, true);
        let (a, b) = (Coordinate::new(1, 1), Coordinate::new(2, 2));
        assert_eq!(
            maze.wall_between(a, b),
            Err(MazeError::NotAdjacent { from: a, to: b })
        );
        assert!(maze.wall_between(a, a).is_err());
    }

    #[test]
    fn test_carve() {
        let mut maze = Maze::new(3, 3, true);
        let (a, b) = (Coordinate::new(2, 2), Coordinate::new(2, 3));
        assert!(maze.carve(b, a).unwrap());
        // Carving the same wall again removes nothing
        assert!(!maze.carve(a, b).unwrap());
        assert!(!maze[b].left_wall);
        assert!(maze[b].upper_wall);
        assert_eq!(maze.open_passages(), 1);
    }

    #[test]
    fn test_reset_captured_keeps_border() {
        let mut maze = Maze::new(3, 3, true);
        maze.working_cells()
            .collect::<Vec<_>>()
            .into_iter()
            .for_each(|c| maze.capture(c));
        assert!(maze.is_captured(Coordinate::new(2, 2)));
        maze.reset_captured();
        assert!(maze.working_cells().all(|c| !maze.is_captured(c)));
        assert!(maze.is_captured(Coordinate::new(0, 2)));
        assert!(maze.is_captured(Coordinate::new(4, 4)));
    }

    #[test]
    fn test_neighbors() {
        let maze = Maze::new(3, 3, true);
        let corner = get_neighbors(Coordinate::new(1, 1), &maze).collect::<Vec<_>>();
        assert_eq!(corner, vec![Coordinate::new(2, 1), Coordinate::new(1, 2)]);
        let center = get_neighbors(Coordinate::new(2, 2), &maze).collect::<Vec<_>>();
        assert_eq!(
            center,
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(3, 2),
                Coordinate::new(2, 1),
                Coordinate::new(2, 3),
            ]
        );
        assert_eq!(get_open_neighbors(Coordinate::new(2, 2), &maze).count(), 0);
    }

    #[test]
    fn test_single_row_maze() {
        let maze = Maze::new(1, 3, true);
        let neighbors = get_neighbors(Coordinate::new(1, 2), &maze).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![Coordinate::new(1, 1), Coordinate::new(1, 3)]);
    }
}
