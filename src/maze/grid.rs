use super::{Cell, Coordinate};

/// Dense row-major storage of cells.
pub struct Grid {
    data: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, cell: Cell) -> Self {
        let data = vec![cell; rows * cols].into_boxed_slice();
        Grid { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn ravel_index(&self, coord: Coordinate) -> usize {
        coord.row * self.cols + coord.col
    }

    pub fn get(&self, coord: Coordinate) -> Option<&Cell> {
        self.contains(coord)
            .then(|| &self.data[self.ravel_index(coord)])
    }

    pub fn get_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        if !self.contains(coord) {
            return None;
        }
        let idx = self.ravel_index(coord);
        Some(&mut self.data[idx])
    }
}

impl std::ops::Index<Coordinate> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        assert!(
            self.contains(coord),
            "coordinate {} is outside the {}x{} grid",
            coord,
            self.rows,
            self.cols
        );
        &self.data[self.ravel_index(coord)]
    }
}

impl std::ops::IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        assert!(
            self.contains(coord),
            "coordinate {} is outside the {}x{} grid",
            coord,
            self.rows,
            self.cols
        );
        let idx = self.ravel_index(coord);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(3, 4, Cell::OPEN);
        grid[Coordinate::new(2, 3)] = Cell::WALLED;
        assert_eq!(grid[Coordinate::new(2, 3)], Cell::WALLED);
        assert_eq!(grid.get(Coordinate::new(2, 3)), Some(&Cell::WALLED));
        assert_eq!(grid[Coordinate::new(1, 2)], Cell::OPEN);
        assert!(grid.get(Coordinate::new(3, 0)).is_none());
        assert!(grid.get(Coordinate::new(0, 4)).is_none());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let grid = Grid::new(2, 2, Cell::OPEN);
        let _ = grid[Coordinate::new(2, 0)];
    }
}
