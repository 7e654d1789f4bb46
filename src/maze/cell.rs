/// State of one grid position.
///
/// A cell owns only the wall on its left and the wall above it. The wall between a cell and its
/// right neighbor lives in the neighbor's `left_wall`, the wall below it in the lower neighbor's
/// `upper_wall`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Wall segment shared with the left neighbor.
    pub left_wall: bool,
    /// Wall segment shared with the upper neighbor.
    pub upper_wall: bool,
    /// Visited marker of the traversal currently running over the maze.
    /// Not a property of the maze itself.
    pub captured: bool,
}

impl Cell {
    pub const OPEN: Cell = Cell {
        left_wall: false,
        upper_wall: false,
        captured: false,
    };
    pub const WALLED: Cell = Cell {
        left_wall: true,
        upper_wall: true,
        captured: false,
    };
    /// Border cell with no wall flags.
    pub const BORDER: Cell = Cell {
        left_wall: false,
        upper_wall: false,
        captured: true,
    };

    pub const fn new(left_wall: bool, upper_wall: bool, captured: bool) -> Self {
        Cell {
            left_wall,
            upper_wall,
            captured,
        }
    }

    pub fn apply(&mut self, update: CellUpdate) {
        if let Some(left_wall) = update.left_wall {
            self.left_wall = left_wall;
        }
        if let Some(upper_wall) = update.upper_wall {
            self.upper_wall = upper_wall;
        }
        if let Some(captured) = update.captured {
            self.captured = captured;
        }
    }
}

/// Partial update of a [`Cell`]. `None` fields are left untouched.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub left_wall: Option<bool>,
    pub upper_wall: Option<bool>,
    pub captured: Option<bool>,
}

impl CellUpdate {
    pub fn left_wall(mut self, present: bool) -> Self {
        self.left_wall = Some(present);
        self
    }

    pub fn upper_wall(mut self, present: bool) -> Self {
        self.upper_wall = Some(present);
        self
    }

    pub fn captured(mut self, captured: bool) -> Self {
        self.captured = Some(captured);
        self
    }

    /// Set both walls at once.
    pub fn walls(self, present: bool) -> Self {
        self.left_wall(present).upper_wall(present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_update() {
        let mut cell = Cell::WALLED;
        cell.apply(CellUpdate::default().upper_wall(false));
        assert_eq!(cell, Cell::new(true, false, false));

        cell.apply(CellUpdate::default().captured(true));
        assert_eq!(cell, Cell::new(true, false, true));

        // Empty update is a no-op
        cell.apply(CellUpdate::default());
        assert_eq!(cell, Cell::new(true, false, true));

        cell.apply(CellUpdate::default().walls(false).captured(false));
        assert_eq!(cell, Cell::OPEN);
    }
}
