use std::fmt;

/// A (row, col) position in the padded maze grid.
///
/// Row 0 and column 0 belong to the border, so working cells start at (1, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    /// The coordinate one step away in the given direction.
    ///
    /// Stepping up or left from row/column 0 wraps to `usize::MAX`, which every bounds check
    /// rejects, so callers never have to special-case the top-left edge.
    pub fn step(self, direction: Direction) -> Coordinate {
        let (row, col) = (self.row, self.col);
        match direction {
            Direction::Up => Coordinate::new(row.wrapping_sub(1), col),
            Direction::Down => Coordinate::new(row.saturating_add(1), col),
            Direction::Left => Coordinate::new(row, col.wrapping_sub(1)),
            Direction::Right => Coordinate::new(row, col.saturating_add(1)),
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four grid steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order used by every traversal.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction leading from `from` to `to`, if they are exactly one step apart.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| from.step(direction) == to)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let c = Coordinate::new(3, 4);
        assert_eq!(c.step(Direction::Up), Coordinate::new(2, 4));
        assert_eq!(c.step(Direction::Down), Coordinate::new(4, 4));
        assert_eq!(c.step(Direction::Left), Coordinate::new(3, 3));
        assert_eq!(c.step(Direction::Right), Coordinate::new(3, 5));
    }

    #[test]
    fn test_step_off_the_top_left_edge_wraps() {
        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.step(Direction::Up).row, usize::MAX);
        assert_eq!(origin.step(Direction::Left).col, usize::MAX);
    }

    #[test]
    fn test_between() {
        let a = Coordinate::new(2, 2);
        for direction in Direction::ALL {
            let b = a.step(direction);
            assert_eq!(Direction::between(a, b), Some(direction));
            assert_eq!(Direction::between(b, a), Some(direction.opposite()));
        }
        assert_eq!(Direction::between(a, a), None);
        assert_eq!(Direction::between(a, Coordinate::new(3, 3)), None);
        assert_eq!(Direction::between(a, Coordinate::new(2, 4)), None);
    }

    #[test]
    fn test_coordinates_compare_by_value() {
        let mut set = std::collections::HashSet::new();
        set.insert(Coordinate::new(1, 2));
        assert!(set.contains(&Coordinate::from((1, 2))));
        assert!(!set.contains(&Coordinate::new(2, 1)));
    }
}
