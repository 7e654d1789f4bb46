mod bfs;
mod dfs;

pub use bfs::BreadthFirstSearchSolver;
pub use dfs::BacktrackSolver;

use crate::{
    error::MazeError,
    maze::{Coordinate, Maze},
};

/// Outcome of a solver run. `path` runs from start to finish and is empty when `found` is false.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub found: bool,
    pub path: Vec<Coordinate>,
}

impl Solution {
    pub fn with_path(path: Vec<Coordinate>) -> Self {
        Solution { found: true, path }
    }

    pub fn unsolved() -> Self {
        Solution::default()
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A maze solving algorithm.
///
/// `start` and `finish` must be working cells. An unreachable finish is a normal outcome
/// reported through [`Solution::found`], not an error.
pub trait MazeSolver {
    fn solve(
        &self,
        maze: &mut Maze,
        start: Coordinate,
        finish: Coordinate,
    ) -> Result<Solution, MazeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Backtrack,
    Bfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Backtrack => write!(f, "Recursive Backtracking"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
        }
    }
}

pub fn solve_maze(
    maze: &mut Maze,
    solver: Solver,
    start: Coordinate,
    finish: Coordinate,
) -> Result<Solution, MazeError> {
    let solution = match solver {
        Solver::Backtrack => BacktrackSolver.solve(maze, start, finish),
        Solver::Bfs => BreadthFirstSearchSolver.solve(maze, start, finish),
    }?;
    tracing::info!(
        "{} from {} to {}: found={}, steps={}",
        solver,
        start,
        finish,
        solution.found,
        solution.steps()
    );
    Ok(solution)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        generators::{Generator, generate_maze},
        maze::CellUpdate,
    };
    use quickcheck::{TestResult, quickcheck};
    use std::collections::HashSet;

    pub const HEIGHT: usize = 5;
    pub const WIDTH: usize = 5;

    /// Open 5x5 maze with two boxed-in corners: (2, 2) and (4, 4) carry both their walls.
    pub fn simple_maze() -> Maze {
        let mut maze = Maze::new(HEIGHT, WIDTH, false);
        for coord in [Coordinate::new(2, 2), Coordinate::new(4, 4)] {
            maze.update_cell(coord, CellUpdate::default().walls(true))
                .unwrap();
        }
        maze
    }

    /// Every cell walled off from all of its neighbors.
    pub fn unsolvable_maze() -> Maze {
        let mut maze = Maze::new(HEIGHT, WIDTH, false);
        for coord in maze.working_cells().collect::<Vec<_>>() {
            maze.update_cell(coord, CellUpdate::default().walls(true))
                .unwrap();
        }
        maze
    }

    pub fn corners() -> (Coordinate, Coordinate) {
        (Coordinate::new(1, 1), Coordinate::new(HEIGHT, WIDTH))
    }

    /// Checks the path is a simple walk through open passages from `start` to `finish`.
    pub fn assert_valid_path(maze: &Maze, solution: &Solution, start: Coordinate, finish: Coordinate) {
        assert!(solution.found);
        assert_eq!(solution.path.first(), Some(&start));
        assert_eq!(solution.path.last(), Some(&finish));
        for pair in solution.path.windows(2) {
            assert_eq!(maze.wall_between(pair[0], pair[1]), Ok(false));
        }
        let unique = solution.path.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), solution.path.len(), "path must not repeat cells");
    }

    #[test]
    fn test_both_solvers_on_open_maze() {
        let (start, finish) = corners();
        for solver in [Solver::Backtrack, Solver::Bfs] {
            let mut maze = Maze::new(HEIGHT, WIDTH, false);
            let solution = solve_maze(&mut maze, solver, start, finish).unwrap();
            assert_valid_path(&maze, &solution, start, finish);
        }
        let mut maze = Maze::new(HEIGHT, WIDTH, false);
        let solution = solve_maze(&mut maze, Solver::Bfs, start, finish).unwrap();
        assert_eq!(solution.steps(), 8);
    }

    #[test]
    fn test_both_solvers_on_unsolvable_maze() {
        let mut maze = unsolvable_maze();
        let cells = maze.working_cells().collect::<Vec<_>>();
        for solver in [Solver::Backtrack, Solver::Bfs] {
            for &start in &cells {
                for &finish in cells.iter().filter(|&&c| c != start) {
                    let solution = solve_maze(&mut maze, solver, start, finish).unwrap();
                    assert_eq!(solution, Solution::unsolved());
                }
            }
        }
    }

    #[test]
    fn test_start_equals_finish() {
        let c = Coordinate::new(3, 3);
        for solver in [Solver::Backtrack, Solver::Bfs] {
            let mut maze = unsolvable_maze();
            let solution = solve_maze(&mut maze, solver, c, c).unwrap();
            assert_eq!(solution, Solution::with_path(vec![c]));
            assert_eq!(solution.steps(), 0);
        }
    }

    #[test]
    fn test_endpoints_out_of_bounds() {
        for solver in [Solver::Backtrack, Solver::Bfs] {
            let mut maze = simple_maze();
            let outside = Coordinate::new(0, 1);
            let inside = Coordinate::new(1, 1);
            assert!(matches!(
                solve_maze(&mut maze, solver, outside, inside),
                Err(MazeError::OutOfBounds { .. })
            ));
            assert!(matches!(
                solve_maze(&mut maze, solver, inside, Coordinate::new(1, 6)),
                Err(MazeError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_solvers_agree_on_generated_mazes() {
        // A spanning tree has exactly one simple path between two cells
        for generator in [Generator::RecurBacktrack, Generator::Kruskal] {
            for seed in 0..10 {
                let mut maze = generate_maze(generator, 12, 9, None, Some(seed)).unwrap();
                let (start, finish) = (Coordinate::new(12, 1), Coordinate::new(1, 9));
                let dfs = solve_maze(&mut maze, Solver::Backtrack, start, finish).unwrap();
                let bfs = solve_maze(&mut maze, Solver::Bfs, start, finish).unwrap();
                assert_valid_path(&maze, &dfs, start, finish);
                assert_eq!(dfs, bfs);
            }
        }
    }

    quickcheck! {
        fn prop_bfs_on_open_maze_is_manhattan(
            height: u8, width: u8, a: (u8, u8), b: (u8, u8)
        ) -> TestResult {
            let (height, width) = (height as usize % 10 + 1, width as usize % 10 + 1);
            let start = Coordinate::new(a.0 as usize % height + 1, a.1 as usize % width + 1);
            let finish = Coordinate::new(b.0 as usize % height + 1, b.1 as usize % width + 1);
            let mut maze = Maze::new(height, width, false);
            let solution = match solve_maze(&mut maze, Solver::Bfs, start, finish) {
                Ok(solution) => solution,
                Err(_) => return TestResult::failed(),
            };
            TestResult::from_bool(
                solution.found
                    && solution.steps() == start.row.abs_diff(finish.row) + start.col.abs_diff(finish.col),
            )
        }

        fn prop_backtrack_finds_path_in_generated_maze(seed: u64, a: (u8, u8), b: (u8, u8)) -> bool {
            let (height, width) = (7, 11);
            let start = Coordinate::new(a.0 as usize % height + 1, a.1 as usize % width + 1);
            let finish = Coordinate::new(b.0 as usize % height + 1, b.1 as usize % width + 1);
            let Ok(mut maze) = generate_maze(Generator::Kruskal, height, width, None, Some(seed)) else {
                return false;
            };
            match solve_maze(&mut maze, Solver::Backtrack, start, finish) {
                Ok(solution) => {
                    solution.found
                        && solution.path.first() == Some(&start)
                        && solution.path.last() == Some(&finish)
                }
                Err(_) => false,
            }
        }
    }
}
