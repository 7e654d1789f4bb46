use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    error::MazeError,
    generators::{MazeGenerator, get_rng},
    maze::{Coordinate, Maze, get_neighbors},
};

/// Randomized depth-first carve.
///
/// Each visited cell tries its working neighbors in a random order and tunnels into every one
/// still unvisited, so the passages form a spanning tree rooted at the start cell.
pub struct BacktrackGenerator {
    rng: StdRng,
    start: Coordinate,
}

/// A cell on the carve stack with the neighbors it has yet to try.
struct Frame {
    cell: Coordinate,
    candidates: Vec<Coordinate>,
}

impl BacktrackGenerator {
    pub const DEFAULT_START: Coordinate = Coordinate::new(1, 1);

    pub fn new(seed: Option<u64>) -> Self {
        BacktrackGenerator {
            rng: get_rng(seed),
            start: Self::DEFAULT_START,
        }
    }

    /// Start carving from `start` instead of the top-left cell.
    pub fn with_start(mut self, start: Coordinate) -> Self {
        self.start = start;
        self
    }

    fn frame(&mut self, cell: Coordinate, maze: &Maze) -> Frame {
        let mut candidates = get_neighbors(cell, maze).collect::<Vec<_>>();
        candidates.shuffle(&mut self.rng);
        Frame { cell, candidates }
    }

    /// Carves a spanning tree into `maze`, whose working cells are expected to be fully walled.
    ///
    /// Uses an explicit stack, so the carve depth may reach `height * width` cells.
    pub fn carve_from(&mut self, maze: &mut Maze, start: Coordinate) -> Result<(), MazeError> {
        maze.check_working(start)?;
        maze.reset_captured();

        maze.capture(start);
        let mut stack = vec![self.frame(start, maze)];
        let mut carved = 0usize;

        while let Some(frame) = stack.last_mut() {
            let Some(neighbor) = frame.candidates.pop() else {
                // All neighbors tried, backtrack
                stack.pop();
                continue;
            };
            let cell = frame.cell;
            if maze.is_captured(neighbor) {
                continue;
            }

            maze.carve(cell, neighbor)?;
            carved += 1;
            maze.capture(neighbor);
            // Put the neighbor on top to carve further in its direction before the next candidate
            let next = self.frame(neighbor, maze);
            stack.push(next);
        }

        tracing::debug!(
            "[backtrack generator] carved {} passages from {}",
            carved,
            start
        );
        Ok(())
    }
}

impl MazeGenerator for BacktrackGenerator {
    fn generate(&mut self, height: usize, width: usize) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(height, width, true);
        let start = self.start;
        self.carve_from(&mut maze, start)?;
        Ok(maze)
    }
}
