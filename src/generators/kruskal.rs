use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    error::MazeError,
    generators::{MazeGenerator, get_rng, union_find::DisjointSetUnion},
    maze::{Coordinate, Direction, Maze},
};

/// Randomized Kruskal: open walls in random order unless the two cells are already connected.
pub struct KruskalGenerator {
    rng: StdRng,
}

/// Wall edge between two adjacent cells. `cell2` is always right of or below `cell1`.
#[derive(Debug, Clone, Copy)]
struct Edge {
    cell1: Coordinate,
    cell2: Coordinate,
}

impl KruskalGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        KruskalGenerator {
            rng: get_rng(seed),
        }
    }

    /// Every internal edge of the working rectangle, once.
    fn edges(maze: &Maze) -> Vec<Edge> {
        maze.working_cells()
            .flat_map(|cell1| {
                [Direction::Right, Direction::Down].map(|direction| Edge {
                    cell1,
                    cell2: cell1.step(direction),
                })
            })
            .filter(|edge| maze.is_in_bounds(edge.cell2))
            .collect()
    }

    /// Column-major label of a working cell, used as its union-find element.
    fn cell_index(coord: Coordinate, height: usize) -> usize {
        (coord.col - 1) * height + (coord.row - 1)
    }
}

impl MazeGenerator for KruskalGenerator {
    fn generate(&mut self, height: usize, width: usize) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(height, width, true);

        // Collect all possible edges (walls between adjacent cells)
        let mut edges = Self::edges(&maze);
        edges.shuffle(&mut self.rng);

        let mut sets = DisjointSetUnion::new(height * width);
        let mut carved = 0usize;

        for edge in edges {
            let idx1 = Self::cell_index(edge.cell1, height);
            let idx2 = Self::cell_index(edge.cell2, height);

            // If cells are not yet connected, remove the wall between them
            if sets.union(idx1, idx2) {
                maze.carve(edge.cell1, edge.cell2)?;
                carved += 1;
            }
        }

        tracing::debug!(
            "[kruskal generator] carved {} passages in a {}x{} maze",
            carved,
            height,
            width
        );
        Ok(maze)
    }
}
