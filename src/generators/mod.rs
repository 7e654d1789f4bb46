use rand::{SeedableRng, rngs::StdRng};

mod kruskal;
mod recur_backtrack;
pub mod union_find;

pub use kruskal::KruskalGenerator;
pub use recur_backtrack::BacktrackGenerator;

use crate::{
    error::{MazeError, check_dimensions},
    maze::{Coordinate, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// A maze generation algorithm.
///
/// Implementations return a fully connected maze without cycles: every pair of working cells is
/// joined by exactly one path.
pub trait MazeGenerator {
    fn generate(&mut self, height: usize, width: usize) -> Result<Maze, MazeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    RecurBacktrack,
    Kruskal,
}

impl Generator {
    /// Whether the algorithm grows the maze from a chosen start cell.
    pub fn takes_start(&self) -> bool {
        matches!(self, Generator::RecurBacktrack)
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Validate the dimensions and generate a maze with the selected algorithm.
/// `start` is only used by generators that grow from a start cell.
pub fn generate_maze(
    generator: Generator,
    height: usize,
    width: usize,
    start: Option<Coordinate>,
    seed: Option<u64>,
) -> Result<Maze, MazeError> {
    check_dimensions(height, width)?;
    tracing::info!(
        "Generating {}x{} maze with {} (seed: {:?})",
        height,
        width,
        generator,
        seed
    );
    match generator {
        Generator::RecurBacktrack => {
            let start = start.unwrap_or(BacktrackGenerator::DEFAULT_START);
            BacktrackGenerator::new(seed)
                .with_start(start)
                .generate(height, width)
        }
        Generator::Kruskal => {
            if let Some(start) = start {
                tracing::debug!("Kruskal's algorithm ignores start cell {}", start);
            }
            KruskalGenerator::new(seed).generate(height, width)
        }
    }
}
