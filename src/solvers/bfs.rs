use std::collections::{HashMap, VecDeque};

use super::{MazeSolver, Solution};
use crate::{
    error::MazeError,
    maze::{Coordinate, Maze, get_neighbors},
};

/// Breadth-first search. Returns a shortest path by number of moves.
///
/// Keeps its own parent map, so the maze's visited markers are left alone.
pub struct BreadthFirstSearchSolver;

impl MazeSolver for BreadthFirstSearchSolver {
    fn solve(
        &self,
        maze: &mut Maze,
        start: Coordinate,
        finish: Coordinate,
    ) -> Result<Solution, MazeError> {
        maze.check_working(start)?;
        maze.check_working(finish)?;

        let mut queue = VecDeque::from([start]);
        // Every discovered cell maps to the cell it was reached from
        let mut parents: HashMap<Coordinate, Option<Coordinate>> = HashMap::from([(start, None)]);

        while let Some(cell) = queue.pop_front() {
            if cell == finish {
                break;
            }
            for neighbor in get_neighbors(cell, maze) {
                if parents.contains_key(&neighbor) || maze.wall_between(cell, neighbor)? {
                    continue;
                }
                parents.insert(neighbor, Some(cell));
                queue.push_back(neighbor);
            }
        }

        if !parents.contains_key(&finish) {
            tracing::debug!(
                "[bfs solver] {} unreachable from {}, discovered {} cells",
                finish,
                start,
                parents.len()
            );
            return Ok(Solution::unsolved());
        }

        // Walk the parent links back to the start
        let mut path = vec![finish];
        let mut current = finish;
        while let Some(&Some(parent)) = parents.get(&current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();

        tracing::debug!(
            "[bfs solver] reached {} in {} steps, discovered {} cells",
            finish,
            path.len() - 1,
            parents.len()
        );
        Ok(Solution::with_path(path))
    }
}
