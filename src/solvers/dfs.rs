use super::{MazeSolver, Solution};
use crate::{
    error::MazeError,
    maze::{Coordinate, Direction, Maze},
};

/// Depth-first search with backtracking.
///
/// Finds a path whenever one exists, not necessarily the shortest. Neighbors are tried in
/// [`Direction::ALL`] order, so the path found depends only on the maze.
pub struct BacktrackSolver;

/// A cell on the current path and the index of the next direction to try from it.
struct Frame {
    cell: Coordinate,
    next_direction: usize,
}

impl MazeSolver for BacktrackSolver {
    fn solve(
        &self,
        maze: &mut Maze,
        start: Coordinate,
        finish: Coordinate,
    ) -> Result<Solution, MazeError> {
        maze.check_working(start)?;
        maze.check_working(finish)?;
        maze.reset_captured();

        maze.capture(start);
        if start == finish {
            return Ok(Solution::with_path(vec![start]));
        }

        // The stack always holds the path from start to the cell being explored
        let mut stack = vec![Frame {
            cell: start,
            next_direction: 0,
        }];
        let mut explored = 1usize;

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = Direction::ALL.get(frame.next_direction) else {
                // Dead end, backtrack
                stack.pop();
                continue;
            };
            frame.next_direction += 1;
            let cell = frame.cell;

            let neighbor = cell.step(direction);
            if !maze.is_in_bounds(neighbor)
                || maze.is_captured(neighbor)
                || maze.wall_between(cell, neighbor)?
            {
                continue;
            }

            maze.capture(neighbor);
            explored += 1;
            stack.push(Frame {
                cell: neighbor,
                next_direction: 0,
            });

            if neighbor == finish {
                tracing::debug!(
                    "[backtrack solver] reached {} after exploring {} cells",
                    finish,
                    explored
                );
                let path = stack.into_iter().map(|frame| frame.cell).collect();
                return Ok(Solution::with_path(path));
            }
        }

        tracing::debug!(
            "[backtrack solver] {} unreachable from {}, explored {} cells",
            finish,
            start,
            explored
        );
        Ok(Solution::unsolved())
    }
}
