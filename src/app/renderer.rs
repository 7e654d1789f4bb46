use std::io::Write;

use crossterm::{
    queue,
    style::{self, Color, Stylize},
    terminal,
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{Coordinate, Maze};

/// Draws a maze with box-drawing characters.
///
/// Every junction between four cells becomes one glyph whose arms are the walls meeting there.
/// Cells are three columns wide and one row high, so a `height x width` maze renders as
/// `2 * height + 1` rows of `4 * width + 1` characters.
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Junction glyphs indexed by `up << 3 | right << 2 | down << 1 | left`.
    const JUNCTIONS: [char; 16] = [
        ' ', '╴', '╷', '┐', '╶', '─', '┌', '┬', '╵', '┘', '│', '┤', '└', '┴', '├', '┼',
    ];
    const HORIZONTAL: char = '─';
    const VERTICAL: char = '│';
    const SPACE: char = ' ';
    pub const START: char = 'S';
    pub const FINISH: char = 'F';
    pub const ROUTE: char = '*';
    /// Output columns per cell, not counting the shared wall column.
    const CELL_WIDTH: usize = 4;

    /// Renders the maze, marking `path` on top of it when it has at least two cells.
    pub fn render(maze: &Maze, path: &[Coordinate]) -> Vec<Vec<char>> {
        let mut canvas = Self::render_walls(maze);
        if path.len() >= 2 {
            Self::render_path(&mut canvas, path);
        }

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthChar;
            debug_assert!(
                canvas.iter().flatten().all(|c| c.width() == Some(1)),
                "Each glyph must occupy exactly one character width."
            );
        }

        canvas
    }

    fn render_walls(maze: &Maze) -> Vec<Vec<char>> {
        let (height, width) = (maze.height(), maze.width());
        let cols = width * Self::CELL_WIDTH + 1;
        let mut canvas = Vec::with_capacity(2 * height + 1);

        for i in 0..=height {
            // Junction row: the top edge of maze row i + 1
            let mut line = Vec::with_capacity(cols);
            for j in 0..=width {
                let below_right = maze[Coordinate::new(i + 1, j + 1)];
                let up = maze[Coordinate::new(i, j + 1)].left_wall;
                let right = below_right.upper_wall;
                let down = below_right.left_wall;
                let left = maze[Coordinate::new(i + 1, j)].upper_wall;
                let index = (up as usize) << 3
                    | (right as usize) << 2
                    | (down as usize) << 1
                    | (left as usize);
                line.push(Self::JUNCTIONS[index]);
                if j < width {
                    let fill = if right { Self::HORIZONTAL } else { Self::SPACE };
                    line.extend(std::iter::repeat_n(fill, Self::CELL_WIDTH - 1));
                }
            }
            canvas.push(line);

            if i == height {
                break;
            }

            // Cell row: vertical walls and the cell interiors of maze row i + 1
            let mut line = Vec::with_capacity(cols);
            for j in 0..=width {
                let wall = maze[Coordinate::new(i + 1, j + 1)].left_wall;
                line.push(if wall { Self::VERTICAL } else { Self::SPACE });
                if j < width {
                    line.extend(std::iter::repeat_n(Self::SPACE, Self::CELL_WIDTH - 1));
                }
            }
            canvas.push(line);
        }
        canvas
    }

    /// Position of a working cell's center in the rendered canvas.
    fn cell_center(coord: Coordinate) -> (usize, usize) {
        (
            (coord.row - 1) * 2 + 1,
            (coord.col - 1) * Self::CELL_WIDTH + Self::CELL_WIDTH / 2,
        )
    }

    fn render_path(canvas: &mut [Vec<char>], path: &[Coordinate]) {
        let last = path.len() - 1;
        for (i, &coord) in path.iter().enumerate() {
            let symbol = match i {
                0 => Self::START,
                _ if i == last => Self::FINISH,
                _ => Self::ROUTE,
            };
            let (row, col) = Self::cell_center(coord);
            if let Some(slot) = canvas.get_mut(row).and_then(|line| line.get_mut(col)) {
                *slot = symbol;
            }
        }
    }

    /// Renders to a newline-separated string.
    pub fn to_text(maze: &Maze, path: &[Coordinate]) -> String {
        Self::render(maze, path)
            .iter()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints the maze in color. Lines wider than the terminal are truncated rather than wrapped.
    pub fn print_to_console<W: Write>(
        out: &mut W,
        maze: &Maze,
        path: &[Coordinate],
    ) -> std::io::Result<()> {
        let max_width = terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(usize::MAX);

        for line in Self::render(maze, path) {
            let line = line.iter().collect::<String>();
            let (visible, _) = line.unicode_truncate(max_width);
            for c in visible.chars() {
                let styled = match c {
                    Self::START => c.with(Color::Green),
                    Self::FINISH => c.with(Color::Red),
                    Self::ROUTE => c.with(Color::Yellow),
                    _ => c.with(Color::Reset),
                };
                queue!(out, style::PrintStyledContent(styled))?;
            }
            queue!(out, style::Print("\r\n"))?;
        }
        out.flush()
    }
}
