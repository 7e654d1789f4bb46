pub mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::ConsoleRenderer,
    error::MazeError,
    generators::{Generator, generate_maze},
    maze::{Coordinate, Maze},
    solvers::{Solution, Solver, solve_maze},
};

/// Everything the user picks before a maze is generated and solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeParams {
    pub height: usize,
    pub width: usize,
    pub generator: Generator,
    /// Start cell of the generator, for generators that grow from one.
    pub generator_start: Option<Coordinate>,
    pub solver: Solver,
    pub start: Coordinate,
    pub finish: Coordinate,
}

#[derive(Default)]
pub struct App {
    /// Seed for maze generation. `None` draws a fresh seed from the OS for every maze.
    seed: Option<u64>,
}

impl App {
    /// Available maze generators
    const GENERATORS: [Generator; 2] = [Generator::RecurBacktrack, Generator::Kruskal];
    /// Available maze solvers
    const SOLVERS: [Solver; 2] = [Solver::Backtrack, Solver::Bfs];
    /// Terminal rows kept free for prompts and the result message below the maze
    const RESERVED_ROWS: u16 = 4;

    pub fn new(seed: Option<u64>) -> Self {
        App { seed }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        crossterm::queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application flow: collect parameters, generate, solve, show the result
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        tracing::info!("[app] started");
        let params = match App::ask_params(stdout)? {
            Some(params) => params,
            None => {
                tracing::info!("[app] cancelled by user");
                return Ok(());
            }
        };
        tracing::info!("[app] parameters: {:?}", params);

        let (maze, solution) = self.compute(&params)?;

        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        let msg = if solution.found {
            "Path found!\r\n".with(Color::Green)
        } else {
            "No path found.\r\n".with(Color::Red)
        };
        stdout.queue(style::PrintStyledContent(msg.attribute(Attribute::Bold)))?;

        // The path is only drawn when there is one
        ConsoleRenderer::print_to_console(stdout, &maze, &solution.path)?;

        stdout.execute(style::PrintStyledContent(
            "Press Esc to exit...\r\n"
                .with(Color::Blue)
                .attribute(Attribute::Bold),
        ))?;
        // Wait for user to press Esc
        App::wait_for_esc()?;
        tracing::info!("[app] exiting");
        Ok(())
    }

    /// Generate and solve a maze with the given parameters
    pub fn compute(&self, params: &MazeParams) -> Result<(Maze, Solution), MazeError> {
        let mut maze = generate_maze(
            params.generator,
            params.height,
            params.width,
            params.generator_start,
            self.seed,
        )?;
        let solution = solve_maze(&mut maze, params.solver, params.start, params.finish)?;
        Ok((maze, solution))
    }

    /// Profiling mode: generate and solve mazes without touching the terminal.
    /// Returns the total time spent in generation and in solving.
    pub fn profile(
        &self,
        height: usize,
        width: usize,
        generator: Generator,
        solver: Solver,
        num_iterations: usize,
    ) -> Result<(Duration, Duration), MazeError> {
        let start = Coordinate::new(1, 1);
        let finish = Coordinate::new(height, width);
        let mut generation = Duration::ZERO;
        let mut solving = Duration::ZERO;

        for iteration in 0..num_iterations {
            let seed = self.seed.map(|s| s.wrapping_add(iteration as u64));

            let timer = Instant::now();
            let mut maze = generate_maze(generator, height, width, None, seed)?;
            generation += timer.elapsed();

            let timer = Instant::now();
            let solution = solve_maze(&mut maze, solver, start, finish)?;
            solving += timer.elapsed();

            if !solution.found {
                tracing::warn!(
                    "[profile] iteration {}: generated maze has no path from {} to {}",
                    iteration,
                    start,
                    finish
                );
            }
        }

        tracing::info!(
            "[profile] {} + {}, {} iterations of {}x{}: generation {:?}, solving {:?}",
            generator,
            solver,
            num_iterations,
            height,
            width,
            generation,
            solving
        );
        Ok((generation, solving))
    }

    /// Ask for every maze parameter in turn.
    /// Returns None as soon as the user cancels with Esc
    fn ask_params(stdout: &mut Stdout) -> std::io::Result<Option<MazeParams>> {
        let Some((height, width)) = App::ask_maze_dimensions(stdout)? else {
            return Ok(None);
        };

        // Ask user for maze generation algorithm
        let Some(generator) = App::select_from_menu(
            stdout,
            "Select maze generation algorithm (use arrow keys and Enter, or Esc to exit):",
            &App::GENERATORS,
        )?
        else {
            return Ok(None);
        };
        stdout.execute(style::PrintStyledContent(
            format!("Selected generator: {}\r\n", generator)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let generator_start = if generator.takes_start() {
            match App::ask_cell(stdout, "Generator start cell", height, width)? {
                Some(cell) => Some(cell),
                None => return Ok(None),
            }
        } else {
            None
        };

        // Ask user for maze solving algorithm
        let Some(solver) = App::select_from_menu(
            stdout,
            "Select maze solving algorithm (use arrow keys and Enter, or Esc to exit):",
            &App::SOLVERS,
        )?
        else {
            return Ok(None);
        };
        stdout.execute(style::PrintStyledContent(
            format!("Selected solver: {}\r\n", solver)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let Some(start) = App::ask_cell(stdout, "Start cell", height, width)? else {
            return Ok(None);
        };
        let Some(finish) = App::ask_cell(stdout, "Finish cell", height, width)? else {
            return Ok(None);
        };

        Ok(Some(MazeParams {
            height,
            width,
            generator,
            generator_start,
            solver,
            start,
            finish,
        }))
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Get user input with real-time validation and feedback
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user inputs a valid input and presses Enter, where T is the validated type
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();

        let value = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            // Print prompt
            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Cyan).attribute(Attribute::Bold),
            ))?;

            // Decide color based on validity
            let validation_result = validate(input.trim());
            match validation_result {
                Ok(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Green))?;
                }
                Err(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Red))?;
                }
            }

            queue!(stdout, style::Print(&input), style::ResetColor)?;

            stdout.queue(style::Print(" \r\n"))?;

            // Error message line (if any)
            if let Err(msg) = validation_result {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }

            stdout.flush()?;

            // Wait for key event
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                match code {
                    KeyCode::Enter => match validate(input.trim()) {
                        Ok(value) => break Some(value),
                        Err(_) => continue, // invalid, re-render
                    },
                    KeyCode::Char(c) if kind == event::KeyEventKind::Press => {
                        if !c.is_whitespace() && !c.is_control() {
                            input.push(c);
                        }
                    }
                    KeyCode::Backspace if kind == event::KeyEventKind::Press => {
                        input.pop();
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(value)
    }

    /// Largest maze dimension whose rendering fits in `term_size` terminal cells,
    /// given that each maze cell takes `cell_size` terminal cells plus one shared wall.
    fn get_max_maze_size(term_size: u16, cell_size: u16) -> usize {
        (term_size.saturating_sub(1) / cell_size).max(2) as usize
    }

    /// Ask user for maze height and width
    /// Returns None if user cancels input with Esc
    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(usize, usize)>> {
        stdout.execute(style::PrintStyledContent(
            "Enter maze dimensions (height, then width), or press Esc to exit. \
Leave empty to fit the current terminal size. A maze needs at least 2 cells.\r\n"
                .with(Color::Blue),
        ))?;

        let (term_width, term_height) = terminal::size().unwrap_or((u16::MAX, u16::MAX));
        let max_height = App::get_max_maze_size(term_height.saturating_sub(App::RESERVED_ROWS), 2);
        let max_width = App::get_max_maze_size(term_width, 4);

        let height = match App::prompt_with_validation(stdout, "Height: ", |s| {
            parse_dimension(s, max_height, 1)
        })? {
            Some(h) => h,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Height set to {}\r\n", height)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        // A single row needs at least two columns
        let min_width = if height == 1 { 2 } else { 1 };
        let width = match App::prompt_with_validation(stdout, "Width: ", |s| {
            parse_dimension(s, max_width, min_width)
        })? {
            Some(w) => w,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Width set to {}\r\n", width)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        Ok(Some((height, width)))
    }

    /// Ask user for a working cell as "row col"
    /// Returns None if user cancels input with Esc
    fn ask_cell(
        stdout: &mut Stdout,
        label: &str,
        height: usize,
        width: usize,
    ) -> std::io::Result<Option<Coordinate>> {
        let prompt = format!("{} (row,col): ", label);
        let cell = App::prompt_with_validation(stdout, &prompt, |s| parse_cell(s, height, width))?;
        if let Some(cell) = cell {
            stdout.execute(style::PrintStyledContent(
                format!("{} set to {}\r\n", label, cell)
                    .with(Color::Green)
                    .attribute(Attribute::Bold),
            ))?;
        }
        Ok(cell)
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user selects an option and presses Enter, where T is the option type
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }

        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;

        let selected_option = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            // Print prompt
            stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;

            // Print options
            for (i, option) in options.iter().enumerate() {
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{}", option)))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;

            stdout.flush()?;

            // Wait for key event
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    // Only handle key press events
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = if selected >= options.len() - 1 {
                            0
                        } else {
                            selected + 1
                        };
                    }
                    KeyCode::Enter => {
                        break Some(options[selected]);
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}

/// Parse a natural number no greater than `max`.
fn parse_natural(s: &str, max: usize) -> Result<usize, String> {
    let error_msg = format!("Please enter a number between 1 and {}.", max);
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(error_msg);
    }
    match s.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(error_msg),
    }
}

/// Parse a maze dimension between `min` and `max`. Empty input picks `max`.
fn parse_dimension(s: &str, max: usize, min: usize) -> Result<usize, String> {
    if s.is_empty() {
        return Ok(max);
    }
    let n = parse_natural(s, max)?;
    if n < min {
        return Err(format!(
            "A maze needs at least 2 cells, enter a number between {} and {}.",
            min, max
        ));
    }
    Ok(n)
}

/// Parse "row,col" into a working cell of a `height x width` maze.
fn parse_cell(s: &str, height: usize, width: usize) -> Result<Coordinate, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("Enter row and column separated by a comma, e.g. 1,{}.", width))?;
    let row = parse_natural(row.trim(), height).map_err(|e| format!("Row: {}", e))?;
    let col = parse_natural(col.trim(), width).map_err(|e| format!("Column: {}", e))?;
    Ok(Coordinate::new(row, col))
}
