//! Terminal front end: animates generation and solving, then prints the result.

pub mod renderer;

use std::{
    io::{IsTerminal, Stdout, Write},
    ops::ControlFlow,
    time::Duration,
};

use color_eyre::eyre::{self, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    app::renderer::{Frame, Glyph, Overlay},
    error::MazeError,
    generators::{generate, get_rng},
    maze::Grid,
    observer::{NoopObserver, StepEvent, StepObserver},
    solvers::{Path, solve},
};

/// Settings for one run of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maze width in cells
    pub width: u16,
    /// Maze height in cells
    pub height: u16,
    /// Seed for reproducible mazes, random when `None`
    pub seed: Option<u64>,
    /// Pause after every animated step
    pub step_delay: Duration,
    /// Draw each step in the terminal instead of only the final maze
    pub animate: bool,
    /// Shade cells the solver explored
    pub show_visited: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: None,
            step_delay: Duration::from_millis(10),
            animate: true,
            show_visited: true,
        }
    }
}

/// Install a `tracing` subscriber writing to `<dir>/dfsmaze.log`.
/// Logs go to a file so they never interleave with the terminal drawing.
/// The returned guard flushes pending records on drop and must be kept alive.
pub fn init_tracing(dir: &std::path::Path, level: tracing::Level) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::never(dir, "dfsmaze.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre::eyre!("failed to install tracing subscriber: {e}"))?;
    Ok(guard)
}

/// Redraws the maze after every step, paces the animation and stops on Esc.
struct TerminalObserver<'a, W: Write> {
    out: &'a mut W,
    step_delay: Duration,
    show_visited: bool,
    /// The drawing error that made the observer stop, if any
    error: Option<std::io::Error>,
}

impl<'a, W: Write> TerminalObserver<'a, W> {
    fn new(out: &'a mut W, step_delay: Duration, show_visited: bool) -> Self {
        Self {
            out,
            step_delay,
            show_visited,
            error: None,
        }
    }

    fn esc_pressed() -> std::io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.code == KeyCode::Esc {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn step(&mut self, grid: &Grid, event: StepEvent) -> std::io::Result<bool> {
        let overlay = Overlay {
            cursor: Some(event.coord),
            goal: Some(grid.goal()),
            show_visited: self.show_visited,
            ..Overlay::default()
        };
        Frame::new(grid, &overlay).draw(&mut *self.out)?;
        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
        Self::esc_pressed()
    }
}

impl<W: Write> StepObserver for TerminalObserver<'_, W> {
    fn on_step(&mut self, grid: &Grid, event: StepEvent) -> ControlFlow<()> {
        match self.step(grid, event) {
            Ok(false) => ControlFlow::Continue(()),
            Ok(true) => {
                tracing::debug!("[app] Esc key pressed, stopping at {:?}", event.coord);
                ControlFlow::Break(())
            }
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
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
        queue!(
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

    /// Whether a frame for `grid` fits in the current terminal.
    fn fits_terminal(stdout: &Stdout, grid: &Grid) -> bool {
        if !stdout.is_terminal() {
            return false;
        }
        match terminal::size() {
            Ok((term_width, term_height)) => App::frame_fits(grid, term_width, term_height),
            Err(_) => false,
        }
    }

    /// Whether a frame for `grid` fits in a terminal of the given size,
    /// leaving one spare row for the cursor.
    fn frame_fits(grid: &Grid, term_width: u16, term_height: u16) -> bool {
        let (width, height) = Frame::dimensions(grid);
        usize::from(term_width) >= width * usize::from(Glyph::WIDTH)
            && usize::from(term_height) > height
    }

    /// Generate and solve without drawing anything.
    pub fn compute(grid: &mut Grid, seed: Option<u64>) -> Result<Path, MazeError> {
        let mut observer = NoopObserver;
        generate(grid, &mut get_rng(seed), &mut observer)?;
        solve(grid, &mut observer)
    }

    /// Generate and solve while drawing every step.
    /// Returns `Ok(None)` if the user cancelled with Esc.
    fn animate(&self, stdout: &mut Stdout, grid: &mut Grid) -> Result<Option<Path>> {
        let mut rng = get_rng(self.config.seed);
        let mut observer =
            TerminalObserver::new(stdout, self.config.step_delay, self.config.show_visited);
        let result = generate(grid, &mut rng, &mut observer)
            .and_then(|()| solve(grid, &mut observer));
        match result {
            Ok(path) => Ok(Some(path)),
            Err(MazeError::Aborted) => match observer.error.take() {
                Some(e) => Err(e.into()),
                None => Ok(None),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Main application entry: build the maze, solve it and show the outcome.
    pub fn run(&self, stdout: &mut Stdout) -> Result<()> {
        let mut grid = Grid::new(self.config.width, self.config.height)?;
        tracing::info!(
            "Started maze run {}x{} (seed {:?})",
            self.config.width,
            self.config.height,
            self.config.seed
        );

        let animate = self.config.animate && App::fits_terminal(stdout, &grid);
        if self.config.animate && !animate {
            tracing::info!("Terminal unavailable or too small, running without animation");
        }

        let path = if animate {
            App::setup_terminal(stdout)?;
            let result = self.animate(stdout, &mut grid);
            App::restore_terminal(stdout)?;
            match result? {
                Some(path) => path,
                None => {
                    tracing::info!("Rendering was cancelled by user.");
                    queue!(
                        stdout,
                        style::PrintStyledContent(
                            "Cancelled.\n".with(Color::Yellow).attribute(Attribute::Bold)
                        )
                    )?;
                    stdout.flush()?;
                    return Ok(());
                }
            }
        } else {
            App::compute(&mut grid, self.config.seed)?
        };

        tracing::info!("Path found with {} cells", path.len());
        writeln!(stdout, "Solution path: {}", path)?;
        let overlay = Overlay {
            path: Some(&path),
            goal: Some(grid.goal()),
            show_visited: self.config.show_visited,
            ..Overlay::default()
        };
        Frame::new(&grid, &overlay).print(stdout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_classic_run() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (20, 20));
        assert_eq!(config.step_delay, Duration::from_millis(10));
        assert!(config.animate);
    }

    #[test]
    fn test_compute_is_reproducible() {
        let mut first = Grid::new(9, 7).unwrap();
        let mut second = Grid::new(9, 7).unwrap();
        let a = App::compute(&mut first, Some(123)).unwrap();
        let b = App::compute(&mut second, Some(123)).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_frame_fits_terminal_size() {
        // 10x5 cells draw as 21x11 glyphs, two columns each
        let grid = Grid::new(10, 5).unwrap();
        assert!(App::frame_fits(&grid, 42, 12));
        assert!(!App::frame_fits(&grid, 41, 12));
        assert!(!App::frame_fits(&grid, 42, 11));

        let wide = Grid::new(40000, 1).unwrap();
        assert!(!App::frame_fits(&wide, u16::MAX, u16::MAX));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_terminal_observer_stops_on_draw_error() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut out = BrokenPipe;
        let mut observer = TerminalObserver::new(&mut out, Duration::ZERO, false);
        assert_eq!(
            generate(&mut grid, &mut get_rng(Some(4)), &mut observer),
            Err(MazeError::Aborted)
        );
        assert_eq!(
            observer.error.map(|e| e.kind()),
            Some(std::io::ErrorKind::BrokenPipe)
        );
    }
}
