use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::Result;
use dfsmaze::app::{App, Config, init_tracing};

/// Generate a perfect maze and walk from the top-left to the bottom-right corner.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Maze width in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=1000))]
    width: u16,

    /// Maze height in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=1000))]
    height: u16,

    /// Set both width and height
    #[arg(long, conflicts_with_all = ["width", "height"], value_parser = clap::value_parser!(u16).range(1..=1000))]
    size: Option<u16>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds to pause after each animated step
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,

    /// Only print the final maze
    #[arg(long)]
    no_animate: bool,

    /// Do not shade cells the solver explored
    #[arg(long)]
    hide_visited: bool,

    /// Directory for the log file
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Maximum log level
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

impl Cli {
    fn config(&self) -> Config {
        let (width, height) = match self.size {
            Some(size) => (size, size),
            None => (self.width, self.height),
        };
        Config {
            width,
            height,
            seed: self.seed,
            step_delay: Duration::from_millis(self.delay_ms),
            animate: !self.no_animate,
            show_visited: !self.hide_visited,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(&cli.log_dir, cli.log_level)?;

    let app = App::new(cli.config());
    let mut stdout = std::io::stdout();
    app.run(&mut stdout)?;
    tracing::info!("Exiting");
    Ok(())
}
