use std::time::Instant;

use color_eyre::eyre::Result;
use dfsmaze::{Grid, app::App};

/// Profiling mode: generate and solve the largest supported square maze repeatedly
/// without drawing anything.
fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = dfsmaze::app::init_tracing(std::path::Path::new("logs"), tracing::Level::INFO)?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let size = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(1000);

    let started = Instant::now();
    for iteration in 0..num_iters {
        let mut grid = Grid::new(size, size)?;
        let path = App::compute(&mut grid, Some(iteration as u64))?;
        tracing::info!("[profile] iteration {} path length {}", iteration, path.len());
    }
    let elapsed = started.elapsed();
    println!(
        "{} iterations of {}x{} in {:?} ({:?} per iteration)",
        num_iters,
        size,
        size,
        elapsed,
        elapsed / num_iters.max(1) as u32
    );
    Ok(())
}
