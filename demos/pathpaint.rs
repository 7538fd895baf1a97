//! Terminal A* visualizer.
//!
//! Run: cargo run --bin pathpaint -- --rows 30 --cols 50

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use env_logger::{Env, Target};

use pathpaint_crossterm::CrosstermDriver;
use pathpaint_demos::{AppConfig, Editor, run};

#[derive(Parser, Debug)]
#[command(author, version, about = "Paint walls on a grid and watch A* find a way through")]
struct Cli {
    /// Board height in cells.
    #[arg(long, default_value_t = 40)]
    rows: i32,

    /// Board width in cells.
    #[arg(long, default_value_t = 40)]
    cols: i32,

    /// Pause after each search step, in milliseconds.
    #[arg(long = "delay-ms", default_value_t = 10)]
    delay_ms: u64,

    /// Percentage of cells turned into walls by the scatter key.
    #[arg(long, default_value_t = 30)]
    density: u32,

    /// Seed for wall scattering.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write logs here (filtered by RUST_LOG, default "info").
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    // stderr would draw over the alternate screen, so log to a file or not
    // at all.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.rows <= 0 || cli.cols <= 0 {
        bail!("board must have at least one row and one column");
    }
    if cli.density > 100 {
        bail!("density is a percentage (0-100), got {}", cli.density);
    }
    init_logging(cli.log_file.as_ref())?;

    let config = AppConfig {
        rows: cli.rows,
        cols: cli.cols,
        step_delay: Duration::from_millis(cli.delay_ms),
        barrier_percent: cli.density,
        seed: cli.seed,
        ..AppConfig::default()
    };
    log::info!("starting {}x{} board", config.rows, config.cols);

    let mut editor = Editor::new(config);
    let mut driver = CrosstermDriver::new();
    run(&mut driver, &mut editor).map_err(|e| anyhow!("terminal session failed: {e}"))
}
