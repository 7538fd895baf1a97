//! Board editor and run loop for the `pathpaint` terminal visualizer.
//!
//! Left click places the start, then the end, then barriers; right click
//! clears a cell. Space runs A* and animates it, `c` clears the search marks,
//! `g` scatters random barriers, `r` wipes the board, `q`/Esc quits (or
//! cancels a running search).

use std::error::Error;
use std::time::Duration;

use log::{debug, info, warn};
use pathpaint_core::{CellKind, Driver, Grid, Key, MouseAction, Msg, Point, compute_frame};
use pathpaint_crossterm::{CELL_WIDTH, cell_at};
use pathpaint_paths::{Astar, Context, Outcome, SearchError};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const HELP: &str =
    "left: start/end/wall  right: erase  space: search  c: clear  g: scatter  r: reset  q: quit";

/// How long the loop waits for input between redraws when idle.
const IDLE_POLL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for an editing session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub rows: i32,
    pub cols: i32,
    /// Terminal columns per board cell.
    pub cell_width: i32,
    /// Pause after each search step so the exploration can be watched.
    pub step_delay: Duration,
    /// Chance, in percent, that `g` turns a cell into a barrier.
    pub barrier_percent: u32,
    /// Seed for barrier scattering.
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 40,
            cell_width: CELL_WIDTH,
            step_delay: Duration::from_millis(10),
            barrier_percent: 30,
            seed: 42,
        }
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// What the run loop should do after an input message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    /// Redraw every cell.
    Redraw,
    /// Run a search.
    Search,
    Quit,
}

/// The board plus the editing state around it: which cells are the start
/// and end, the search engine, and a status line.
pub struct Editor {
    config: AppConfig,
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
    astar: Astar,
    rng: StdRng,
    status: String,
}

impl Editor {
    pub fn new(config: AppConfig) -> Self {
        let grid = Grid::new(config.rows, config.cols);
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            grid,
            start: None,
            end: None,
            astar: Astar::new(),
            rng,
            status: HELP.to_string(),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The engine, for inspecting the last search.
    #[inline]
    pub fn astar(&self) -> &Astar {
        &self.astar
    }

    /// Apply one input message to the board.
    pub fn update(&mut self, msg: Msg) -> Action {
        if msg.is_quit() {
            return Action::Quit;
        }
        match msg {
            Msg::Init | Msg::Screen { .. } => Action::Redraw,
            Msg::Mouse { action, pos } => {
                let cell = cell_at(pos, self.config.cell_width);
                if !self.grid.contains(cell) {
                    return Action::None;
                }
                match action {
                    MouseAction::Main | MouseAction::DragMain => self.paint(cell),
                    MouseAction::Secondary | MouseAction::DragSecondary => self.erase(cell),
                    _ => {}
                }
                Action::None
            }
            Msg::KeyDown { key } => match key {
                Key::Space | Key::Enter => Action::Search,
                Key::Char('c') => {
                    let n = self.grid.clear_search();
                    debug!("cleared {n} search marks");
                    self.status = HELP.to_string();
                    Action::None
                }
                Key::Char('r') => {
                    self.grid.clear();
                    self.start = None;
                    self.end = None;
                    self.status = HELP.to_string();
                    debug!("board reset");
                    Action::None
                }
                Key::Char('g') => {
                    self.scatter_barriers();
                    Action::None
                }
                _ => Action::None,
            },
            Msg::Quit => Action::Quit,
        }
    }

    /// Left click: the first free click is the start, the next the end,
    /// everything after a barrier. Endpoints are never painted over.
    fn paint(&mut self, cell: Point) {
        if Some(cell) == self.start || Some(cell) == self.end {
            return;
        }
        if self.start.is_none() {
            self.start = Some(cell);
            self.grid.make_start(cell);
            debug!("start placed at {cell}");
        } else if self.end.is_none() {
            self.end = Some(cell);
            self.grid.make_end(cell);
            debug!("end placed at {cell}");
        } else {
            self.grid.make_barrier(cell);
        }
    }

    /// Right click: clear the cell and forget it if it was an endpoint.
    fn erase(&mut self, cell: Point) {
        if self.start == Some(cell) {
            self.start = None;
        }
        if self.end == Some(cell) {
            self.end = None;
        }
        self.grid.reset(cell);
    }

    /// Turn `barrier_percent`% of the non-endpoint cells into barriers.
    pub fn scatter_barriers(&mut self) -> usize {
        let mut placed = 0;
        for p in self.grid.bounds() {
            if Some(p) == self.start || Some(p) == self.end {
                continue;
            }
            if self.rng.random_range(0..100) < self.config.barrier_percent {
                self.grid.make_barrier(p);
                placed += 1;
            }
        }
        debug!("scattered {placed} barriers");
        placed
    }

    /// Clear old search marks, refresh adjacency and run A* between the
    /// current endpoints. `on_step` sees the board after every step.
    pub fn search<F>(&mut self, ctx: &Context, on_step: F) -> Result<Outcome, SearchError>
    where
        F: FnMut(&Grid),
    {
        self.grid.clear_search();
        self.grid.recompute_neighbors();
        let result = self
            .astar
            .search(&mut self.grid, self.start, self.end, ctx, on_step);
        self.status = match &result {
            Ok(Outcome::Found { cost }) => {
                info!("route found with {cost} moves");
                format!(
                    "route found: {cost} moves, {} cells expanded",
                    self.astar.visit_order().len()
                )
            }
            Ok(Outcome::NoPath) => {
                info!("no route between the endpoints");
                format!("no route: {} cells expanded", self.astar.visit_order().len())
            }
            Ok(Outcome::Cancelled) => {
                info!("search cancelled");
                "search cancelled".to_string()
            }
            Err(e) => {
                warn!("search refused: {e}");
                format!("cannot search: {e}")
            }
        };
        result
    }
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

/// Drive `editor` with `driver` until the user quits.
///
/// The driver is closed on every exit path, including errors.
pub fn run<D: Driver>(driver: &mut D, editor: &mut Editor) -> Result<(), Box<dyn Error>> {
    driver.init()?;
    let result = event_loop(driver, editor);
    driver.close();
    result
}

fn event_loop<D: Driver>(driver: &mut D, editor: &mut Editor) -> Result<(), Box<dyn Error>> {
    let mut prev: Vec<CellKind> = Vec::new();
    let mut shown_status = String::new();
    let mut pending = vec![Msg::Init];

    loop {
        for msg in pending.drain(..) {
            match editor.update(msg) {
                Action::None => {}
                Action::Redraw => prev.clear(),
                Action::Quit => return Ok(()),
                Action::Search => {
                    if run_search(driver, editor, &mut prev)? {
                        return Ok(());
                    }
                }
            }
        }

        let frame = compute_frame(&prev, editor.grid());
        let full = frame.cells.len() == editor.grid().len();
        if !frame.cells.is_empty() {
            driver.flush(frame)?;
            prev = editor.grid().kinds();
        }
        if full || shown_status != editor.status() {
            driver.status(editor.status())?;
            shown_status = editor.status().to_string();
        }

        pending = driver.poll_msgs(IDLE_POLL)?;
    }
}

/// Run one animated search. Returns `true` when the user asked to leave the
/// application while it was running.
fn run_search<D: Driver>(
    driver: &mut D,
    editor: &mut Editor,
    prev: &mut Vec<CellKind>,
) -> Result<bool, Box<dyn Error>> {
    let ctx = Context::new();
    let delay = editor.config.step_delay;
    let mut quit = false;
    let mut failure: Option<Box<dyn Error>> = None;

    // Input arriving mid-search is dropped except for quit requests.
    let result = editor.search(&ctx, |grid| {
        if failure.is_some() {
            return;
        }
        let step = driver.flush(compute_frame(prev.as_slice(), grid)).and_then(|()| {
            *prev = grid.kinds();
            driver.poll_msgs(delay)
        });
        match step {
            Ok(msgs) => {
                for m in msgs.iter().filter(|m| m.is_quit()) {
                    quit |= *m == Msg::Quit;
                    ctx.cancel();
                }
            }
            Err(e) => {
                failure = Some(e);
                ctx.cancel();
            }
        }
    });
    // The outcome itself reaches the user through the status line.
    if let Err(e) = result {
        debug!("search not started: {e}");
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(quit),
    }
}
