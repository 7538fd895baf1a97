//! A* search over [`pathpaint_core::Grid`] boards.
//!
//! The engine explores the board one expansion at a time, classifying cells
//! `Open` and `Closed` as it goes and calling back after every expansion so
//! a front end can animate the search. When the end is reached the route is
//! walked back through the predecessor table and marked `Path`.
//!
//! ```no_run
//! use pathpaint_core::{Grid, Point};
//! use pathpaint_paths::{Astar, Context};
//!
//! let mut grid = Grid::new(5, 5);
//! let (start, end) = (Point::rc(0, 0), Point::rc(4, 4));
//! grid.make_start(start);
//! grid.make_end(end);
//! grid.recompute_neighbors();
//!
//! let mut astar = Astar::new();
//! let outcome = astar
//!     .search(&mut grid, Some(start), Some(end), &Context::new(), |_| {})
//!     .unwrap();
//! assert!(outcome.found());
//! ```

mod astar;
mod cancel;
mod error;
mod heuristic;
mod reconstruct;

pub use astar::{Astar, Outcome};
pub use cancel::Context;
pub use error::{Result, SearchError};
pub use heuristic::manhattan;
pub use reconstruct::reconstruct;
