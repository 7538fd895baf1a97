//! **pathpaint-core** — board model and shared types for the interactive
//! grid pathfinder.
//!
//! This crate provides geometry primitives, the [`Grid`] of classified
//! [`Cell`]s with its adjacency cache, input events, and the [`Driver`]
//! trait that terminal back ends implement.

pub mod cell;
pub mod driver;
pub mod geom;
pub mod grid;
pub mod messages;

pub use cell::{Cell, CellKind};
pub use driver::Driver;
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid, compute_frame};
pub use messages::{Key, MouseAction, Msg};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::rc(4, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn cell_kind_round_trip() {
        let json = serde_json::to_string(&CellKind::Barrier).unwrap();
        assert_eq!(json, "\"Barrier\"");
        let back: CellKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CellKind::Barrier);
    }
}
