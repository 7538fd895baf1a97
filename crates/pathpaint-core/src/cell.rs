//! The [`Cell`] type — one board position with its classification and
//! cached adjacency.

use crate::geom::Point;

/// Classification of a board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    /// Discovered and waiting in the search frontier.
    Open,
    /// Fully expanded by the search.
    Closed,
    /// Impassable.
    Barrier,
    Start,
    End,
    /// On the reconstructed route.
    Path,
}

impl CellKind {
    /// Whether the kind was produced by a search rather than by an edit.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}

/// A single board cell.
///
/// The position is fixed at construction and is the cell's identity; the
/// kind changes freely. Neighbors are a snapshot taken by
/// [`Grid::recompute_neighbors`](crate::Grid::recompute_neighbors) and go
/// stale as soon as barriers are edited. Cells are deliberately not
/// comparable; compare [`pos`](Cell::pos) instead.
#[derive(Clone, Debug)]
pub struct Cell {
    pos: Point,
    kind: CellKind,
    neighbors: Vec<Point>,
}

impl Cell {
    /// A fresh `Empty` cell at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            kind: CellKind::Empty,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Adjacent passable cells, in down/up/right/left order, as of the last
    /// recomputation.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    #[inline]
    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<Point>) {
        self.neighbors = neighbors;
    }

    /// Set the classification directly.
    #[inline]
    pub fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    #[inline]
    pub fn reset(&mut self) {
        self.kind = CellKind::Empty;
    }

    #[inline]
    pub fn make_barrier(&mut self) {
        self.kind = CellKind::Barrier;
    }

    #[inline]
    pub fn make_start(&mut self) {
        self.kind = CellKind::Start;
    }

    #[inline]
    pub fn make_end(&mut self) {
        self.kind = CellKind::End;
    }

    #[inline]
    pub fn make_open(&mut self) {
        self.kind = CellKind::Open;
    }

    #[inline]
    pub fn make_closed(&mut self) {
        self.kind = CellKind::Closed;
    }

    #[inline]
    pub fn make_path(&mut self) {
        self.kind = CellKind::Path;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.kind == CellKind::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.kind == CellKind::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == CellKind::End
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.kind == CellKind::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.kind == CellKind::Closed
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        self.kind == CellKind::Path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty_without_neighbors() {
        let c = Cell::new(Point::rc(1, 2));
        assert!(c.is_empty());
        assert_eq!(c.pos(), Point::rc(1, 2));
        assert!(c.neighbors().is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut c = Cell::new(Point::ZERO);
        for _ in 0..3 {
            c.reset();
            assert_eq!(c.kind(), CellKind::Empty);
        }
    }

    #[test]
    fn barrier_then_reset_returns_to_empty() {
        let mut c = Cell::new(Point::ZERO);
        c.make_start();
        c.make_barrier();
        c.make_barrier();
        assert!(c.is_barrier());
        c.reset();
        assert!(c.is_empty());
        assert!(!c.is_start());
    }

    #[test]
    fn predicates_follow_kind() {
        let mut c = Cell::new(Point::ZERO);
        c.make_open();
        assert!(c.is_open() && !c.is_closed());
        c.make_closed();
        assert!(c.is_closed() && !c.is_open());
        c.make_end();
        assert!(c.is_end());
        c.make_path();
        assert!(c.is_path());
    }

    #[test]
    fn search_marks() {
        assert!(CellKind::Open.is_search_mark());
        assert!(CellKind::Closed.is_search_mark());
        assert!(CellKind::Path.is_search_mark());
        assert!(!CellKind::Barrier.is_search_mark());
        assert!(!CellKind::Start.is_search_mark());
    }
}
