//! The [`Grid`] type — the board: a fixed rows×cols array of [`Cell`]s.
//!
//! The grid owns every cell. Callers edit classifications through it, call
//! [`recompute_neighbors`](Grid::recompute_neighbors) before a search, and
//! hand it to the search engine by `&mut` for the duration of the call.
//!
//! [`compute_frame`] diffs the board against a snapshot of kinds so that
//! back ends only redraw the cells that changed.

use log::debug;

use crate::cell::{Cell, CellKind};
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rows×cols board of cells stored in row-major order.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Build a board of `rows`×`cols` `Empty` cells. Negative sizes clamp
    /// to 0.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::new(0, 0, cols.max(0), rows.max(0));
        let cells = bounds.iter().map(Cell::new).collect();
        Self { cells, bounds }
    }

    /// The bounding range (x = columns, y = rows).
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` outside the board.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Inverse of [`index`](Grid::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        debug_assert!(idx < self.cells.len(), "cell index {idx} out of range");
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Classification at `p`, or `None` outside the board.
    #[inline]
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.cell(p).map(Cell::kind)
    }

    /// Set the classification at `p`. No-op outside the board. No check is
    /// made that only one `Start`/`End` exists.
    pub fn set_kind(&mut self, p: Point, kind: CellKind) {
        if let Some(c) = self.cell_mut(p) {
            c.set_kind(kind);
        }
    }

    pub fn reset(&mut self, p: Point) {
        self.set_kind(p, CellKind::Empty);
    }

    pub fn make_barrier(&mut self, p: Point) {
        self.set_kind(p, CellKind::Barrier);
    }

    pub fn make_start(&mut self, p: Point) {
        self.set_kind(p, CellKind::Start);
    }

    pub fn make_end(&mut self, p: Point) {
        self.set_kind(p, CellKind::End);
    }

    /// Reset every cell to `Empty`. Neighbor lists are dropped too.
    pub fn clear(&mut self) {
        for c in &mut self.cells {
            c.reset();
            c.set_neighbors(Vec::new());
        }
    }

    /// Reset `Open`, `Closed` and `Path` cells to `Empty`, keeping barriers
    /// and endpoints. Returns how many cells changed.
    pub fn clear_search(&mut self) -> usize {
        let mut n = 0;
        for c in &mut self.cells {
            if c.kind().is_search_mark() {
                c.reset();
                n += 1;
            }
        }
        n
    }

    /// First cell of `kind` in row-major order.
    pub fn find(&self, kind: CellKind) -> Option<Point> {
        self.cells.iter().find(|c| c.kind() == kind).map(Cell::pos)
    }

    /// Number of cells of `kind`.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }

    /// Rebuild every cell's neighbor list from the current barriers.
    ///
    /// Directions are tested down, up, right, left; a neighbor is kept when it
    /// is on the board and not a `Barrier`. Later edits are not reflected
    /// until this is called again.
    pub fn recompute_neighbors(&mut self) {
        let lists: Vec<Vec<Point>> = self
            .cells
            .iter()
            .map(|c| {
                c.pos()
                    .neighbors_4()
                    .into_iter()
                    .filter(|&n| self.kind(n).is_some_and(|k| k != CellKind::Barrier))
                    .collect()
            })
            .collect();
        for (c, ns) in self.cells.iter_mut().zip(lists) {
            c.set_neighbors(ns);
        }
        debug!("recomputed adjacency for {} board", self.bounds);
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Snapshot of every cell's kind, row-major. Pair with
    /// [`compute_frame`].
    pub fn kinds(&self) -> Vec<CellKind> {
        self.cells.iter().map(Cell::kind).collect()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell whose kind changed between frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub pos: Point,
    pub kind: CellKind,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub rows: i32,
    pub cols: i32,
}

/// Compute the cells of `curr` whose kind differs from the `prev` snapshot.
///
/// When `prev` does not match the board size every cell is reported, which
/// is what a back end needs for its first draw.
pub fn compute_frame(prev: &[CellKind], curr: &Grid) -> Frame {
    let full = prev.len() != curr.len();
    let cells = curr
        .iter()
        .enumerate()
        .filter(|&(i, c)| full || prev[i] != c.kind())
        .map(|(_, c)| FrameCell {
            pos: c.pos(),
            kind: c.kind(),
        })
        .collect();
    Frame {
        cells,
        rows: curr.rows(),
        cols: curr.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 12);
        assert!(g.iter().all(Cell::is_empty));
        assert_eq!(g.cell(Point::rc(2, 3)).map(Cell::pos), Some(Point::rc(2, 3)));
    }

    #[test]
    fn negative_size_clamps_to_empty() {
        let g = Grid::new(-2, 5);
        assert!(g.is_empty());
        assert_eq!(g.kind(Point::ZERO), None);
    }

    #[test]
    fn index_round_trips_through_point() {
        let g = Grid::new(4, 6);
        for c in &g {
            let i = g.index(c.pos()).unwrap();
            assert_eq!(g.point(i), c.pos());
        }
        assert_eq!(g.index(Point::rc(4, 0)), None);
        assert_eq!(g.index(Point::rc(0, -1)), None);
    }

    #[test]
    fn set_kind_outside_is_noop() {
        let mut g = Grid::new(2, 2);
        g.make_barrier(Point::rc(5, 5));
        assert_eq!(g.count(CellKind::Barrier), 0);
    }

    #[test]
    fn make_barrier_then_reset_is_empty() {
        let mut g = Grid::new(2, 2);
        let p = Point::rc(1, 1);
        g.make_end(p);
        g.make_barrier(p);
        g.reset(p);
        g.reset(p);
        assert_eq!(g.kind(p), Some(CellKind::Empty));
    }

    #[test]
    fn neighbors_follow_down_up_right_left() {
        let mut g = Grid::new(3, 3);
        g.recompute_neighbors();
        let centre = g.cell(Point::rc(1, 1)).unwrap();
        assert_eq!(
            centre.neighbors(),
            &[Point::rc(2, 1), Point::rc(0, 1), Point::rc(1, 2), Point::rc(1, 0)]
        );
        let corner = g.cell(Point::rc(0, 0)).unwrap();
        assert_eq!(corner.neighbors(), &[Point::rc(1, 0), Point::rc(0, 1)]);
    }

    #[test]
    fn neighbors_skip_barriers() {
        let mut g = Grid::new(3, 3);
        g.make_barrier(Point::rc(2, 1));
        g.make_barrier(Point::rc(1, 0));
        g.recompute_neighbors();
        let centre = g.cell(Point::rc(1, 1)).unwrap();
        assert_eq!(centre.neighbors(), &[Point::rc(0, 1), Point::rc(1, 2)]);
    }

    #[test]
    fn neighbors_respect_column_count_on_wide_board() {
        let mut g = Grid::new(2, 5);
        g.recompute_neighbors();
        let right_edge = g.cell(Point::rc(0, 4)).unwrap();
        assert_eq!(right_edge.neighbors(), &[Point::rc(1, 4), Point::rc(0, 3)]);
        let mid = g.cell(Point::rc(0, 3)).unwrap();
        assert!(mid.neighbors().contains(&Point::rc(0, 4)));
    }

    #[test]
    fn neighbors_go_stale_until_recomputed() {
        let mut g = Grid::new(3, 3);
        g.recompute_neighbors();
        g.make_barrier(Point::rc(1, 2));
        let centre = g.cell(Point::rc(1, 1)).unwrap();
        assert!(centre.neighbors().contains(&Point::rc(1, 2)));
        g.recompute_neighbors();
        let centre = g.cell(Point::rc(1, 1)).unwrap();
        assert!(!centre.neighbors().contains(&Point::rc(1, 2)));
    }

    #[test]
    fn clear_search_keeps_edits() {
        let mut g = Grid::new(2, 3);
        g.make_start(Point::rc(0, 0));
        g.make_end(Point::rc(1, 2));
        g.make_barrier(Point::rc(0, 1));
        g.set_kind(Point::rc(1, 0), CellKind::Closed);
        g.set_kind(Point::rc(1, 1), CellKind::Path);
        g.set_kind(Point::rc(0, 2), CellKind::Open);
        assert_eq!(g.clear_search(), 3);
        assert_eq!(g.find(CellKind::Start), Some(Point::rc(0, 0)));
        assert_eq!(g.find(CellKind::End), Some(Point::rc(1, 2)));
        assert_eq!(g.count(CellKind::Barrier), 1);
        assert_eq!(g.count(CellKind::Empty), 3);
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = Grid::new(2, 2);
        g.make_start(Point::ZERO);
        g.make_barrier(Point::rc(1, 1));
        g.recompute_neighbors();
        g.clear();
        assert_eq!(g.count(CellKind::Empty), 4);
        assert!(g.iter().all(|c| c.neighbors().is_empty()));
    }

    #[test]
    fn compute_frame_reports_changes_only() {
        let mut g = Grid::new(2, 2);
        let prev = g.kinds();
        g.make_barrier(Point::rc(1, 0));
        let frame = compute_frame(&prev, &g);
        assert_eq!(
            frame.cells,
            vec![FrameCell {
                pos: Point::rc(1, 0),
                kind: CellKind::Barrier
            }]
        );
    }

    #[test]
    fn compute_frame_full_on_size_mismatch() {
        let g = Grid::new(2, 3);
        let frame = compute_frame(&[], &g);
        assert_eq!(frame.cells.len(), 6);
        assert_eq!((frame.rows, frame.cols), (2, 3));
    }
}
