use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};
use pathpaint_core::{CellKind, Grid, Point, Range};

use crate::cancel::Context;
use crate::error::{Result, SearchError};
use crate::heuristic::manhattan;
use crate::reconstruct::reconstruct;

const INFINITY: u32 = u32::MAX;
const NO_PARENT: usize = usize::MAX;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end was reached; `cost` is the number of moves on the route.
    Found { cost: u32 },
    /// The frontier ran dry without reaching the end.
    NoPath,
    /// The [`Context`] was cancelled before the search finished.
    Cancelled,
}

impl Outcome {
    /// Whether a route was found.
    #[inline]
    pub fn found(self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

// ---------------------------------------------------------------------------
// Open set entries
// ---------------------------------------------------------------------------

/// Heap entry ordered by `(f, seq)` ascending. Cells have no natural order,
/// so the insertion sequence settles ties: the first pushed wins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Astar
// ---------------------------------------------------------------------------

/// A* search engine with per-search bookkeeping.
///
/// Tables are sized to the board on every call and cleared first, so nothing
/// carries over between searches except allocated capacity. After a call the
/// scores and predecessors of that search can be inspected with
/// [`g_score`](Astar::g_score), [`came_from`](Astar::came_from) and friends.
/// The engine never keeps a reference to the grid.
#[derive(Debug, Default)]
pub struct Astar {
    bounds: Range,
    g: Vec<u32>,
    f: Vec<u32>,
    parent: Vec<usize>,
    in_open: Vec<bool>,
    closed: Vec<bool>,
    open: BinaryHeap<OpenEntry>,
    counter: u64,
    visit_order: Vec<Point>,
    nbuf: Vec<Point>,
    endpoints: Option<(Point, Point)>,
    outcome: Option<Outcome>,
}

impl Astar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `grid` for a shortest route from `start` to `end`.
    ///
    /// The grid's neighbor lists must be current
    /// ([`Grid::recompute_neighbors`]). Every move costs 1 and only
    /// orthogonal moves are made. `on_step` is called once after each
    /// expansion and once per cell marked during reconstruction; it sees
    /// the board but cannot change it. `ctx` is polled before each
    /// expansion.
    ///
    /// On success the intermediate route cells are `Path` and `end` is
    /// `End`. `start == end` succeeds immediately with cost 0 and touches
    /// nothing.
    pub fn search<F>(
        &mut self,
        grid: &mut Grid,
        start: Option<Point>,
        end: Option<Point>,
        ctx: &Context,
        mut on_step: F,
    ) -> Result<Outcome>
    where
        F: FnMut(&Grid),
    {
        self.prepare(grid.bounds());

        let start = start.ok_or(SearchError::MissingStart)?;
        let end = end.ok_or(SearchError::MissingEnd)?;
        let si = Self::endpoint_index(grid, start)?;
        let ei = Self::endpoint_index(grid, end)?;
        self.endpoints = Some((start, end));

        self.g[si] = 0;
        self.f[si] = manhattan(start, end);

        if si == ei {
            debug!("search from {start} to itself; nothing to do");
            return Ok(self.finish(Outcome::Found { cost: 0 }));
        }

        debug!("searching {} board from {start} to {end}", grid.bounds());
        self.open.push(OpenEntry {
            f: self.f[si],
            seq: self.counter,
            idx: si,
        });
        self.in_open[si] = true;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while !self.open.is_empty() {
            if ctx.is_done() {
                self.nbuf = nbuf;
                debug!(
                    "search cancelled after {} expansions",
                    self.visit_order.len()
                );
                return Ok(self.finish(Outcome::Cancelled));
            }

            let Some(OpenEntry { idx: ci, .. }) = self.open.pop() else {
                break;
            };
            self.in_open[ci] = false;

            // Stale duplicate of a cell that was already expanded.
            if self.closed[ci] {
                continue;
            }

            if ci == ei {
                self.nbuf = nbuf;
                let marked = reconstruct(grid, |p| self.came_from(p), end, &mut on_step);
                grid.make_end(end);
                let cost = self.g[ei];
                debug!(
                    "route found: cost {cost}, {marked} path cells, {} expansions",
                    self.visit_order.len()
                );
                return Ok(self.finish(Outcome::Found { cost }));
            }

            let current = grid.point(ci);
            trace!("expanding {current} f={} g={}", self.f[ci], self.g[ci]);
            self.visit_order.push(current);

            nbuf.clear();
            if let Some(cell) = grid.cell(current) {
                nbuf.extend_from_slice(cell.neighbors());
            }

            let tentative_g = self.g[ci] + 1;
            for &np in &nbuf {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if tentative_g >= self.g[ni] {
                    continue;
                }
                self.parent[ni] = ci;
                self.g[ni] = tentative_g;
                self.f[ni] = tentative_g + manhattan(np, end);
                if !self.in_open[ni] {
                    self.counter += 1;
                    self.open.push(OpenEntry {
                        f: self.f[ni],
                        seq: self.counter,
                        idx: ni,
                    });
                    self.in_open[ni] = true;
                    if let Some(cell) = grid.cell_mut(np) {
                        if !cell.is_start() && !cell.is_end() {
                            cell.make_open();
                        }
                    }
                }
            }

            on_step(&*grid);

            if ci != si {
                if let Some(cell) = grid.cell_mut(current) {
                    cell.make_closed();
                }
            }
            self.closed[ci] = true;
        }

        self.nbuf = nbuf;
        debug!(
            "no route from {start} to {end} after {} expansions",
            self.visit_order.len()
        );
        Ok(self.finish(Outcome::NoPath))
    }

    /// Outcome of the last search, if one ran past argument validation.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Best known cost from the start to `p`; `None` stands for infinity.
    pub fn g_score(&self, p: Point) -> Option<u32> {
        self.idx(p).map(|i| self.g[i]).filter(|&g| g != INFINITY)
    }

    /// `g_score + manhattan(p, end)`; `None` stands for infinity.
    pub fn f_score(&self, p: Point) -> Option<u32> {
        let i = self.idx(p)?;
        (self.g[i] != INFINITY).then_some(self.f[i])
    }

    /// The cell `p` was best reached from, if any.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        let i = self.idx(p)?;
        let parent = self.parent[i];
        (parent != NO_PARENT).then(|| self.point(parent))
    }

    /// Cells expanded by the last search, in order. The end cell is not
    /// expanded and so never appears.
    pub fn visit_order(&self) -> &[Point] {
        &self.visit_order
    }

    /// Number of pushes onto the open set after the first.
    pub fn pushes(&self) -> u64 {
        self.counter
    }

    /// Route of the last successful search, start and end included. Empty
    /// unless the last outcome was [`Outcome::Found`].
    pub fn path(&self) -> Vec<Point> {
        let (Some(Outcome::Found { .. }), Some((_, end))) = (self.outcome, self.endpoints) else {
            return Vec::new();
        };
        let mut path = vec![end];
        let mut cur = end;
        while let Some(prev) = self.came_from(cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn prepare(&mut self, bounds: Range) {
        let len = bounds.len();
        self.bounds = bounds;
        for table in [&mut self.g, &mut self.f] {
            table.clear();
            table.resize(len, INFINITY);
        }
        self.parent.clear();
        self.parent.resize(len, NO_PARENT);
        for flags in [&mut self.in_open, &mut self.closed] {
            flags.clear();
            flags.resize(len, false);
        }
        self.open.clear();
        self.counter = 0;
        self.visit_order.clear();
        self.endpoints = None;
        self.outcome = None;
    }

    fn endpoint_index(grid: &Grid, pos: Point) -> Result<usize> {
        let idx = grid.index(pos).ok_or(SearchError::OutOfBounds { pos })?;
        if grid.kind(pos) == Some(CellKind::Barrier) {
            return Err(SearchError::BarrierEndpoint { pos });
        }
        Ok(idx)
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.outcome = Some(outcome);
        outcome
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) || self.g.is_empty() {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        for outcome in [Outcome::Found { cost: 12 }, Outcome::NoPath, Outcome::Cancelled] {
            let json = serde_json::to_string(&outcome).unwrap();
            let back: Outcome = serde_json::from_str(&json).unwrap();
            assert_eq!(outcome, back);
        }
    }
}
