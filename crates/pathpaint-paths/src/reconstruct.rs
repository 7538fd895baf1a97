use log::trace;
use pathpaint_core::{Grid, Point};

/// Walk the predecessor chain back from `from`, marking the route.
///
/// `came_from` maps a cell to the cell it was reached from; the walk stops at
/// the first cell with no predecessor. Each cell stepped onto is set to
/// `Path` and reported to `on_visit`, except a cell classified `Start`, which
/// is left alone. `from` itself is never reclassified. Returns the number of
/// cells marked.
pub fn reconstruct<C, F>(grid: &mut Grid, came_from: C, from: Point, mut on_visit: F) -> usize
where
    C: Fn(Point) -> Option<Point>,
    F: FnMut(&Grid),
{
    let mut marked = 0;
    let mut steps = 0usize;
    let mut current = from;
    while let Some(prev) = came_from(current) {
        steps += 1;
        debug_assert!(
            steps <= grid.len(),
            "predecessor chain from {from} does not terminate"
        );
        current = prev;
        let Some(cell) = grid.cell_mut(current) else {
            break;
        };
        if cell.is_start() {
            continue;
        }
        cell.make_path();
        marked += 1;
        on_visit(&*grid);
    }
    trace!("reconstructed {marked} path cells back from {from}");
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathpaint_core::CellKind;
    use std::collections::HashMap;

    fn chain(points: &[Point]) -> HashMap<Point, Point> {
        points.windows(2).map(|w| (w[1], w[0])).collect()
    }

    #[test]
    fn marks_intermediates_and_skips_start() {
        let mut grid = Grid::new(1, 4);
        let route = [
            Point::rc(0, 0),
            Point::rc(0, 1),
            Point::rc(0, 2),
            Point::rc(0, 3),
        ];
        grid.make_start(route[0]);
        grid.make_end(route[3]);
        let came_from = chain(&route);

        let mut visits = 0;
        let marked = reconstruct(
            &mut grid,
            |p| came_from.get(&p).copied(),
            route[3],
            |_| visits += 1,
        );

        assert_eq!(marked, 2);
        assert_eq!(visits, 2);
        assert_eq!(grid.kind(route[0]), Some(CellKind::Start));
        assert_eq!(grid.kind(route[1]), Some(CellKind::Path));
        assert_eq!(grid.kind(route[2]), Some(CellKind::Path));
        assert_eq!(grid.kind(route[3]), Some(CellKind::End));
    }

    #[test]
    fn callback_sees_progressive_marking() {
        let mut grid = Grid::new(1, 4);
        let route = [
            Point::rc(0, 0),
            Point::rc(0, 1),
            Point::rc(0, 2),
            Point::rc(0, 3),
        ];
        grid.make_start(route[0]);
        let came_from = chain(&route);

        let mut seen = Vec::new();
        reconstruct(
            &mut grid,
            |p| came_from.get(&p).copied(),
            route[3],
            |g| seen.push(g.count(CellKind::Path)),
        );
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn no_predecessor_marks_nothing() {
        let mut grid = Grid::new(2, 2);
        let marked = reconstruct(&mut grid, |_| None, Point::rc(1, 1), |_| {});
        assert_eq!(marked, 0);
        assert_eq!(grid.count(CellKind::Path), 0);
    }
}
