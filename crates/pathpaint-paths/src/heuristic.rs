use pathpaint_core::Point;

/// Manhattan (L1) distance between two cells: `|Δrow| + |Δcol|`.
///
/// Never overestimates the number of orthogonal unit moves between the
/// cells, and drops by at most one per move, so A* stays optimal with it.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.row().abs_diff(b.row()) + a.col().abs_diff(b.col())
}
