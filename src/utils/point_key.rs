use crate::math::{Point, Real};

/// A hashable key obtained by snapping the coordinates of a point to a grid.
///
/// Two points closer than the grid cell size map to the same key, except near
/// a cell boundary. This is good enough for welding vertices that were
/// computed twice from the same exact intersection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PointKey([i64; 3]);

impl PointKey {
    /// Quantizes `pt` on a grid with cells of size `cell_size`.
    pub fn new(pt: &Point<Real>, cell_size: Real) -> Self {
        let inv = 1.0 / cell_size;
        PointKey([
            (pt.x * inv).round() as i64,
            (pt.y * inv).round() as i64,
            (pt.z * inv).round() as i64,
        ])
    }
}
