use crate::math::{Point, Real};
use crate::shape::Plane;
use crate::utils::{self, PointKey, WBasis};
use std::collections::HashSet;

/// Cuts a polygon with the given plane.
///
/// A point `pt` is kept whenever `plane.signed_distance(pt) <= eps`, i.e. the
/// side of the plane its normal points toward is cut away. The clipped polygon
/// is written into `result` (which is cleared first), preserving the winding
/// of the input. Returns `true` if the polygon was actually cut, `false` if it
/// was kept or discarded as a whole.
pub fn clip_polygon_with_plane(
    polygon: &[Point<Real>],
    plane: &Plane,
    eps: Real,
    result: &mut Vec<Point<Real>>,
) -> bool {
    result.clear();

    if polygon.is_empty() {
        return false;
    }

    let mut changed = false;
    let mut prev_pt = polygon[polygon.len() - 1];
    let mut prev_dist = plane.signed_distance(&prev_pt);

    for pt in polygon {
        let dist = plane.signed_distance(pt);

        if (dist <= eps) != (prev_dist <= eps) {
            // The edge crosses the plane, so we need to cut it.
            let t = prev_dist / (prev_dist - dist);

            if t > 0.0 && t < 1.0 {
                result.push(prev_pt + (pt - prev_pt) * t);
            }
        }

        if dist <= eps {
            result.push(*pt);
        } else {
            changed = true;
        }

        prev_pt = *pt;
        prev_dist = dist;
    }

    changed
}

/// Assembles a section loop out of unordered points lying on `plane`.
///
/// The points are welded with the `weld_dist` tolerance, then ordered
/// counter-clockwise around the plane normal. Returns an empty vector if fewer
/// than three distinct points remain after welding.
pub fn ordered_section_polygon(
    points: &[Point<Real>],
    plane: &Plane,
    weld_dist: Real,
) -> Vec<Point<Real>> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<Point<Real>> = Vec::new();

    for pt in points {
        if seen.insert(PointKey::new(pt, weld_dist)) {
            distinct.push(*pt);
        }
    }

    if distinct.len() < 3 {
        return Vec::new();
    }

    let center = utils::center(&distinct);
    let [tangent1, tangent2] = plane.normal.orthonormal_basis();

    distinct.sort_by(|a, b| {
        let da = a - center;
        let db = b - center;
        let angle_a = da.dot(&tangent2).atan2(da.dot(&tangent1));
        let angle_b = db.dot(&tangent2).atan2(db.dot(&tangent1));
        angle_a.total_cmp(&angle_b)
    });

    distinct
}
