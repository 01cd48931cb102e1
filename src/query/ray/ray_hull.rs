use crate::math::{Point, Real};
use crate::query::{ray_toi_with_triangle, Ray};
use crate::shape::HullMesh;
use smallvec::SmallVec;

/// Computes all the points where `ray` crosses the boundary of `hull`, ordered
/// along the ray.
///
/// Crossings closer to each other than a small tolerance proportional to the
/// hull size are merged, so a ray entering the hull through one of its edges
/// or vertices reports a single crossing even though several triangles are
/// hit. A ray crossing a watertight convex hull therefore reports either zero,
/// one (if it starts inside or only grazes the boundary), or two points.
pub fn ray_crossings_with_hull(hull: &HullMesh, ray: &Ray) -> Vec<Point<Real>> {
    let mut tois: SmallVec<[Real; 4]> = SmallVec::new();

    for triangle in hull.triangles() {
        if let Some(toi) = ray_toi_with_triangle(&triangle, ray) {
            tois.push(toi);
        }
    }

    tois.sort_unstable_by(|a, b| a.total_cmp(b));

    let dir_norm = ray.dir.norm();
    let merge_dist = hull.aabb().diagonal_length() * 1.0e-5;

    let mut crossings = Vec::new();
    let mut last_toi: Option<Real> = None;

    for toi in tois {
        let merged = last_toi.map_or(false, |prev| (toi - prev) * dir_norm <= merge_dist);

        if !merged {
            crossings.push(ray.point_at(toi));
            last_toi = Some(toi);
        }
    }

    crossings
}
