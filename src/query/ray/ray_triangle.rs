use crate::math::Real;
use crate::query::Ray;
use crate::shape::Triangle;

/// Computes the time of impact between a ray and a triangle.
///
/// Both sides of the triangle can be hit. The returned parameter is expressed
/// in multiples of `ray.dir`, so it is a distance whenever `ray.dir` is a unit
/// vector. Returns `None` if the ray misses the triangle or is parallel to it.
pub fn ray_toi_with_triangle(triangle: &Triangle, ray: &Ray) -> Option<Real> {
    let ab = triangle.b - triangle.a;
    let ac = triangle.c - triangle.a;

    // normal
    let n = ab.cross(&ac);
    let d = n.dot(&ray.dir);

    // the normal and the ray direction are parallel
    if d == 0.0 {
        return None;
    }

    let ap = ray.origin - triangle.a;
    let t = ap.dot(&n);

    // the ray does not intersect the halfspace defined by the triangle
    if (t < 0.0 && d < 0.0) || (t > 0.0 && d > 0.0) {
        return None;
    }

    let d = d.abs();

    //
    // intersection: check the barycentric coordinates
    //
    let e = -ray.dir.cross(&ap);

    if t < 0.0 {
        let v = -ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        let w = ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        Some(-t / d)
    } else {
        let v = ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        let w = -ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        Some(t / d)
    }
}
