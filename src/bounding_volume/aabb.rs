//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};
use na;

/// An Axis-Aligned Bounding Box.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use shatter3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
/// assert_eq!(aabb.center(), Point3::origin());
/// assert_eq!(aabb.extents(), nalgebra::Vector3::new(2.0, 2.0, 2.0));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates of this AABB.
    pub mins: Point<Real>,
    /// The point with the greatest coordinates of this AABB.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// The vertex indices of each face of this `Aabb`.
    ///
    /// This gives, for each face of this `Aabb`, the indices of its
    /// vertices when taken from the `self.vertices()` array, wound
    /// counter-clockwise when seen from outside the box.
    pub const FACES_VERTEX_IDS: [(usize, usize, usize, usize); 6] = [
        // Face with normal +X
        (1, 2, 6, 5),
        // Face with normal -X
        (0, 4, 7, 3),
        // Face with normal +Y
        (2, 3, 7, 6),
        // Face with normal -Y
        (0, 1, 5, 4),
        // Face with normal +Z
        (4, 5, 6, 7),
        // Face with normal -Z
        (0, 3, 2, 1),
    ];

    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Computes the AABB of a set of points.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields no point.
    pub fn from_points<'a, I>(pts: I) -> Aabb
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut iter = pts.into_iter();
        let p0 = iter
            .next()
            .expect("AABB construction: the input iterator must yield at least one point.");
        let mut mins: Point<Real> = *p0;
        let mut maxs: Point<Real> = *p0;

        for pt in iter {
            mins = mins.inf(pt);
            maxs = maxs.sup(pt);
        }

        Aabb::new(mins, maxs)
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = na::convert::<f64, Real>(0.5);
        (self.maxs - self.mins) * half
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The length of the diagonal joining `self.mins` to `self.maxs`.
    #[inline]
    pub fn diagonal_length(&self) -> Real {
        self.extents().norm()
    }

    /// A pseudo-radius for this AABB, equal to the square root of its half-diagonal length.
    ///
    /// This grows much slower than the actual half-diagonal, which tempers quantities
    /// divided by it for large boxes.
    #[inline]
    pub fn radius_heuristic(&self) -> Real {
        self.half_extents().norm().sqrt()
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Enlarges this AABB by `amount` in every direction.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        let amount = Vector::repeat(amount);
        Aabb {
            mins: self.mins - amount,
            maxs: self.maxs + amount,
        }
    }

    /// Does this AABB contain the point `pt`?
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        for i in 0..3 {
            if pt[i] < self.mins[i] || pt[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Does this AABB fully contain the AABB `other`?
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    /// The vertices of this AABB.
    ///
    /// The vertices are given in the following order in a right-handed coordinate system:
    ///
    /// ```text
    ///    y             3 - 2
    ///    |           7 − 6 |
    ///    ___ x       |   | 1
    ///   /            4 - 5
    ///  z
    /// ```
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::math::{Point, Real, Vector};
    use crate::shape::Triangle;

    #[test]
    fn from_points_wraps_every_point() {
        let pts = [
            Point::new(1.0, 2.0, 3.0),
            Point::new(-1.0, 4.0, 2.0),
            Point::new(0.0, 0.0, 5.0),
        ];
        let aabb = Aabb::from_points(&pts);

        assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 2.0));
        assert_eq!(aabb.maxs, Point::new(1.0, 4.0, 5.0));

        for pt in &pts {
            assert!(aabb.contains_local_point(pt));
        }
    }

    #[test]
    fn face_windings_point_outward() {
        let aabb = Aabb::new(Point::new(-1.0, -2.0, -3.0), Point::new(2.0, 1.0, 4.0));
        let vtx = aabb.vertices();
        let center = aabb.center();

        for (i0, i1, i2, _) in Aabb::FACES_VERTEX_IDS {
            let normal = Triangle::new(vtx[i0], vtx[i1], vtx[i2]).scaled_normal();
            assert!(normal.dot(&(vtx[i0] - center)) > 0.0);
        }
    }

    #[test]
    fn radius_heuristic_of_unit_cube() {
        let aabb = Aabb::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5));
        let half_diag = Vector::<Real>::new(0.5, 0.5, 0.5).norm();
        assert_relative_eq!(aabb.radius_heuristic(), half_diag.sqrt(), epsilon = 1.0e-6);
    }
}
