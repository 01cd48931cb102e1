//! Definition of the triangle shape.

use crate::math::{Point, Real, Vector};
use crate::utils;
use na::Unit;

/// A triangle shape.
#[derive(PartialEq, Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        utils::center(&[self.a, self.b, self.c])
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() / 2.0
    }

    /// A vector normal of this triangle, not normalized.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Returns `None` if the triangle is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }
}

#[cfg(test)]
mod test {
    use super::Triangle;
    use crate::math::Point;

    #[test]
    fn area_and_normal_of_right_triangle() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );

        assert_relative_eq!(tri.area(), 2.0);

        let normal = tri.normal().unwrap();
        assert_relative_eq!(normal.z, 1.0);
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );

        assert!(tri.normal().is_none());
        assert_relative_eq!(tri.area(), 0.0);
    }

    #[test]
    fn center_of_triangle() {
        let tri = Triangle::new(
            Point::new(3.0, 0.0, 0.0),
            Point::new(0.0, 3.0, 0.0),
            Point::new(0.0, 0.0, 3.0),
        );

        assert_relative_eq!(tri.center(), Point::new(1.0, 1.0, 1.0));
    }
}
