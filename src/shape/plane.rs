use crate::math::{Point, Real, UnitVector};
use na::{self, Unit};

/// An infinite plane described by its unit normal and its bias.
///
/// A point `pt` lies on the plane whenever `normal.dot(pt) == bias`. The side
/// the normal points toward is the positive half-space.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The unit normal of the plane.
    pub normal: UnitVector<Real>,
    /// The signed distance from the origin to the plane, measured along the normal.
    pub bias: Real,
}

impl Plane {
    /// Creates a plane from its unit normal and a point lying on it.
    #[inline]
    pub fn new(normal: UnitVector<Real>, point: &Point<Real>) -> Plane {
        Plane {
            normal,
            bias: normal.dot(&point.coords),
        }
    }

    /// The plane whose points are all equidistant from `a` and `b`, with its normal
    /// pointing toward `b`.
    ///
    /// Returns `None` if `a` and `b` are nearly coincident.
    pub fn bisecting(a: &Point<Real>, b: &Point<Real>) -> Option<Plane> {
        let normal = Unit::try_new(b - a, crate::math::DEFAULT_EPSILON)?;
        Some(Plane::new(normal, &na::center(a, b)))
    }

    /// The signed distance from `pt` to this plane.
    ///
    /// The distance is positive on the side the normal points toward.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.bias
    }
}
