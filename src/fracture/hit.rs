use crate::fracture::Shot;
use crate::math::{Point, Real, UnitVector, DEFAULT_EPSILON};
use crate::query::{ray_crossings_with_hull, Ray};
use crate::shape::HullMesh;
use na::Unit;

/// The segment a shot carves through a hull.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HitSegment {
    /// The point where the shot enters the hull.
    pub entry: Point<Real>,
    /// The deepest point the shot reaches inside the hull.
    pub interior: Point<Real>,
}

impl HitSegment {
    /// The length of this segment.
    pub fn length(&self) -> Real {
        na::distance(&self.entry, &self.interior)
    }

    /// The unit direction from the entry point to the interior point, or
    /// `None` if the segment is degenerate.
    pub fn direction(&self) -> Option<UnitVector<Real>> {
        Unit::try_new(self.interior - self.entry, DEFAULT_EPSILON)
    }
}

/// A shot together with the segment it carved through a hull.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ShotHit {
    /// The shot that was resolved.
    pub shot: Shot,
    /// The penetration segment of the shot.
    pub segment: HitSegment,
}

/// Resolves one shot against a hull.
///
/// The shot's ray must cross the hull boundary in exactly two points; a miss,
/// a tangent contact, or a ray starting inside the hull all yield `None`. The
/// interior point of the resulting segment is the entry point advanced toward
/// the exit point by the shot's penetration percent.
pub fn detect_hit(hull: &HullMesh, shot: &Shot) -> Option<ShotHit> {
    let ray = Ray::new(shot.origin, shot.direction);
    let crossings = ray_crossings_with_hull(hull, &ray);

    if crossings.len() != 2 {
        return None;
    }

    let entry = crossings[0];
    let exit = crossings[1];
    let interior = entry + (exit - entry) * shot.penetration_percent;

    Some(ShotHit {
        shot: *shot,
        segment: HitSegment { entry, interior },
    })
}

/// Resolves all the given shots against a hull, dropping the ones that miss.
///
/// The surviving hits keep the order of their shots.
pub fn detect_hits(hull: &HullMesh, shots: &[Shot]) -> Vec<ShotHit> {
    shots
        .iter()
        .filter_map(|shot| detect_hit(hull, shot))
        .collect()
}
