use crate::fracture::{ShardRecord, ShotHit};
use crate::math::{Point, Real, Vector};
use crate::transformation::VoronoiDiagram;

/// Everything produced by shattering a hull.
///
/// The fields fill up as the pipeline progresses, so a response also encodes
/// how far a given invocation got:
///
/// - no hits: pass-through, the hull is unbroken and everything else is empty;
/// - hits but `shards: None`: a geometric step failed, the caller should keep
///   the hull whole;
/// - `shards: Some(..)`: the hull fractured; `velocities` (when computed) is
///   parallel to `shards`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ExplosionResponse {
    /// The shots that pierced the hull, in firing order.
    pub hits: Vec<ShotHit>,
    /// The Voronoi seeds the fracture pattern was grown from, decoy points
    /// included.
    pub control_points: Vec<Point<Real>>,
    /// The Voronoi diagram of the control points, once its construction
    /// succeeded.
    pub voronoi: Option<VoronoiDiagram>,
    /// The fragments of the hull, or `None` if it did not fracture.
    pub shards: Option<Vec<ShardRecord>>,
    /// One initial velocity per shard, in shard order.
    pub velocities: Option<Vec<Vector<Real>>>,
}
