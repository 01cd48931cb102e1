//! Shattering of convex hulls under ballistic impacts.
//!
//! The pipeline resolves each shot into a penetration segment
//! ([`detect_hits`]), grows a cloud of Voronoi seeds around the segments
//! ([`sample_control_points`]), splits the hull along the resulting diagram
//! into validated shards ([`split_hull`]), and finally spreads the impact
//! forces across the shards as initial velocities ([`distribute_forces`]).
//! [`shatter_hull`] runs the whole pipeline.

pub use self::force::{distribute_forces, linearized_dot, percent_of_force};
pub use self::hit::{detect_hit, detect_hits, HitSegment, ShotHit};
pub use self::response::ExplosionResponse;
pub use self::sampling::sample_control_points;
pub use self::shot::{ShatterOptions, Shot};
pub use self::splitter::{split_hull, ShardRecord};

mod force;
mod hit;
mod response;
mod sampling;
mod shot;
mod splitter;

use crate::shape::HullMesh;
use rand::Rng;

/// Shatters a hull with the given shots and computes one initial velocity per
/// shard.
///
/// This is [`split_hull`] followed by [`distribute_forces`]; see those for
/// the semantics of each stage. The returned response carries velocities
/// whenever it carries shards, in the same order.
pub fn shatter_hull<R: Rng + ?Sized>(
    hull: &HullMesh,
    shots: &[Shot],
    options: &ShatterOptions,
    rng: &mut R,
) -> ExplosionResponse {
    let mut response = split_hull(hull, shots, options, rng);

    if let Some(shards) = &response.shards {
        let hull_radius = hull.aabb().radius_heuristic();
        response.velocities = Some(distribute_forces(
            &response.hits,
            shards,
            hull_radius,
            options,
            rng,
        ));
    }

    response
}
