use crate::fracture::{ShardRecord, ShatterOptions, ShotHit};
use crate::math::{Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::utils::{mean_std_dev, sample_unit_vector};
use na::{RealField, Unit};
use rand::Rng;

/// Distributes the force of every hit across the shard centers, as one
/// outward velocity per shard.
///
/// For each hit, a blast source is placed at the entry point (optionally
/// advanced toward the interior point by
/// `options.interior_velocity_center_percent`) and the shot's force is shared
/// among the shards with the [`percent_of_force`] kernel over the distances
/// from the source to the shard centers. Each shard's velocity points from
/// the source to its center, with magnitude `weight × force / hull_radius`.
/// Contributions of multiple hits add up.
///
/// When `options.distance_dot_power` is set, distances are first shrunk for
/// shards aligned with the shot direction, which channels more of the force
/// down the penetration axis.
pub fn distribute_forces<R: Rng + ?Sized>(
    hits: &[ShotHit],
    shards: &[ShardRecord],
    hull_radius: Real,
    options: &ShatterOptions,
    rng: &mut R,
) -> Vec<Vector<Real>> {
    let mut velocities = vec![Vector::zeros(); shards.len()];

    if shards.is_empty() || !(hull_radius > 0.0) {
        return velocities;
    }

    let mut directions = Vec::with_capacity(shards.len());
    let mut distances = Vec::with_capacity(shards.len());

    for hit in hits {
        let mut source = hit.segment.entry;
        if let Some(percent) = options.interior_velocity_center_percent {
            source += (hit.segment.interior - hit.segment.entry) * percent;
        }

        let impact = hit.shot.direction * (hit.shot.penetration_percent * options.shot_multiplier);
        let force = impact.norm();
        if force == 0.0 {
            continue;
        }

        let impact_dir = Unit::new_unchecked(impact / force);

        directions.clear();
        distances.clear();

        for shard in shards {
            let to_center = shard.center - source;
            let raw_distance = to_center.norm();

            // A shard centered exactly on the source flies along the shot.
            let direction = if raw_distance > DEFAULT_EPSILON {
                Unit::new_unchecked(to_center / raw_distance)
            } else {
                impact_dir
            };

            let mut distance = raw_distance;
            if let Some(power) = options.distance_dot_power {
                let alignment = linearized_dot(&impact_dir, &direction);
                distance *= (1.0 - alignment.abs()).powf(power);
            }

            directions.push(direction);
            distances.push(distance);
        }

        let weights = percent_of_force(&distances, Real::e());

        for ((velocity, direction), weight) in
            velocities.iter_mut().zip(&directions).zip(&weights)
        {
            *velocity += **direction * (*weight * force / hull_radius);
        }
    }

    if let Some(percent) = options.random_velocity_percent {
        for velocity in &mut velocities {
            let magnitude = velocity.norm();
            *velocity += *sample_unit_vector(rng) * (magnitude * percent);
        }
    }

    velocities
}

/// Shares one unit of force across `distances`, favoring the small ones.
///
/// The weights are `s^dev` where `s = 1 + base × stdev / mean` and `dev` is
/// the number of standard deviations each distance sits from the mean, signed
/// so that closer-than-average distances get a positive exponent. The result
/// sums to 1 and decreases monotonically with distance.
///
/// Distance sets without usable statistics (fewer than two values, zero
/// spread, zero mean, non-finite values) fall back to uniform weights.
pub fn percent_of_force(distances: &[Real], base: Real) -> Vec<Real> {
    let n = distances.len();
    if n == 0 {
        return Vec::new();
    }

    let uniform = vec![1.0 / n as Real; n];

    let (mean, stdev) = match mean_std_dev(distances) {
        Some(stats) => stats,
        None => return uniform,
    };

    if !mean.is_finite() || !stdev.is_finite() || mean <= 0.0 || stdev <= 0.0 {
        return uniform;
    }

    let scale = 1.0 + base * (stdev / mean);
    let mut weights = Vec::with_capacity(n);
    let mut sum = 0.0;

    for d in distances {
        let mut dev = (d - mean).abs() / stdev;
        if *d > mean {
            dev = -dev;
        }

        let weight = scale.powf(dev);
        sum += weight;
        weights.push(weight);
    }

    if !sum.is_finite() || sum <= 0.0 {
        return uniform;
    }

    for weight in &mut weights {
        *weight /= sum;
    }

    weights
}

/// A dot product remapped so equal angular steps give equal value steps.
///
/// Like the plain dot product of unit vectors this is 1 for aligned vectors,
/// 0 for orthogonal ones and -1 for opposite ones, but it is linear in the
/// angle instead of in its cosine.
pub fn linearized_dot(a: &UnitVector<Real>, b: &UnitVector<Real>) -> Real {
    let angle = a.dot(b).clamp(-1.0, 1.0).acos();
    1.0 - angle / Real::frac_pi_2()
}
