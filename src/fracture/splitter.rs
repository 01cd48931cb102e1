use crate::bounding_volume::Aabb;
use crate::fracture::{
    detect_hits, sample_control_points, ExplosionResponse, ShatterOptions, Shot, ShotHit,
};
use crate::math::{Point, Real, UnitVector};
use crate::shape::{HullMesh, Triangle};
use crate::transformation::{
    clip_hull_with_voronoi, laplacian_smooth, try_voronoi3, CellShard, VoronoiDiagram,
};
use crate::utils;
use rand::Rng;

/// Smoothing rounds applied to shard meshes when smoothing is enabled.
const SMOOTH_ITERATIONS: usize = 2;
/// Smoothing strength per round.
const SMOOTH_FACTOR: Real = 0.5;
/// Margin added around the Voronoi domain, as a fraction of the hull AABB
/// diagonal.
const DOMAIN_MARGIN_PERCENT: Real = 0.1;
/// Two triangle normals with `|dot| > 1 - this` count as parallel.
const COPLANAR_NORMAL_EPS: Real = 1.0e-3;

/// One fragment of a shattered hull.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ShardRecord {
    /// The index of the Voronoi cell that carved this shard.
    pub cell: u32,
    /// The shard mesh, in the frame of the parent hull.
    pub mesh_parent: HullMesh,
    /// The shard mesh recentered so its centroid sits at the origin. An
    /// independent rigid body is built from this one.
    pub mesh_local: HullMesh,
    /// The shard centroid, in the frame of the parent hull.
    pub center: Point<Real>,
    /// Heuristic bounding radius of the shard.
    pub radius: Real,
}

/// Fractures a hull along a Voronoi pattern grown around the given shots.
///
/// Shots that miss the hull are dropped. If none is left, the response is a
/// pass-through: the hull is considered unbroken and no shards are produced.
/// Otherwise Voronoi seeds are sampled around the hits, the hull is clipped
/// against the resulting diagram, and every surviving cell becomes one
/// [`ShardRecord`] with both a parent-frame and a recentered mesh.
///
/// All the expected geometric failures (the Voronoi construction rejecting
/// the seeds, the clipping misbehaving, every shard degenerating) downgrade
/// the response to a partial one with `shards: None` instead of escaping as
/// errors.
///
/// The response's `velocities` is always `None` here; [`shatter_hull`] fills
/// it in.
///
/// [`shatter_hull`]: crate::fracture::shatter_hull
pub fn split_hull<R: Rng + ?Sized>(
    hull: &HullMesh,
    shots: &[Shot],
    options: &ShatterOptions,
    rng: &mut R,
) -> ExplosionResponse {
    let hits = detect_hits(hull, shots);

    if hits.is_empty() {
        return partial(hits, Vec::new(), None);
    }

    let control_points = sample_control_points(hull, &hits, options, rng);

    // A zero point budget leaves nothing to seed the diagram with.
    if control_points.is_empty() {
        log::debug!("no control points were sampled");
        return partial(hits, control_points, None);
    }

    // The domain must wrap the hull for the cells to cover it, and wrap the
    // seeds (decoys included) for the diagram to accept them.
    let domain = hull
        .aabb()
        .merged(&Aabb::from_points(&control_points))
        .loosened(hull.aabb().diagonal_length() * DOMAIN_MARGIN_PERCENT);

    let diagram = match try_voronoi3(&control_points, &domain) {
        Ok(diagram) => diagram,
        Err(err) => {
            log::debug!("Voronoi construction failed: {err}");
            return partial(hits, control_points, None);
        }
    };

    let cells = match clip_hull_with_voronoi(hull, &diagram) {
        Ok(cells) => cells,
        Err(err) => {
            log::debug!("hull clipping failed: {err}");
            return partial(hits, control_points, Some(diagram));
        }
    };

    let mut shards = Vec::with_capacity(cells.len());
    for cell in cells {
        if let Some(shard) = build_shard(cell, options) {
            shards.push(shard);
        }
    }

    if shards.is_empty() {
        log::debug!("every shard was degenerate");
        return partial(hits, control_points, Some(diagram));
    }

    ExplosionResponse {
        hits,
        control_points,
        voronoi: Some(diagram),
        shards: Some(shards),
        velocities: None,
    }
}

fn partial(
    hits: Vec<ShotHit>,
    control_points: Vec<Point<Real>>,
    voronoi: Option<VoronoiDiagram>,
) -> ExplosionResponse {
    ExplosionResponse {
        hits,
        control_points,
        voronoi,
        shards: None,
        velocities: None,
    }
}

/// Turns one clipped cell into a shard, or discards it as degenerate.
fn build_shard(mut cell: CellShard, options: &ShatterOptions) -> Option<ShardRecord> {
    if options.should_smooth_shards {
        laplacian_smooth(
            &mut cell.vertices,
            &cell.indices,
            SMOOTH_ITERATIONS,
            SMOOTH_FACTOR,
        );
    }

    // A flat "shard" is a numerical artifact, not a solid.
    if cell.indices.len() < 3 || is_coplanar(&cell) {
        return None;
    }

    let cell_id = cell.cell;
    let center = utils::center(&cell.vertices);

    let mesh_parent = match HullMesh::try_new(cell.vertices, cell.indices) {
        Ok(mesh) => mesh,
        Err(err) => {
            log::trace!("discarding the shard of cell {cell_id}: {err}");
            return None;
        }
    };

    let radius = mesh_parent.aabb().radius_heuristic();
    let mesh_local = mesh_parent.clone().translated(&-center.coords);

    Some(ShardRecord {
        cell: cell_id,
        mesh_parent,
        mesh_local,
        center,
        radius,
    })
}

fn is_coplanar(cell: &CellShard) -> bool {
    let mut reference: Option<UnitVector<Real>> = None;

    for idx in &cell.indices {
        let tri = Triangle::new(
            cell.vertices[idx[0] as usize],
            cell.vertices[idx[1] as usize],
            cell.vertices[idx[2] as usize],
        );

        if let Some(normal) = tri.normal() {
            match &reference {
                None => reference = Some(normal),
                Some(first) => {
                    if normal.dot(first).abs() < 1.0 - COPLANAR_NORMAL_EPS {
                        return false;
                    }
                }
            }
        }
    }

    // No two independent normals were found.
    true
}

#[cfg(test)]
mod test {
    use super::split_hull;
    use crate::fracture::{ShatterOptions, Shot};
    use crate::math::{Point, Real, Vector};
    use crate::shape::HullMesh;
    use crate::utils;
    use rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    fn piercing_shot() -> Shot {
        Shot::new(Point::new(-5.0, 0.1, 0.2), Vector::new(1.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn a_piercing_shot_shatters_a_cube() {
        let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
        let options = ShatterOptions::default();
        let mut rng = Isaac64Rng::seed_from_u64(42);

        let response = split_hull(&hull, &[piercing_shot()], &options, &mut rng);

        assert_eq!(response.hits.len(), 1);
        assert!(response.control_points.len() >= options.min_control_points as usize);
        assert!(response.voronoi.is_some());

        let shards = response.shards.unwrap();
        assert!(shards.len() >= 2);

        let total: Real = shards.iter().map(|s| s.mesh_parent.signed_volume()).sum();
        assert_relative_eq!(total, hull.signed_volume(), epsilon = 1.0e-2);
    }

    #[test]
    fn a_missing_shot_passes_through() {
        let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
        let shot = Shot::new(Point::new(-5.0, 4.0, 0.0), Vector::new(1.0, 0.0, 0.0), 1.0);
        let options = ShatterOptions::default();
        let mut rng = Isaac64Rng::seed_from_u64(0);

        let response = split_hull(&hull, &[shot], &options, &mut rng);

        assert!(response.hits.is_empty());
        assert!(response.control_points.is_empty());
        assert!(response.voronoi.is_none());
        assert!(response.shards.is_none());
        assert!(response.velocities.is_none());
    }

    #[test]
    fn a_zero_point_budget_degrades_to_a_partial_response() {
        let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
        let options = ShatterOptions {
            min_control_points: 0,
            max_control_points: 0,
            ..Default::default()
        };
        let mut rng = Isaac64Rng::seed_from_u64(0);

        let response = split_hull(&hull, &[piercing_shot()], &options, &mut rng);

        assert_eq!(response.hits.len(), 1);
        assert!(response.control_points.is_empty());
        assert!(response.voronoi.is_none());
        assert!(response.shards.is_none());
        assert!(response.velocities.is_none());
    }

    #[test]
    fn shards_are_recentered_on_their_centroid() {
        let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
        let options = ShatterOptions::default();
        let mut rng = Isaac64Rng::seed_from_u64(7);

        let response = split_hull(&hull, &[piercing_shot()], &options, &mut rng);

        for shard in &response.shards.unwrap() {
            let local_center = utils::center(shard.mesh_local.vertices());
            assert_relative_eq!(
                local_center,
                Point::origin(),
                epsilon = 1.0e-4
            );

            let recovered = utils::center(shard.mesh_parent.vertices());
            assert_relative_eq!(recovered, shard.center, epsilon = 1.0e-4);

            assert_relative_eq!(
                shard.radius,
                shard.mesh_parent.aabb().radius_heuristic(),
                epsilon = 1.0e-6
            );
        }
    }

    #[test]
    fn smoothing_shrinks_the_shards_but_keeps_them_solid() {
        let hull = HullMesh::ball(1.0, 10, 6);
        let shot = Shot::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0), 1.0);
        let mut rng = Isaac64Rng::seed_from_u64(3);

        let plain = split_hull(&hull, &[shot], &ShatterOptions::default(), &mut rng);
        let plain_total: Real = plain
            .shards
            .unwrap()
            .iter()
            .map(|s| s.mesh_parent.signed_volume())
            .sum();

        let smooth_options = ShatterOptions {
            should_smooth_shards: true,
            ..Default::default()
        };
        let mut rng = Isaac64Rng::seed_from_u64(3);
        let smoothed = split_hull(&hull, &[shot], &smooth_options, &mut rng);
        let smooth_total: Real = smoothed
            .shards
            .unwrap()
            .iter()
            .map(|s| s.mesh_parent.signed_volume())
            .sum();

        assert!(smooth_total < plain_total);
        assert!(smooth_total > 0.0);
    }

    #[test]
    fn splitting_is_deterministic_for_a_fixed_seed() {
        let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
        let options = ShatterOptions::default();

        let mut rng1 = Isaac64Rng::seed_from_u64(123);
        let mut rng2 = Isaac64Rng::seed_from_u64(123);

        let first = split_hull(&hull, &[piercing_shot()], &options, &mut rng1);
        let second = split_hull(&hull, &[piercing_shot()], &options, &mut rng2);

        assert_eq!(first.control_points, second.control_points);

        let first_shards = first.shards.unwrap();
        let second_shards = second.shards.unwrap();
        assert_eq!(first_shards.len(), second_shards.len());

        for (a, b) in first_shards.iter().zip(&second_shards) {
            assert_eq!(a.cell, b.cell);
            assert_eq!(a.center, b.center);
            assert_eq!(a.mesh_parent.vertices(), b.mesh_parent.vertices());
            assert_eq!(a.mesh_parent.indices(), b.mesh_parent.indices());
        }
    }
}
