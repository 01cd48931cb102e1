use rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use shatter3d::fracture::{distribute_forces, shatter_hull, ShatterOptions, Shot};
use shatter3d::math::{Point, Real, Vector};
use shatter3d::shape::HullMesh;

#[test]
fn a_piercing_shot_shatters_a_cube() {
    let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
    let shot = Shot::new(Point::new(-5.0, 0.15, -0.1), Vector::new(12.0, 0.0, 0.0), 1.0);
    let options = ShatterOptions::default();
    let mut rng = Isaac64Rng::seed_from_u64(42);

    let response = shatter_hull(&hull, &[shot], &options, &mut rng);

    assert_eq!(response.hits.len(), 1);
    assert!(response.control_points.len() >= options.min_control_points as usize);
    assert!(response.voronoi.is_some());

    let shards = response.shards.as_ref().unwrap();
    let velocities = response.velocities.as_ref().unwrap();
    assert!(shards.len() >= 2);
    assert_eq!(velocities.len(), shards.len());

    let total: Real = shards.iter().map(|s| s.mesh_parent.signed_volume()).sum();
    assert_relative_eq!(total, hull.signed_volume(), epsilon = 1.0e-2);

    for velocity in velocities {
        assert!(velocity.iter().all(|x| x.is_finite()));
    }

    // At least the shards on the shot line must actually fly.
    assert!(velocities.iter().any(|v| v.norm() > 1.0e-4));
}

#[test]
fn a_shot_beside_the_hull_passes_through() {
    let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
    let shot = Shot::new(Point::new(-5.0, 4.0, 0.0), Vector::new(10.0, 0.0, 0.0), 1.0);
    let mut rng = Isaac64Rng::seed_from_u64(42);

    let response = shatter_hull(&hull, &[shot], &ShatterOptions::default(), &mut rng);

    assert!(response.hits.is_empty());
    assert!(response.control_points.is_empty());
    assert!(response.voronoi.is_none());
    assert!(response.shards.is_none());
    assert!(response.velocities.is_none());
}

#[test]
fn shard_volumes_sum_to_the_hull_volume() {
    let hull = HullMesh::ball(1.5, 16, 9);
    let shots = [
        Shot::new(Point::new(-6.0, 0.2, 0.1), Vector::new(9.0, 0.0, 0.0), 1.0),
        Shot::new(Point::new(0.3, 6.0, -0.2), Vector::new(0.0, -9.0, 0.0), 0.6),
    ];
    let mut rng = Isaac64Rng::seed_from_u64(3);

    let response = shatter_hull(&hull, &shots, &ShatterOptions::default(), &mut rng);

    assert_eq!(response.hits.len(), 2);
    let shards = response.shards.as_ref().unwrap();

    let total: Real = shards.iter().map(|s| s.mesh_parent.signed_volume()).sum();
    assert_relative_eq!(total, hull.signed_volume(), max_relative = 1.0e-2);
    assert!(shards.iter().all(|s| s.mesh_parent.signed_volume() > 0.0));
}

#[test]
fn simultaneous_shots_superpose_their_velocities() {
    let hull = HullMesh::cuboid(Vector::new(1.2, 0.8, 1.0));
    let shots = [
        Shot::new(Point::new(-5.0, 0.1, 0.0), Vector::new(8.0, 0.0, 0.0), 1.0),
        Shot::new(Point::new(0.2, 5.0, 0.3), Vector::new(0.0, -6.0, 0.0), 0.8),
    ];
    let options = ShatterOptions::default();
    let mut rng = Isaac64Rng::seed_from_u64(11);

    let response = shatter_hull(&hull, &shots, &options, &mut rng);
    let shards = response.shards.as_ref().unwrap();
    let velocities = response.velocities.as_ref().unwrap();

    // Re-run the distribution one hit at a time on the very same shards. The
    // options carry no random term, so the rng seed is irrelevant here.
    let hull_radius = hull.aabb().radius_heuristic();
    let mut replay = Isaac64Rng::seed_from_u64(0);
    let first = distribute_forces(&response.hits[0..1], shards, hull_radius, &options, &mut replay);
    let second = distribute_forces(&response.hits[1..2], shards, hull_radius, &options, &mut replay);

    for i in 0..velocities.len() {
        assert_relative_eq!(velocities[i], first[i] + second[i], epsilon = 1.0e-4);
        assert!(velocities[i].norm() <= first[i].norm() + second[i].norm() + 1.0e-4);
    }
}

#[test]
fn shattering_is_deterministic_for_a_fixed_seed() {
    let hull = HullMesh::ball(1.0, 12, 8);
    let shot = Shot::new(Point::new(-4.0, 0.05, 0.1), Vector::new(7.0, 0.0, 0.0), 0.9);
    let options = ShatterOptions {
        random_velocity_percent: Some(0.05),
        ..ShatterOptions::default()
    };

    let run = |seed: u64| {
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        shatter_hull(&hull, &[shot], &options, &mut rng)
    };

    let first = run(1234);
    let second = run(1234);

    assert_eq!(first.control_points, second.control_points);
    assert_eq!(first.velocities, second.velocities);

    let first_shards = first.shards.unwrap();
    let second_shards = second.shards.unwrap();
    assert_eq!(first_shards.len(), second_shards.len());

    for (a, b) in first_shards.iter().zip(second_shards.iter()) {
        assert_eq!(a.cell, b.cell);
        assert_eq!(a.center, b.center);
        assert_eq!(a.mesh_local.vertices(), b.mesh_local.vertices());
        assert_eq!(a.mesh_local.indices(), b.mesh_local.indices());
    }
}

#[test]
fn random_shots_always_uphold_the_response_contract() {
    let mut rng = oorandom::Rand32::new(42);

    for k in 0..60 {
        let half_extents = Vector::new(
            0.5 + rng.rand_float() * 2.0,
            0.5 + rng.rand_float() * 2.0,
            0.5 + rng.rand_float() * 2.0,
        );
        let hull = HullMesh::cuboid(half_extents);

        let origin = Point::new(
            (rng.rand_float() - 0.5) * 20.0,
            (rng.rand_float() - 0.5) * 20.0,
            (rng.rand_float() - 0.5) * 20.0,
        );
        let target = Point::new(
            (rng.rand_float() - 0.5) * 4.0,
            (rng.rand_float() - 0.5) * 4.0,
            (rng.rand_float() - 0.5) * 4.0,
        );
        let shot = Shot::new(origin, (target - origin) * 2.0, rng.rand_float());

        let options = ShatterOptions::default();
        let mut shatter_rng = Isaac64Rng::seed_from_u64(k);
        let response = shatter_hull(&hull, &[shot], &options, &mut shatter_rng);

        if response.hits.is_empty() {
            assert!(response.control_points.is_empty());
            assert!(response.voronoi.is_none());
            assert!(response.shards.is_none());
            assert!(response.velocities.is_none());
            continue;
        }

        assert!(response.control_points.len() >= options.min_control_points as usize);
        assert!(response.control_points.len() <= options.max_control_points as usize);

        // A degenerate carve downgrades to a partial response, never to a
        // half-filled one.
        let Some(shards) = &response.shards else {
            assert!(response.velocities.is_none());
            continue;
        };
        let velocities = response.velocities.as_ref().unwrap();
        assert!(!shards.is_empty());
        assert_eq!(velocities.len(), shards.len());

        let total: Real = shards.iter().map(|s| s.mesh_parent.signed_volume()).sum();
        assert_relative_eq!(total, hull.signed_volume(), max_relative = 1.0e-2);

        for (shard, velocity) in shards.iter().zip(velocities.iter()) {
            assert!(shard.mesh_parent.signed_volume() > 0.0);
            assert!(velocity.iter().all(|x| x.is_finite()));
        }
    }
}
