use na::RealField;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use shatter3d::fracture::{percent_of_force, shatter_hull, ShatterOptions, Shot};
use shatter3d::math::{Point, Real, Vector};
use shatter3d::shape::HullMesh;

fn random_distances(rng: &mut oorandom::Rand32) -> Vec<Real> {
    let count = rng.rand_range(2..12) as usize;
    (0..count).map(|_| 0.01 + rng.rand_float() * 10.0).collect()
}

#[test]
fn kernel_weights_always_sum_to_one() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..1000 {
        let distances = random_distances(&mut rng);
        let weights = percent_of_force(&distances, Real::e());

        assert_eq!(weights.len(), distances.len());
        assert!(weights.iter().all(|w| *w > 0.0 && *w <= 1.0));
        assert_relative_eq!(weights.iter().sum::<Real>(), 1.0, epsilon = 1.0e-4);
    }
}

#[test]
fn closer_shards_always_take_the_larger_weight() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..1000 {
        let distances = random_distances(&mut rng);
        let weights = percent_of_force(&distances, Real::e());

        for i in 0..distances.len() {
            for j in 0..distances.len() {
                if distances[j] - distances[i] > 1.0e-3 {
                    assert!(weights[i] > weights[j]);
                }
            }
        }
    }
}

#[test]
fn identical_distances_share_the_force_evenly() {
    let weights = percent_of_force(&[1.0, 1.0, 1.0, 1.0], Real::e());
    assert_eq!(weights, vec![0.25; 4]);
}

#[test]
fn velocities_scale_linearly_with_the_shot_multiplier() {
    let hull = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
    let shot = Shot::new(Point::new(-4.0, 0.1, 0.2), Vector::new(10.0, 0.0, 0.0), 1.0);

    let base = ShatterOptions::default();
    let scaled = ShatterOptions {
        shot_multiplier: 2.5,
        ..base
    };

    let response = shatter_hull(&hull, &[shot], &base, &mut Isaac64Rng::seed_from_u64(7));
    let boosted = shatter_hull(&hull, &[shot], &scaled, &mut Isaac64Rng::seed_from_u64(7));

    let velocities = response.velocities.unwrap();
    let boosted_velocities = boosted.velocities.unwrap();
    assert!(!velocities.is_empty());
    assert_eq!(velocities.len(), boosted_velocities.len());

    for (plain, boosted) in velocities.iter().zip(boosted_velocities.iter()) {
        assert_relative_eq!(*boosted, plain * 2.5, epsilon = 1.0e-4);
    }
}
