extern crate nalgebra as na;

use na::{Point3, Vector3};
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use shatter3d::fracture::{shatter_hull, ShatterOptions, Shot};
use shatter3d::shape::HullMesh;

fn main() {
    let hull = HullMesh::cuboid(Vector3::new(1.0, 1.0, 1.0));
    let shot = Shot::new(Point3::new(-5.0, 0.2, 0.1), Vector3::new(20.0, 0.0, 0.0), 1.0);
    let options = ShatterOptions::default();
    let mut rng = Isaac64Rng::seed_from_u64(42);

    let response = shatter_hull(&hull, &[shot], &options, &mut rng);

    let shards = response.shards.unwrap();
    let velocities = response.velocities.unwrap();

    assert!(shards.len() >= 2);
    assert_eq!(velocities.len(), shards.len());

    let total: f32 = shards.iter().map(|s| s.mesh_parent.signed_volume()).sum();
    assert!((total - hull.signed_volume()).abs() <= 1.0e-2);
}
