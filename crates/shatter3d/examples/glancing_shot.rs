extern crate nalgebra as na;

use na::{Point3, Vector3};
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use shatter3d::fracture::{shatter_hull, ShatterOptions, Shot};
use shatter3d::shape::HullMesh;

fn main() {
    let hull = HullMesh::ball(1.0, 16, 9);
    let options = ShatterOptions::default();

    // A shot that misses leaves the hull whole.
    let miss = Shot::new(Point3::new(-5.0, 3.0, 0.0), Vector3::new(10.0, 0.0, 0.0), 1.0);
    let mut rng = Isaac64Rng::seed_from_u64(1);
    let response = shatter_hull(&hull, &[miss], &options, &mut rng);
    assert!(response.hits.is_empty());
    assert!(response.shards.is_none());

    // A grazing shot stops right at the surface and chips the entry area.
    let graze = Shot::new(Point3::new(-5.0, 0.6, 0.0), Vector3::new(10.0, 0.0, 0.0), 0.0);
    let mut rng = Isaac64Rng::seed_from_u64(1);
    let response = shatter_hull(&hull, &[graze], &options, &mut rng);
    assert_eq!(response.hits.len(), 1);
    assert!(response.shards.unwrap().len() >= 2);
}
