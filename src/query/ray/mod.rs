//! Ray-casting related definitions and implementations.

pub use self::ray::Ray;
pub use self::ray_hull::ray_crossings_with_hull;
pub use self::ray_triangle::ray_toi_with_triangle;

mod ray;
mod ray_hull;
mod ray_triangle;
